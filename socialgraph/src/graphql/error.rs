//! Mapping of storage errors onto GraphQL errors
//!
//! Every resolver error carries an `extensions.code` so clients can tell a
//! missing row from a bad reference or a server fault.

use async_graphql::{Context, Error, ErrorExtensions, PathSegment};

use crate::storage::StorageError;

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

/// Message sent to clients for unique and foreign key violations
pub const CONSTRAINT_VIOLATION_MESSAGE: &str = "referenced row does not exist or already exists";

impl StorageError {
    /// GraphQL error code reported in `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::NotFound(_) => NOT_FOUND,
            StorageError::InvalidArgument(_) => BAD_USER_INPUT,
            e if e.is_constraint_violation() => BAD_USER_INPUT,
            StorageError::Database(_) => INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorExtensions for StorageError {
    fn extend(&self) -> Error {
        let message = match self {
            StorageError::Database(e) if self.is_constraint_violation() => {
                tracing::debug!(error = %e, "constraint violation");
                CONSTRAINT_VIOLATION_MESSAGE.to_owned()
            }
            StorageError::Database(e) => {
                tracing::error!(error = %e, "database error");
                self.to_string()
            }
            _ => self.to_string(),
        };
        let code = self.code();
        Error::new(message).extend_with(|_, ext| ext.set("code", code))
    }
}

/// Resolve a single-row lookup. A missing row resolves the field to `null`
/// and reports a `NOT_FOUND` error at the field's path; any other failure
/// fails the field.
pub(crate) fn null_if_not_found<T>(
    ctx: &Context<'_>,
    result: Result<T, StorageError>,
) -> async_graphql::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e @ StorageError::NotFound(_)) => {
            let path = ctx
                .path_node
                .map(|node| {
                    node.to_string_vec()
                        .into_iter()
                        .map(PathSegment::Field)
                        .collect()
                })
                .unwrap_or_default();
            ctx.add_error(e.extend().into_server_error(ctx.item.pos).with_path(path));
            Ok(None)
        }
        Err(e) => Err(e.extend()),
    }
}
