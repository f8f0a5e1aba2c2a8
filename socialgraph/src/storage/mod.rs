//! Storage layer
//!
//! Each aggregate has a storage trait whose default methods hold the SeaORM
//! implementation, plus a `SeaOrm*Storage` struct that only supplies the
//! connection. Resolvers talk to the structs through the traits.

use sea_orm::{DbErr, SqlErr};

pub mod member_type_storage;
pub mod post_storage;
pub mod profile_storage;
pub mod subscription_storage;
pub mod user_storage;

pub use member_type_storage::{MemberTypeStorage, SeaOrmMemberTypeStorage};
pub use post_storage::{NewPost, PostChanges, PostStorage, SeaOrmPostStorage};
pub use profile_storage::{NewProfile, ProfileChanges, ProfileStorage, SeaOrmProfileStorage};
pub use subscription_storage::{SeaOrmSubscriptionStorage, SubscriptionStorage};
pub use user_storage::{NewUser, SeaOrmUserStorage, UserChanges, UserStorage};

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl StorageError {
    /// True when the database rejected the write because of a unique or
    /// foreign key constraint, i.e. the caller sent bad references.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StorageError::Database(e) => matches!(
                e.sql_err(),
                Some(SqlErr::UniqueConstraintViolation(_))
                    | Some(SqlErr::ForeignKeyConstraintViolation(_))
            ),
            _ => false,
        }
    }

    pub(crate) fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        StorageError::NotFound(format!("{entity} {id}"))
    }
}
