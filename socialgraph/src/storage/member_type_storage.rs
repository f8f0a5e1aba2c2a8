//! Member type storage (read-only; rows are seeded by migration)

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::StorageError;
use crate::entities::member_type;

#[allow(async_fn_in_trait)]
pub trait MemberTypeStorage: Send + Sync {
    fn db(&self) -> &DatabaseConnection;

    #[tracing::instrument(skip_all)]
    async fn list_member_types(&self) -> Result<Vec<member_type::Model>, StorageError> {
        Ok(member_type::Entity::find().all(self.db()).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn get_member_type(&self, id: &str) -> Result<member_type::Model, StorageError> {
        member_type::Entity::find_by_id(id.to_owned())
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::not_found("member type", id))
    }

    #[tracing::instrument(skip_all, fields(keys = ids.len()))]
    async fn member_types_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<member_type::Model>, StorageError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(member_type::Entity::find()
            .filter(member_type::Column::Id.is_in(ids.iter().cloned()))
            .all(self.db())
            .await?)
    }
}

/// SeaORM-backed [`MemberTypeStorage`]
#[derive(Clone)]
pub struct SeaOrmMemberTypeStorage {
    db: DatabaseConnection,
}

impl SeaOrmMemberTypeStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl MemberTypeStorage for SeaOrmMemberTypeStorage {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
