//! User storage

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::StorageError;
use crate::entities::user;

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub balance: f64,
}

/// Partial update of a user; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl UserChanges {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.balance.is_none()
    }
}

/// Persistence operations for users.
///
/// Implementors only provide the connection; every operation has a default
/// SeaORM implementation that can be overridden.
#[allow(async_fn_in_trait)]
pub trait UserStorage: Send + Sync {
    fn db(&self) -> &DatabaseConnection;

    #[tracing::instrument(skip_all)]
    async fn list_users(&self) -> Result<Vec<user::Model>, StorageError> {
        Ok(user::Entity::find().all(self.db()).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn get_user(&self, id: Uuid) -> Result<user::Model, StorageError> {
        user::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::not_found("user", id))
    }

    /// Batch lookup; ids without a row are simply absent from the result
    #[tracing::instrument(skip_all, fields(keys = ids.len()))]
    async fn users_by_ids(&self, ids: &[Uuid]) -> Result<Vec<user::Model>, StorageError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(self.db())
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn create_user(&self, input: NewUser) -> Result<user::Model, StorageError> {
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            balance: Set(input.balance),
        };
        let created = model.insert(self.db()).await?;
        tracing::debug!(user_id = %created.id, "created user");
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    async fn change_user(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<user::Model, StorageError> {
        if changes.is_empty() {
            return Err(StorageError::InvalidArgument(
                "change requires at least one field".into(),
            ));
        }
        let mut active = self.get_user(id).await?.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(balance) = changes.balance {
            active.balance = Set(balance);
        }
        Ok(active.update(self.db()).await?)
    }

    /// Deletes the user; profile, posts and subscriptions cascade
    #[tracing::instrument(skip(self))]
    async fn delete_user(&self, id: Uuid) -> Result<Uuid, StorageError> {
        let result = user::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(StorageError::not_found("user", id));
        }
        tracing::debug!(user_id = %id, "deleted user");
        Ok(id)
    }
}

/// SeaORM-backed [`UserStorage`]
#[derive(Clone)]
pub struct SeaOrmUserStorage {
    db: DatabaseConnection,
}

impl SeaOrmUserStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UserStorage for SeaOrmUserStorage {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_changes() {
        assert!(UserChanges::default().is_empty());
        let changes = UserChanges {
            balance: Some(1.5),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
