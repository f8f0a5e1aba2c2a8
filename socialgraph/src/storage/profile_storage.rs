//! Profile storage

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::StorageError;
use crate::entities::profile;

/// Fields required to create a profile
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: String,
}

/// Partial update of a profile. The owning user cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<String>,
}

impl ProfileChanges {
    fn is_empty(&self) -> bool {
        self.is_male.is_none() && self.year_of_birth.is_none() && self.member_type_id.is_none()
    }
}

/// Persistence operations for profiles
#[allow(async_fn_in_trait)]
pub trait ProfileStorage: Send + Sync {
    fn db(&self) -> &DatabaseConnection;

    #[tracing::instrument(skip_all)]
    async fn list_profiles(&self) -> Result<Vec<profile::Model>, StorageError> {
        Ok(profile::Entity::find().all(self.db()).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn get_profile(&self, id: Uuid) -> Result<profile::Model, StorageError> {
        profile::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::not_found("profile", id))
    }

    /// Profiles owned by any of the given users (at most one per user)
    #[tracing::instrument(skip_all, fields(keys = user_ids.len()))]
    async fn profiles_by_users(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<profile::Model>, StorageError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(profile::Entity::find()
            .filter(profile::Column::UserId.is_in(user_ids.iter().copied()))
            .all(self.db())
            .await?)
    }

    #[tracing::instrument(skip_all, fields(keys = member_type_ids.len()))]
    async fn profiles_by_member_types(
        &self,
        member_type_ids: &[String],
    ) -> Result<Vec<profile::Model>, StorageError> {
        if member_type_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(profile::Entity::find()
            .filter(profile::Column::MemberTypeId.is_in(member_type_ids.iter().cloned()))
            .all(self.db())
            .await?)
    }

    /// Fails with a constraint violation when the user already has a
    /// profile or the user / member type does not exist
    #[tracing::instrument(skip(self))]
    async fn create_profile(&self, input: NewProfile) -> Result<profile::Model, StorageError> {
        let model = profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            is_male: Set(input.is_male),
            year_of_birth: Set(input.year_of_birth),
            user_id: Set(input.user_id),
            member_type_id: Set(input.member_type_id),
        };
        let created = model.insert(self.db()).await?;
        tracing::debug!(profile_id = %created.id, user_id = %created.user_id, "created profile");
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    async fn change_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<profile::Model, StorageError> {
        if changes.is_empty() {
            return Err(StorageError::InvalidArgument(
                "change requires at least one field".into(),
            ));
        }
        let mut active = self.get_profile(id).await?.into_active_model();
        if let Some(is_male) = changes.is_male {
            active.is_male = Set(is_male);
        }
        if let Some(year_of_birth) = changes.year_of_birth {
            active.year_of_birth = Set(year_of_birth);
        }
        if let Some(member_type_id) = changes.member_type_id {
            active.member_type_id = Set(member_type_id);
        }
        Ok(active.update(self.db()).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_profile(&self, id: Uuid) -> Result<Uuid, StorageError> {
        let result = profile::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(StorageError::not_found("profile", id));
        }
        Ok(id)
    }
}

/// SeaORM-backed [`ProfileStorage`]
#[derive(Clone)]
pub struct SeaOrmProfileStorage {
    db: DatabaseConnection,
}

impl SeaOrmProfileStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ProfileStorage for SeaOrmProfileStorage {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_changes() {
        assert!(ProfileChanges::default().is_empty());
        let changes = ProfileChanges {
            member_type_id: Some("BUSINESS".into()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
