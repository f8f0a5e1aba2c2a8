//! Profile object, queries and mutations

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, Error, ErrorExtensions, Object, Result};
use uuid::Uuid;

use super::error::null_if_not_found;
use super::loaders::MemberTypeLoader;
use super::{ChangeProfileInput, CreateProfileInput, MemberType, MemberTypeId};
use crate::entities::profile;
use crate::storage::{ProfileStorage, SeaOrmProfileStorage};

#[derive(Clone, Debug)]
pub struct Profile {
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: String,
}

#[Object]
impl Profile {
    async fn id(&self) -> Uuid {
        self.id
    }

    async fn is_male(&self) -> bool {
        self.is_male
    }

    async fn year_of_birth(&self) -> i32 {
        self.year_of_birth
    }

    async fn user_id(&self) -> Uuid {
        self.user_id
    }

    async fn member_type_id(&self) -> Result<MemberTypeId> {
        self.member_type_id.parse::<MemberTypeId>().map_err(Error::new)
    }

    async fn member_type(&self, ctx: &Context<'_>) -> Result<Option<MemberType>> {
        let loader = ctx.data::<DataLoader<MemberTypeLoader>>()?;
        loader.load_one(self.member_type_id.clone()).await
    }
}

impl From<profile::Model> for Profile {
    fn from(model: profile::Model) -> Self {
        Self {
            id: model.id,
            is_male: model.is_male,
            year_of_birth: model.year_of_birth,
            user_id: model.user_id,
            member_type_id: model.member_type_id,
        }
    }
}

#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let profiles = storage.list_profiles().await.map_err(|e| e.extend())?;
        Ok(profiles.into_iter().map(Profile::from).collect())
    }

    async fn profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Profile>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let profile = null_if_not_found(ctx, storage.get_profile(id).await)?;
        Ok(profile.map(Profile::from))
    }
}

#[derive(Default)]
pub struct ProfileMutation;

#[Object]
impl ProfileMutation {
    async fn create_profile(&self, ctx: &Context<'_>, dto: CreateProfileInput) -> Result<Profile> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let profile = storage
            .create_profile(dto.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(profile.into())
    }

    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeProfileInput,
    ) -> Result<Profile> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let profile = storage
            .change_profile(id, dto.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(profile.into())
    }

    /// Returns the id of the deleted profile
    async fn delete_profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<String> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let deleted = storage.delete_profile(id).await.map_err(|e| e.extend())?;
        Ok(deleted.to_string())
    }
}

type Storage = SeaOrmProfileStorage;
