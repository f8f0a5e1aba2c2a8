//! MemberType object and queries

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, Error, ErrorExtensions, Object, Result};

use super::error::null_if_not_found;
use super::loaders::ProfilesByMemberTypeLoader;
use super::{MemberTypeId, Profile};
use crate::entities::member_type;
use crate::storage::{MemberTypeStorage, SeaOrmMemberTypeStorage};

/// Membership tier with its discount and monthly post allowance
#[derive(Clone, Debug)]
pub struct MemberType {
    pub id: String,
    pub discount: f64,
    pub posts_limit_per_month: i32,
}

#[Object]
impl MemberType {
    async fn id(&self) -> Result<MemberTypeId> {
        self.id.parse::<MemberTypeId>().map_err(Error::new)
    }

    async fn discount(&self) -> f64 {
        self.discount
    }

    async fn posts_limit_per_month(&self) -> i32 {
        self.posts_limit_per_month
    }

    /// Profiles on this tier
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let loader = ctx.data::<DataLoader<ProfilesByMemberTypeLoader>>()?;
        Ok(loader.load_one(self.id.clone()).await?.unwrap_or_default())
    }
}

impl From<member_type::Model> for MemberType {
    fn from(model: member_type::Model) -> Self {
        Self {
            id: model.id,
            discount: model.discount,
            posts_limit_per_month: model.posts_limit_per_month,
        }
    }
}

#[derive(Default)]
pub struct MemberTypeQuery;

#[Object]
impl MemberTypeQuery {
    async fn member_types(&self, ctx: &Context<'_>) -> Result<Vec<MemberType>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let member_types = storage.list_member_types().await.map_err(|e| e.extend())?;
        Ok(member_types.into_iter().map(MemberType::from).collect())
    }

    async fn member_type(&self, ctx: &Context<'_>, id: MemberTypeId) -> Result<Option<MemberType>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let member_type = null_if_not_found(ctx, storage.get_member_type(id.as_str()).await)?;
        Ok(member_type.map(MemberType::from))
    }
}

type Storage = SeaOrmMemberTypeStorage;
