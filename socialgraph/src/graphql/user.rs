//! User object, queries and mutations
//!
//! The object is exposed as `UserType`. Its relation fields resolve through
//! DataLoaders, so `users { posts profile }` costs three storage calls no
//! matter how many users there are.

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, ErrorExtensions, Object, Result};
use uuid::Uuid;

use super::error::null_if_not_found;
use super::loaders::{
    AuthorsBySubscriberLoader, PostsByAuthorLoader, ProfileByUserLoader, SubscribersByAuthorLoader,
};
use super::{ChangeUserInput, CreateUserInput, Post, Profile};
use crate::entities::user;
use crate::storage::{SeaOrmUserStorage, UserStorage};

#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
}

#[Object(name = "UserType")]
impl User {
    async fn id(&self) -> Uuid {
        self.id
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn balance(&self) -> f64 {
        self.balance
    }

    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<Profile>> {
        let loader = ctx.data::<DataLoader<ProfileByUserLoader>>()?;
        loader.load_one(self.id).await
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let loader = ctx.data::<DataLoader<PostsByAuthorLoader>>()?;
        Ok(loader.load_one(self.id).await?.unwrap_or_default())
    }

    /// Authors this user is subscribed to
    async fn user_subscribed_to(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let loader = ctx.data::<DataLoader<AuthorsBySubscriberLoader>>()?;
        Ok(loader.load_one(self.id).await?.unwrap_or_default())
    }

    /// Users subscribed to this user
    async fn subscribed_to_user(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let loader = ctx.data::<DataLoader<SubscribersByAuthorLoader>>()?;
        Ok(loader.load_one(self.id).await?.unwrap_or_default())
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            balance: model.balance,
        }
    }
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let users = storage.list_users().await.map_err(|e| e.extend())?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<User>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let user = null_if_not_found(ctx, storage.get_user(id).await)?;
        Ok(user.map(User::from))
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<User> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let user = storage
            .create_user(dto.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(user.into())
    }

    async fn change_user(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeUserInput,
    ) -> Result<User> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let user = storage
            .change_user(id, dto.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(user.into())
    }

    /// Returns the id of the deleted user
    async fn delete_user(&self, ctx: &Context<'_>, id: Uuid) -> Result<String> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let deleted = storage.delete_user(id).await.map_err(|e| e.extend())?;
        Ok(deleted.to_string())
    }
}

type Storage = SeaOrmUserStorage;
