//! Post object, queries and mutations

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};
use uuid::Uuid;

use super::error::null_if_not_found;
use super::{ChangePostInput, CreatePostInput};
use crate::entities::post;
use crate::storage::{PostStorage, SeaOrmPostStorage};

#[derive(Clone, Debug)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

#[Object]
impl Post {
    async fn id(&self) -> Uuid {
        self.id
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn content(&self) -> &str {
        &self.content
    }

    async fn author_id(&self) -> Uuid {
        self.author_id
    }
}

impl From<post::Model> for Post {
    fn from(model: post::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author_id: model.author_id,
        }
    }
}

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let posts = storage.list_posts().await.map_err(|e| e.extend())?;
        Ok(posts.into_iter().map(Post::from).collect())
    }

    async fn post(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Post>> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let post = null_if_not_found(ctx, storage.get_post(id).await)?;
        Ok(post.map(Post::from))
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<Post> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let post = storage
            .create_post(dto.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(post.into())
    }

    async fn change_post(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangePostInput,
    ) -> Result<Post> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let post = storage
            .change_post(id, dto.into())
            .await
            .map_err(|e| e.extend())?;
        Ok(post.into())
    }

    /// Returns the id of the deleted post
    async fn delete_post(&self, ctx: &Context<'_>, id: Uuid) -> Result<String> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let deleted = storage.delete_post(id).await.map_err(|e| e.extend())?;
        Ok(deleted.to_string())
    }
}

type Storage = SeaOrmPostStorage;
