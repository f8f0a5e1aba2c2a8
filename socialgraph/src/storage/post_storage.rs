//! Post storage

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::StorageError;
use crate::entities::post;

/// Fields required to create a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

/// Partial update of a post. The author cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Persistence operations for posts
#[allow(async_fn_in_trait)]
pub trait PostStorage: Send + Sync {
    fn db(&self) -> &DatabaseConnection;

    #[tracing::instrument(skip_all)]
    async fn list_posts(&self) -> Result<Vec<post::Model>, StorageError> {
        Ok(post::Entity::find().all(self.db()).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn get_post(&self, id: Uuid) -> Result<post::Model, StorageError> {
        post::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| StorageError::not_found("post", id))
    }

    /// All posts written by any of the given authors
    #[tracing::instrument(skip_all, fields(keys = author_ids.len()))]
    async fn posts_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<Vec<post::Model>, StorageError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(post::Entity::find()
            .filter(post::Column::AuthorId.is_in(author_ids.iter().copied()))
            .all(self.db())
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn create_post(&self, input: NewPost) -> Result<post::Model, StorageError> {
        let model = post::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            content: Set(input.content),
            author_id: Set(input.author_id),
        };
        let created = model.insert(self.db()).await?;
        tracing::debug!(post_id = %created.id, author_id = %created.author_id, "created post");
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    async fn change_post(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<post::Model, StorageError> {
        if changes.is_empty() {
            return Err(StorageError::InvalidArgument(
                "change requires at least one field".into(),
            ));
        }
        let mut active = self.get_post(id).await?.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }
        Ok(active.update(self.db()).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_post(&self, id: Uuid) -> Result<Uuid, StorageError> {
        let result = post::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(StorageError::not_found("post", id));
        }
        Ok(id)
    }
}

/// SeaORM-backed [`PostStorage`]
#[derive(Clone)]
pub struct SeaOrmPostStorage {
    db: DatabaseConnection,
}

impl SeaOrmPostStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PostStorage for SeaOrmPostStorage {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
