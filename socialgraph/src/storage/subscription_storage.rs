//! Subscription storage
//!
//! A row in `subscribers_on_authors` means `subscriber_id` follows
//! `author_id`.

use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::StorageError;
use crate::entities::{subscribers_on_authors, user};

#[allow(async_fn_in_trait)]
pub trait SubscriptionStorage: Send + Sync {
    fn db(&self) -> &DatabaseConnection;

    #[tracing::instrument(skip(self))]
    async fn subscribe(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> Result<subscribers_on_authors::Model, StorageError> {
        let model = subscribers_on_authors::ActiveModel {
            subscriber_id: Set(subscriber_id),
            author_id: Set(author_id),
        };
        let created = model.insert(self.db()).await?;
        tracing::debug!(%subscriber_id, %author_id, "subscribed");
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    async fn unsubscribe(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> Result<subscribers_on_authors::Model, StorageError> {
        let result = subscribers_on_authors::Entity::delete_by_id((subscriber_id, author_id))
            .exec(self.db())
            .await?;
        if result.rows_affected == 0 {
            return Err(StorageError::not_found(
                "subscription",
                format!("{subscriber_id} -> {author_id}"),
            ));
        }
        tracing::debug!(%subscriber_id, %author_id, "unsubscribed");
        Ok(subscribers_on_authors::Model {
            subscriber_id,
            author_id,
        })
    }

    /// Pairs of (subscriber id, author) for every author the given users follow
    #[tracing::instrument(skip_all, fields(keys = subscriber_ids.len()))]
    async fn authors_of(
        &self,
        subscriber_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, user::Model)>, StorageError> {
        if subscriber_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = subscribers_on_authors::Entity::find()
            .filter(
                subscribers_on_authors::Column::SubscriberId.is_in(subscriber_ids.iter().copied()),
            )
            .all(self.db())
            .await?;
        let pairs = rows.into_iter().map(|r| (r.subscriber_id, r.author_id));
        resolve_users(self.db(), pairs).await
    }

    /// Pairs of (author id, subscriber) for every user following the given authors
    #[tracing::instrument(skip_all, fields(keys = author_ids.len()))]
    async fn subscribers_of(
        &self,
        author_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, user::Model)>, StorageError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = subscribers_on_authors::Entity::find()
            .filter(subscribers_on_authors::Column::AuthorId.is_in(author_ids.iter().copied()))
            .all(self.db())
            .await?;
        let pairs = rows.into_iter().map(|r| (r.author_id, r.subscriber_id));
        resolve_users(self.db(), pairs).await
    }
}

/// Replace the second id of each pair with its user row, in one query
async fn resolve_users(
    db: &DatabaseConnection,
    pairs: impl Iterator<Item = (Uuid, Uuid)>,
) -> Result<Vec<(Uuid, user::Model)>, StorageError> {
    let pairs: Vec<(Uuid, Uuid)> = pairs.collect();
    if pairs.is_empty() {
        return Ok(Vec::new());
    }
    let mut user_ids: Vec<Uuid> = pairs.iter().map(|(_, id)| *id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let users: HashMap<Uuid, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(pairs
        .into_iter()
        .filter_map(|(key, id)| users.get(&id).map(|u| (key, u.clone())))
        .collect())
}

/// SeaORM-backed [`SubscriptionStorage`]
#[derive(Clone)]
pub struct SeaOrmSubscriptionStorage {
    db: DatabaseConnection,
}

impl SeaOrmSubscriptionStorage {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SubscriptionStorage for SeaOrmSubscriptionStorage {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
