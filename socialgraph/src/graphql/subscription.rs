//! Mutations on the subscriber -> author relation

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};
use uuid::Uuid;

use crate::storage::{SeaOrmSubscriptionStorage, SubscriptionStorage};

#[derive(Default)]
pub struct SubscriptionMutation;

#[Object]
impl SubscriptionMutation {
    /// Subscribe `user_id` to `author_id`; returns the subscriber id
    async fn subscribe_to(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<String> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let row = storage
            .subscribe(user_id, author_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(row.subscriber_id.to_string())
    }

    /// Remove the subscription; returns the subscriber id
    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<String> {
        let storage = ctx.data::<Arc<Storage>>()?;
        let row = storage
            .unsubscribe(user_id, author_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(row.subscriber_id.to_string())
    }
}

type Storage = SeaOrmSubscriptionStorage;
