//! Schema assembly

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, MergedObject, Schema};
use sea_orm::DatabaseConnection;

use super::depth::DepthLimit;
use super::loaders::{
    AuthorsBySubscriberLoader, MemberTypeLoader, PostsByAuthorLoader, ProfileByUserLoader,
    ProfilesByMemberTypeLoader, SubscribersByAuthorLoader,
};
use super::{
    MemberTypeQuery, PostMutation, PostQuery, ProfileMutation, ProfileQuery,
    SubscriptionMutation, UserMutation, UserQuery,
};
use crate::storage::{
    SeaOrmMemberTypeStorage, SeaOrmPostStorage, SeaOrmProfileStorage, SeaOrmSubscriptionStorage,
    SeaOrmUserStorage,
};

/// Combined Query type
#[derive(MergedObject, Default)]
#[graphql(name = "RootQuery")]
pub struct RootQuery(MemberTypeQuery, PostQuery, UserQuery, ProfileQuery);

/// Combined Mutation type
#[derive(MergedObject, Default)]
#[graphql(name = "Mutations")]
pub struct Mutations(
    UserMutation,
    ProfileMutation,
    PostMutation,
    SubscriptionMutation,
);

pub type AppSchema = Schema<RootQuery, Mutations, EmptySubscription>;

/// Validation limits applied to every incoming document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaLimits {
    /// Levels of nesting allowed below a root field
    pub max_depth: usize,
    pub max_complexity: Option<usize>,
}

impl Default for SchemaLimits {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_complexity: None,
        }
    }
}

/// Build the schema with storages and loaders for the given connection
pub fn build_schema(db: DatabaseConnection, limits: SchemaLimits) -> AppSchema {
    let user_storage = Arc::new(SeaOrmUserStorage::new(db.clone()));
    let profile_storage = Arc::new(SeaOrmProfileStorage::new(db.clone()));
    let post_storage = Arc::new(SeaOrmPostStorage::new(db.clone()));
    let member_type_storage = Arc::new(SeaOrmMemberTypeStorage::new(db.clone()));
    let subscription_storage = Arc::new(SeaOrmSubscriptionStorage::new(db));

    let mut builder = Schema::build(
        RootQuery::default(),
        Mutations::default(),
        EmptySubscription,
    )
    .extension(DepthLimit::new(limits.max_depth));
    if let Some(complexity) = limits.max_complexity {
        builder = builder.limit_complexity(complexity);
    }

    builder
        .data(DataLoader::new(
            ProfileByUserLoader::new(profile_storage.clone()),
            tokio::spawn,
        ))
        .data(DataLoader::new(
            ProfilesByMemberTypeLoader::new(profile_storage.clone()),
            tokio::spawn,
        ))
        .data(DataLoader::new(
            PostsByAuthorLoader::new(post_storage.clone()),
            tokio::spawn,
        ))
        .data(DataLoader::new(
            MemberTypeLoader::new(member_type_storage.clone()),
            tokio::spawn,
        ))
        .data(DataLoader::new(
            AuthorsBySubscriberLoader::new(subscription_storage.clone()),
            tokio::spawn,
        ))
        .data(DataLoader::new(
            SubscribersByAuthorLoader::new(subscription_storage.clone()),
            tokio::spawn,
        ))
        .data(user_storage)
        .data(profile_storage)
        .data(post_storage)
        .data(member_type_storage)
        .data(subscription_storage)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = SchemaLimits::default();
        assert_eq!(limits.max_depth, 5);
        assert_eq!(limits.max_complexity, None);
    }

    #[test]
    fn test_sdl_keeps_type_names() {
        let sdl = build_schema(DatabaseConnection::Disconnected, SchemaLimits::default()).sdl();
        for name in [
            "type RootQuery",
            "type Mutations",
            "type UserType",
            "type MemberType",
            "type Profile",
            "type Post",
            "enum MemberTypeId",
            "input CreateUserInput",
            "input ChangeProfileInput",
            "scalar UUID",
        ] {
            assert!(sdl.contains(name), "missing `{name}` in SDL");
        }
    }
}
