//! DataLoaders for relation fields
//!
//! Relation resolvers go through these loaders so that a list query issues
//! one batched storage call per relation instead of one per parent row.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::ErrorExtensions;
use async_graphql::dataloader::Loader;
use uuid::Uuid;

use super::{MemberType, Post, Profile, User};
use crate::storage::{
    MemberTypeStorage, PostStorage, ProfileStorage, SeaOrmMemberTypeStorage, SeaOrmPostStorage,
    SeaOrmProfileStorage, SeaOrmSubscriptionStorage, SubscriptionStorage,
};

/// Group `(key, value)` pairs into per-key vectors
fn group<V>(pairs: impl IntoIterator<Item = (Uuid, V)>) -> HashMap<Uuid, Vec<V>> {
    let mut map: HashMap<Uuid, Vec<V>> = HashMap::new();
    for (key, value) in pairs {
        map.entry(key).or_default().push(value);
    }
    map
}

/// Profile of a user, keyed by user id
pub struct ProfileByUserLoader {
    storage: Arc<SeaOrmProfileStorage>,
}

impl ProfileByUserLoader {
    pub fn new(storage: Arc<SeaOrmProfileStorage>) -> Self {
        Self { storage }
    }
}

impl Loader<Uuid> for ProfileByUserLoader {
    type Value = Profile;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let profiles = self
            .storage
            .profiles_by_users(keys)
            .await
            .map_err(|e| e.extend())?;
        Ok(profiles
            .into_iter()
            .map(|p| (p.user_id, Profile::from(p)))
            .collect())
    }
}

/// Posts written by a user, keyed by author id
pub struct PostsByAuthorLoader {
    storage: Arc<SeaOrmPostStorage>,
}

impl PostsByAuthorLoader {
    pub fn new(storage: Arc<SeaOrmPostStorage>) -> Self {
        Self { storage }
    }
}

impl Loader<Uuid> for PostsByAuthorLoader {
    type Value = Vec<Post>;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let posts = self
            .storage
            .posts_by_authors(keys)
            .await
            .map_err(|e| e.extend())?;
        Ok(group(posts.into_iter().map(|p| (p.author_id, Post::from(p)))))
    }
}

/// Member type by its id
pub struct MemberTypeLoader {
    storage: Arc<SeaOrmMemberTypeStorage>,
}

impl MemberTypeLoader {
    pub fn new(storage: Arc<SeaOrmMemberTypeStorage>) -> Self {
        Self { storage }
    }
}

impl Loader<String> for MemberTypeLoader {
    type Value = MemberType;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[String]) -> Result<HashMap<String, Self::Value>, Self::Error> {
        let member_types = self
            .storage
            .member_types_by_ids(keys)
            .await
            .map_err(|e| e.extend())?;
        Ok(member_types
            .into_iter()
            .map(|m| (m.id.clone(), MemberType::from(m)))
            .collect())
    }
}

/// Profiles on a member type, keyed by member type id
pub struct ProfilesByMemberTypeLoader {
    storage: Arc<SeaOrmProfileStorage>,
}

impl ProfilesByMemberTypeLoader {
    pub fn new(storage: Arc<SeaOrmProfileStorage>) -> Self {
        Self { storage }
    }
}

impl Loader<String> for ProfilesByMemberTypeLoader {
    type Value = Vec<Profile>;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[String]) -> Result<HashMap<String, Self::Value>, Self::Error> {
        let profiles = self
            .storage
            .profiles_by_member_types(keys)
            .await
            .map_err(|e| e.extend())?;
        let mut map: HashMap<String, Self::Value> = HashMap::new();
        for profile in profiles {
            map.entry(profile.member_type_id.clone())
                .or_default()
                .push(Profile::from(profile));
        }
        Ok(map)
    }
}

/// Authors a user is subscribed to, keyed by subscriber id
pub struct AuthorsBySubscriberLoader {
    storage: Arc<SeaOrmSubscriptionStorage>,
}

impl AuthorsBySubscriberLoader {
    pub fn new(storage: Arc<SeaOrmSubscriptionStorage>) -> Self {
        Self { storage }
    }
}

impl Loader<Uuid> for AuthorsBySubscriberLoader {
    type Value = Vec<User>;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let pairs = self
            .storage
            .authors_of(keys)
            .await
            .map_err(|e| e.extend())?;
        Ok(group(pairs.into_iter().map(|(k, u)| (k, User::from(u)))))
    }
}

/// Users subscribed to an author, keyed by author id
pub struct SubscribersByAuthorLoader {
    storage: Arc<SeaOrmSubscriptionStorage>,
}

impl SubscribersByAuthorLoader {
    pub fn new(storage: Arc<SeaOrmSubscriptionStorage>) -> Self {
        Self { storage }
    }
}

impl Loader<Uuid> for SubscribersByAuthorLoader {
    type Value = Vec<User>;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let pairs = self
            .storage
            .subscribers_of(keys)
            .await
            .map_err(|e| e.extend())?;
        Ok(group(pairs.into_iter().map(|(k, u)| (k, User::from(u)))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_keeps_every_value_per_key() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let grouped = group([(a, 1), (b, 2), (a, 3)]);
        assert_eq!(grouped[&a], vec![1, 3]);
        assert_eq!(grouped[&b], vec![2]);
    }
}
