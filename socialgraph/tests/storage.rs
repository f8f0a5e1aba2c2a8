mod common;

use std::sync::{Arc, Mutex};

use socialgraph::StorageError;
use socialgraph::storage::{
    NewUser, SeaOrmSubscriptionStorage, SeaOrmUserStorage, SubscriptionStorage, UserChanges,
    UserStorage,
};
use tracing::span::{Attributes, Id};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use uuid::Uuid;

/// Records the name of every span opened while installed
#[derive(Clone, Default)]
struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

impl<S: tracing::Subscriber> Layer<S> for SpanNames {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().push(attrs.metadata().name());
    }
}

#[tokio::test]
async fn test_operations_open_spans() {
    let db = common::setup_db().await;
    let storage = SeaOrmUserStorage::new(db);
    let names = SpanNames::default();
    let _guard =
        tracing::subscriber::set_default(tracing_subscriber::registry().with(names.clone()));

    let user = storage
        .create_user(NewUser {
            name: "traced".into(),
            balance: 1.0,
        })
        .await
        .unwrap();
    storage.get_user(user.id).await.unwrap();
    storage.users_by_ids(&[user.id]).await.unwrap();

    let names = names.0.lock().unwrap();
    for expected in ["create_user", "get_user", "users_by_ids"] {
        assert!(names.contains(&expected), "no `{expected}` span in {names:?}");
    }
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let storage = SeaOrmUserStorage::new(common::setup_db().await);

    let err = storage.get_user(Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn test_empty_change_is_invalid_argument() {
    let storage = SeaOrmUserStorage::new(common::setup_db().await);
    let user = storage
        .create_user(NewUser {
            name: "u".into(),
            balance: 0.0,
        })
        .await
        .unwrap();

    let err = storage
        .change_user(user.id, UserChanges::default())
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_duplicate_subscription_is_constraint_violation() {
    let db = common::setup_db().await;
    let users = SeaOrmUserStorage::new(db.clone());
    let subscriptions = SeaOrmSubscriptionStorage::new(db);
    let reader = users
        .create_user(NewUser {
            name: "reader".into(),
            balance: 0.0,
        })
        .await
        .unwrap();
    let author = users
        .create_user(NewUser {
            name: "author".into(),
            balance: 0.0,
        })
        .await
        .unwrap();

    subscriptions.subscribe(reader.id, author.id).await.unwrap();
    let err = subscriptions
        .subscribe(reader.id, author.id)
        .await
        .unwrap_err();

    assert!(err.is_constraint_violation());
}
