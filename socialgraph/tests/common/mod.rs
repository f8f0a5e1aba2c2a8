//! Shared fixtures: an in-memory SQLite database migrated with the real
//! migrator, and helpers for running GraphQL documents against it.

#![allow(dead_code)]

use async_graphql::{Request, Variables};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use socialgraph::{AppSchema, SchemaLimits, build_schema};
use socialgraph_migration::{Migrator, MigratorTrait};

pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn setup() -> (AppSchema, DatabaseConnection) {
    let db = setup_db().await;
    let schema = build_schema(db.clone(), SchemaLimits::default());
    (schema, db)
}

/// Execute a document and return the serialized `{ data, errors }` body
pub async fn exec(schema: &AppSchema, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    let response = schema.execute(request).await;
    serde_json::to_value(&response).expect("serialize response")
}

/// Execute a document that must succeed and return its `data`
pub async fn exec_ok(schema: &AppSchema, query: &str, variables: Value) -> Value {
    let body = exec(schema, query, variables).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    body["data"].clone()
}

/// `extensions.code` of the first error, if any
pub fn error_code(body: &Value) -> Option<&str> {
    body["errors"][0]["extensions"]["code"].as_str()
}

pub async fn create_user(schema: &AppSchema, name: &str, balance: f64) -> String {
    let data = exec_ok(
        schema,
        "mutation ($dto: CreateUserInput!) { createUser(dto: $dto) { id } }",
        json!({ "dto": { "name": name, "balance": balance } }),
    )
    .await;
    data["createUser"]["id"]
        .as_str()
        .expect("user id")
        .to_owned()
}

pub async fn create_post(schema: &AppSchema, author_id: &str, title: &str) -> String {
    let data = exec_ok(
        schema,
        "mutation ($dto: CreatePostInput!) { createPost(dto: $dto) { id } }",
        json!({ "dto": { "title": title, "content": "body", "authorId": author_id } }),
    )
    .await;
    data["createPost"]["id"]
        .as_str()
        .expect("post id")
        .to_owned()
}

pub async fn create_profile(schema: &AppSchema, user_id: &str, member_type: &str) -> String {
    let data = exec_ok(
        schema,
        "mutation ($dto: CreateProfileInput!) { createProfile(dto: $dto) { id } }",
        json!({ "dto": {
            "isMale": true,
            "yearOfBirth": 1990,
            "userId": user_id,
            "memberTypeId": member_type,
        } }),
    )
    .await;
    data["createProfile"]["id"]
        .as_str()
        .expect("profile id")
        .to_owned()
}

/// Sorted ids from a list of `{ id }` objects
pub fn ids(list: &Value) -> Vec<String> {
    let mut ids: Vec<String> = list
        .as_array()
        .expect("list")
        .iter()
        .map(|v| v["id"].as_str().expect("id").to_owned())
        .collect();
    ids.sort();
    ids
}
