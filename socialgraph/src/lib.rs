//! socialgraph
//!
//! GraphQL API over users, their profiles and posts, membership tiers and
//! user-to-user subscriptions:
//! - `entities` - SeaORM table definitions
//! - `storage` - one storage trait per aggregate, SeaORM-backed
//! - `graphql` - async-graphql schema with DataLoader-backed relations
//! - `server` - axum router and startup

pub mod config;
pub mod entities;
pub mod graphql;
pub mod server;
pub mod storage;

pub use config::{Config, ConfigError};
pub use graphql::{AppSchema, SchemaLimits, build_schema};
pub use server::{AppState, router, run};
pub use storage::StorageError;
