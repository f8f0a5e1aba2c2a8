//! Database migrations for socialgraph
//!
//! Creates the user, profile, post, member type and subscription tables and
//! seeds the two member types every profile must reference.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_tables;
mod m20240101_000002_seed_member_types;

/// Applies every socialgraph migration in order
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_tables::Migration),
            Box::new(m20240101_000002_seed_member_types::Migration),
        ]
    }
}
