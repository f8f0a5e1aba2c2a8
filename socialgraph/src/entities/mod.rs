//! SeaORM entity definitions
//!
//! One module per table. The column layout matches the tables created by
//! `socialgraph_migration`.

pub mod member_type;
pub mod post;
pub mod profile;
pub mod subscribers_on_authors;
pub mod user;

