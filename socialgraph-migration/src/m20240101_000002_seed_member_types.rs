use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use super::m20240101_000001_create_tables::MemberType;

/// (id, discount, posts limit per month)
const MEMBER_TYPES: [(&str, f64, i32); 2] = [("BASIC", 2.3, 20), ("BUSINESS", 7.7, 100)];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(MemberType::Table)
            .columns([
                MemberType::Id,
                MemberType::Discount,
                MemberType::PostsLimitPerMonth,
            ])
            .on_conflict(OnConflict::column(MemberType::Id).do_nothing().to_owned());

        for (id, discount, limit) in MEMBER_TYPES {
            insert
                .values([id.into(), discount.into(), limit.into()])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }

        let db = manager.get_connection();
        db.execute(db.get_database_backend().build(&insert)).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(MemberType::Table)
            .and_where(Expr::col(MemberType::Id).is_in(MEMBER_TYPES.map(|(id, _, _)| id)))
            .to_owned();

        let db = manager.get_connection();
        db.execute(db.get_database_backend().build(&delete)).await?;
        Ok(())
    }
}
