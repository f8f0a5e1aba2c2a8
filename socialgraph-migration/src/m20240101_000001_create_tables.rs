use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(User::Name).string().not_null())
                    .col(ColumnDef::new(User::Balance).double().not_null())
                    .to_owned(),
            )
            .await?;

        // Member types
        manager
            .create_table(
                Table::create()
                    .table(MemberType::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MemberType::Id)
                            .string_len(16)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MemberType::Discount).double().not_null())
                    .col(
                        ColumnDef::new(MemberType::PostsLimitPerMonth)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Profiles
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profile::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Profile::IsMale).boolean().not_null())
                    .col(ColumnDef::new(Profile::YearOfBirth).integer().not_null())
                    .col(
                        ColumnDef::new(Profile::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Profile::MemberTypeId)
                            .string_len(16)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_user")
                            .from(Profile::Table, Profile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_member_type")
                            .from(Profile::Table, Profile::MemberTypeId)
                            .to(MemberType::Table, MemberType::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Posts
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Post::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Post::Title).string().not_null())
                    .col(ColumnDef::new(Post::Content).text().not_null())
                    .col(ColumnDef::new(Post::AuthorId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_author")
                            .from(Post::Table, Post::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_post_author_id")
                    .table(Post::Table)
                    .col(Post::AuthorId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Subscriptions: subscriber follows author
        manager
            .create_table(
                Table::create()
                    .table(SubscribersOnAuthors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscribersOnAuthors::SubscriberId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscribersOnAuthors::AuthorId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(SubscribersOnAuthors::SubscriberId)
                            .col(SubscribersOnAuthors::AuthorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_subscriber")
                            .from(
                                SubscribersOnAuthors::Table,
                                SubscribersOnAuthors::SubscriberId,
                            )
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_author")
                            .from(SubscribersOnAuthors::Table, SubscribersOnAuthors::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscription_author_id")
                    .table(SubscribersOnAuthors::Table)
                    .col(SubscribersOnAuthors::AuthorId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubscribersOnAuthors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MemberType::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Name,
    Balance,
}

#[derive(DeriveIden)]
pub(crate) enum MemberType {
    Table,
    Id,
    Discount,
    PostsLimitPerMonth,
}

#[derive(DeriveIden)]
enum Profile {
    Table,
    Id,
    IsMale,
    YearOfBirth,
    UserId,
    MemberTypeId,
}

#[derive(DeriveIden)]
enum Post {
    Table,
    Id,
    Title,
    Content,
    AuthorId,
}

#[derive(DeriveIden)]
enum SubscribersOnAuthors {
    Table,
    SubscriberId,
    AuthorId,
}
