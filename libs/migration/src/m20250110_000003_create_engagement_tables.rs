use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SocietyReviews::Table)
                    .if_not_exists()
                    .col(pk_uuid(SocietyReviews::Id))
                    .col(uuid(SocietyReviews::SocietyId))
                    .col(uuid(SocietyReviews::UserId))
                    .col(string_len(SocietyReviews::UserName, 255))
                    .col(integer(SocietyReviews::Rating))
                    .col(text_null(SocietyReviews::Comment))
                    .col(
                        timestamp_with_time_zone(SocietyReviews::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_society_reviews_society")
                            .from(SocietyReviews::Table, SocietyReviews::SocietyId)
                            .to(Societies::Table, Societies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_society_reviews_society_created")
                    .table(SocietyReviews::Table)
                    .col(SocietyReviews::SocietyId)
                    .col(SocietyReviews::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SiteReviews::Table)
                    .if_not_exists()
                    .col(pk_uuid(SiteReviews::Id))
                    .col(uuid(SiteReviews::UserId))
                    .col(string_len(SiteReviews::UserName, 255))
                    .col(integer(SiteReviews::Rating))
                    .col(text_null(SiteReviews::Comment))
                    .col(
                        timestamp_with_time_zone(SiteReviews::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSearches::Table)
                    .if_not_exists()
                    .col(pk_uuid(UserSearches::Id))
                    .col(uuid(UserSearches::UserId))
                    .col(string_len(UserSearches::UserName, 255))
                    .col(uuid(UserSearches::SocietyId))
                    .col(string_len(UserSearches::SocietyName, 255))
                    .col(string_len(UserSearches::CityName, 100))
                    .col(
                        timestamp_with_time_zone(UserSearches::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_searches_society")
                            .from(UserSearches::Table, UserSearches::SocietyId)
                            .to(Societies::Table, Societies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_searches_user_created")
                    .table(UserSearches::Table)
                    .col(UserSearches::UserId)
                    .col(UserSearches::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_searches_society_created")
                    .table(UserSearches::Table)
                    .col(UserSearches::SocietyId)
                    .col(UserSearches::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSearches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SiteReviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SocietyReviews::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Societies {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum SocietyReviews {
    Table,
    Id,
    SocietyId,
    UserId,
    UserName,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SiteReviews {
    Table,
    Id,
    UserId,
    UserName,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserSearches {
    Table,
    Id,
    UserId,
    UserName,
    SocietyId,
    SocietyName,
    CityName,
    CreatedAt,
}
