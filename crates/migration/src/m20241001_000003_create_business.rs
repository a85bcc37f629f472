//! Create `business` table. The primary key is the owning user's id.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Business::Table)
                    .if_not_exists()
                    .col(uuid(Business::Id).primary_key())
                    .col(string_len(Business::BusinessName, 128).not_null())
                    .col(string_len(Business::BusinessType, 32).not_null())
                    .col(string_len(Business::Location, 255).not_null())
                    .col(ColumnDef::new(Business::ImageUrl).text().null())
                    .col(timestamp_with_time_zone(Business::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Business::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_business_user")
                            .from(Business::Table, Business::Id)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Business::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Business { Table, Id, BusinessName, BusinessType, Location, ImageUrl, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
