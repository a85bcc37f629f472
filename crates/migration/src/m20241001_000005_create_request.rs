//! Create `request` (booking) table.
//!
//! `service_id` deliberately has no FK: deleting a service leaves its
//! requests in place with a dangling reference.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Request::Table)
                    .if_not_exists()
                    .col(uuid(Request::Id).primary_key())
                    .col(uuid(Request::UserId).not_null())
                    .col(uuid(Request::ServiceId).not_null())
                    .col(string_len(Request::Status, 16).not_null())
                    .col(boolean(Request::Paid).not_null().default(false))
                    .col(timestamp_with_time_zone(Request::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Request::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_request_user")
                            .from(Request::Table, Request::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Request::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Request { Table, Id, UserId, ServiceId, Status, Paid, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
