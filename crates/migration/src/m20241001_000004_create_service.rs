//! Create `service` table with FK to `business`.
//!
//! Rental-only columns are nullable; price is kept as text.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(uuid(Service::BusinessId).not_null())
                    .col(string_len(Service::ServiceName, 128).not_null())
                    .col(string_len(Service::Price, 32).not_null())
                    .col(string_len(Service::BusinessType, 32).not_null())
                    .col(ColumnDef::new(Service::CarName).string_len(128).null())
                    .col(ColumnDef::new(Service::CarDescription).text().null())
                    .col(ColumnDef::new(Service::Seats).integer().null())
                    .col(ColumnDef::new(Service::EngineCapacity).integer().null())
                    .col(ColumnDef::new(Service::Transmission).string_len(32).null())
                    .col(ColumnDef::new(Service::ImageUrl).text().null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_business")
                            .from(Service::Table, Service::BusinessId)
                            .to(Business::Table, Business::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    BusinessId,
    ServiceName,
    Price,
    BusinessType,
    CarName,
    CarDescription,
    Seats,
    EngineCapacity,
    Transmission,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Business { Table, Id }
