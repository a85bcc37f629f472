use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Service: owner lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_service_business")
                    .table(Service::Table)
                    .col(Service::BusinessId)
                    .to_owned(),
            )
            .await?;

        // Request: incoming requests per service
        manager
            .create_index(
                Index::create()
                    .name("idx_request_service")
                    .table(Request::Table)
                    .col(Request::ServiceId)
                    .to_owned(),
            )
            .await?;

        // Request: a customer's bookings, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_request_user_created")
                    .table(Request::Table)
                    .col(Request::UserId)
                    .col(Request::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Business: name search
        manager
            .create_index(
                Index::create()
                    .name("idx_business_name")
                    .table(Business::Table)
                    .col(Business::BusinessName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_business_name").table(Business::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_request_user_created").table(Request::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_request_service").table(Request::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_business").table(Service::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Service { Table, BusinessId }

#[derive(DeriveIden)]
enum Request { Table, ServiceId, UserId, CreatedAt }

#[derive(DeriveIden)]
enum Business { Table, BusinessName }
