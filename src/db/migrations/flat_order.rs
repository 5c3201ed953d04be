use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use sea_orm_migration::sea_orm::DatabaseBackend;

pub const SCHEMA: &str = "app";

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "flat_order_migration"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // On SQLite the schema is an attached database, set up by the driver.
        if manager.get_database_backend() == DatabaseBackend::Postgres {
            manager
                .get_connection()
                .execute_unprepared(&format!("CREATE SCHEMA IF NOT EXISTS {SCHEMA};"))
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table((Alias::new(SCHEMA), FlatOrders::Table))
                    .if_not_exists()
                    .col(ColumnDef::new(FlatOrders::OrderId).integer().not_null().primary_key())
                    .col(ColumnDef::new(FlatOrders::CustomerId).integer().not_null())
                    .col(ColumnDef::new(FlatOrders::FirstName).string().not_null())
                    .col(ColumnDef::new(FlatOrders::LastName).string().not_null())
                    .col(ColumnDef::new(FlatOrders::State).string().not_null())
                    .col(ColumnDef::new(FlatOrders::Category).string().not_null())
                    .col(ColumnDef::new(FlatOrders::SubCategory).string().not_null())
                    .col(ColumnDef::new(FlatOrders::OrderDate).date().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table((Alias::new(SCHEMA), FlatOrders::Table)).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum FlatOrders {
    Table,
    OrderId,
    CustomerId,
    FirstName,
    LastName,
    State,
    Category,
    SubCategory,
    OrderDate,
}
