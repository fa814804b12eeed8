use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::Ingredient;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Ingredient::UserId)
                .string()
                .not_null()
                .string_len(64),
        )
        .col(
            ColumnDef::new(Ingredient::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(Ingredient::Category)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(Ingredient::StorageType)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(Ingredient::RegisteredAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Ingredient::ExpiryDate)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(Ingredient::FreshnessStatus)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(Ingredient::Quantity)
                .double()
                .not_null()
                .default(1.0),
        )
        .col(
            ColumnDef::new(Ingredient::Unit)
                .string()
                .not_null()
                .string_len(20),
        )
        .col(ColumnDef::new(Ingredient::Memo).text())
        .col(
            ColumnDef::new(Ingredient::IsConsumed)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Ingredient::IsWasted)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(Ingredient::ConsumedAt).big_integer())
        .col(ColumnDef::new(Ingredient::PurchasePrice).big_integer())
        .col(
            ColumnDef::new(Ingredient::Source)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(ColumnDef::new(Ingredient::UpdatedAt).big_integer())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Ingredient::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx1;

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_ingredient_user_expiry")
        .table(Ingredient::Table)
        .col(Ingredient::UserId)
        .col(Ingredient::ExpiryDate)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_ingredient_user_expiry")
        .table(Ingredient::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
