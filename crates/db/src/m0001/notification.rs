use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::Notification;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Notification::Table)
        .col(
            ColumnDef::new(Notification::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Notification::UserId)
                .string()
                .not_null()
                .string_len(64),
        )
        .col(
            ColumnDef::new(Notification::Type)
                .string()
                .not_null()
                .string_len(20),
        )
        .col(ColumnDef::new(Notification::IngredientId).string().string_len(26))
        .col(
            ColumnDef::new(Notification::Title)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(ColumnDef::new(Notification::Body).text().not_null())
        .col(ColumnDef::new(Notification::Payload).text().not_null())
        .col(
            ColumnDef::new(Notification::ScheduledAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(Notification::SentAt).big_integer())
        .col(ColumnDef::new(Notification::ReadAt).big_integer())
        .col(
            ColumnDef::new(Notification::Status)
                .string()
                .not_null()
                .string_len(10),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Notification::Table).to_owned()
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
        .name("idx_notification_dedup")
        .table(Notification::Table)
        .col(Notification::UserId)
        .col(Notification::IngredientId)
        .col(Notification::Type)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_notification_dedup")
        .table(Notification::Table)
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

pub struct CreateIdx2;

fn create_idx_2() -> IndexCreateStatement {
    Index::create()
        .name("idx_notification_user_scheduled")
        .table(Notification::Table)
        .col(Notification::UserId)
        .col(Notification::ScheduledAt)
        .to_owned()
}

fn drop_idx_2() -> IndexDropStatement {
    Index::drop()
        .name("idx_notification_user_scheduled")
        .table(Notification::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx2 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_2().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_2().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
