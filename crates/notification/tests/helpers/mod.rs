#![allow(dead_code)]

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    freshkeep_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

/// Push transport that always fails.
pub struct BrokenPushSender;

#[async_trait::async_trait]
impl freshkeep_notification::PushSender for BrokenPushSender {
    async fn send(
        &self,
        _user_id: &str,
        _message: &freshkeep_notification::PushMessage,
    ) -> anyhow::Result<()> {
        anyhow::bail!("push gateway unavailable")
    }
}

/// Push transport that delivers, then shuts the database down under the generator.
pub struct PoolClosingPushSender(pub SqlitePool);

#[async_trait::async_trait]
impl freshkeep_notification::PushSender for PoolClosingPushSender {
    async fn send(
        &self,
        _user_id: &str,
        _message: &freshkeep_notification::PushMessage,
    ) -> anyhow::Result<()> {
        self.0.close().await;
        Ok(())
    }
}

pub fn generator(pool: &SqlitePool) -> freshkeep_notification::Generator {
    freshkeep_notification::Generator::new(
        pool.clone(),
        std::sync::Arc::new(freshkeep_notification::TracingPushSender),
        time::UtcOffset::UTC,
    )
}

pub async fn register(
    pool: &SqlitePool,
    user_id: &str,
    name: &str,
    expiry_date: time::Date,
    today: time::Date,
) -> anyhow::Result<freshkeep_ingredient::Ingredient> {
    let mut input = freshkeep_ingredient::RegisterInput::new(name);
    input.expiry_date = Some(expiry_date);

    Ok(freshkeep_ingredient::Command(pool.clone())
        .register(user_id, input, today)
        .await?)
}
