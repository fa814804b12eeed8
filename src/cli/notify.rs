use std::sync::Arc;

use anyhow::Result;
use freshkeep_notification::{Generator, TracingPushSender};

/// One expiry sweep over every user, for running from an external cron.
#[tracing::instrument(skip(config))]
pub async fn notify(config: crate::config::Config, weekly: bool) -> Result<()> {
    let pool =
        crate::db::create_pool(&config.database.url, config.database.max_connections).await?;
    let generator = Generator::new(pool, Arc::new(TracingPushSender), config.utc_offset()?);
    let today = generator.today();

    let mut created = generator.sweep(today).await?;
    if weekly {
        created += generator.sweep_weekly(today).await?;
    }

    tracing::info!(%today, created, "Notification sweep completed");

    Ok(())
}
