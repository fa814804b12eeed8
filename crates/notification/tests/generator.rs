use std::sync::Arc;

use freshkeep_ingredient::UpdateInput;
use freshkeep_notification::{Generator, InboxFilter, Query};
use freshkeep_shared::notification::{NotificationStatus, NotificationType};
use temp_dir::TempDir;
use time::{Duration, UtcOffset, macros::date};

mod helpers;

// A Tuesday, so `check` never produces a weekly summary.
const TUESDAY: time::Date = date!(2026 - 10 - 20);

#[tokio::test]
async fn test_expiry_notifications_by_band() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let today = TUESDAY;

    let milk = helpers::register(&pool, "john", "우유", today + Duration::days(1), today).await?;
    let tofu = helpers::register(&pool, "john", "두부", today + Duration::days(3), today).await?;
    helpers::register(&pool, "john", "쌀", today + Duration::days(100), today).await?;
    helpers::register(&pool, "jane", "달걀", today, today).await?;

    let created = helpers::generator(&pool)
        .generate_expiry_notifications("john", today)
        .await?;
    assert_eq!(created, 2);

    let inbox = Query(pool).list("john", InboxFilter::default()).await?;
    assert_eq!(inbox.len(), 2);

    let milk_notification = inbox
        .iter()
        .find(|n| n.ingredient_id.as_deref() == Some(milk.id.as_str()))
        .unwrap();
    assert_eq!(milk_notification.notification_type, NotificationType::ExpiryD1);
    assert_eq!(milk_notification.status, NotificationStatus::Sent);
    assert!(milk_notification.sent_at.is_some());
    assert_eq!(milk_notification.payload["daysLeft"], 1);
    assert_eq!(milk_notification.payload["ingredientId"], milk.id.as_str());
    assert_eq!(milk_notification.payload["expiryDate"], "2026-10-21");

    let tofu_notification = inbox
        .iter()
        .find(|n| n.ingredient_id.as_deref() == Some(tofu.id.as_str()))
        .unwrap();
    assert_eq!(tofu_notification.notification_type, NotificationType::ExpiryD3);

    Ok(())
}

#[tokio::test]
async fn test_second_run_creates_nothing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let generator = helpers::generator(&pool);
    let today = TUESDAY;

    helpers::register(&pool, "john", "우유", today + Duration::days(1), today).await?;
    helpers::register(&pool, "john", "두부", today + Duration::days(2), today).await?;

    assert_eq!(generator.check("john", today).await?, 2);
    assert_eq!(generator.check("john", today).await?, 0);
    assert_eq!(generator.generate_expiry_notifications("john", today).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_moving_to_next_band_notifies_again() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let generator = helpers::generator(&pool);
    let today = TUESDAY;

    helpers::register(&pool, "john", "두부", today + Duration::days(3), today).await?;

    assert_eq!(generator.check("john", today).await?, 1);
    // Two days later the same tofu is urgent and gets a d1 notification.
    assert_eq!(generator.check("john", today + Duration::days(2)).await?, 1);

    let inbox = Query(pool).list("john", InboxFilter::default()).await?;
    let mut types = inbox
        .iter()
        .map(|n| n.notification_type)
        .collect::<Vec<_>>();
    types.sort_by_key(|t| t.to_string());
    assert_eq!(types, vec![NotificationType::ExpiryD1, NotificationType::ExpiryD3]);

    Ok(())
}

#[tokio::test]
async fn test_read_notification_no_longer_blocks() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let generator = helpers::generator(&pool);
    let today = TUESDAY;

    helpers::register(&pool, "john", "우유", today, today).await?;

    assert_eq!(generator.check("john", today).await?, 1);
    freshkeep_notification::Command(pool.clone())
        .mark_all_read("john")
        .await?;
    assert_eq!(generator.check("john", today).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_inactive_ingredients_are_ignored() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let today = TUESDAY;

    let milk = helpers::register(&pool, "john", "우유", today, today).await?;
    freshkeep_ingredient::Command(pool.clone())
        .update(
            "john",
            &milk.id,
            UpdateInput {
                is_consumed: Some(true),
                ..Default::default()
            },
            today,
        )
        .await?;

    assert_eq!(helpers::generator(&pool).check("john", today).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_failed_push_stays_pending() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let generator = Generator::new(
        pool.clone(),
        Arc::new(helpers::BrokenPushSender),
        UtcOffset::UTC,
    );
    let today = TUESDAY;

    helpers::register(&pool, "john", "우유", today, today).await?;

    assert_eq!(generator.generate_expiry_notifications("john", today).await?, 1);

    let inbox = Query(pool).list("john", InboxFilter::default()).await?;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].status, NotificationStatus::Pending);
    assert!(inbox[0].sent_at.is_none());

    // Still counts for deduplication.
    assert_eq!(generator.generate_expiry_notifications("john", today).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_weekly_summary_once_per_day() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let generator = helpers::generator(&pool);
    let today = generator.today();

    assert_eq!(generator.generate_weekly_summary("john", today).await?, 0);

    helpers::register(&pool, "john", "우유", today + Duration::days(1), today).await?;
    helpers::register(&pool, "john", "쌀", today + Duration::days(100), today).await?;
    helpers::register(&pool, "john", "두부", today - Duration::days(1), today).await?;

    assert_eq!(generator.generate_weekly_summary("john", today).await?, 1);
    assert_eq!(generator.generate_weekly_summary("john", today).await?, 0);

    let inbox = Query(pool).list("john", InboxFilter::default()).await?;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].notification_type, NotificationType::WeeklySummary);
    assert_eq!(inbox[0].ingredient_id, None);
    assert_eq!(inbox[0].payload["total"], 3);
    assert_eq!(inbox[0].payload["expired"], 1);
    assert_eq!(inbox[0].payload["expiringSoon"], 1);

    Ok(())
}

#[tokio::test]
async fn test_weekly_summary_once_on_a_past_day() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let generator = helpers::generator(&pool);
    let monday = date!(2026 - 10 - 12);

    helpers::register(&pool, "john", "우유", monday + Duration::days(1), monday).await?;

    assert_eq!(generator.generate_weekly_summary("john", monday).await?, 1);
    assert_eq!(generator.generate_weekly_summary("john", monday).await?, 0);

    let inbox = Query(pool).list("john", InboxFilter::default()).await?;
    assert_eq!(inbox.len(), 1);
    assert_eq!(
        inbox[0].scheduled_at,
        freshkeep_shared::day_start_timestamp(monday + Duration::days(1), UtcOffset::UTC) - 1
    );

    Ok(())
}

#[tokio::test]
async fn test_unrecorded_delivery_still_reports_created() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let today = TUESDAY;

    helpers::register(&pool, "john", "우유", today + Duration::days(1), today).await?;
    helpers::register(&pool, "john", "두부", today + Duration::days(3), today).await?;

    let generator = Generator::new(
        pool.clone(),
        Arc::new(helpers::PoolClosingPushSender(pool.clone())),
        UtcOffset::UTC,
    );

    assert_eq!(generator.generate_expiry_notifications("john", today).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_check_on_monday_adds_summary() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let monday = date!(2026 - 10 - 19);

    helpers::register(&pool, "john", "우유", monday + Duration::days(1), monday).await?;

    assert_eq!(helpers::generator(&pool).check("john", monday).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_sweep_covers_every_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let generator = helpers::generator(&pool);
    let today = TUESDAY;

    helpers::register(&pool, "john", "우유", today + Duration::days(1), today).await?;
    helpers::register(&pool, "jane", "두부", today + Duration::days(2), today).await?;
    helpers::register(&pool, "jack", "쌀", today + Duration::days(200), today).await?;

    assert_eq!(generator.sweep(today).await?, 2);
    assert_eq!(generator.sweep(today).await?, 0);

    Ok(())
}
