use freshkeep_notification::{Command, InboxFilter, Query};
use freshkeep_shared::{Error, notification::NotificationStatus};
use temp_dir::TempDir;
use time::{Duration, macros::date};

mod helpers;

#[tokio::test]
async fn test_inbox_read_flow() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let today = date!(2026 - 10 - 20);

    helpers::register(&pool, "john", "우유", today, today).await?;
    helpers::register(&pool, "john", "두부", today + Duration::days(2), today).await?;
    helpers::register(&pool, "john", "달걀", today + Duration::days(3), today).await?;
    helpers::generator(&pool)
        .generate_expiry_notifications("john", today)
        .await?;

    let query = Query(pool.clone());
    let command = Command(pool);

    assert_eq!(query.unread_count("john").await?, 3);
    assert_eq!(query.unread_count("jane").await?, 0);

    let inbox = query.list("john", InboxFilter::default()).await?;
    let first = &inbox[0];

    assert!(matches!(
        command.mark_read("jane", &first.id).await,
        Err(Error::Forbidden)
    ));
    assert!(matches!(
        command.mark_read("john", "missing").await,
        Err(Error::NotFound)
    ));

    let read = command.mark_read("john", &first.id).await?;
    assert_eq!(read.status, NotificationStatus::Read);
    assert!(read.read_at.is_some());
    assert_eq!(query.unread_count("john").await?, 2);

    let unread = query
        .list(
            "john",
            InboxFilter {
                unread_only: true,
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(unread.len(), 2);
    assert!(unread.iter().all(|n| n.id != first.id));

    let limited = query
        .list(
            "john",
            InboxFilter {
                limit: Some(1),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(limited.len(), 1);

    assert_eq!(command.mark_all_read("john").await?, 2);
    assert_eq!(command.mark_all_read("john").await?, 0);
    assert_eq!(query.unread_count("john").await?, 0);

    Ok(())
}
