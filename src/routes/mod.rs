use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use freshkeep_notification::{Generator, PushSender};
use sqlx::SqlitePool;
use time::{Date, UtcOffset};

mod foods;
mod health;
mod ingredients;
mod notifications;

#[derive(Clone)]
pub struct AppState {
    pub ingredient_command: freshkeep_ingredient::Command,
    pub ingredient_query: freshkeep_ingredient::Query,
    pub notification_command: freshkeep_notification::Command,
    pub notification_query: freshkeep_notification::Query,
    pub generator: Generator,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool, sender: Arc<dyn PushSender>, utc_offset: UtcOffset) -> Self {
        Self {
            ingredient_command: freshkeep_ingredient::Command(pool.clone()),
            ingredient_query: freshkeep_ingredient::Query(pool.clone()),
            notification_command: freshkeep_notification::Command(pool.clone()),
            notification_query: freshkeep_notification::Query(pool.clone()),
            generator: Generator::new(pool.clone(), sender, utc_offset),
            pool,
        }
    }

    /// Current calendar date in the configured offset.
    pub fn today(&self) -> Date {
        self.generator.today()
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/foods/lookup", get(foods::lookup))
        .route(
            "/api/ingredients",
            get(ingredients::list).post(ingredients::create),
        )
        .route("/api/ingredients/bulk", post(ingredients::create_bulk))
        .route(
            "/api/ingredients/{id}",
            get(ingredients::detail)
                .patch(ingredients::update)
                .delete(ingredients::delete),
        )
        .route("/api/notifications", get(notifications::list))
        .route("/api/notifications/check", post(notifications::check))
        .route("/api/notifications/read-all", post(notifications::read_all))
        .route("/api/notifications/{id}/read", post(notifications::read))
        .with_state(app_state)
}
