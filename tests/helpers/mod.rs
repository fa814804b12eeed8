#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use freshkeep_notification::TracingPushSender;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use time::UtcOffset;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub state: freshkeep::AppState,
}

pub async fn setup_test_app(path: PathBuf) -> anyhow::Result<TestApp> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    freshkeep::db::run_migrations(&pool).await?;

    let state = freshkeep::AppState::new(pool.clone(), Arc::new(TracingPushSender), UtcOffset::UTC);

    Ok(TestApp {
        router: freshkeep::router(state.clone()),
        pool,
        state,
    })
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut request = Request::builder().method(method).uri(uri);

        if let Some(user_id) = user_id {
            request = request.header(freshkeep::middleware::USER_ID_HEADER, user_id);
        }

        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))?,
            None => request.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, json))
    }

    pub async fn get(&self, uri: &str, user_id: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Method::GET, uri, Some(user_id), None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        user_id: &str,
        body: Value,
    ) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Method::POST, uri, Some(user_id), Some(body)).await
    }
}
