use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the caller's identity, set by the upstream auth gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller.
#[derive(Clone, Debug)]
pub struct Auth {
    pub user_id: String,
}

impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                tracing::warn!("request without {USER_ID_HEADER} header");
                AppError::Unauthorized
            })?;

        Ok(Auth {
            user_id: user_id.to_owned(),
        })
    }
}
