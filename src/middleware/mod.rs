pub mod auth;
pub mod extract;

pub use auth::{Auth, USER_ID_HEADER};
pub use extract::{ApiJson, ApiQuery};
