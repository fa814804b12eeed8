mod date;
mod error;
pub mod food;
pub mod ingredient;
pub mod notification;

pub use date::*;
pub use error::*;
