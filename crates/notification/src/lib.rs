//! Expiry notifications: generation, push hand-off and the in-app inbox.

mod command;
mod generator;
mod push;
mod query;
mod scheduler;
mod types;

pub use command::*;
pub use generator::*;
pub use push::*;
pub use query::*;
pub use scheduler::*;
pub use types::*;
