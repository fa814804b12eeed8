mod command;
mod query;
mod types;

pub use command::*;
pub use query::*;
pub use types::*;
