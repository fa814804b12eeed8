mod migrate;
mod notify;
mod server;

pub use migrate::{migrate, reset};
pub use notify::notify;
pub use server::serve;
