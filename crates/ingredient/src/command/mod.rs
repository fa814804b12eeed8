use sqlx::SqlitePool;

use crate::Query;

mod delete;
mod refresh;
mod register;
mod update;

pub use register::{MAX_BULK_ITEMS, RegisterInput};
pub use update::UpdateInput;

#[derive(Clone)]
pub struct Command(pub SqlitePool);

impl Command {
    fn query(&self) -> Query {
        Query(self.0.clone())
    }
}
