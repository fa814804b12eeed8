use sqlx_migrator::{Info, Migrator, vec_box};

mod m0001;
pub mod table;

pub fn migrator<DB: sqlx::Database>() -> Result<Migrator<DB>, sqlx_migrator::Error>
where
    m0001::Migration: sqlx_migrator::Migration<DB>,
{
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec_box![m0001::Migration])?;

    Ok(migrator)
}
