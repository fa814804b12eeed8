mod ingredient;
mod notification;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "freshkeep",
    "m0001",
    vec_box![],
    vec_box![
        ingredient::CreateTable,
        ingredient::CreateIdx1,
        notification::CreateTable,
        notification::CreateIdx1,
        notification::CreateIdx2
    ]
);
