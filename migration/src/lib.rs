pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_wallets_table;
mod m20240102_000001_create_strategies_table;
mod m20240103_000001_create_investments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_wallets_table::Migration),
            Box::new(m20240102_000001_create_strategies_table::Migration),
            Box::new(m20240103_000001_create_investments_table::Migration)
        ]
    }
}
