//! database migrations for alphaloan.

pub use sea_orm_migration::prelude::*;

mod m20260830_000001_create_loan_customers;
mod m20260830_000002_create_loan_submissions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260830_000001_create_loan_customers::Migration),
            Box::new(m20260830_000002_create_loan_submissions::Migration),
        ]
    }
}
