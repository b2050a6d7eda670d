//! create loan_customers table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoanCustomers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoanCustomers::CustomerId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LoanCustomers::IdCardNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(LoanCustomers::FullName).string().not_null())
                    .col(ColumnDef::new(LoanCustomers::BirthDate).string().not_null())
                    .col(
                        ColumnDef::new(LoanCustomers::PhoneNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LoanCustomers::Email).string())
                    .col(
                        ColumnDef::new(LoanCustomers::MonthlyIncome)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanCustomers::AddressStreet)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanCustomers::AddressCity)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // index on full_name for the sorted customer listing
        manager
            .create_index(
                Index::create()
                    .name("idx_loan_customers_full_name")
                    .table(LoanCustomers::Table)
                    .col(LoanCustomers::FullName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoanCustomers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LoanCustomers {
    Table,
    CustomerId,
    IdCardNumber,
    FullName,
    BirthDate,
    PhoneNumber,
    Email,
    MonthlyIncome,
    AddressStreet,
    AddressCity,
}
