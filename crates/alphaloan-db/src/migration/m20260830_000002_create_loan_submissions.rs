//! create loan_submissions table migration

use sea_orm_migration::prelude::*;

use super::m20260830_000001_create_loan_customers::LoanCustomers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoanSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoanSubmissions::SubmissionId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::VehicleType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::VehicleBrand)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::VehicleModel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::VehicleLicenseNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::VehicleOdometer)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::ManufacturingYear)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::ProposedLoanAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::ProposedLoanTenureMonth)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::LoanStatus)
                            .string()
                            .not_null()
                            .default("NEW"),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::IsCommercialVehicle)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoanSubmissions::CustomerId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loan_submissions_customer")
                            .from(LoanSubmissions::Table, LoanSubmissions::CustomerId)
                            .to(LoanCustomers::Table, LoanCustomers::CustomerId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // index on customer_id for listing a customer's submissions
        manager
            .create_index(
                Index::create()
                    .name("idx_loan_submissions_customer_id")
                    .table(LoanSubmissions::Table)
                    .col(LoanSubmissions::CustomerId)
                    .to_owned(),
            )
            .await?;

        // index on created_at for the newest-first orderings
        manager
            .create_index(
                Index::create()
                    .name("idx_loan_submissions_created_at")
                    .table(LoanSubmissions::Table)
                    .col(LoanSubmissions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoanSubmissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LoanSubmissions {
    Table,
    SubmissionId,
    VehicleType,
    VehicleBrand,
    VehicleModel,
    VehicleLicenseNumber,
    VehicleOdometer,
    ManufacturingYear,
    ProposedLoanAmount,
    ProposedLoanTenureMonth,
    LoanStatus,
    IsCommercialVehicle,
    CreatedAt,
    UpdatedAt,
    CustomerId,
}
