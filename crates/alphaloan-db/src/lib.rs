//! database layer for alphaloan.
//!
//! this crate provides persistent storage for:
//! - loan customers, reconciled on their id-card number
//! - loan submissions, each owned by exactly one customer
//!
//! the store is the only party enforcing referential integrity: submissions
//! hold a foreign key to their customer and are removed by cascade when the
//! customer is deleted.

#![warn(missing_docs)]

mod entity;
mod error;
mod migration;

pub use error::Error;

use std::future::Future;

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, Database as SeaOrmDatabase, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use sea_orm_migration::MigratorTrait;

use alphaloan_types::{Config, Customer, CustomerId, CustomerUpdate, Submission, SubmissionId};

/// a customer together with every submission it owns, newest first.
///
/// zero submissions is a valid state and distinct from "no such customer",
/// which surfaces as [`Error::NotFound`].
#[derive(Debug, Clone)]
pub struct CustomerWithSubmissions {
    /// the customer record.
    pub customer: Customer,
    /// owned submissions, ordered by creation time descending.
    pub submissions: Vec<Submission>,
}

/// result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// database trait for alphaloan storage operations.
///
/// this trait abstracts over different database backends (sqlite, postgresql).
/// every call is a single synchronous round trip (or a short bounded sequence
/// of them); conflicting writes are serialized by the store's own unique
/// constraints, never by application-level read-then-write.
pub trait Database: Send + Sync {
    // ─── Health Check ─────────────────────────────────────────────────────────

    /// ping the database to verify connectivity.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;

    // ─── Customer Operations ─────────────────────────────────────────────────

    /// insert or update a customer, keyed on the id-card number.
    ///
    /// on first occurrence the row is inserted with the caller's identifier;
    /// on repeat occurrence every mutable field is overwritten and the
    /// *existing* identifier is returned. identifiers are never replaced once
    /// assigned.
    fn upsert_customer(
        &self,
        customer: &Customer,
    ) -> impl Future<Output = Result<CustomerId>> + Send;

    /// list all customers ordered by full name ascending.
    fn list_customers(&self) -> impl Future<Output = Result<Vec<Customer>>> + Send;

    /// get a customer and every submission it owns, newest first.
    ///
    /// fails with [`Error::NotFound`] when no customer matches; a customer
    /// with zero submissions is a valid result.
    fn get_customer_with_submissions(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<CustomerWithSubmissions>> + Send;

    /// apply a field-level partial update to a customer.
    ///
    /// only present fields overwrite stored values. fails with
    /// [`Error::NotFound`] when no row matches the identifier.
    fn update_customer(
        &self,
        update: &CustomerUpdate,
        id: CustomerId,
    ) -> impl Future<Output = Result<CustomerId>> + Send;

    /// delete a customer row. owned submissions are removed by the store's
    /// cascade rule. fails with [`Error::NotFound`] when absent.
    fn delete_customer(&self, id: CustomerId) -> impl Future<Output = Result<CustomerId>> + Send;

    // ─── Submission Operations ───────────────────────────────────────────────

    /// insert or update a submission, keyed on its own identifier.
    ///
    /// on conflict every mutable field is overwritten with the incoming
    /// values, `created_at` included - callers on update paths must resend
    /// the original creation time.
    fn upsert_submission(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<SubmissionId>> + Send;

    /// list all submissions ordered by creation time descending.
    fn list_submissions(&self) -> impl Future<Output = Result<Vec<Submission>>> + Send;

    /// get a submission by id. `None` is the not-found signal, distinct from
    /// a storage failure.
    fn get_submission(
        &self,
        id: SubmissionId,
    ) -> impl Future<Output = Result<Option<Submission>>> + Send;
}

/// the main database implementation using sea-orm.
#[derive(Clone)]
pub struct AlphaloanDb {
    conn: DatabaseConnection,
}

impl AlphaloanDb {
    /// create a new database connection from config and run migrations.
    pub async fn new(config: &Config) -> Result<Self> {
        let url = Self::build_connection_url(&config.database)?;
        let conn: DatabaseConnection = SeaOrmDatabase::connect(&url)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };

        if config.database.db_type == "sqlite" {
            // referential integrity depends on this pragma being active
            db.enable_foreign_keys().await?;
            if config.database.sqlite.write_ahead_log {
                db.enable_wal_mode().await?;
            }
        }

        db.migrate().await?;
        Ok(db)
    }

    /// turn on sqlite foreign-key enforcement for this connection.
    ///
    /// without it the cascade rule on loan_submissions is silently ignored.
    async fn enable_foreign_keys(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("PRAGMA foreign_keys = ON")
            .await
            .map_err(|e| Error::Connection(format!("failed to enable foreign keys: {}", e)))?;
        Ok(())
    }

    /// enable write-ahead logging mode for sqlite.
    ///
    /// WAL mode allows concurrent reads during writes. must be called before
    /// any writes.
    async fn enable_wal_mode(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("PRAGMA journal_mode=WAL")
            .await
            .map_err(|e| Error::Connection(format!("failed to enable WAL mode: {}", e)))?;
        tracing::info!("sqlite WAL mode enabled");
        Ok(())
    }

    /// get the current sqlite journal mode.
    #[cfg(test)]
    async fn get_journal_mode(&self) -> Result<String> {
        use sea_orm::{ConnectionTrait, FromQueryResult};

        #[derive(FromQueryResult)]
        struct JournalMode {
            journal_mode: String,
        }

        let result: Option<JournalMode> = self
            .conn
            .query_one(sea_orm::Statement::from_string(
                sea_orm::DatabaseBackend::Sqlite,
                "PRAGMA journal_mode".to_string(),
            ))
            .await
            .map_err(|e| Error::Connection(e.to_string()))?
            .map(|row| JournalMode::from_query_result(&row, "").unwrap());

        Ok(result.map(|r| r.journal_mode).unwrap_or_default())
    }

    /// build a sea-orm compatible connection url from config.
    fn build_connection_url(config: &alphaloan_types::DatabaseConfig) -> Result<String> {
        match config.db_type.as_str() {
            "sqlite" => {
                let path = if config.connection_string.starts_with("sqlite:") {
                    config.connection_string.clone()
                } else {
                    format!("sqlite:{}", config.connection_string)
                };
                // add ?mode=rwc to create the file if it doesn't exist
                if path.contains('?') {
                    Ok(path)
                } else {
                    Ok(format!("{}?mode=rwc", path))
                }
            }
            "postgres" | "postgresql" => Ok(config.connection_string.clone()),
            other => Err(Error::InvalidData(format!(
                "unsupported database type: {}",
                other
            ))),
        }
    }

    /// create an in-memory sqlite database for testing.
    pub async fn new_in_memory() -> Result<Self> {
        let conn: DatabaseConnection = SeaOrmDatabase::connect("sqlite::memory:")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };
        db.enable_foreign_keys().await?;
        db.migrate().await?;
        Ok(db)
    }

    /// run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        migration::Migrator::up(&self.conn, None)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;
        Ok(())
    }
}

impl Database for AlphaloanDb {
    // health check

    async fn ping(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(())
    }

    // customer operations

    async fn upsert_customer(&self, customer: &Customer) -> Result<CustomerId> {
        use entity::customer::Column;

        let model: entity::customer::ActiveModel = customer.into();
        // atomic conditional insert-or-update through the store's conflict
        // clause; customer_id stays out of the update set so an existing row
        // keeps its identifier
        let resolved = entity::customer::Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::IdCardNumber)
                    .update_columns([
                        Column::FullName,
                        Column::BirthDate,
                        Column::PhoneNumber,
                        Column::Email,
                        Column::MonthlyIncome,
                        Column::AddressStreet,
                        Column::AddressCity,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.conn)
            .await?;

        Ok(CustomerId::parse(&resolved.customer_id)?)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let results = entity::customer::Entity::find()
            .order_by_asc(entity::customer::Column::FullName)
            .all(&self.conn)
            .await?;
        results.into_iter().map(Customer::try_from).collect()
    }

    async fn get_customer_with_submissions(&self, id: CustomerId) -> Result<CustomerWithSubmissions> {
        let customer = entity::customer::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await?
            .ok_or_else(|| Error::NotFound(format!("customer {}", id)))?;

        let submissions = entity::submission::Entity::find()
            .filter(entity::submission::Column::CustomerId.eq(id.to_string()))
            .order_by_desc(entity::submission::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        Ok(CustomerWithSubmissions {
            customer: customer.try_into()?,
            submissions: submissions
                .into_iter()
                .map(Submission::try_from)
                .collect::<Result<Vec<_>>>()?,
        })
    }

    async fn update_customer(&self, update: &CustomerUpdate, id: CustomerId) -> Result<CustomerId> {
        use entity::customer::Column;

        if update.is_empty() {
            // nothing to write, but absent customers must still surface
            entity::customer::Entity::find_by_id(id.to_string())
                .one(&self.conn)
                .await?
                .ok_or_else(|| Error::NotFound(format!("customer {}", id)))?;
            return Ok(id);
        }

        let mut query = entity::customer::Entity::update_many();
        if let Some(v) = &update.id_card_number {
            query = query.col_expr(Column::IdCardNumber, Expr::value(v.clone()));
        }
        if let Some(v) = &update.full_name {
            query = query.col_expr(Column::FullName, Expr::value(v.clone()));
        }
        if let Some(v) = &update.birth_date {
            query = query.col_expr(Column::BirthDate, Expr::value(v.clone()));
        }
        if let Some(v) = &update.phone_number {
            query = query.col_expr(Column::PhoneNumber, Expr::value(v.clone()));
        }
        if let Some(v) = &update.email {
            query = query.col_expr(Column::Email, Expr::value(v.clone()));
        }
        if let Some(v) = update.monthly_income {
            query = query.col_expr(Column::MonthlyIncome, Expr::value(v));
        }
        if let Some(v) = &update.address_street {
            query = query.col_expr(Column::AddressStreet, Expr::value(v.clone()));
        }
        if let Some(v) = &update.address_city {
            query = query.col_expr(Column::AddressCity, Expr::value(v.clone()));
        }

        let result = query
            .filter(Column::CustomerId.eq(id.to_string()))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("customer {}", id)));
        }
        Ok(id)
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<CustomerId> {
        let result = entity::customer::Entity::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!("customer {}", id)));
        }
        Ok(id)
    }

    // submission operations

    async fn upsert_submission(&self, submission: &Submission) -> Result<SubmissionId> {
        use entity::submission::Column;

        let model: entity::submission::ActiveModel = submission.into();
        // created_at is deliberately part of the update set: the merge path
        // rewrites it from the incoming row
        let resolved = entity::submission::Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::SubmissionId)
                    .update_columns([
                        Column::VehicleType,
                        Column::VehicleBrand,
                        Column::VehicleModel,
                        Column::VehicleLicenseNumber,
                        Column::VehicleOdometer,
                        Column::ManufacturingYear,
                        Column::ProposedLoanAmount,
                        Column::ProposedLoanTenureMonth,
                        Column::LoanStatus,
                        Column::IsCommercialVehicle,
                        Column::CreatedAt,
                        Column::UpdatedAt,
                        Column::CustomerId,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.conn)
            .await?;

        Ok(SubmissionId::parse(&resolved.submission_id)?)
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let results = entity::submission::Entity::find()
            .order_by_desc(entity::submission::Column::CreatedAt)
            .all(&self.conn)
            .await?;
        results.into_iter().map(Submission::try_from).collect()
    }

    async fn get_submission(&self, id: SubmissionId) -> Result<Option<Submission>> {
        let result = entity::submission::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await?;
        result.map(Submission::try_from).transpose()
    }
}
