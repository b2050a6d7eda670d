//! core types for alphaloan - a vehicle-loan origination service.
//!
//! this crate provides the fundamental data structures used throughout alphaloan:
//! - [`customer`]: loan applicant records, reconciled on their id-card number
//! - [`submission`]: vehicle-loan submissions, each owned by one customer
//! - [`config`]: application configuration

#![warn(missing_docs)]

mod config;
mod customer;
mod submission;

pub use config::{Config, DatabaseConfig, SqliteConfig};
pub use customer::{Customer, CustomerId, CustomerUpdate};
pub use submission::{LOAN_STATUS_NEW, Submission, SubmissionId};
