//! database entity models for sea-orm.
//!
//! these entities map to database tables and handle conversion between
//! stored rows and the domain types in `alphaloan-types`.

pub mod customer;
pub mod submission;
