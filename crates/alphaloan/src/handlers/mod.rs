//! http handlers for alphaloan api endpoints.

mod customers;
mod error;
mod health;
mod submissions;
mod submit;
mod validation;

pub use customers::{delete_customer, get_customer_info, list_customers, update_customer};
pub use error::{ApiError, JsonBody};
pub use health::health;
pub use submissions::{list_submissions, track_submission};
pub use submit::submit_loan;
