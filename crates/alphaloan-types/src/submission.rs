//! loan submission type.
//!
//! a submission records one loan application event for a vehicle, bound to
//! exactly one customer. unlike customers, submissions carry no business key:
//! their identifier is generated by the caller at creation time.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// lifecycle status assigned to newly created submissions.
pub const LOAN_STATUS_NEW: &str = "NEW";

/// unique identifier for a loan submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    /// generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// parse an identifier from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for SubmissionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a vehicle-loan submission owned by one customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// caller-generated identifier. Primary key, not a business key.
    pub id: SubmissionId,

    /// vehicle category (e.g. "car", "motorcycle").
    pub vehicle_type: String,

    /// vehicle manufacturer.
    pub vehicle_brand: String,

    /// vehicle model name.
    pub vehicle_model: String,

    /// registration plate number.
    pub vehicle_license_number: String,

    /// odometer reading at submission time.
    pub vehicle_odometer: i64,

    /// year the vehicle was manufactured.
    pub manufacturing_year: i32,

    /// requested loan amount.
    pub proposed_loan_amount: i64,

    /// requested tenure in months.
    pub proposed_loan_tenure_month: i32,

    /// lifecycle status. starts as [`LOAN_STATUS_NEW`].
    pub loan_status: String,

    /// whether the vehicle is used commercially.
    pub is_commercial_vehicle: bool,

    /// creation time, epoch seconds.
    ///
    /// the upsert path rewrites this from the incoming row on conflict, so
    /// update callers must resend the original creation time.
    pub created_at: i64,

    /// last update time, epoch seconds.
    pub updated_at: i64,

    /// owning customer. must exist at submission time.
    pub customer_id: super::CustomerId,
}

impl Submission {
    /// create a fresh submission for a customer with status [`LOAN_STATUS_NEW`]
    /// and both timestamps set to now.
    pub fn new(customer_id: super::CustomerId) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: SubmissionId::generate(),
            vehicle_type: String::new(),
            vehicle_brand: String::new(),
            vehicle_model: String::new(),
            vehicle_license_number: String::new(),
            vehicle_odometer: 0,
            manufacturing_year: 0,
            proposed_loan_amount: 0,
            proposed_loan_tenure_month: 0,
            loan_status: LOAN_STATUS_NEW.to_string(),
            is_commercial_vehicle: false,
            created_at: now,
            updated_at: now,
            customer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CustomerId;

    #[test]
    fn test_new_submission_status_and_timestamps() {
        let submission = Submission::new(CustomerId::generate());
        assert_eq!(submission.loan_status, LOAN_STATUS_NEW);
        assert_eq!(submission.created_at, submission.updated_at);
        assert!(submission.created_at > 0);
    }

    #[test]
    fn test_submission_ids_are_unique() {
        let a = Submission::new(CustomerId::generate());
        let b = Submission::new(CustomerId::generate());
        assert_ne!(a.id, b.id);
    }
}
