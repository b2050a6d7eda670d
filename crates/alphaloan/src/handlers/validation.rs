//! input validation for the loan api endpoints.

use uuid::Uuid;

use super::ApiError;

use alphaloan_types::{CustomerId, SubmissionId};

/// parse a string as a canonical hyphenated uuid (8-4-4-4-12).
///
/// case-insensitive; braced, urn and compact forms are rejected.
fn parse_canonical_uuid(raw: &str) -> Option<Uuid> {
    if raw.len() != 36 {
        return None;
    }
    Uuid::try_parse(raw).ok()
}

/// validate a customer identifier from a path segment.
///
/// rejected identifiers never reach the store.
pub fn validate_customer_id(raw: &str) -> Result<CustomerId, ApiError> {
    if raw.is_empty() {
        return Err(ApiError::bad_request("Missing customer_id path variable"));
    }
    parse_canonical_uuid(raw)
        .map(CustomerId::from)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid customer_id: {}", raw)))
}

/// validate a loan submission identifier from a query parameter.
pub fn validate_submission_id(raw: Option<&str>) -> Result<SubmissionId, ApiError> {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        return Err(ApiError::bad_request(
            "Missing submission_id query parameter",
        ));
    }
    parse_canonical_uuid(raw)
        .map(SubmissionId::from)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid submission_id: {}", raw)))
}
