//! loan submission intake endpoint.
//!
//! a single request carries both a customer payload and a proposed-loan
//! payload. the customer side is reconciled on the id-card number: the store
//! decides whether the freshly generated identifier candidate is kept or an
//! existing one reused. the submission is then bound to whichever identifier
//! was resolved.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::AppState;
use crate::handlers::{ApiError, JsonBody};
use alphaloan_db::Database;
use alphaloan_types::{Customer, CustomerId, Submission, SubmissionId};

/// customer payload of a submit request.
///
/// fields beyond the reconciliation key and name are optional on the wire and
/// default to empty, matching lenient json decoding.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerPayload {
    /// absent decodes to empty so the handler can report which field is
    /// missing instead of a generic body rejection.
    #[serde(default)]
    pub id_card_number: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub monthly_income: f64,
    #[serde(default)]
    pub address_street: String,
    #[serde(default)]
    pub address_city: String,
}

impl CustomerPayload {
    /// build a customer row with a fresh identifier candidate.
    ///
    /// an empty email string is treated as absent.
    fn into_row(self) -> Customer {
        Customer {
            id: CustomerId::generate(),
            id_card_number: self.id_card_number,
            full_name: self.full_name,
            birth_date: self.birth_date,
            phone_number: self.phone_number,
            email: self.email.filter(|e| !e.is_empty()),
            monthly_income: self.monthly_income,
            address_street: self.address_street,
            address_city: self.address_city,
        }
    }
}

/// proposed-loan payload of a submit request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProposedLoanPayload {
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub vehicle_brand: String,
    #[serde(default)]
    pub vehicle_model: String,
    #[serde(default)]
    pub vehicle_license_number: String,
    #[serde(default)]
    pub vehicle_odometer: i64,
    #[serde(default)]
    pub manufacturing_year: i32,
    #[serde(default)]
    pub proposed_loan_amount: i64,
    #[serde(default)]
    pub proposed_loan_tenure_month: i32,
    #[serde(default)]
    pub is_commercial_vehicle: bool,
}

impl ProposedLoanPayload {
    /// build a submission row bound to the resolved customer, with a fresh
    /// identifier, status "NEW" and both timestamps set to now.
    fn into_row(self, customer_id: CustomerId) -> Submission {
        Submission {
            vehicle_type: self.vehicle_type,
            vehicle_brand: self.vehicle_brand,
            vehicle_model: self.vehicle_model,
            vehicle_license_number: self.vehicle_license_number,
            vehicle_odometer: self.vehicle_odometer,
            manufacturing_year: self.manufacturing_year,
            proposed_loan_amount: self.proposed_loan_amount,
            proposed_loan_tenure_month: self.proposed_loan_tenure_month,
            is_commercial_vehicle: self.is_commercial_vehicle,
            ..Submission::new(customer_id)
        }
    }
}

/// request body for the submit endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanSubmitRequest {
    pub customer: CustomerPayload,
    pub proposed_loan: ProposedLoanPayload,
}

/// response for the submit endpoint: both resolved identifiers.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanSubmitResponse {
    pub customer_id: CustomerId,
    pub submission_id: SubmissionId,
}

/// create or merge a customer and record a loan submission for it.
///
/// `POST /api/loan/submit`
///
/// the two upserts are independent round trips without an enclosing
/// transaction: a crash in between can leave the customer persisted without
/// its submission (at-least-once customer creation).
pub async fn submit_loan(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoanSubmitRequest>,
) -> Result<Json<LoanSubmitResponse>, ApiError> {
    if req.customer.id_card_number.is_empty() {
        return Err(ApiError::bad_request("Missing customer id_card_number"));
    }
    if req.customer.full_name.is_empty() {
        return Err(ApiError::bad_request("Missing customer full_name"));
    }

    let customer = req.customer.into_row();
    let customer_id = state.db.upsert_customer(&customer).await.map_err(|e| {
        error!(error = %e, "customer upsert failed");
        ApiError::internal("Failed to submit loan")
    })?;

    let submission = req.proposed_loan.into_row(customer_id);
    let submission_id = state.db.upsert_submission(&submission).await.map_err(|e| {
        error!(error = %e, %customer_id, "submission upsert failed");
        ApiError::internal("Failed to submit loan")
    })?;

    info!(%customer_id, %submission_id, "loan submitted");
    Ok(Json(LoanSubmitResponse {
        customer_id,
        submission_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_deserialization_minimal() {
        let json = r#"{
            "customer": {"id_card_number": "A1", "full_name": "Jane"},
            "proposed_loan": {"vehicle_brand": "Toyota", "proposed_loan_amount": 10000}
        }"#;
        let req: LoanSubmitRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.customer.id_card_number, "A1");
        assert_eq!(req.customer.full_name, "Jane");
        assert!(req.customer.email.is_none());
        assert_eq!(req.proposed_loan.vehicle_brand, "Toyota");
        assert_eq!(req.proposed_loan.proposed_loan_amount, 10_000);
        // absent fields default
        assert_eq!(req.proposed_loan.vehicle_odometer, 0);
        assert!(!req.proposed_loan.is_commercial_vehicle);
    }

    #[test]
    fn test_customer_payload_absent_fields_decode_to_empty() {
        let req: LoanSubmitRequest =
            serde_json::from_str(r#"{"customer": {}, "proposed_loan": {}}"#).unwrap();
        assert!(req.customer.id_card_number.is_empty());
        assert!(req.customer.full_name.is_empty());
    }

    #[test]
    fn test_customer_payload_empty_email_becomes_absent() {
        let json = r#"{"id_card_number": "A1", "full_name": "Jane", "email": ""}"#;
        let payload: CustomerPayload = serde_json::from_str(json).unwrap();
        let row = payload.into_row();
        assert!(row.email.is_none());
    }

    #[test]
    fn test_proposed_loan_row_gets_new_status() {
        let payload = ProposedLoanPayload {
            vehicle_type: "car".to_string(),
            vehicle_brand: "Toyota".to_string(),
            vehicle_model: "Avanza".to_string(),
            vehicle_license_number: "B 1 X".to_string(),
            vehicle_odometer: 10,
            manufacturing_year: 2020,
            proposed_loan_amount: 10_000,
            proposed_loan_tenure_month: 12,
            is_commercial_vehicle: true,
        };
        let customer_id = CustomerId::generate();
        let row = payload.into_row(customer_id);
        assert_eq!(row.loan_status, alphaloan_types::LOAN_STATUS_NEW);
        assert_eq!(row.customer_id, customer_id);
        assert_eq!(row.created_at, row.updated_at);
        assert!(row.is_commercial_vehicle);
    }

    #[test]
    fn test_submit_response_serialization() {
        let response = LoanSubmitResponse {
            customer_id: CustomerId::parse("b5e3d2f0-8c1a-4b6e-9f3d-2a7c4e8b1d09").unwrap(),
            submission_id: SubmissionId::parse("7f1c9a42-6d5b-4e8f-a203-91c7d6e4b5a8").unwrap(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"customer_id\":\"b5e3d2f0-8c1a-4b6e-9f3d-2a7c4e8b1d09\""));
        assert!(json.contains("\"submission_id\":\"7f1c9a42-6d5b-4e8f-a203-91c7d6e4b5a8\""));
    }
}
