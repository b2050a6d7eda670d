//! loan submission listing and tracking endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::AppState;
use crate::handlers::ApiError;
use crate::handlers::validation::validate_submission_id;
use alphaloan_db::Database;
use alphaloan_types::{CustomerId, Submission, SubmissionId};

/// submission representation in api responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub submission_id: SubmissionId,
    pub vehicle_type: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_license_number: String,
    pub vehicle_odometer: i64,
    pub manufacturing_year: i32,
    pub proposed_loan_amount: i64,
    pub proposed_loan_tenure_month: i32,
    pub loan_status: String,
    pub is_commercial_vehicle: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub customer_id: CustomerId,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            submission_id: submission.id,
            vehicle_type: submission.vehicle_type,
            vehicle_brand: submission.vehicle_brand,
            vehicle_model: submission.vehicle_model,
            vehicle_license_number: submission.vehicle_license_number,
            vehicle_odometer: submission.vehicle_odometer,
            manufacturing_year: submission.manufacturing_year,
            proposed_loan_amount: submission.proposed_loan_amount,
            proposed_loan_tenure_month: submission.proposed_loan_tenure_month,
            loan_status: submission.loan_status,
            is_commercial_vehicle: submission.is_commercial_vehicle,
            created_at: submission.created_at,
            updated_at: submission.updated_at,
            customer_id: submission.customer_id,
        }
    }
}

/// envelope for the list submissions endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListSubmissionsResponse {
    pub error_message: Option<String>,
    pub data: Option<Vec<SubmissionResponse>>,
}

/// envelope for the track submission endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackSubmissionResponse {
    pub error_message: Option<String>,
    pub data: Option<SubmissionResponse>,
}

/// query parameters for the track endpoint.
#[derive(Debug, Deserialize)]
pub struct TrackParams {
    pub loan_submission_id: Option<String>,
}

/// list all loan submissions, newest first.
///
/// `GET /api/loan/submissions`
pub async fn list_submissions(
    State(state): State<AppState>,
) -> Result<Json<ListSubmissionsResponse>, ApiError> {
    let submissions = state.db.list_submissions().await.map_err(|e| {
        error!(error = %e, "listing submissions failed");
        ApiError::internal("Failed to get all loan submissions")
    })?;

    debug!(count = submissions.len(), "listing loan submissions");
    Ok(Json(ListSubmissionsResponse {
        error_message: None,
        data: Some(
            submissions
                .into_iter()
                .map(SubmissionResponse::from)
                .collect(),
        ),
    }))
}

/// fetch one loan submission by id.
///
/// `GET /api/loan/submission/track?loan_submission_id=<uuid>`
///
/// an absent submission is 404; a malformed identifier never reaches the
/// store.
pub async fn track_submission(
    State(state): State<AppState>,
    Query(params): Query<TrackParams>,
) -> Result<Json<TrackSubmissionResponse>, ApiError> {
    let id = validate_submission_id(params.loan_submission_id.as_deref())?;

    let submission = state
        .db
        .get_submission(id)
        .await
        .map_err(|e| {
            error!(error = %e, submission_id = %id, "submission lookup failed");
            ApiError::internal("Failed to get loan submission")
        })?
        .ok_or_else(|| ApiError::not_found("Loan submission not found"))?;

    Ok(Json(TrackSubmissionResponse {
        error_message: None,
        data: Some(submission.into()),
    }))
}
