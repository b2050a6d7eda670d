//! customer endpoints: listing, info, partial update and delete.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::AppState;
use crate::handlers::submissions::SubmissionResponse;
use crate::handlers::validation::validate_customer_id;
use crate::handlers::{ApiError, JsonBody};
use alphaloan_db::{Database, Error as DbError};
use alphaloan_types::{Customer, CustomerId, CustomerUpdate};

/// customer representation in api responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub customer_id: CustomerId,
    pub id_card_number: String,
    pub full_name: String,
    pub birth_date: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub monthly_income: f64,
    pub address_street: String,
    pub address_city: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            customer_id: customer.id,
            id_card_number: customer.id_card_number,
            full_name: customer.full_name,
            birth_date: customer.birth_date,
            phone_number: customer.phone_number,
            email: customer.email,
            monthly_income: customer.monthly_income,
            address_street: customer.address_street,
            address_city: customer.address_city,
        }
    }
}

/// envelope for the list customers endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListCustomersResponse {
    pub error_message: Option<String>,
    pub data: Option<Vec<CustomerResponse>>,
}

/// a customer together with every owned submission, newest first.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerWithSubmissionsResponse {
    pub customer: CustomerResponse,
    pub loan_submissions: Vec<SubmissionResponse>,
}

/// envelope for the customer info endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerInfoResponse {
    pub error_message: Option<String>,
    pub data: Option<CustomerWithSubmissionsResponse>,
}

/// request body for the partial update endpoint.
///
/// every field is optional; absent or empty fields leave the stored value
/// unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub id_card_number: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub address_street: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
}

impl UpdateCustomerRequest {
    /// convert to the store-level partial update, folding empty strings into
    /// "leave unchanged".
    fn into_update(self) -> CustomerUpdate {
        let keep = |v: Option<String>| v.filter(|s| !s.is_empty());
        CustomerUpdate {
            id_card_number: keep(self.id_card_number),
            full_name: keep(self.full_name),
            birth_date: keep(self.birth_date),
            phone_number: keep(self.phone_number),
            email: keep(self.email),
            monthly_income: self.monthly_income,
            address_street: keep(self.address_street),
            address_city: keep(self.address_city),
        }
    }
}

/// envelope for the update endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCustomerResponse {
    pub error_message: Option<String>,
    pub customer_id: Option<CustomerId>,
    pub updated: bool,
}

/// envelope for the delete endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteCustomerResponse {
    pub error_message: Option<String>,
    pub customer_id: Option<CustomerId>,
    pub deleted: bool,
}

/// list all customers ordered by full name.
///
/// `GET /api/loan/customers`
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<ListCustomersResponse>, ApiError> {
    let customers = state.db.list_customers().await.map_err(|e| {
        error!(error = %e, "listing customers failed");
        ApiError::internal("Failed to get all loan customers")
    })?;

    debug!(count = customers.len(), "listing customers");
    Ok(Json(ListCustomersResponse {
        error_message: None,
        data: Some(customers.into_iter().map(CustomerResponse::from).collect()),
    }))
}

/// fetch a customer plus every submission it owns, newest first.
///
/// `GET /api/loan/customer/{customer_id}/info`
///
/// a customer with zero submissions is a 200 with an empty list, distinct
/// from an unknown customer (404).
pub async fn get_customer_info(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerInfoResponse>, ApiError> {
    let id = validate_customer_id(&customer_id)?;

    let info = state
        .db
        .get_customer_with_submissions(id)
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => ApiError::not_found("Customer not found"),
            other => {
                error!(error = %other, customer_id = %id, "customer lookup failed");
                ApiError::internal("Failed to get loan customer")
            }
        })?;

    Ok(Json(CustomerInfoResponse {
        error_message: None,
        data: Some(CustomerWithSubmissionsResponse {
            customer: info.customer.into(),
            loan_submissions: info
                .submissions
                .into_iter()
                .map(SubmissionResponse::from)
                .collect(),
        }),
    }))
}

/// apply a field-level partial update to a customer.
///
/// `PATCH /api/loan/customer/{customer_id}/update`
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    JsonBody(req): JsonBody<UpdateCustomerRequest>,
) -> Result<(StatusCode, Json<UpdateCustomerResponse>), ApiError> {
    let id = validate_customer_id(&customer_id)?;

    match state.db.update_customer(&req.into_update(), id).await {
        Ok(updated_id) => {
            info!(customer_id = %updated_id, "customer updated");
            Ok((
                StatusCode::OK,
                Json(UpdateCustomerResponse {
                    error_message: None,
                    customer_id: Some(updated_id),
                    updated: true,
                }),
            ))
        }
        Err(DbError::NotFound(_)) => Ok((
            StatusCode::NOT_FOUND,
            Json(UpdateCustomerResponse {
                error_message: Some("Customer ID not found".to_string()),
                customer_id: Some(id),
                updated: false,
            }),
        )),
        Err(e) => {
            error!(error = %e, customer_id = %id, "customer update failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UpdateCustomerResponse {
                    error_message: Some("Failed to update customer".to_string()),
                    customer_id: Some(id),
                    updated: false,
                }),
            ))
        }
    }
}

/// delete a customer. owned submissions are removed by the store's cascade
/// rule.
///
/// `DELETE /api/loan/customer/{customer_id}/delete`
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<(StatusCode, Json<DeleteCustomerResponse>), ApiError> {
    let id = validate_customer_id(&customer_id)?;

    match state.db.delete_customer(id).await {
        Ok(deleted_id) => {
            warn!(customer_id = %deleted_id, "customer deleted");
            Ok((
                StatusCode::OK,
                Json(DeleteCustomerResponse {
                    error_message: None,
                    customer_id: Some(deleted_id),
                    deleted: true,
                }),
            ))
        }
        Err(DbError::NotFound(_)) => Ok((
            StatusCode::NOT_FOUND,
            Json(DeleteCustomerResponse {
                error_message: Some("Customer ID not found".to_string()),
                customer_id: Some(id),
                deleted: false,
            }),
        )),
        Err(e) => {
            error!(error = %e, customer_id = %id, "customer delete failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteCustomerResponse {
                    error_message: Some("Failed to delete customer".to_string()),
                    customer_id: Some(id),
                    deleted: false,
                }),
            ))
        }
    }
}
