//! loan submission entity for database storage.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use alphaloan_types::{CustomerId, Submission, SubmissionId};

/// loan submission database model.
///
/// timestamps are epoch seconds, matching the wire representation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loan_submissions")]
pub struct Model {
    /// uuid in canonical hyphenated form.
    #[sea_orm(primary_key, auto_increment = false)]
    pub submission_id: String,

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

    /// owning customer. foreign key, cascade on delete.
    pub customer_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::CustomerId",
        on_delete = "Cascade"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Submission {
    type Error = crate::Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Submission {
            id: SubmissionId::parse(&model.submission_id)?,
            vehicle_type: model.vehicle_type,
            vehicle_brand: model.vehicle_brand,
            vehicle_model: model.vehicle_model,
            vehicle_license_number: model.vehicle_license_number,
            vehicle_odometer: model.vehicle_odometer,
            manufacturing_year: model.manufacturing_year,
            proposed_loan_amount: model.proposed_loan_amount,
            proposed_loan_tenure_month: model.proposed_loan_tenure_month,
            loan_status: model.loan_status,
            is_commercial_vehicle: model.is_commercial_vehicle,
            created_at: model.created_at,
            updated_at: model.updated_at,
            customer_id: CustomerId::parse(&model.customer_id)?,
        })
    }
}

impl From<&Submission> for ActiveModel {
    fn from(submission: &Submission) -> Self {
        ActiveModel {
            submission_id: Set(submission.id.to_string()),
            vehicle_type: Set(submission.vehicle_type.clone()),
            vehicle_brand: Set(submission.vehicle_brand.clone()),
            vehicle_model: Set(submission.vehicle_model.clone()),
            vehicle_license_number: Set(submission.vehicle_license_number.clone()),
            vehicle_odometer: Set(submission.vehicle_odometer),
            manufacturing_year: Set(submission.manufacturing_year),
            proposed_loan_amount: Set(submission.proposed_loan_amount),
            proposed_loan_tenure_month: Set(submission.proposed_loan_tenure_month),
            loan_status: Set(submission.loan_status.clone()),
            is_commercial_vehicle: Set(submission.is_commercial_vehicle),
            created_at: Set(submission.created_at),
            updated_at: Set(submission.updated_at),
            customer_id: Set(submission.customer_id.to_string()),
        }
    }
}
