//! customer entity for database storage.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use alphaloan_types::{Customer, CustomerId};

/// customer database model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loan_customers")]
pub struct Model {
    /// uuid in canonical hyphenated form.
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_id: String,

    /// reconciliation key. Unique.
    #[sea_orm(unique)]
    pub id_card_number: String,

    pub full_name: String,
    pub birth_date: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub monthly_income: f64,
    pub address_street: String,
    pub address_city: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submission::Entity")]
    Submissions,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Customer {
    type Error = crate::Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Customer {
            id: CustomerId::parse(&model.customer_id)?,
            id_card_number: model.id_card_number,
            full_name: model.full_name,
            birth_date: model.birth_date,
            phone_number: model.phone_number,
            email: model.email,
            monthly_income: model.monthly_income,
            address_street: model.address_street,
            address_city: model.address_city,
        })
    }
}

impl From<&Customer> for ActiveModel {
    fn from(customer: &Customer) -> Self {
        ActiveModel {
            customer_id: Set(customer.id.to_string()),
            id_card_number: Set(customer.id_card_number.clone()),
            full_name: Set(customer.full_name.clone()),
            birth_date: Set(customer.birth_date.clone()),
            phone_number: Set(customer.phone_number.clone()),
            email: Set(customer.email.clone()),
            monthly_income: Set(customer.monthly_income),
            address_street: Set(customer.address_street.clone()),
            address_city: Set(customer.address_city.clone()),
        }
    }
}
