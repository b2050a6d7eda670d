//! customer type representing a loan applicant.
//!
//! customers are identified internally by a generated [`CustomerId`] and
//! reconciled externally on their id-card number: submitting a payload with a
//! known id-card number updates the existing record instead of creating a
//! duplicate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a customer.
///
/// serialized as the canonical hyphenated uuid string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub Uuid);

impl CustomerId {
    /// generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// parse an identifier from its string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for CustomerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a loan applicant.
///
/// the id-card number is the reconciliation key: unique across all customers,
/// and the field the store's upsert resolves on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// internally generated identifier, stable once assigned.
    pub id: CustomerId,

    /// externally supplied id-card number. Unique.
    pub id_card_number: String,

    /// full legal name.
    pub full_name: String,

    /// birth date as supplied by the client.
    pub birth_date: String,

    /// contact phone number.
    pub phone_number: String,

    /// contact email, if provided.
    pub email: Option<String>,

    /// declared monthly income.
    pub monthly_income: f64,

    /// street part of the home address.
    pub address_street: String,

    /// city part of the home address.
    pub address_city: String,
}

impl Customer {
    /// create a customer with a freshly generated identifier.
    ///
    /// the identifier is a candidate only: the upsert path may resolve to an
    /// already-assigned identifier when the id-card number is known.
    pub fn new(id_card_number: String, full_name: String) -> Self {
        Self {
            id: CustomerId::generate(),
            id_card_number,
            full_name,
            birth_date: String::new(),
            phone_number: String::new(),
            email: None,
            monthly_income: 0.0,
            address_street: String::new(),
            address_city: String::new(),
        }
    }
}

/// a field-level partial update for a customer.
///
/// each field is independently optional: `Some` overwrites the stored value,
/// `None` leaves it untouched. this is deliberately an option-per-field
/// wrapper rather than empty-string sentinels, so "absent" and "set to empty"
/// stay distinguishable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    /// replacement id-card number.
    pub id_card_number: Option<String>,
    /// replacement full name.
    pub full_name: Option<String>,
    /// replacement birth date.
    pub birth_date: Option<String>,
    /// replacement phone number.
    pub phone_number: Option<String>,
    /// replacement email.
    pub email: Option<String>,
    /// replacement monthly income.
    pub monthly_income: Option<f64>,
    /// replacement street address.
    pub address_street: Option<String>,
    /// replacement city.
    pub address_city: Option<String>,
}

impl CustomerUpdate {
    /// whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.id_card_number.is_none()
            && self.full_name.is_none()
            && self.birth_date.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
            && self.monthly_income.is_none()
            && self.address_street.is_none()
            && self.address_city.is_none()
    }
}
