//! DTOs for customer endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::api::handlers::resource::ResourceApi;
use crate::domain::entities::{Customer, CustomerPatch, NewCustomer};

/// Digits, spaces, dashes and parentheses with an optional leading `+`.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()-]{7,20}$").unwrap());

/// Customer codes: letters, digits and dashes.
static CUSTOMER_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").unwrap());

/// Request body for `POST /api/customers`.
///
/// Mandatory fields are `Option`s so that a missing field is reported by
/// validation (`"name is required"`) rather than rejected by deserialization.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(required)]
    #[validate(length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters."))]
    pub name: Option<String>,

    #[validate(required)]
    #[validate(email(message = "Enter a valid email address."))]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "Ensure this field has no more than 20 characters."))]
    #[validate(regex(path = "*PHONE_REGEX", message = "Enter a valid phone number."))]
    pub phone: Option<String>,

    #[validate(required)]
    #[validate(length(min = 2, max = 32, message = "Ensure this field has between 2 and 32 characters."))]
    #[validate(regex(path = "*CUSTOMER_CODE_REGEX", message = "Only letters, digits and dashes are allowed."))]
    pub code: Option<String>,

    pub address: Option<String>,
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(req: CreateCustomerRequest) -> Self {
        NewCustomer {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            phone: req.phone,
            code: req.code.unwrap_or_default(),
            address: req.address,
        }
    }
}

/// Request body for `PUT /api/customers` (besides `id`).
///
/// All fields are optional. `address: null` clears the address.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters."))]
    pub name: Option<String>,

    #[validate(email(message = "Enter a valid email address."))]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "Ensure this field has no more than 20 characters."))]
    #[validate(regex(path = "*PHONE_REGEX", message = "Enter a valid phone number."))]
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 32, message = "Ensure this field has between 2 and 32 characters."))]
    #[validate(regex(path = "*CUSTOMER_CODE_REGEX", message = "Only letters, digits and dashes are allowed."))]
    pub code: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub address: Option<Option<String>>,
}

impl From<UpdateCustomerRequest> for CustomerPatch {
    fn from(req: UpdateCustomerRequest) -> Self {
        CustomerPatch {
            name: req.name,
            email: req.email,
            phone: req.phone.map(Some),
            code: req.code,
            address: req.address,
        }
    }
}

/// Customer representation in list responses.
#[derive(Debug, Serialize)]
pub struct CustomerItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub code: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerItem {
    fn from(c: Customer) -> Self {
        CustomerItem {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            code: c.code,
            address: c.address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl ResourceApi for Customer {
    type CreateRequest = CreateCustomerRequest;
    type UpdateRequest = UpdateCustomerRequest;
    type Item = CustomerItem;

    const FIELDS: &'static [&'static str] = &["name", "email", "phone", "code", "address"];
}
