//! DTOs for product endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use crate::api::handlers::resource::ResourceApi;
use crate::domain::entities::{NewProduct, Product, ProductPatch};

static PRODUCT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9][A-Z0-9-]*$").unwrap());

/// Request body for `POST /api/products`.
///
/// `price_cents` also accepts a numeric string.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(required)]
    #[validate(length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters."))]
    pub name: Option<String>,

    #[validate(required)]
    #[validate(length(max = 32, message = "Ensure this field has no more than 32 characters."))]
    #[validate(regex(path = "*PRODUCT_CODE_REGEX", message = "Use upper-case letters, digits and dashes."))]
    pub code: Option<String>,

    pub description: Option<String>,

    #[validate(required)]
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub price_cents: Option<i64>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            name: req.name.unwrap_or_default(),
            code: req.code.unwrap_or_default(),
            description: req.description,
            price_cents: req.price_cents.unwrap_or_default(),
        }
    }
}

/// Request body for `PUT /api/products` (besides `id`).
///
/// `description: null` clears the description.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters."))]
    pub name: Option<String>,

    #[validate(length(max = 32, message = "Ensure this field has no more than 32 characters."))]
    #[validate(regex(path = "*PRODUCT_CODE_REGEX", message = "Use upper-case letters, digits and dashes."))]
    pub code: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub price_cents: Option<i64>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        ProductPatch {
            name: req.name,
            code: req.code,
            description: req.description,
            price_cents: req.price_cents,
        }
    }
}

/// Product representation in list responses.
#[derive(Debug, Serialize)]
pub struct ProductItem {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductItem {
    fn from(p: Product) -> Self {
        ProductItem {
            id: p.id,
            name: p.name,
            code: p.code,
            description: p.description,
            price_cents: p.price_cents,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl ResourceApi for Product {
    type CreateRequest = CreateProductRequest;
    type UpdateRequest = UpdateProductRequest;
    type Item = ProductItem;

    const FIELDS: &'static [&'static str] = &["name", "code", "description", "price_cents"];
}
