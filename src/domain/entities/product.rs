//! Product entity.

use chrono::{DateTime, Utc};

use super::Resource;
use crate::utils::db_error::UniqueField;

/// A catalog product. Prices are stored in minor currency units.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Applies a partial update in place and bumps `updated_at`.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price_cents) = patch.price_cents {
            self.price_cents = price_cents;
        }
        self.updated_at = Utc::now();
    }
}

impl Resource for Product {
    type New = NewProduct;
    type Patch = ProductPatch;

    const VERBOSE_NAME: &'static str = "Product";
    const TABLE: &'static str = "products";
    const UNIQUE_FIELDS: &'static [UniqueField] = &[
        UniqueField::new("name", "name"),
        UniqueField::new("code", "product code"),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

/// Input data for creating a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub price_cents: i64,
}

/// Partial update for an existing product.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<Option<String>>,
    pub price_cents: Option<i64>,
}
