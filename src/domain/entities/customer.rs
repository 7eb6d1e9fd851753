//! Customer entity.

use chrono::{DateTime, Utc};

use super::Resource;
use crate::utils::db_error::UniqueField;

/// A customer record.
///
/// `email`, `code` and (when present) `phone` are unique across customers.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub code: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Applies a partial update in place and bumps `updated_at`.
    pub fn apply(&mut self, patch: CustomerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        self.updated_at = Utc::now();
    }
}

impl Resource for Customer {
    type New = NewCustomer;
    type Patch = CustomerPatch;

    const VERBOSE_NAME: &'static str = "Customer";
    const TABLE: &'static str = "customers";
    const UNIQUE_FIELDS: &'static [UniqueField] = &[
        UniqueField::new("email", "email"),
        UniqueField::new("phone", "phone number"),
        UniqueField::new("code", "customer code"),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

/// Input data for creating a new customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub code: String,
    pub address: Option<String>,
}

/// Partial update for an existing customer.
///
/// `None` fields are left unchanged. For `phone` and `address`,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub code: Option<String>,
    pub address: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        let now = Utc::now();
        Customer {
            id: 7,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+44 20 7946 0000".to_string()),
            code: "C-007".to_string(),
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut c = customer();
        let before = c.updated_at;

        c.apply(CustomerPatch {
            name: Some("Ada King".to_string()),
            address: Some(Some("12 St James's Square".to_string())),
            ..Default::default()
        });

        assert_eq!(c.name, "Ada King");
        assert_eq!(c.email, "ada@example.com");
        assert_eq!(c.address.as_deref(), Some("12 St James's Square"));
        assert!(c.phone.is_some());
        assert!(c.updated_at >= before);
    }

    #[test]
    fn test_apply_clears_optional_fields() {
        let mut c = customer();
        c.apply(CustomerPatch {
            phone: Some(None),
            ..Default::default()
        });
        assert!(c.phone.is_none());
    }

    #[test]
    fn test_resource_metadata() {
        assert_eq!(Customer::TABLE, "customers");
        assert_eq!(customer().id(), 7);
        assert!(Customer::UNIQUE_FIELDS.iter().any(|f| f.name == "code"));
    }
}
