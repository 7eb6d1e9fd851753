//! Common description of entities exposed through the generic API endpoints.

use crate::utils::db_error::UniqueField;

/// An entity that can be created, partially updated and listed.
///
/// The associated constants drive user-facing messages (`VERBOSE_NAME`) and
/// the translation of uniqueness conflicts (`TABLE`, `UNIQUE_FIELDS`).
pub trait Resource: Clone + Send + Sync + 'static {
    /// Input for creating a record.
    type New: Send + Sync + 'static;
    /// Partial update; absent fields are left unchanged.
    type Patch: Send + Sync + 'static;

    /// Human-readable entity name, e.g. `"Customer"`.
    const VERBOSE_NAME: &'static str;
    /// Storage table name.
    const TABLE: &'static str;
    /// Columns with a uniqueness constraint, in lookup order.
    const UNIQUE_FIELDS: &'static [UniqueField];

    fn id(&self) -> i64;
}
