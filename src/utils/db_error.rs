//! Translation of unique-constraint failures into field-level messages.

use regex::RegexBuilder;

/// Fields checked for uniqueness conflicts even when a resource does not
/// declare them.
pub const FALLBACK_UNIQUE_FIELDS: [&str; 4] = ["phone", "email", "code", "name"];

/// A unique field of a resource, with the name shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueField {
    pub name: &'static str,
    pub verbose_name: &'static str,
}

impl UniqueField {
    pub const fn new(name: &'static str, verbose_name: &'static str) -> Self {
        Self { name, verbose_name }
    }
}

/// A database constraint violation as reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityViolation {
    pub table: Option<String>,
    pub constraint: Option<String>,
    pub message: String,
}

impl IntegrityViolation {
    /// Builds a violation that only carries the driver's message text.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            table: None,
            constraint: None,
            message: message.into(),
        }
    }

    /// Captures the table, constraint and message reported by the driver.
    pub fn from_database_error(db: &dyn sqlx::error::DatabaseError) -> Self {
        Self {
            table: db.table().map(str::to_string),
            constraint: db.constraint().map(str::to_string),
            message: db.message().to_string(),
        }
    }
}

impl std::fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Produces a user-facing message for a uniqueness conflict on `table`.
///
/// The violated field is resolved from the constraint name first
/// (`<table>_<field>_key`, the PostgreSQL default), then by scanning the raw
/// message for `<table>.<field>` or `unique … <field>`. Declared fields are
/// tried before [`FALLBACK_UNIQUE_FIELDS`]. When nothing matches the raw
/// message is returned unchanged.
pub fn integrity_message(
    entity: &str,
    table: &str,
    unique_fields: &[UniqueField],
    violation: &IntegrityViolation,
) -> String {
    let candidates: Vec<UniqueField> = unique_fields
        .iter()
        .copied()
        .chain(
            FALLBACK_UNIQUE_FIELDS
                .into_iter()
                .filter(|name| !unique_fields.iter().any(|f| f.name == *name))
                .map(|name| UniqueField::new(name, name)),
        )
        .collect();

    let conflict = |field: &UniqueField| {
        format!(
            "A {entity} with this {} already exists.",
            field.verbose_name
        )
    };

    if let Some(constraint) = violation.constraint.as_deref() {
        let column = constraint
            .strip_prefix(&format!("{table}_"))
            .and_then(|rest| rest.strip_suffix("_key"));
        if let Some(field) = column.and_then(|c| candidates.iter().find(|f| f.name == c)) {
            return conflict(field);
        }
    }

    let qualified_table = violation.table.as_deref().unwrap_or(table);
    for field in &candidates {
        if violation
            .message
            .contains(&format!("{qualified_table}.{}", field.name))
            || mentions_unique(&violation.message, field.name)
        {
            return conflict(field);
        }
    }

    violation.message.clone()
}

fn mentions_unique(message: &str, field: &str) -> bool {
    RegexBuilder::new(&format!("unique.*{}", regex::escape(field)))
        .case_insensitive(true)
        .build()
        .is_ok_and(|re| re.is_match(message))
}
