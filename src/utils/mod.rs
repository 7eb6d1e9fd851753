//! Helpers shared by the HTTP layer and the admin CLI.
//!
//! - [`error_formatter`] - Flattens error details into one readable message
//! - [`db_error`] - Friendly messages for unique constraint violations
//! - [`excel`] - Spreadsheet to records conversion

pub mod db_error;
pub mod error_formatter;
pub mod excel;
