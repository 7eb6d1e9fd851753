//! CLI administration tool for records-api.
//!
//! Imports spreadsheets into the record tables, previews spreadsheets page by
//! page, and checks the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Import customers from a workbook (first sheet, first row is the header)
//! cargo run --bin admin -- import customers ./customers.xlsx
//!
//! # Preview the cleaned rows of a workbook
//! cargo run --bin admin -- preview ./products.xlsx --page 2 --per-page 20
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `import` and `db`): PostgreSQL connection string

use records_api::api::dto::customer::CreateCustomerRequest;
use records_api::api::dto::pagination::{PaginationParams, paginate};
use records_api::api::dto::product::CreateProductRequest;
use records_api::api::handlers::{ResourceApi, validate_request};
use records_api::application::services::ResourceService;
use records_api::domain::entities::{Customer, Product};
use records_api::domain::repositories::{HealthRepository, ResourceRepository};
use records_api::error::AppError;
use records_api::infrastructure::persistence::{
    PgCustomerRepository, PgHealthRepository, PgProductRepository,
};
use records_api::utils::db_error::integrity_message;
use records_api::utils::error_formatter::format_error;
use records_api::utils::excel::{Record, convert_excel_to_records};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::Confirm;
use serde_json::Value;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing records-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Import records from a spreadsheet
    Import {
        /// Target table
        #[arg(value_enum)]
        target: ImportTarget,

        /// Workbook path (xlsx, xlsm, xlsb, xls, ods)
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the cleaned rows of a spreadsheet
    Preview {
        /// Workbook path (xlsx, xlsm, xlsb, xls, ods)
        file: PathBuf,

        #[arg(long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 10)]
        per_page: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ImportTarget {
    Customers,
    Products,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import { target, file, yes } => {
            let pool = connect().await?;
            match target {
                ImportTarget::Customers => {
                    let repo = Arc::new(PgCustomerRepository::new(Arc::new(pool)));
                    import_records::<Customer>(repo, file, yes).await?
                }
                ImportTarget::Products => {
                    let repo = Arc::new(PgProductRepository::new(Arc::new(pool)));
                    import_records::<Product>(repo, file, yes).await?
                }
            }
        }
        Commands::Preview {
            file,
            page,
            per_page,
        } => preview(file, page, per_page)?,
        Commands::Db { action } => {
            let pool = connect().await?;
            handle_db_action(action, &pool).await?
        }
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Imports every cleaned row of `file` as a new record.
///
/// # Flow
///
/// 1. Convert the workbook (incomplete and duplicate rows are dropped)
/// 2. Confirm the import (unless `--yes` flag)
/// 3. Validate and insert each row, reporting failures per row
///
/// A failing row does not stop the import.
async fn import_records<R: ResourceApi>(
    repo: Arc<dyn ResourceRepository<R>>,
    file: PathBuf,
    skip_confirm: bool,
) -> Result<()> {
    println!(
        "{}",
        format!("📥 Import {} records", R::VERBOSE_NAME)
            .bright_blue()
            .bold()
    );
    println!();

    let records = convert_excel_to_records(&file)?;
    println!(
        "  {} rows ready in {}",
        records.len().to_string().bright_white().bold(),
        file.display().to_string().cyan()
    );
    println!();

    if records.is_empty() {
        println!("{}", "  Nothing to import".yellow());
        return Ok(());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Import {} rows into {}?", records.len(), R::TABLE))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = ResourceService::new(repo);
    let mut imported = 0usize;
    let mut failed = 0usize;

    for (idx, record) in records.into_iter().enumerate() {
        // Data rows start on sheet row 2.
        let row = idx + 2;

        match import_row::<R>(&service, record).await {
            Ok(()) => imported += 1,
            Err(message) => {
                failed += 1;
                println!("  {} row {}: {}", "✗".red(), row, message);
            }
        }
    }

    println!();
    println!(
        "  Imported: {}  Failed: {}",
        imported.to_string().green().bold(),
        failed.to_string().red().bold()
    );
    println!();

    Ok(())
}

/// Validates and inserts one row, returning a printable failure message.
async fn import_row<R: ResourceApi>(
    service: &ResourceService<R>,
    record: Record,
) -> std::result::Result<(), String> {
    let request: R::CreateRequest =
        serde_json::from_value(Value::Object(text_cells(record))).map_err(|e| e.to_string())?;

    validate_request::<R>(&request).map_err(|e| e.to_string())?;

    match service.create(request.into()).await {
        Ok(_) => Ok(()),
        Err(AppError::Integrity(violation)) => Err(integrity_message(
            R::VERBOSE_NAME,
            R::TABLE,
            R::UNIQUE_FIELDS,
            &violation,
        )),
        Err(AppError::Validation(detail)) => Err(format_error(&detail)),
        Err(e) => Err(e.to_string()),
    }
}

/// Spreadsheet numbers and booleans become text, so phone numbers and codes
/// typed as numbers still deserialize into string fields.
fn text_cells(record: Record) -> Record {
    record
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Number(n) => Value::String(n.to_string()),
                Value::Bool(b) => Value::String(b.to_string()),
                other => other,
            };
            (key, value)
        })
        .collect()
}

/// Prints one page of cleaned spreadsheet rows.
///
/// # Output Format
///
/// ```text
/// 📄 customers.xlsx (page 1 of 3, 25 rows)
///
///   name: Alice  email: alice@example.com  code: C-001
///   name: Carol  email: carol@example.com  code: C-003
/// ```
fn preview(file: PathBuf, page: i64, per_page: i64) -> Result<()> {
    let records = convert_excel_to_records(&file)?;
    let params = PaginationParams::new(Some(page), Some(per_page));
    let (rows, page_info) = paginate(&records, &params);

    println!(
        "{} {}",
        "📄".bright_blue(),
        format!(
            "{} (page {} of {}, {} rows)",
            file.display(),
            page_info.current_page,
            page_info.total_pages,
            page_info.total_count
        )
        .bright_blue()
        .bold()
    );
    println!();

    if rows.is_empty() {
        println!("{}", "  No rows".yellow());
        println!();
        return Ok(());
    }

    for record in rows {
        let line = record
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                format!("{}: {}", key.bright_black(), value)
            })
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {line}");
    }

    println!();
    if page_info.has_next_page {
        println!(
            "  Next: {} --page {}",
            "admin preview".bright_cyan(),
            page_info.current_page + 1
        );
        println!();
    }

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => check_database(pool).await,
    }
}

/// Checks database connectivity and shows table sizes.
async fn check_database(pool: &PgPool) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());

    PgHealthRepository::new(Arc::new(pool.clone()))
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

    println!("{}", "✅ Database connection OK".green().bold());
    println!();

    let customers = PgCustomerRepository::new(Arc::new(pool.clone()))
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count customers: {}", e))?;
    let products = PgProductRepository::new(Arc::new(pool.clone()))
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count products: {}", e))?;

    println!("  Customers: {}", customers.to_string().bright_white().bold());
    println!("  Products:  {}", products.to_string().bright_white().bold());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    #[test]
    fn test_text_cells_stringifies_scalars() {
        let Value::Object(record) = json!({"phone": 5551234, "active": true, "name": "Ann"}) else {
            unreachable!()
        };

        let record = text_cells(record);
        assert_eq!(record["phone"], "5551234");
        assert_eq!(record["active"], "true");
        assert_eq!(record["name"], "Ann");
    }

    #[test]
    fn test_spreadsheet_row_deserializes_into_requests() {
        let Value::Object(record) = json!({"name": "Lamp", "code": "LMP-1", "price_cents": 1999}) else {
            unreachable!()
        };

        let request: CreateProductRequest =
            serde_json::from_value(Value::Object(text_cells(record))).unwrap();
        assert_eq!(request.price_cents, Some(1999));
        assert!(request.validate().is_ok());

        let Value::Object(record) =
            json!({"name": "Ann", "email": "ann@example.com", "code": "C-1", "phone": 5551234})
        else {
            unreachable!()
        };
        let request: CreateCustomerRequest =
            serde_json::from_value(Value::Object(text_cells(record))).unwrap();
        assert_eq!(request.phone.as_deref(), Some("5551234"));
    }
}
