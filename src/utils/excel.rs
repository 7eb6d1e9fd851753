//! Spreadsheet to records conversion.
//!
//! Reads the first worksheet of a workbook (xlsx, xlsm, xlsb, xls or ods)
//! into a list of records keyed by the header row. Rows with a missing cell
//! are dropped, as are exact duplicates of an earlier row.

use calamine::{Data, DataType, Reader, open_workbook_auto};
use serde_json::{Map, Number, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// One spreadsheet row: column header to cell value, in column order.
pub type Record = Map<String, Value>;

/// Failure to turn a workbook into records.
#[derive(Debug, thiserror::Error)]
#[error("Error converting Excel file to records: {0}")]
pub struct ExcelConversionError(String);

impl From<calamine::Error> for ExcelConversionError {
    fn from(e: calamine::Error) -> Self {
        Self(e.to_string())
    }
}

/// Converts the first worksheet of the workbook at `path` into records.
///
/// The first row is the header. Empty headers become `Unnamed: <index>` and
/// repeated headers get a `.<n>` suffix. Remaining rows keep their source
/// order.
///
/// # Errors
///
/// Returns [`ExcelConversionError`] if the file is missing, has an
/// unsupported format, cannot be parsed or contains no worksheet.
pub fn convert_excel_to_records(
    path: impl AsRef<Path>,
) -> Result<Vec<Record>, ExcelConversionError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExcelConversionError("workbook has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };

    let records = clean_rows(&column_headers(header_row), rows);
    tracing::debug!(path = %path.display(), records = records.len(), "Workbook converted");
    Ok(records)
}

/// Builds unique column names from the header row.
fn column_headers(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();

    row.iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = match cell {
                Data::Empty => format!("Unnamed: {idx}"),
                Data::String(s) if s.is_empty() => format!("Unnamed: {idx}"),
                other => other.to_string(),
            };

            let mut name = base.clone();
            if taken.contains(&name) {
                let counter = seen.entry(base.clone()).or_insert(0);
                loop {
                    *counter += 1;
                    name = format!("{base}.{counter}");
                    if !taken.contains(&name) {
                        break;
                    }
                }
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Drops incomplete and duplicate rows, mapping the rest onto `headers`.
fn clean_rows<'a>(headers: &[String], rows: impl Iterator<Item = &'a [Data]>) -> Vec<Record> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for row in rows {
        let Some(values) = (0..headers.len())
            .map(|idx| row.get(idx).and_then(cell_value))
            .collect::<Option<Vec<Value>>>()
        else {
            continue;
        };

        // Value has no Hash impl; the serialized row is the dedup key.
        if !seen.insert(Value::Array(values.clone()).to_string()) {
            continue;
        }

        records.push(headers.iter().cloned().zip(values).collect());
    }

    records
}

/// Converts a cell into a JSON value, `None` for a missing value.
fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some(Value::String(s.clone()))
        }
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => float_value(*f),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string())),
    }
}

/// Whole numbers are stored as floats in most workbooks; emit them as integers.
fn float_value(f: f64) -> Option<Value> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        return Some(Value::from(f as i64));
    }
    Number::from_f64(f).map(Value::Number)
}
