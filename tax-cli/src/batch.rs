//! CSV loader for batch calculations.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header
//! names are case-sensitive.
//!
//! | Column               | Required | Notes                                        |
//! |----------------------|----------|----------------------------------------------|
//! | `income`             | yes      | Free text, read like the `calc` argument     |
//! | `standard_deduction` | no       | `true`/`false`, `yes`/`no`, `y`/`n`, `1`/`0` |
//!
//! An empty or missing `standard_deduction` means the deduction is claimed.
//! Incomes with grouping separators must be quoted:
//!
//! ```csv
//! income,standard_deduction
//! 1000000,
//! "12,50,000",false
//! ```
use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{TaxComputationResult, TaxEngine};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    income: String,
    #[serde(default)]
    standard_deduction: Option<String>,
}

/// Errors that can occur while loading batch input.
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    /// Bad structure or a missing `income` column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based and counts data rows only (header = row 0).
    #[error("unrecognised standard_deduction value '{value}' on row {row}")]
    InvalidDeductionFlag { value: String, row: usize },
}

/// One income to compute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub row: usize,
    pub income: String,
    pub apply_standard_deduction: bool,
}

/// One computed row, as written to CSV and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRecord {
    pub row: usize,
    pub income: Decimal,
    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    pub gross_tax: Decimal,
    pub rebate: Decimal,
    pub marginal_relief: Decimal,
    pub cess: Decimal,
    pub final_liability: Decimal,
}

impl BatchRecord {
    pub fn new(
        row: usize,
        result: &TaxComputationResult,
    ) -> Self {
        Self {
            row,
            income: result.income,
            standard_deduction: result.standard_deduction_applied,
            taxable_income: result.taxable_income,
            gross_tax: result.gross_tax,
            rebate: result.rebate,
            marginal_relief: result.marginal_relief,
            cess: result.cess,
            final_liability: result.final_liability,
        }
    }
}

fn parse_deduction_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchEntry, BatchLoadError> {
    let apply_standard_deduction = match row.standard_deduction {
        None => true,
        Some(flag) => {
            parse_deduction_flag(&flag).ok_or(BatchLoadError::InvalidDeductionFlag {
                value: flag,
                row: row_number,
            })?
        }
    };

    Ok(BatchEntry {
        row: row_number,
        income: row.income,
        apply_standard_deduction,
    })
}

/// Parses CSV text into batch entries, in file order.
///
/// # Errors
///
/// * [`BatchLoadError::Parse`] if the CSV is structurally invalid or has no
///   `income` column.
/// * [`BatchLoadError::InvalidDeductionFlag`] if a `standard_deduction`
///   cell is not a recognised yes/no value.
pub fn load_from_str(input: &str) -> Result<Vec<BatchEntry>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> anyhow::Result<Vec<BatchEntry>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read batch file {}", path.display()))?;
    let entries = load_from_str(&contents)
        .with_context(|| format!("invalid batch file {}", path.display()))?;
    debug!(path = %path.display(), rows = entries.len(), "loaded batch input");
    Ok(entries)
}

/// Computes every entry with one engine.
pub fn compute_all(
    engine: &TaxEngine,
    entries: &[BatchEntry],
) -> Vec<BatchRecord> {
    entries
        .iter()
        .map(|entry| {
            let result = engine.compute(&entry.income, entry.apply_standard_deduction);
            BatchRecord::new(entry.row, &result)
        })
        .collect()
}
