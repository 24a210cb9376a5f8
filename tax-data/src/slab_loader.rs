use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{SlabBracket, TaxRegime};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading slab table data.
#[derive(Debug, Error)]
pub enum SlabTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown regime '{regime}' on row {row}")]
    UnknownRegime { row: usize, regime: String },

    #[error("No slabs for tax year {tax_year} under the {regime} regime")]
    NoSlabs { tax_year: i32, regime: TaxRegime },
}

impl From<csv::Error> for SlabTableLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a slab table CSV file.
///
/// - `tax_year`: first calendar year of the financial year (2025 for FY 2025-26)
/// - `regime`: regime code, e.g. `new`
/// - `min_income`: lower bound of the slab
/// - `max_income`: upper bound of the slab (empty for the open top slab)
/// - `rate_percent`: whole-number rate, e.g. `15` for 15%
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SlabRecord {
    pub tax_year: i32,
    pub regime: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate_percent: u32,
}

impl SlabRecord {
    fn to_bracket(&self) -> SlabBracket {
        SlabBracket {
            min_income: self.min_income,
            max_income: self.max_income,
            rate_percent: self.rate_percent,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for slab tables stored as CSV.
///
/// A single file may carry several years and regimes; [`brackets_for`]
/// picks out one table.
///
/// [`brackets_for`]: SlabTableLoader::brackets_for
pub struct SlabTableLoader;

impl SlabTableLoader {
    /// Parse slab records from a CSV reader.
    ///
    /// Fields are trimmed, so hand-aligned tables load as-is.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SlabRecord>, SlabTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SlabRecord = result?;
            records.push(record);
        }

        debug!(records = records.len(), "parsed slab table");
        Ok(records)
    }

    /// Select the brackets for one tax year and regime, lowest first.
    ///
    /// Every record's regime code must be known, even for rows that are not
    /// selected, so a typo elsewhere in the file is not silently skipped.
    /// The returned brackets are not validated; that happens when they are
    /// placed in a [`tax_core::RegimeConfig`].
    pub fn brackets_for(
        records: &[SlabRecord],
        tax_year: i32,
        regime: TaxRegime,
    ) -> Result<Vec<SlabBracket>, SlabTableLoaderError> {
        let mut brackets = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let record_regime = TaxRegime::parse(&record.regime).ok_or_else(|| {
                SlabTableLoaderError::UnknownRegime {
                    // Header is row 1.
                    row: index + 2,
                    regime: record.regime.clone(),
                }
            })?;

            if record.tax_year == tax_year && record_regime == regime {
                brackets.push(record.to_bracket());
            }
        }

        if brackets.is_empty() {
            return Err(SlabTableLoaderError::NoSlabs { tax_year, regime });
        }

        brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));
        Ok(brackets)
    }

    /// Every `(tax_year, regime)` pair present in the records, sorted.
    pub fn tables(records: &[SlabRecord]) -> Vec<(i32, String)> {
        let mut tables: Vec<_> = records
            .iter()
            .map(|r| (r.tax_year, r.regime.clone()))
            .collect();
        tables.sort();
        tables.dedup();
        tables
    }
}
