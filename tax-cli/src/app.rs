//! Command implementations, written against any `io::Write` so they can be
//! driven from tests as well as from `main`.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tax_core::{RegimeConfig, TaxEngine};
use tax_data::load_regime_config;
use tracing::{debug, info};

use crate::batch::{self, BatchEntry};
use crate::render;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CalcFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BatchFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Builds the engine from a config file, or from the built-in FY 2025-26
/// values when no file is given.
pub fn load_engine(config_path: Option<&Path>) -> Result<TaxEngine> {
    let config = match config_path {
        Some(path) => load_regime_config(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => {
            debug!("no configuration file given; using built-in values");
            RegimeConfig::default()
        }
    };

    TaxEngine::new(config).context("building tax engine")
}

/// `income-tax calc`
pub fn calc<W: Write>(
    engine: &TaxEngine,
    income: &str,
    apply_standard_deduction: bool,
    format: CalcFormat,
    out: &mut W,
) -> Result<()> {
    let result = engine.compute(income, apply_standard_deduction);
    info!(
        income = %result.income,
        final_liability = %result.final_liability,
        "computed tax"
    );

    match format {
        CalcFormat::Text => writeln!(out, "{}", render::summary(&result, engine.config()))?,
        CalcFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &result)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// `income-tax batch`
pub fn batch<W: Write>(
    engine: &TaxEngine,
    entries: &[BatchEntry],
    format: BatchFormat,
    out: &mut W,
) -> Result<()> {
    let records = batch::compute_all(engine, entries);
    info!(rows = records.len(), "computed batch");

    match format {
        BatchFormat::Table => {
            if records.is_empty() {
                writeln!(out, "No incomes found in batch file")?;
            } else {
                writeln!(out, "{}", render::batch_table(&records))?;
            }
        }
        BatchFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for record in &records {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }
        BatchFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// `income-tax slabs`
pub fn slabs<W: Write>(
    engine: &TaxEngine,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", render::regime_table(engine.config()))?;
    Ok(())
}
