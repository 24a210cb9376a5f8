use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use tax_cli::app::{self, BatchFormat, CalcFormat};
use tax_cli::{batch, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income tax calculator for the new tax regime.
///
/// Applies the standard deduction, walks the slab table, then applies the
/// rebate, marginal relief and health and education cess.
#[derive(Debug, Parser)]
#[command(name = "income-tax", version)]
struct Cli {
    /// TOML file overriding the built-in FY 2025-26 values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tax_core=debug`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Do not print log output to the terminal.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the tax on one income.
    Calc {
        /// Annual income; grouping commas are allowed (`12,50,000`).
        income: String,

        /// Do not claim the standard deduction.
        #[arg(long)]
        no_standard_deduction: bool,

        #[arg(long, value_enum, default_value_t)]
        format: CalcFormat,
    },

    /// Compute the tax for every row of a CSV file.
    Batch {
        /// CSV with an `income` column and an optional `standard_deduction` column.
        file: PathBuf,

        #[arg(long, value_enum, default_value_t)]
        format: BatchFormat,
    },

    /// Print the configured slab table.
    Slabs,
}

// ─── logging ─────────────────────────────────────────────────────────────────

fn configure_logging(cli: &Cli) -> anyhow::Result<()> {
    logging::init_logging(&logging::LogOptions {
        level: cli.log_level.as_deref(),
        quiet: cli.quiet,
        file: cli.log_file.as_deref(),
    })
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    configure_logging(&cli).context("configuring logging")?;
    debug!(?cli, "starting");

    let engine = app::load_engine(cli.config.as_deref())?;
    let mut out = io::stdout().lock();

    match &cli.command {
        Command::Calc {
            income,
            no_standard_deduction,
            format,
        } => app::calc(&engine, income, !no_standard_deduction, *format, &mut out),
        Command::Batch { file, format } => {
            let entries = batch::load_from_file(file)?;
            app::batch(&engine, &entries, *format, &mut out)
        }
        Command::Slabs => app::slabs(&engine, &mut out),
    }
}
