//! The tax computation pipeline.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Parse the income text (unparsable → 0) |
//! | 2    | Subtract the standard deduction if elected |
//! | 3    | Allocate taxable income across the slabs |
//! | 4    | Gross tax: sum of slab contributions |
//! | 5    | Rebate (at or below the ceiling) or marginal relief (above it) |
//! | 6    | Cess on the tax left after step 5 |
//! | 7    | Final liability: step 4 − step 5 + step 6 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxEngine;
//!
//! let engine = TaxEngine::default();
//! let result = engine.compute("13,00,000", false);
//!
//! assert_eq!(result.gross_tax, dec!(75000));
//! assert_eq!(result.marginal_relief, dec!(0));
//! assert_eq!(result.cess, dec!(3000));
//! assert_eq!(result.final_liability, dec!(78000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::{income, relief, slabs};
use crate::{RegimeConfig, RegimeConfigError, TaxComputationResult, TaxSlab};

/// Maps income text and a deduction election to a [`TaxComputationResult`].
///
/// The engine holds only its validated configuration. It is immutable, so a
/// single instance can serve any number of calculations, from any thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxEngine {
    config: RegimeConfig,
}

impl TaxEngine {
    /// Creates an engine for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegimeConfigError`] if the configuration fails
    /// [`RegimeConfig::validate`]. Once built, no engine operation can fail.
    pub fn new(config: RegimeConfig) -> Result<Self, RegimeConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RegimeConfig {
        &self.config
    }

    /// Runs the full pipeline on raw income text.
    ///
    /// Malformed or empty text is treated as zero income.
    pub fn compute(
        &self,
        raw_income: &str,
        apply_standard_deduction: bool,
    ) -> TaxComputationResult {
        let income = Decimal::from(income::parse_income(raw_income));
        self.compute_income(income, apply_standard_deduction)
    }

    /// Runs the pipeline on an income that has already been parsed.
    pub fn compute_income(
        &self,
        income: Decimal,
        apply_standard_deduction: bool,
    ) -> TaxComputationResult {
        let (taxable_income, standard_deduction_applied) =
            self.taxable_income(income, apply_standard_deduction);

        let slab_breakdown = self.allocate_slabs(taxable_income);
        let gross_tax: Decimal = slab_breakdown.iter().map(|slab| slab.taxed_amount).sum();

        let relief = self.rebate_and_relief(taxable_income, gross_tax);
        let tax_after_reliefs = gross_tax - relief.total();
        let cess = self.cess(tax_after_reliefs);
        let final_liability = tax_after_reliefs + cess;

        debug!(
            income = %income,
            taxable_income = %taxable_income,
            gross_tax = %gross_tax,
            rebate = %relief.rebate,
            marginal_relief = %relief.marginal_relief,
            cess = %cess,
            final_liability = %final_liability,
            "computed tax"
        );

        TaxComputationResult {
            income,
            taxable_income,
            standard_deduction_applied,
            slab_breakdown,
            gross_tax,
            rebate: relief.rebate,
            marginal_relief: relief.marginal_relief,
            cess,
            final_liability,
        }
    }

    /// Returns `(taxable_income, deduction_applied)` using the configured
    /// standard deduction.
    pub fn taxable_income(
        &self,
        income: Decimal,
        apply_standard_deduction: bool,
    ) -> (Decimal, Decimal) {
        income::taxable_income(
            income,
            apply_standard_deduction,
            self.config.standard_deduction,
        )
    }

    /// Brackets that contributed tax for `taxable_income`.
    pub fn allocate_slabs(
        &self,
        taxable_income: Decimal,
    ) -> Vec<TaxSlab> {
        slabs::allocate_slabs(taxable_income, &self.config.slabs)
    }

    /// Every bracket's allocation, including zero contributions.
    pub fn slab_allocations(
        &self,
        taxable_income: Decimal,
    ) -> Vec<TaxSlab> {
        slabs::slab_allocations(taxable_income, &self.config.slabs)
    }

    pub fn rebate_and_relief(
        &self,
        taxable_income: Decimal,
        gross_tax: Decimal,
    ) -> relief::Relief {
        relief::rebate_and_relief(taxable_income, gross_tax, self.config.rebate_ceiling)
    }

    pub fn cess(
        &self,
        tax_after_reliefs: Decimal,
    ) -> Decimal {
        relief::cess(tax_after_reliefs, self.config.cess_rate_percent)
    }
}

impl Default for TaxEngine {
    /// Engine for the built-in FY 2025-26 new regime.
    fn default() -> Self {
        Self {
            config: RegimeConfig::default(),
        }
    }
}
