//! Rates, limits and the slab table for one tax year under one regime.
//!
//! The built-in [`RegimeConfig::default`] is the financial year 2025-26 new
//! regime. Other years or regimes are expressed as data: load a config with
//! different values and the engine computes with it unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{SlabBracket, TaxRegime};

/// Largest bracket upper bound a config may declare, in rupees.
///
/// Keeps every `limit × rate` product well inside [`Decimal`] range.
pub const MAX_SLAB_LIMIT: i64 = 1_000_000_000_000_000_000;

/// Errors reported by [`RegimeConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeConfigError {
    /// The slab table is empty.
    #[error("slab table is empty")]
    NoSlabs,

    /// The first slab must start at zero income.
    #[error("first slab must start at 0, got {0}")]
    FirstSlabNotAtZero(Decimal),

    /// A slab does not start where the previous one ended.
    #[error("slab {index} starts at {found}, expected {expected}")]
    SlabGap {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    /// A bounded slab whose upper bound is not above its lower bound.
    #[error("slab {index} is empty: {min_income} to {max_income}")]
    EmptySlab {
        index: usize,
        min_income: Decimal,
        max_income: Decimal,
    },

    /// A slab upper bound above [`MAX_SLAB_LIMIT`].
    #[error("slab {index} ends at {limit}, above the maximum of {max}", max = MAX_SLAB_LIMIT)]
    SlabLimitTooLarge { index: usize, limit: Decimal },

    /// Only the last slab may be open-ended.
    #[error("slab {0} is open-ended but is not the last slab")]
    OpenSlabBeforeLast(usize),

    /// The last slab must be open-ended.
    #[error("last slab must be open-ended, but ends at {0}")]
    LastSlabBounded(Decimal),

    /// A slab rate outside 0..=100.
    #[error("slab {index} rate must be between 0 and 100, got {rate_percent}")]
    InvalidSlabRate { index: usize, rate_percent: u32 },

    /// Cess rate outside 0..=100.
    #[error("cess rate must be between 0 and 100, got {0}")]
    InvalidCessRate(u32),

    #[error("standard deduction must be non-negative, got {0}")]
    NegativeStandardDeduction(Decimal),

    #[error("rebate ceiling must be non-negative, got {0}")]
    NegativeRebateCeiling(Decimal),
}

/// Configuration driving a [`TaxEngine`](crate::TaxEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// First calendar year of the financial year (2025 for FY 2025-26).
    pub tax_year: i32,

    pub regime: TaxRegime,

    /// Amount subtracted from income when the taxpayer elects it.
    pub standard_deduction: Decimal,

    /// Taxable income at or below which the whole tax is rebated.
    pub rebate_ceiling: Decimal,

    /// Health and education cess, levied on tax after rebate and relief.
    pub cess_rate_percent: u32,

    /// Contiguous brackets from zero upward; the last one is open-ended.
    pub slabs: Vec<SlabBracket>,
}

impl RegimeConfig {
    /// Financial year 2025-26 (assessment year 2026-27), new regime, as
    /// announced in the February 2025 budget.
    pub fn fy_2025_26() -> Self {
        Self {
            tax_year: 2025,
            regime: TaxRegime::New,
            standard_deduction: Decimal::from(75_000),
            rebate_ceiling: Decimal::from(1_200_000),
            cess_rate_percent: 4,
            slabs: vec![
                SlabBracket::bounded(0, 400_000, 0),
                SlabBracket::bounded(400_000, 800_000, 5),
                SlabBracket::bounded(800_000, 1_200_000, 10),
                SlabBracket::bounded(1_200_000, 1_600_000, 15),
                SlabBracket::bounded(1_600_000, 2_000_000, 20),
                SlabBracket::bounded(2_000_000, 2_400_000, 25),
                SlabBracket::open(2_400_000, 30),
            ],
        }
    }

    /// Checks the slab table shape and the rate and limit ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegimeConfigError`] found, checking slabs in
    /// order before the scalar settings.
    ///
    /// # Example
    ///
    /// ```
    /// use tax_core::{RegimeConfig, RegimeConfigError};
    ///
    /// let mut config = RegimeConfig::default();
    /// config.cess_rate_percent = 120;
    ///
    /// assert_eq!(config.validate(), Err(RegimeConfigError::InvalidCessRate(120)));
    /// ```
    pub fn validate(&self) -> Result<(), RegimeConfigError> {
        let Some((last, leading)) = self.slabs.split_last() else {
            return Err(RegimeConfigError::NoSlabs);
        };

        let first = &self.slabs[0];
        if first.min_income != Decimal::ZERO {
            return Err(RegimeConfigError::FirstSlabNotAtZero(first.min_income));
        }

        let mut expected_start = Decimal::ZERO;
        for (index, slab) in leading.iter().enumerate() {
            check_slab_start(index, slab, expected_start)?;
            check_slab_rate(index, slab)?;

            let Some(max_income) = slab.max_income else {
                return Err(RegimeConfigError::OpenSlabBeforeLast(index));
            };
            if max_income <= slab.min_income {
                return Err(RegimeConfigError::EmptySlab {
                    index,
                    min_income: slab.min_income,
                    max_income,
                });
            }
            if max_income > Decimal::from(MAX_SLAB_LIMIT) {
                return Err(RegimeConfigError::SlabLimitTooLarge {
                    index,
                    limit: max_income,
                });
            }
            expected_start = max_income;
        }

        let last_index = leading.len();
        check_slab_start(last_index, last, expected_start)?;
        check_slab_rate(last_index, last)?;
        if let Some(max_income) = last.max_income {
            return Err(RegimeConfigError::LastSlabBounded(max_income));
        }

        if self.cess_rate_percent > 100 {
            return Err(RegimeConfigError::InvalidCessRate(self.cess_rate_percent));
        }
        if self.standard_deduction < Decimal::ZERO {
            return Err(RegimeConfigError::NegativeStandardDeduction(
                self.standard_deduction,
            ));
        }
        if self.rebate_ceiling < Decimal::ZERO {
            return Err(RegimeConfigError::NegativeRebateCeiling(self.rebate_ceiling));
        }
        Ok(())
    }

    /// Heading used by front ends, e.g. `Financial Year 2025-26 (AY 2026-27)`.
    pub fn financial_year_label(&self) -> String {
        let year = self.tax_year;
        format!(
            "Financial Year {}-{:02} (AY {}-{:02})",
            year,
            (year + 1).rem_euclid(100),
            year + 1,
            (year + 2).rem_euclid(100)
        )
    }
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self::fy_2025_26()
    }
}

fn check_slab_start(
    index: usize,
    slab: &SlabBracket,
    expected: Decimal,
) -> Result<(), RegimeConfigError> {
    if slab.min_income != expected {
        return Err(RegimeConfigError::SlabGap {
            index,
            expected,
            found: slab.min_income,
        });
    }
    Ok(())
}

fn check_slab_rate(
    index: usize,
    slab: &SlabBracket,
) -> Result<(), RegimeConfigError> {
    if slab.rate_percent > 100 {
        return Err(RegimeConfigError::InvalidSlabRate {
            index,
            rate_percent: slab.rate_percent,
        });
    }
    Ok(())
}
