//! Rebate, marginal relief and cess.
//!
//! The rebate forgives the whole tax at or below the rebate ceiling. Just
//! above the ceiling, marginal relief caps the tax at the income earned over
//! the ceiling, so crossing it never costs more than the extra income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::percent_of;

/// Amounts forgiven from the gross tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relief {
    pub rebate: Decimal,
    pub marginal_relief: Decimal,
}

impl Relief {
    pub fn total(&self) -> Decimal {
        self.rebate + self.marginal_relief
    }
}

/// Works out the rebate and marginal relief for a gross tax.
///
/// At most one of the two is ever non-zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::rebate_and_relief;
///
/// // 50,000 over the ceiling, but the slab tax is 67,500.
/// let relief = rebate_and_relief(dec!(1250000), dec!(67500), dec!(1200000));
///
/// assert_eq!(relief.rebate, dec!(0));
/// assert_eq!(relief.marginal_relief, dec!(17500));
/// ```
pub fn rebate_and_relief(
    taxable_income: Decimal,
    gross_tax: Decimal,
    rebate_ceiling: Decimal,
) -> Relief {
    if taxable_income <= rebate_ceiling {
        return Relief {
            rebate: gross_tax,
            marginal_relief: Decimal::ZERO,
        };
    }

    let income_over_ceiling = taxable_income - rebate_ceiling;
    let marginal_relief = if gross_tax > income_over_ceiling {
        gross_tax - income_over_ceiling
    } else {
        Decimal::ZERO
    };

    Relief {
        rebate: Decimal::ZERO,
        marginal_relief,
    }
}

/// Cess on the tax left after rebate and relief.
pub fn cess(
    tax_after_reliefs: Decimal,
    rate_percent: u32,
) -> Decimal {
    percent_of(tax_after_reliefs, rate_percent)
}
