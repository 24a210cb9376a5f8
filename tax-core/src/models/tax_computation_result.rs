use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxSlab;

/// Everything a presentation layer needs to show for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputationResult {
    /// Annual income as parsed from the user's input.
    pub income: Decimal,

    /// Income after the standard deduction. May be negative.
    pub taxable_income: Decimal,

    /// Deduction subtracted from income (zero when not elected).
    pub standard_deduction_applied: Decimal,

    /// Brackets that contributed tax, lowest first.
    pub slab_breakdown: Vec<TaxSlab>,

    /// Sum of all slab contributions.
    pub gross_tax: Decimal,

    pub rebate: Decimal,
    pub marginal_relief: Decimal,
    pub cess: Decimal,

    /// `gross_tax - rebate - marginal_relief + cess`
    pub final_liability: Decimal,
}

impl TaxComputationResult {
    /// Tax left after rebate and marginal relief, i.e. the cess base.
    pub fn tax_before_cess(&self) -> Decimal {
        self.gross_tax - self.rebate - self.marginal_relief
    }
}
