use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax contributed by a single bracket for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Lower bound of the bracket.
    pub range_start: Decimal,

    /// Upper bound shown to the user.
    ///
    /// This is the bracket's nominal ceiling, or the taxable income itself
    /// when the income stops partway through this bracket.
    pub range_end: Decimal,

    pub rate_percent: u32,

    /// Portion of taxable income that fell inside this bracket.
    pub taxable_amount: Decimal,

    pub taxed_amount: Decimal,
}
