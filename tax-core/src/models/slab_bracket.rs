use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a slab table.
///
/// `max_income` is `None` only for the final bracket, whose upper bound is
/// the taxpayer's own income at calculation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabBracket {
    pub min_income: Decimal,
    #[serde(default)]
    pub max_income: Option<Decimal>,
    pub rate_percent: u32,
}

impl SlabBracket {
    pub fn bounded(
        min_income: i64,
        max_income: i64,
        rate_percent: u32,
    ) -> Self {
        Self {
            min_income: Decimal::from(min_income),
            max_income: Some(Decimal::from(max_income)),
            rate_percent,
        }
    }

    pub fn open(
        min_income: i64,
        rate_percent: u32,
    ) -> Self {
        Self {
            min_income: Decimal::from(min_income),
            max_income: None,
            rate_percent,
        }
    }

    pub fn is_open(&self) -> bool {
        self.max_income.is_none()
    }
}
