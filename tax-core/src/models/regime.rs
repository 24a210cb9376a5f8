use std::fmt;

use serde::{Deserialize, Serialize};

/// Tax regime a slab table belongs to.
///
/// Only the new regime is modelled today; the code travels with every
/// configuration so tables for other regimes can be loaded side by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    #[default]
    New,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New Tax Regime",
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_code() {
        assert_eq!(TaxRegime::parse(TaxRegime::New.as_str()), Some(TaxRegime::New));
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(TaxRegime::parse("old"), None);
        assert_eq!(TaxRegime::parse(""), None);
    }

    #[test]
    fn label_is_human_readable() {
        assert_eq!(TaxRegime::New.label(), "New Tax Regime");
        assert_eq!(TaxRegime::New.to_string(), "new");
    }
}
