//! TOML regime configuration.
//!
//! Every key is optional; anything left out keeps the built-in FY 2025-26
//! value. The slab table comes either inline as `[[slabs]]` rows or from a
//! CSV file named by `slab_table`, resolved against the config file's
//! directory.
//!
//! ```toml
//! tax_year = 2025
//! regime = "new"
//! standard_deduction = 75000
//! rebate_ceiling = 1200000
//! cess_rate_percent = 4
//! slab_table = "slabs.csv"
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{RegimeConfig, RegimeConfigError, SlabBracket, TaxRegime};
use thiserror::Error;
use tracing::{debug, info};

use crate::slab_loader::{SlabTableLoader, SlabTableLoaderError};

/// Errors that can occur when loading a regime configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config sets both `slab_table` and inline `slabs`; use one")]
    ConflictingSlabSources,

    #[error("unknown regime '{0}'")]
    UnknownRegime(String),

    #[error("slab table {path}: {source}")]
    SlabTable {
        path: PathBuf,
        #[source]
        source: SlabTableLoaderError,
    },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] RegimeConfigError),
}

/// The on-disk shape of a configuration file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub tax_year: Option<i32>,
    pub regime: Option<String>,
    pub standard_deduction: Option<Decimal>,
    pub rebate_ceiling: Option<Decimal>,
    pub cess_rate_percent: Option<u32>,
    pub slab_table: Option<PathBuf>,
    pub slabs: Option<Vec<SlabBracket>>,
}

impl ConfigFile {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Layers the file over the built-in defaults and validates the result.
    ///
    /// A relative `slab_table` path is resolved against `base_dir`.
    pub fn into_regime_config(
        self,
        base_dir: &Path,
    ) -> Result<RegimeConfig, ConfigLoadError> {
        if self.slab_table.is_some() && self.slabs.is_some() {
            return Err(ConfigLoadError::ConflictingSlabSources);
        }

        let mut config = RegimeConfig::default();

        if let Some(tax_year) = self.tax_year {
            config.tax_year = tax_year;
        }
        if let Some(code) = self.regime {
            config.regime =
                TaxRegime::parse(&code).ok_or(ConfigLoadError::UnknownRegime(code))?;
        }
        if let Some(standard_deduction) = self.standard_deduction {
            config.standard_deduction = standard_deduction;
        }
        if let Some(rebate_ceiling) = self.rebate_ceiling {
            config.rebate_ceiling = rebate_ceiling;
        }
        if let Some(cess_rate_percent) = self.cess_rate_percent {
            config.cess_rate_percent = cess_rate_percent;
        }

        if let Some(slabs) = self.slabs {
            config.slabs = slabs;
        } else if let Some(slab_table) = self.slab_table {
            let path = base_dir.join(slab_table);
            config.slabs = load_slab_table(&path, config.tax_year, config.regime)?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Reads, merges and validates the configuration at `path`.
pub fn load_regime_config(path: &Path) -> Result<RegimeConfig, ConfigLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = ConfigFile::parse(&text).map_err(|source| ConfigLoadError::Toml {
        path: path.to_path_buf(),
        source,
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = file.into_regime_config(base_dir)?;

    info!(
        path = %path.display(),
        tax_year = config.tax_year,
        regime = %config.regime,
        slabs = config.slabs.len(),
        "loaded regime configuration"
    );
    Ok(config)
}

fn load_slab_table(
    path: &Path,
    tax_year: i32,
    regime: TaxRegime,
) -> Result<Vec<SlabBracket>, ConfigLoadError> {
    debug!(path = %path.display(), tax_year, %regime, "reading slab table");

    let file = File::open(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let slab_error = |source| ConfigLoadError::SlabTable {
        path: path.to_path_buf(),
        source,
    };

    let records = SlabTableLoader::parse(file).map_err(slab_error)?;
    SlabTableLoader::brackets_for(&records, tax_year, regime).map_err(slab_error)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn resolve(text: &str) -> Result<RegimeConfig, ConfigLoadError> {
        ConfigFile::parse(text)
            .expect("valid TOML")
            .into_regime_config(Path::new("."))
    }

    // =========================================================================
    // ConfigFile::parse tests
    // =========================================================================

    #[test]
    fn test_parse_empty_file() {
        let file = ConfigFile::parse("").expect("empty file is valid");

        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn test_parse_scalar_keys() {
        let file = ConfigFile::parse(
            r#"
            tax_year = 2026
            regime = "new"
            standard_deduction = 50000
            rebate_ceiling = 700000.50
            cess_rate_percent = 3
            "#,
        )
        .expect("valid TOML");

        assert_eq!(file.tax_year, Some(2026));
        assert_eq!(file.regime.as_deref(), Some("new"));
        assert_eq!(file.standard_deduction, Some(dec!(50000)));
        assert_eq!(file.rebate_ceiling, Some(dec!(700000.50)));
        assert_eq!(file.cess_rate_percent, Some(3));
    }

    #[test]
    fn test_parse_inline_slabs() {
        let file = ConfigFile::parse(
            r#"
            [[slabs]]
            min_income = 0
            max_income = 500000
            rate_percent = 0

            [[slabs]]
            min_income = 500000
            rate_percent = 20
            "#,
        )
        .expect("valid TOML");

        assert_eq!(
            file.slabs,
            Some(vec![
                SlabBracket::bounded(0, 500000, 0),
                SlabBracket::open(500000, 20),
            ])
        );
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = ConfigFile::parse("cess_rate = 4").expect_err("unknown key");

        assert!(err.to_string().contains("cess_rate"), "got: {err}");
    }

    // =========================================================================
    // into_regime_config tests
    // =========================================================================

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config = resolve("").expect("defaults are valid");

        assert_eq!(config, RegimeConfig::default());
    }

    #[test]
    fn test_scalar_overrides_keep_default_slabs() {
        let config = resolve("standard_deduction = 50000\ncess_rate_percent = 3")
            .expect("valid config");

        assert_eq!(config.standard_deduction, dec!(50000));
        assert_eq!(config.cess_rate_percent, 3);
        assert_eq!(config.slabs, RegimeConfig::default().slabs);
    }

    #[test]
    fn test_inline_slabs_replace_defaults() {
        let config = resolve(
            r#"
            [[slabs]]
            min_income = 0
            max_income = 500000
            rate_percent = 0

            [[slabs]]
            min_income = 500000
            rate_percent = 20
            "#,
        )
        .expect("valid config");

        assert_eq!(config.slabs.len(), 2);
        assert!(config.slabs[1].is_open());
    }

    #[test]
    fn test_conflicting_slab_sources() {
        let err = resolve(
            r#"
            slab_table = "slabs.csv"

            [[slabs]]
            min_income = 0
            rate_percent = 0
            "#,
        )
        .expect_err("both sources set");

        assert!(matches!(err, ConfigLoadError::ConflictingSlabSources), "got: {err:?}");
    }

    #[test]
    fn test_unknown_regime() {
        let err = resolve(r#"regime = "old""#).expect_err("unknown regime");

        match err {
            ConfigLoadError::UnknownRegime(code) => assert_eq!(code, "old"),
            other => panic!("expected UnknownRegime, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let err = resolve("cess_rate_percent = 101").expect_err("cess over 100");

        match err {
            ConfigLoadError::Invalid(inner) => {
                assert_eq!(inner, RegimeConfigError::InvalidCessRate(101));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_gapped_inline_slabs_fail_validation() {
        let err = resolve(
            r#"
            [[slabs]]
            min_income = 0
            max_income = 400000
            rate_percent = 0

            [[slabs]]
            min_income = 500000
            rate_percent = 10
            "#,
        )
        .expect_err("gap between slabs");

        assert!(
            matches!(
                err,
                ConfigLoadError::Invalid(RegimeConfigError::SlabGap { index: 1, .. })
            ),
            "got: {err:?}"
        );
    }

    #[test]
    fn test_missing_slab_table_is_io_error() {
        let err = resolve(r#"slab_table = "does-not-exist.csv""#).expect_err("missing file");

        match err {
            ConfigLoadError::Io { path, .. } => {
                assert_eq!(path, Path::new("./does-not-exist.csv"));
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_config_file() {
        let err = load_regime_config(Path::new("no/such/config.toml")).expect_err("missing file");

        assert!(
            err.to_string().starts_with("cannot read no/such/config.toml"),
            "got: {err}"
        );
    }
}
