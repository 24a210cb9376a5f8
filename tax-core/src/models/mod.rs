mod regime;
mod regime_config;
mod slab_bracket;
mod tax_computation_result;
mod tax_slab;

pub use regime::TaxRegime;
pub use regime_config::{MAX_SLAB_LIMIT, RegimeConfig, RegimeConfigError};
pub use slab_bracket::SlabBracket;
pub use tax_computation_result::TaxComputationResult;
pub use tax_slab::TaxSlab;
