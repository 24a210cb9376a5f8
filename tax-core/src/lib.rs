pub mod calculations;
pub mod format;
pub mod models;

pub use calculations::{Relief, TaxEngine};
pub use models::*;
