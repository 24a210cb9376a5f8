//! Loading regime configurations and slab tables from disk.

pub mod config_loader;
pub mod slab_loader;

pub use config_loader::{ConfigFile, ConfigLoadError, load_regime_config};
pub use slab_loader::{SlabRecord, SlabTableLoader, SlabTableLoaderError};
