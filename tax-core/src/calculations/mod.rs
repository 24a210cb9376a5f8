//! The slab computation engine and the rules it is built from.
//!
//! Each step of the pipeline lives in its own module so it can be tested
//! and reused on its own; [`TaxEngine`] wires them together.

pub mod common;
pub mod engine;
pub mod income;
pub mod relief;
pub mod slabs;

pub use engine::TaxEngine;
pub use income::{parse_income, taxable_income, try_parse_income};
pub use relief::{Relief, cess, rebate_and_relief};
pub use slabs::{allocate_slabs, slab_allocations};
