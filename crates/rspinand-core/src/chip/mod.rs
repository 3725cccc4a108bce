//! SPI NAND chip descriptors
//!
//! This module provides the compile-time descriptor types vendor tables are
//! built from: geometry, ID bytes, cache operation variants, flags, and the
//! ECC/OOB hooks.

mod features;
mod types;

pub use features::ChipFlags;
pub use types::*;
