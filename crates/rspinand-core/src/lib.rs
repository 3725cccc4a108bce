//! rspinand-core - SPI NAND chip description library
//!
//! This crate provides the chip-description layer of a SPI NAND stack:
//! compile-time descriptor tables (geometry, ID bytes, cache operation
//! variants), spare-area layouts, ECC status decoding, and the detection
//! flow that matches raw ID bytes against registered manufacturers. Page
//! data sequencing, bad-block handling, and wear management belong to the
//! integrating host.
//!
//! It is designed to be `no_std` compatible for use in embedded
//! environments.
//!
//! # Features
//!
//! - `std` - Enable standard library support
//!
//! # Example
//!
//! ```ignore
//! use rspinand_core::device::SpiNandDevice;
//! use rspinand_core::manufacturers::MANUFACTURERS;
//!
//! fn identify<C: rspinand_core::controller::SpiNandController>(controller: C) {
//!     match SpiNandDevice::detect(controller, MANUFACTURERS) {
//!         Ok(dev) => {
//!             let chip = dev.chip();
//!             println!("Found: {} ({} bytes)", chip.model, chip.memorg.total_size());
//!         }
//!         Err(e) => println!("Detection failed: {}", e),
//!     }
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod chip;
pub mod controller;
pub mod device;
pub mod error;
pub mod manufacturers;
pub mod oob;
pub mod protocol;
pub mod regs;
pub mod spi;

pub use error::{Error, Result};
