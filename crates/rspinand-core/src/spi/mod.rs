//! SPI NAND transaction model
//!
//! This module defines the opcode set, I/O modes, and the borrowed
//! transaction structure controllers execute.

mod command;
mod io_mode;
pub mod opcodes;

pub use command::SpiNandOp;
pub use io_mode::{check_io_mode_supported, IoMode};
