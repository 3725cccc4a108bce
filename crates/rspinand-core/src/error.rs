//! Error types for rspinand-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // SPI errors
    /// SPI transfer failed
    SpiTransferFailed,
    /// SPI operation timed out
    SpiTimeout,
    /// Opcode is not supported by the controller
    OpcodeNotSupported,
    /// Requested I/O mode is not supported by the controller
    IoModeNotSupported,

    // Detection errors
    /// No registered manufacturer claimed the chip ID
    ChipNotFound,
    /// Manufacturer matched but the chip model is not in its table
    ChipNotSupported,
    /// No cache operation variant is usable with the controller
    NoSupportedVariant,

    // OOB layout errors
    /// Spare-area section index is outside the chip's layout
    OobSectionOutOfRange,

    // ECC errors
    /// Page data is corrupted beyond the chip's correction strength
    EccUncorrectable,
    /// ECC status register held a pattern outside the known encoding
    EccStatusUnknown,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpiTransferFailed => write!(f, "SPI transfer failed"),
            Self::SpiTimeout => write!(f, "SPI operation timed out"),
            Self::OpcodeNotSupported => write!(f, "SPI opcode not supported by controller"),
            Self::IoModeNotSupported => write!(f, "I/O mode not supported by controller"),
            Self::ChipNotFound => write!(f, "SPI NAND chip not found"),
            Self::ChipNotSupported => write!(f, "SPI NAND chip not supported"),
            Self::NoSupportedVariant => write!(f, "no supported cache operation variant"),
            Self::OobSectionOutOfRange => write!(f, "OOB section out of range"),
            Self::EccUncorrectable => write!(f, "uncorrectable ECC error"),
            Self::EccStatusUnknown => write!(f, "unrecognized ECC status"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
