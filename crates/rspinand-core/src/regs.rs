//! SPI NAND feature register map
//!
//! Feature registers are accessed with GET_FEATURE/SET_FEATURE and one
//! register-address byte. The three registers below are common to all
//! vendors; vendor modules may add their own (see the Foresee sector ECC
//! status registers).

// ============================================================================
// Register addresses
// ============================================================================

/// Block lock register
pub const REG_BLOCK_LOCK: u8 = 0xA0;
/// Configuration register
pub const REG_CFG: u8 = 0xB0;
/// Status register
pub const REG_STATUS: u8 = 0xC0;

// ============================================================================
// Block lock bits
// ============================================================================

/// Value unlocking the whole array
pub const BL_ALL_UNLOCKED: u8 = 0x00;

// ============================================================================
// Configuration register bits
// ============================================================================

/// Quad Enable - required before quad I/O cache operations
pub const CFG_QUAD_ENABLE: u8 = 1 << 0;
/// On-die ECC enable
pub const CFG_ECC_ENABLE: u8 = 1 << 4;
/// OTP area access
pub const CFG_OTP_ENABLE: u8 = 1 << 6;

// ============================================================================
// Status register bits
// ============================================================================

/// Operation in progress
pub const STATUS_BUSY: u8 = 1 << 0;
/// Last erase failed
pub const STATUS_ERASE_FAILED: u8 = 1 << 2;
/// Last program failed
pub const STATUS_PROG_FAILED: u8 = 1 << 3;

/// ECC status field (bits 5:4)
pub const STATUS_ECC_MASK: u8 = 0b0011_0000;
/// ECC field: page read back clean
pub const STATUS_ECC_NO_BITFLIPS: u8 = 0 << 4;
/// ECC field: bitflips were detected and corrected
pub const STATUS_ECC_HAS_BITFLIPS: u8 = 1 << 4;
/// ECC field: page is uncorrectable
pub const STATUS_ECC_UNCOR_ERROR: u8 = 2 << 4;
