//! SPI NAND command opcodes
//!
//! This module defines the command opcodes shared by all SPI NAND vendors.
//! Unlike NOR flash there is no JEDEC-mandated discovery table; the opcode
//! set below is the de-facto standard implemented by every known part.

// ============================================================================
// Device control
// ============================================================================

/// Reset the device to its power-on state
pub const RESET: u8 = 0xFF;
/// Read the device ID bytes
pub const READ_ID: u8 = 0x9F;

// ============================================================================
// Feature registers
// ============================================================================

/// Get Feature - read one feature register (one address byte)
pub const GET_FEATURE: u8 = 0x0F;
/// Set Feature - write one feature register (one address byte)
pub const SET_FEATURE: u8 = 0x1F;

// ============================================================================
// Write control
// ============================================================================

/// Write Enable - required before program/erase
pub const WRITE_ENABLE: u8 = 0x06;
/// Write Disable - clears the WEL bit
pub const WRITE_DISABLE: u8 = 0x04;

// ============================================================================
// Page/cache transfer
// ============================================================================

/// Page Read to cache (row address)
pub const PAGE_READ: u8 = 0x13;
/// Read From Cache (column address, up to ~33 MHz)
pub const READ_FROM_CACHE: u8 = 0x03;
/// Fast Read From Cache (with dummy byte)
pub const READ_FROM_CACHE_FAST: u8 = 0x0B;
/// Read From Cache x2 (1-1-2)
pub const READ_FROM_CACHE_X2: u8 = 0x3B;
/// Read From Cache Dual I/O (1-2-2)
pub const READ_FROM_CACHE_DUAL_IO: u8 = 0xBB;
/// Read From Cache x4 (1-1-4)
pub const READ_FROM_CACHE_X4: u8 = 0x6B;
/// Read From Cache Quad I/O (1-4-4)
pub const READ_FROM_CACHE_QUAD_IO: u8 = 0xEB;

// ============================================================================
// Program
// ============================================================================

/// Program Load - fill the cache, resetting untouched bytes to 0xFF
pub const PROG_LOAD: u8 = 0x02;
/// Program Load x4
pub const PROG_LOAD_X4: u8 = 0x32;
/// Program Load Random Data - update cache bytes without resetting the rest
pub const PROG_LOAD_RANDOM: u8 = 0x84;
/// Program Load Random Data x4
pub const PROG_LOAD_RANDOM_X4: u8 = 0x34;
/// Program Execute - commit the cache to the array (row address)
pub const PROG_EXECUTE: u8 = 0x10;

// ============================================================================
// Erase
// ============================================================================

/// Block Erase (row address)
pub const BLOCK_ERASE: u8 = 0xD8;
