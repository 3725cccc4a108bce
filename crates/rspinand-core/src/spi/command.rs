//! SPI NAND transaction structure

use super::{opcodes, IoMode};

/// A single SPI NAND transaction
///
/// Designed to avoid allocation - uses slices for data. The lifetime
/// parameter `'a` ties the operation to the buffers it references.
///
/// The address field carries a register address (1 byte), a column address
/// within the cache (2 bytes) or a row address selecting a page (3 bytes),
/// depending on the opcode; `addr_bytes` tells the controller how many bytes
/// to clock out.
pub struct SpiNandOp<'a> {
    /// The opcode byte
    pub opcode: u8,

    /// Address value (if any)
    pub addr: Option<u32>,

    /// Number of address bytes to transfer
    pub addr_bytes: u8,

    /// Number of dummy bytes after the address
    pub dummy_bytes: u8,

    /// I/O mode for the address and data phases
    pub io_mode: IoMode,

    /// Data to write after opcode/address/dummy
    pub write_data: &'a [u8],

    /// Buffer to read into (mutable)
    pub read_buf: &'a mut [u8],
}

impl<'a> SpiNandOp<'a> {
    /// Create a bare command with no address or data (e.g. RESET, WREN)
    pub fn simple(opcode: u8) -> Self {
        Self {
            opcode,
            addr: None,
            addr_bytes: 0,
            dummy_bytes: 0,
            io_mode: IoMode::Single,
            write_data: &[],
            read_buf: &mut [],
        }
    }

    /// Device reset
    pub fn reset() -> Self {
        Self::simple(opcodes::RESET)
    }

    /// Write Enable
    pub fn write_enable() -> Self {
        Self::simple(opcodes::WRITE_ENABLE)
    }

    /// Write Disable
    pub fn write_disable() -> Self {
        Self::simple(opcodes::WRITE_DISABLE)
    }

    /// Read ID with no address or dummy byte
    ///
    /// Chips that expect an address byte (Foresee among them) shift out one
    /// byte of garbage before the manufacturer byte in this shape.
    pub fn read_id(buf: &'a mut [u8]) -> Self {
        Self {
            opcode: opcodes::READ_ID,
            addr: None,
            addr_bytes: 0,
            dummy_bytes: 0,
            io_mode: IoMode::Single,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Read ID with one zero address byte before the ID bytes
    pub fn read_id_addr(buf: &'a mut [u8]) -> Self {
        Self {
            opcode: opcodes::READ_ID,
            addr: Some(0),
            addr_bytes: 1,
            dummy_bytes: 0,
            io_mode: IoMode::Single,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Read ID with one dummy byte before the ID bytes
    pub fn read_id_dummy(buf: &'a mut [u8]) -> Self {
        Self {
            opcode: opcodes::READ_ID,
            addr: None,
            addr_bytes: 0,
            dummy_bytes: 1,
            io_mode: IoMode::Single,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Get Feature - read the feature register at `reg`
    pub fn get_feature(reg: u8, buf: &'a mut [u8]) -> Self {
        Self {
            opcode: opcodes::GET_FEATURE,
            addr: Some(reg as u32),
            addr_bytes: 1,
            dummy_bytes: 0,
            io_mode: IoMode::Single,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Set Feature - write the feature register at `reg`
    pub fn set_feature(reg: u8, data: &'a [u8]) -> Self {
        Self {
            opcode: opcodes::SET_FEATURE,
            addr: Some(reg as u32),
            addr_bytes: 1,
            dummy_bytes: 0,
            io_mode: IoMode::Single,
            write_data: data,
            read_buf: &mut [],
        }
    }

    /// Page Read - load the page at `row` into the cache
    pub fn page_read(row: u32) -> Self {
        Self {
            opcode: opcodes::PAGE_READ,
            addr: Some(row),
            addr_bytes: 3,
            dummy_bytes: 0,
            io_mode: IoMode::Single,
            write_data: &[],
            read_buf: &mut [],
        }
    }

    /// Read from the cache starting at `column`
    ///
    /// The opcode, I/O mode and dummy-byte count come from the chip's
    /// selected read-cache variant.
    pub fn cache_read(
        opcode: u8,
        io_mode: IoMode,
        dummy_bytes: u8,
        column: u32,
        buf: &'a mut [u8],
    ) -> Self {
        Self {
            opcode,
            addr: Some(column),
            addr_bytes: 2,
            dummy_bytes,
            io_mode,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Load program data into the cache starting at `column`
    pub fn cache_write(opcode: u8, io_mode: IoMode, column: u32, data: &'a [u8]) -> Self {
        Self {
            opcode,
            addr: Some(column),
            addr_bytes: 2,
            dummy_bytes: 0,
            io_mode,
            write_data: data,
            read_buf: &mut [],
        }
    }

    /// Program Execute - commit the cache to the page at `row`
    pub fn prog_execute(row: u32) -> Self {
        Self {
            opcode: opcodes::PROG_EXECUTE,
            addr: Some(row),
            addr_bytes: 3,
            dummy_bytes: 0,
            io_mode: IoMode::Single,
            write_data: &[],
            read_buf: &mut [],
        }
    }

    /// Block Erase - erase the block containing the page at `row`
    pub fn block_erase(row: u32) -> Self {
        Self {
            opcode: opcodes::BLOCK_ERASE,
            addr: Some(row),
            addr_bytes: 3,
            dummy_bytes: 0,
            io_mode: IoMode::Single,
            write_data: &[],
            read_buf: &mut [],
        }
    }
}
