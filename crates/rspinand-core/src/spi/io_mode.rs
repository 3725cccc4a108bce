//! SPI I/O modes for cache operations

use crate::controller::ControllerCaps;
use crate::error::{Error, Result};

/// I/O mode of a cache read or program-load transaction
///
/// SPI NAND chips keep the opcode phase on a single line; only the address
/// and data phases widen. The 4-4-4 command mode of NOR flash does not exist
/// here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IoMode {
    /// Standard SPI: 1-1-1 (cmd, addr, data all on single line)
    #[default]
    Single,
    /// Dual Output: 1-1-2 (data phase on 2 lines)
    DualOut,
    /// Dual I/O: 1-2-2 (addr and data on 2 lines)
    DualIo,
    /// Quad Output: 1-1-4 (data phase on 4 lines)
    QuadOut,
    /// Quad I/O: 1-4-4 (addr and data on 4 lines)
    QuadIo,
}

impl IoMode {
    /// Returns the number of data lines used for the address phase
    pub const fn addr_lines(&self) -> u8 {
        match self {
            Self::Single | Self::DualOut | Self::QuadOut => 1,
            Self::DualIo => 2,
            Self::QuadIo => 4,
        }
    }

    /// Returns the number of data lines used for the data phase
    pub const fn data_lines(&self) -> u8 {
        match self {
            Self::Single => 1,
            Self::DualOut | Self::DualIo => 2,
            Self::QuadOut | Self::QuadIo => 4,
        }
    }

    /// Returns true if this mode uses four data lines anywhere
    pub const fn uses_quad(&self) -> bool {
        matches!(self, Self::QuadOut | Self::QuadIo)
    }

    /// Returns the capability a controller must report to run this mode
    pub const fn required_caps(&self) -> ControllerCaps {
        match self {
            Self::Single => ControllerCaps::empty(),
            Self::DualOut => ControllerCaps::DUAL_OUT,
            Self::DualIo => ControllerCaps::DUAL_IO,
            Self::QuadOut => ControllerCaps::QUAD_OUT,
            Self::QuadIo => ControllerCaps::QUAD_IO,
        }
    }
}

/// Check if a controller supports the requested I/O mode
///
/// Returns `Ok(())` if the mode is supported, or `Err(IoModeNotSupported)`
/// if not.
pub fn check_io_mode_supported(mode: IoMode, caps: ControllerCaps) -> Result<()> {
    if caps.contains(mode.required_caps()) {
        Ok(())
    } else {
        Err(Error::IoModeNotSupported)
    }
}
