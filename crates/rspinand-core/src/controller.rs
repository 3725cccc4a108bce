//! SPI NAND controller trait
//!
//! The controller is the host-owned transaction engine: everything this
//! crate does funnels into `exec` calls on one of these.

use crate::error::Result;
use crate::spi::SpiNandOp;
use bitflags::bitflags;

bitflags! {
    /// Controller capability flags
    ///
    /// These flags indicate which multi-line transfer modes a controller can
    /// drive. Single-line transfers are always available.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ControllerCaps: u32 {
        /// Can read two bits at once (1-1-2 mode)
        const DUAL_OUT = 1 << 0;
        /// Can transfer two bits at once (1-2-2 mode)
        const DUAL_IO  = 1 << 1;
        /// Can read four bits at once (1-1-4 mode)
        const QUAD_OUT = 1 << 2;
        /// Can transfer four bits at once (1-4-4 mode)
        const QUAD_IO  = 1 << 3;

        /// Shorthand for dual mode (both DUAL_OUT and DUAL_IO)
        const DUAL = Self::DUAL_OUT.bits() | Self::DUAL_IO.bits();
        /// Shorthand for quad mode (both QUAD_OUT and QUAD_IO)
        const QUAD = Self::QUAD_OUT.bits() | Self::QUAD_IO.bits();
    }
}

impl Default for ControllerCaps {
    fn default() -> Self {
        ControllerCaps::empty()
    }
}

/// Synchronous SPI NAND controller
///
/// The operation contains all the information needed for the transaction:
/// opcode, optional address with its byte count, dummy bytes, I/O mode, and
/// the data buffers. Implementations block until the transfer completes and
/// must not reinterpret errors from the underlying transport.
pub trait SpiNandController {
    /// Get the multi-I/O capabilities of this controller
    fn caps(&self) -> ControllerCaps;

    /// Get the maximum number of data bytes in a single transaction
    fn max_transfer_len(&self) -> usize;

    /// Execute a single SPI NAND operation
    fn exec(&mut self, op: &mut SpiNandOp<'_>) -> Result<()>;
}

impl<C: SpiNandController + ?Sized> SpiNandController for &mut C {
    fn caps(&self) -> ControllerCaps {
        (**self).caps()
    }

    fn max_transfer_len(&self) -> usize {
        (**self).max_transfer_len()
    }

    fn exec(&mut self, op: &mut SpiNandOp<'_>) -> Result<()> {
        (**self).exec(op)
    }
}
