//! SPI NAND chip flags

use bitflags::bitflags;

bitflags! {
    /// Quirk and capability flags carried by a chip descriptor
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChipFlags: u32 {
        /// Quad-enable bit must be set in the configuration register before
        /// quad I/O cache operations
        const HAS_QE_BIT             = 1 << 0;
        /// Continuous-read feature bit present in the configuration register
        const HAS_CR_FEAT_BIT        = 1 << 1;
        /// Program operations need a plane-select bit in the column address
        const PROG_PLANE_SELECT_BIT  = 1 << 2;
        /// Read operations need a plane-select bit in the column address
        const READ_PLANE_SELECT_BIT  = 1 << 3;
        /// Chip cannot bypass its on-die ECC for raw page access
        const NO_RAW_ACCESS          = 1 << 4;
    }
}

impl Default for ChipFlags {
    fn default() -> Self {
        ChipFlags::empty()
    }
}
