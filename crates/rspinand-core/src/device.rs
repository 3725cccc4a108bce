//! SPI NAND device context
//!
//! Detection walks a manufacturer registry, matches the raw ID bytes
//! against a descriptor table, and installs the winning descriptor into a
//! `SpiNandDevice`: geometry, one selected variant per cache operation, and
//! the vendor's ECC/OOB hooks. All later per-page queries dispatch through
//! the installed descriptor.

use crate::chip::{ChipFlags, ChipInfo, ReadIdMethod, SelectedOps};
use crate::controller::SpiNandController;
use crate::error::{Error, Result};
use crate::manufacturers::Manufacturer;
use crate::oob::OobRegion;
use crate::protocol;
use crate::regs;

/// Number of ID bytes captured by a read-ID transaction
pub const MAX_ID_LEN: usize = 4;

/// Raw ID bytes as clocked out of the chip
///
/// Byte layout depends on the read method: with the plain opcode shape some
/// chips (Foresee among them) shift out a garbage byte ahead of the
/// manufacturer byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawId {
    data: [u8; MAX_ID_LEN],
}

impl RawId {
    /// Wrap captured ID bytes
    pub const fn new(data: [u8; MAX_ID_LEN]) -> Self {
        Self { data }
    }

    /// The captured bytes
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Read access to the feature registers of a live device
///
/// Object-safe so vendor ECC status decoders can be plain function pointers
/// in `const` descriptor tables.
pub trait FeatureReader {
    /// Read the feature register at `reg`
    fn read_feature(&mut self, reg: u8) -> Result<u8>;
}

/// ID read methods in the order detection tries them
const READ_ID_METHODS: [ReadIdMethod; 3] = [
    ReadIdMethod::Opcode,
    ReadIdMethod::OpcodeAddr,
    ReadIdMethod::OpcodeDummy,
];

/// A detected SPI NAND chip bound to its controller
pub struct SpiNandDevice<C> {
    controller: C,
    id: RawId,
    manufacturer: &'static Manufacturer,
    chip: &'static ChipInfo,
    ops: SelectedOps,
}

impl<C: SpiNandController> SpiNandDevice<C> {
    /// Identify the chip behind `controller` against a manufacturer registry
    ///
    /// Resets the device, then captures the raw ID with each read method in
    /// turn and offers it to every registered manufacturer. Custom detect
    /// callbacks see the plain-opcode ID only (the shape legacy vendor code
    /// was written against); table matching runs per method. A callback
    /// returning an error (manufacturer matched, model unknown, or a
    /// transport failure) aborts detection.
    pub fn detect(
        mut controller: C,
        manufacturers: &[&'static Manufacturer],
    ) -> Result<Self> {
        protocol::reset(&mut controller)?;

        for method in READ_ID_METHODS {
            let id = protocol::read_id(&mut controller, method)?;

            for &manufacturer in manufacturers {
                let chip = match manufacturer.detect {
                    Some(detect) if method == ReadIdMethod::Opcode => detect(&id)?,
                    Some(_) => None,
                    None => manufacturer.match_chip(&id, method),
                };

                if let Some(chip) = chip {
                    log::debug!(
                        "detected {} {} ({} bytes/page)",
                        manufacturer.name,
                        chip.model,
                        chip.memorg.pagesize,
                    );
                    return Self::init(controller, id, manufacturer, chip);
                }
            }
        }

        Err(Error::ChipNotFound)
    }

    /// Install a matched descriptor and bring the chip to a usable state
    fn init(
        mut controller: C,
        id: RawId,
        manufacturer: &'static Manufacturer,
        chip: &'static ChipInfo,
    ) -> Result<Self> {
        let ops = chip.variants.select(controller.caps())?;

        if chip.flags.contains(ChipFlags::HAS_QE_BIT) {
            let quad = ops.read_cache.io_mode.uses_quad()
                || ops.write_cache.io_mode.uses_quad()
                || ops.update_cache.io_mode.uses_quad();
            let value = if quad { regs::CFG_QUAD_ENABLE } else { 0 };
            protocol::upd_feature(&mut controller, regs::REG_CFG, regs::CFG_QUAD_ENABLE, value)?;
        }

        protocol::set_feature(&mut controller, regs::REG_BLOCK_LOCK, regs::BL_ALL_UNLOCKED)?;

        Ok(Self {
            controller,
            id,
            manufacturer,
            chip,
            ops,
        })
    }

    /// The installed chip descriptor
    pub fn chip(&self) -> &'static ChipInfo {
        self.chip
    }

    /// The registration record that claimed the chip
    pub fn manufacturer(&self) -> &'static Manufacturer {
        self.manufacturer
    }

    /// The raw ID bytes the chip was matched by
    pub fn raw_id(&self) -> &RawId {
        &self.id
    }

    /// The cache operation variants selected for this controller
    pub fn selected_ops(&self) -> &SelectedOps {
        &self.ops
    }

    /// Borrow the underlying controller
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Release the underlying controller
    pub fn into_controller(self) -> C {
        self.controller
    }

    /// Read the status register
    pub fn read_status(&mut self) -> Result<u8> {
        protocol::get_feature(&mut self.controller, regs::REG_STATUS)
    }

    /// Decode the ECC outcome of the last page read
    ///
    /// Returns the corrected bitflip count, `EccUncorrectable` when the page
    /// must be treated as lost, or `EccStatusUnknown` for a status pattern
    /// outside the chip's encoding. Vendors with per-sector status registers
    /// may issue further feature reads; their transport errors propagate
    /// unchanged.
    pub fn ecc_status(&mut self, status: u8) -> Result<u32> {
        (self.chip.ecc.status)(self, status)
    }

    /// ECC bytes sub-region of one spare-area section
    pub fn oob_ecc_region(&self, section: usize) -> Result<OobRegion> {
        self.chip.ecc.layout.ecc(section)
    }

    /// User-free sub-region of one spare-area section
    pub fn oob_free_region(&self, section: usize) -> Result<OobRegion> {
        self.chip.ecc.layout.free(section)
    }
}

impl<C: SpiNandController> FeatureReader for SpiNandDevice<C> {
    fn read_feature(&mut self, reg: u8) -> Result<u8> {
        protocol::get_feature(&mut self.controller, reg)
    }
}
