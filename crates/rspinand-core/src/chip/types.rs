//! SPI NAND chip type definitions

use super::features::ChipFlags;
use crate::controller::ControllerCaps;
use crate::device::FeatureReader;
use crate::error::{Error, Result};
use crate::oob::OobLayout;
use crate::spi::{opcodes, IoMode, SpiNandOp};

/// How the ID bytes are clocked out of the chip
///
/// Vendors disagree on whether READ_ID takes an address byte, a dummy byte,
/// or nothing at all; a descriptor declares which shape produces its ID
/// bytes, and detection tries each shape in turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadIdMethod {
    /// Opcode only; chips expecting an address byte leak one garbage byte
    /// ahead of the ID
    Opcode,
    /// Opcode followed by one zero address byte
    OpcodeAddr,
    /// Opcode followed by one dummy byte
    OpcodeDummy,
}

/// Device-ID bytes and the read method that produces them
#[derive(Debug, Clone, Copy)]
pub struct ChipId {
    /// Read method the ID bytes were specified for
    pub method: ReadIdMethod,
    /// Device-ID bytes following the manufacturer byte
    pub bytes: &'static [u8],
}

impl ChipId {
    /// Create a new chip ID
    pub const fn new(method: ReadIdMethod, bytes: &'static [u8]) -> Self {
        Self { method, bytes }
    }

    /// Check whether `candidate` starts with this ID's device bytes
    pub fn matches(&self, candidate: &[u8]) -> bool {
        candidate.len() >= self.bytes.len() && &candidate[..self.bytes.len()] == self.bytes
    }
}

/// Memory organization of a NAND target
///
/// Field order follows the vendor datasheet convention: cell type first,
/// then the page geometry, then the block/LUN/target hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Memorg {
    /// Bits stored per cell (1 = SLC)
    pub bits_per_cell: u8,
    /// Main-area page size in bytes
    pub pagesize: u32,
    /// Spare-area size in bytes
    pub oobsize: u16,
    /// Pages per eraseblock
    pub pages_per_eraseblock: u16,
    /// Eraseblocks per LUN
    pub eraseblocks_per_lun: u16,
    /// Maximum factory-marked bad eraseblocks per LUN
    pub max_bad_eraseblocks_per_lun: u16,
    /// Planes per LUN
    pub planes_per_lun: u8,
    /// LUNs per target
    pub luns_per_target: u8,
    /// Targets (dies) on the chip
    pub ntargets: u8,
}

impl Memorg {
    /// Create a new memory organization descriptor
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        bits_per_cell: u8,
        pagesize: u32,
        oobsize: u16,
        pages_per_eraseblock: u16,
        eraseblocks_per_lun: u16,
        max_bad_eraseblocks_per_lun: u16,
        planes_per_lun: u8,
        luns_per_target: u8,
        ntargets: u8,
    ) -> Self {
        Self {
            bits_per_cell,
            pagesize,
            oobsize,
            pages_per_eraseblock,
            eraseblocks_per_lun,
            max_bad_eraseblocks_per_lun,
            planes_per_lun,
            luns_per_target,
            ntargets,
        }
    }

    /// Main-area bytes in one eraseblock
    pub const fn eraseblock_size(&self) -> u64 {
        self.pagesize as u64 * self.pages_per_eraseblock as u64
    }

    /// Main-area bytes in one LUN
    pub const fn lun_size(&self) -> u64 {
        self.eraseblock_size() * self.eraseblocks_per_lun as u64
    }

    /// Main-area bytes in one target
    pub const fn target_size(&self) -> u64 {
        self.lun_size() * self.luns_per_target as u64
    }

    /// Main-area bytes on the whole chip
    pub const fn total_size(&self) -> u64 {
        self.target_size() * self.ntargets as u64
    }

    /// Full page size including the spare area
    pub const fn full_page_size(&self) -> u32 {
        self.pagesize + self.oobsize as u32
    }
}

/// ECC strength a chip requires from its corrector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EccRequirements {
    /// Correctable bits per step
    pub strength: u8,
    /// Codeword step size in bytes
    pub step_size: u16,
}

impl EccRequirements {
    /// Create a new ECC requirement descriptor
    pub const fn new(strength: u8, step_size: u16) -> Self {
        Self {
            strength,
            step_size,
        }
    }
}

/// One read-from-cache transaction shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCacheOp {
    /// Opcode of the variant
    pub opcode: u8,
    /// I/O mode of the address and data phases
    pub io_mode: IoMode,
    /// Dummy bytes between address and data
    pub dummy_bytes: u8,
}

impl ReadCacheOp {
    /// Quad I/O read (1-4-4)
    pub const fn quad_io(dummy_bytes: u8) -> Self {
        Self {
            opcode: opcodes::READ_FROM_CACHE_QUAD_IO,
            io_mode: IoMode::QuadIo,
            dummy_bytes,
        }
    }

    /// x4 read (1-1-4)
    pub const fn x4(dummy_bytes: u8) -> Self {
        Self {
            opcode: opcodes::READ_FROM_CACHE_X4,
            io_mode: IoMode::QuadOut,
            dummy_bytes,
        }
    }

    /// Dual I/O read (1-2-2)
    pub const fn dual_io(dummy_bytes: u8) -> Self {
        Self {
            opcode: opcodes::READ_FROM_CACHE_DUAL_IO,
            io_mode: IoMode::DualIo,
            dummy_bytes,
        }
    }

    /// x2 read (1-1-2)
    pub const fn x2(dummy_bytes: u8) -> Self {
        Self {
            opcode: opcodes::READ_FROM_CACHE_X2,
            io_mode: IoMode::DualOut,
            dummy_bytes,
        }
    }

    /// Fast single-line read
    pub const fn fast(dummy_bytes: u8) -> Self {
        Self {
            opcode: opcodes::READ_FROM_CACHE_FAST,
            io_mode: IoMode::Single,
            dummy_bytes,
        }
    }

    /// Slow single-line read
    pub const fn slow(dummy_bytes: u8) -> Self {
        Self {
            opcode: opcodes::READ_FROM_CACHE,
            io_mode: IoMode::Single,
            dummy_bytes,
        }
    }

    /// Build the transaction reading `buf.len()` bytes from `column`
    pub fn to_op<'a>(&self, column: u32, buf: &'a mut [u8]) -> SpiNandOp<'a> {
        SpiNandOp::cache_read(self.opcode, self.io_mode, self.dummy_bytes, column, buf)
    }
}

/// One program-load transaction shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteCacheOp {
    /// Opcode of the variant
    pub opcode: u8,
    /// I/O mode of the data phase
    pub io_mode: IoMode,
}

impl WriteCacheOp {
    /// x4 program load; `reset` selects the cache-resetting opcode over the
    /// random-data one
    pub const fn x4(reset: bool) -> Self {
        Self {
            opcode: if reset {
                opcodes::PROG_LOAD_X4
            } else {
                opcodes::PROG_LOAD_RANDOM_X4
            },
            io_mode: IoMode::QuadOut,
        }
    }

    /// Single-line program load
    pub const fn single(reset: bool) -> Self {
        Self {
            opcode: if reset {
                opcodes::PROG_LOAD
            } else {
                opcodes::PROG_LOAD_RANDOM
            },
            io_mode: IoMode::Single,
        }
    }

    /// Build the transaction loading `data` at `column`
    pub fn to_op<'a>(&self, column: u32, data: &'a [u8]) -> SpiNandOp<'a> {
        SpiNandOp::cache_write(self.opcode, self.io_mode, column, data)
    }
}

/// Priority-ordered cache operation variants
///
/// Each list is tried front to back; the first entry the controller's
/// capabilities cover wins. The lists themselves are never mutated.
#[derive(Clone, Copy)]
pub struct OpVariants {
    /// Read-from-cache candidates, fastest first
    pub read_cache: &'static [ReadCacheOp],
    /// Program-load candidates, fastest first
    pub write_cache: &'static [WriteCacheOp],
    /// Random program-load candidates, fastest first
    pub update_cache: &'static [WriteCacheOp],
}

/// The variant of each cache operation chosen for one controller
#[derive(Clone, Copy)]
pub struct SelectedOps {
    /// Winning read-from-cache variant
    pub read_cache: &'static ReadCacheOp,
    /// Winning program-load variant
    pub write_cache: &'static WriteCacheOp,
    /// Winning random program-load variant
    pub update_cache: &'static WriteCacheOp,
}

impl OpVariants {
    /// Create a new variant set
    pub const fn new(
        read_cache: &'static [ReadCacheOp],
        write_cache: &'static [WriteCacheOp],
        update_cache: &'static [WriteCacheOp],
    ) -> Self {
        Self {
            read_cache,
            write_cache,
            update_cache,
        }
    }

    /// First read variant the controller supports
    pub fn first_supported_read(&self, caps: ControllerCaps) -> Option<&'static ReadCacheOp> {
        self.read_cache
            .iter()
            .find(|op| caps.contains(op.io_mode.required_caps()))
    }

    /// First write variant the controller supports
    fn first_supported_write(
        list: &'static [WriteCacheOp],
        caps: ControllerCaps,
    ) -> Option<&'static WriteCacheOp> {
        list.iter()
            .find(|op| caps.contains(op.io_mode.required_caps()))
    }

    /// Pick one variant per operation for the given controller
    ///
    /// Fails with `NoSupportedVariant` if any list has no usable entry.
    pub fn select(&self, caps: ControllerCaps) -> Result<SelectedOps> {
        let read_cache = self
            .first_supported_read(caps)
            .ok_or(Error::NoSupportedVariant)?;
        let write_cache =
            Self::first_supported_write(self.write_cache, caps).ok_or(Error::NoSupportedVariant)?;
        let update_cache = Self::first_supported_write(self.update_cache, caps)
            .ok_or(Error::NoSupportedVariant)?;

        Ok(SelectedOps {
            read_cache,
            write_cache,
            update_cache,
        })
    }
}

/// ECC status decode function
///
/// Receives read access to the feature registers (for vendors that keep
/// per-sector detail there) and the raw status register byte. Returns the
/// corrected bitflip count, `EccUncorrectable`, `EccStatusUnknown`, or a
/// propagated transport error.
pub type EccStatusFn = fn(&mut dyn FeatureReader, u8) -> Result<u32>;

/// OOB layout and ECC status decoding of one chip
#[derive(Clone, Copy)]
pub struct EccInfo {
    /// Spare-area partitioning
    pub layout: &'static (dyn OobLayout + Sync),
    /// Status register decoder
    pub status: EccStatusFn,
}

impl EccInfo {
    /// Create a new ECC info record
    pub const fn new(layout: &'static (dyn OobLayout + Sync), status: EccStatusFn) -> Self {
        Self { layout, status }
    }
}

/// SPI NAND chip descriptor
///
/// One entry per chip model, defined at compile time in a vendor table and
/// looked up by raw ID bytes during detection.
#[derive(Clone, Copy)]
pub struct ChipInfo {
    /// Model name (e.g. "F35SQA001G")
    pub model: &'static str,
    /// Detection ID bytes and their read method
    pub id: ChipId,
    /// Memory organization
    pub memorg: Memorg,
    /// Required ECC strength
    pub eccreq: EccRequirements,
    /// Cache operation variants
    pub variants: OpVariants,
    /// Quirk flags
    pub flags: ChipFlags,
    /// OOB layout and ECC status decoding
    pub ecc: EccInfo,
}

impl ChipInfo {
    /// Create a new chip descriptor
    pub const fn new(
        model: &'static str,
        id: ChipId,
        memorg: Memorg,
        eccreq: EccRequirements,
        variants: OpVariants,
        flags: ChipFlags,
        ecc: EccInfo,
    ) -> Self {
        Self {
            model,
            id,
            memorg,
            eccreq,
            variants,
            flags,
            ecc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memorg_1g() -> Memorg {
        Memorg::new(1, 2048, 64, 64, 1024, 20, 1, 1, 1)
    }

    #[test]
    fn test_memorg_sizes() {
        let memorg = memorg_1g();
        assert_eq!(memorg.eraseblock_size(), 128 * 1024);
        assert_eq!(memorg.lun_size(), 128 * 1024 * 1024);
        assert_eq!(memorg.total_size(), 128 * 1024 * 1024);
        assert_eq!(memorg.full_page_size(), 2048 + 64);
    }

    #[test]
    fn test_chip_id_match() {
        let id = ChipId::new(ReadIdMethod::OpcodeAddr, &[0x71]);
        assert!(id.matches(&[0x71, 0x00, 0x00]));
        assert!(!id.matches(&[0x70, 0x00, 0x00]));
        assert!(!id.matches(&[]));
    }

    static READ_VARIANTS: [ReadCacheOp; 4] = [
        ReadCacheOp::quad_io(2),
        ReadCacheOp::x4(1),
        ReadCacheOp::x2(1),
        ReadCacheOp::slow(1),
    ];
    static WRITE_VARIANTS: [WriteCacheOp; 2] = [WriteCacheOp::x4(true), WriteCacheOp::single(true)];
    static UPDATE_VARIANTS: [WriteCacheOp; 2] =
        [WriteCacheOp::x4(false), WriteCacheOp::single(false)];

    #[test]
    fn test_variant_selection_priority() {
        let variants = OpVariants::new(&READ_VARIANTS, &WRITE_VARIANTS, &UPDATE_VARIANTS);

        let ops = variants.select(ControllerCaps::all()).unwrap();
        assert_eq!(ops.read_cache.opcode, opcodes::READ_FROM_CACHE_QUAD_IO);
        assert_eq!(ops.write_cache.opcode, opcodes::PROG_LOAD_X4);
        assert_eq!(ops.update_cache.opcode, opcodes::PROG_LOAD_RANDOM_X4);

        let ops = variants.select(ControllerCaps::DUAL).unwrap();
        assert_eq!(ops.read_cache.opcode, opcodes::READ_FROM_CACHE_X2);
        assert_eq!(ops.write_cache.opcode, opcodes::PROG_LOAD);

        let ops = variants.select(ControllerCaps::empty()).unwrap();
        assert_eq!(ops.read_cache.opcode, opcodes::READ_FROM_CACHE);
        assert_eq!(ops.read_cache.io_mode, IoMode::Single);
    }

    #[test]
    fn test_quad_out_only_controller() {
        let variants = OpVariants::new(&READ_VARIANTS, &WRITE_VARIANTS, &UPDATE_VARIANTS);
        // 1-1-4 supported but 1-4-4 not: x4 must win over quad I/O
        let ops = variants.select(ControllerCaps::QUAD_OUT).unwrap();
        assert_eq!(ops.read_cache.opcode, opcodes::READ_FROM_CACHE_X4);
    }

    #[test]
    fn test_selection_fails_without_candidates() {
        static QUAD_ONLY: [ReadCacheOp; 1] = [ReadCacheOp::quad_io(2)];
        let variants = OpVariants::new(&QUAD_ONLY, &WRITE_VARIANTS, &UPDATE_VARIANTS);
        assert_eq!(
            variants.select(ControllerCaps::empty()).err(),
            Some(Error::NoSupportedVariant)
        );
    }
}
