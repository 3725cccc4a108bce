//! Foresee (Longsys) SPI NAND chips
//!
//! Two firmware generations are supported and ship as separate registration
//! records:
//!
//! - [`FORESEE`]: the F35xQA family. The chip corrects everything
//!   internally and exposes no ECC bytes in the spare area; the status
//!   register's 2-bit field is the only ECC telemetry. Matched by a custom
//!   detect callback because the ID bytes arrive behind a garbage byte.
//! - [`FORESEE_SES`]: the F35SQA001G revision with per-sector ECC status
//!   registers (0x80-0x8C) and user-visible ECC bytes. Matched generically
//!   by its address-shaped ID.
//!
//! Both generations answer to manufacturer ID 0xCD; registries should carry
//! one record or the other, not both tables for the same board.

use crate::chip::{
    ChipFlags, ChipId, ChipInfo, EccInfo, EccRequirements, Memorg, OpVariants, ReadCacheOp,
    ReadIdMethod, WriteCacheOp,
};
use crate::device::{FeatureReader, RawId};
use crate::error::{Error, Result};
use crate::oob::{check_section, OobLayout, OobRegion};
use crate::regs;

use super::{match_devid, Manufacturer};

/// Foresee manufacturer ID byte
pub const MFR_FORESEE: u8 = 0xCD;

/// Status field value: uncorrectable, encoding 0b10
const STATUS_ECC_UNCOR_ERROR_10: u8 = 2 << 4;
/// Status field value: uncorrectable, encoding 0b11
const STATUS_ECC_UNCOR_ERROR_11: u8 = 3 << 4;

/// Sector ECC status registers, one per 512-byte step
const SES_REGS: [u8; 4] = [0x80, 0x84, 0x88, 0x8C];
/// Sector error status field in each SES register
const SES_STATUS_MASK: u8 = 0x0F;
/// SES field value: one bit error detected and corrected
const SES_SINGLE_BIT_CORRECTED: u8 = 0x1;
/// SES field bit flagging more than one bit error in the sector
const SES_MULTI_BIT: u8 = 0x2;

// ============================================================================
// OOB layouts
// ============================================================================

/// Spare-area layout with user-visible ECC bytes
///
/// Each 16-byte segment holds the bad-block marker slot in byte 0, seven
/// free bytes, then eight ECC bytes.
pub struct ExposedEccLayout;

impl OobLayout for ExposedEccLayout {
    fn ecc(&self, section: usize) -> Result<OobRegion> {
        check_section(section)?;
        Ok(OobRegion::new(16 * section as u32 + 8, 8))
    }

    fn free(&self, section: usize) -> Result<OobRegion> {
        check_section(section)?;
        // Reserve 1 byte for the BBM.
        Ok(OobRegion::new(16 * section as u32 + 1, 7))
    }
}

/// Spare-area layout with chip-internal ECC
///
/// No ECC data is stored in the accessible OOB, so the full 16 bytes of
/// each spare segment are available to the user and still covered by the
/// internal ECC. The first two bytes of spare 0 hold the bad-block marker.
pub struct HiddenEccLayout;

impl OobLayout for HiddenEccLayout {
    fn ecc(&self, section: usize) -> Result<OobRegion> {
        check_section(section)?;
        // ECC is not user accessible
        Ok(OobRegion::new(0, 0))
    }

    fn free(&self, section: usize) -> Result<OobRegion> {
        check_section(section)?;
        if section > 0 {
            Ok(OobRegion::new(16 * section as u32, 16))
        } else {
            Ok(OobRegion::new(2, 14))
        }
    }
}

// ============================================================================
// ECC status decoding
// ============================================================================

/// Count sectors whose ECC status reports a corrected single-bit error
fn ses_corrected_sectors(reader: &mut dyn FeatureReader) -> Result<u32> {
    let mut corrected = 0;

    for (sector, &reg) in SES_REGS.iter().enumerate() {
        let ses = reader.read_feature(reg).map_err(|err| {
            log::error!("sector {} ECC status read failed: {}", sector, err);
            err
        })?;

        let field = ses & SES_STATUS_MASK;
        if field == SES_SINGLE_BIT_CORRECTED {
            corrected += 1;
        }
        if field & SES_MULTI_BIT != 0 {
            log::debug!("sector {} has more than 1-bit error", sector);
        }
    }

    log::debug!("{} sectors with a corrected 1-bit error", corrected);
    Ok(corrected)
}

/// Decoder for the generation with per-sector status registers
///
/// The coarse "has bitflips" indication is refined by reading the four SES
/// registers and counting corrected sectors, so the host can judge whether
/// the page is worth rewriting.
fn ses_ecc_status(reader: &mut dyn FeatureReader, status: u8) -> Result<u32> {
    match status & regs::STATUS_ECC_MASK {
        regs::STATUS_ECC_NO_BITFLIPS => Ok(0),
        regs::STATUS_ECC_HAS_BITFLIPS => ses_corrected_sectors(reader),
        regs::STATUS_ECC_UNCOR_ERROR => Err(Error::EccUncorrectable),
        _ => Err(Error::EccStatusUnknown),
    }
}

/// Decoder for the generation without per-sector status
///
/// Both uncorrectable encodings collapse into one failure. The final arm
/// cannot be reached through the 2-bit mask; it stays to keep an
/// unrecognized pattern from ever reading as success.
fn coarse_ecc_status(_reader: &mut dyn FeatureReader, status: u8) -> Result<u32> {
    match status & regs::STATUS_ECC_MASK {
        regs::STATUS_ECC_NO_BITFLIPS => Ok(0),
        regs::STATUS_ECC_HAS_BITFLIPS => Ok(1),
        STATUS_ECC_UNCOR_ERROR_10 | STATUS_ECC_UNCOR_ERROR_11 => Err(Error::EccUncorrectable),
        _ => Err(Error::EccStatusUnknown),
    }
}

// ============================================================================
// Cache operation variants
// ============================================================================

const READ_CACHE_VARIANTS: [ReadCacheOp; 4] = [
    ReadCacheOp::x4(1),
    ReadCacheOp::x2(1),
    ReadCacheOp::fast(1),
    ReadCacheOp::slow(1),
];

const WRITE_CACHE_VARIANTS: [WriteCacheOp; 2] =
    [WriteCacheOp::x4(true), WriteCacheOp::single(true)];

// This generation reloads the whole cache on update instead of patching it.
const UPDATE_CACHE_VARIANTS: [WriteCacheOp; 2] =
    [WriteCacheOp::x4(true), WriteCacheOp::single(true)];

const SES_READ_CACHE_VARIANTS: [ReadCacheOp; 6] = [
    ReadCacheOp::quad_io(2),
    ReadCacheOp::x4(1),
    ReadCacheOp::dual_io(1),
    ReadCacheOp::x2(1),
    ReadCacheOp::fast(1),
    ReadCacheOp::slow(1),
];

const SES_WRITE_CACHE_VARIANTS: [WriteCacheOp; 2] =
    [WriteCacheOp::x4(true), WriteCacheOp::single(true)];

const SES_UPDATE_CACHE_VARIANTS: [WriteCacheOp; 2] =
    [WriteCacheOp::x4(false), WriteCacheOp::single(false)];

// ============================================================================
// Chip tables
// ============================================================================

const COARSE_VARIANTS: OpVariants = OpVariants::new(
    &READ_CACHE_VARIANTS,
    &WRITE_CACHE_VARIANTS,
    &UPDATE_CACHE_VARIANTS,
);

const COARSE_ECC: EccInfo = EccInfo::new(&HiddenEccLayout, coarse_ecc_status);

static FORESEE_CHIPS: [ChipInfo; 6] = [
    ChipInfo::new(
        "F35SQA512M",
        ChipId::new(ReadIdMethod::Opcode, &[0x70]),
        Memorg::new(1, 2048, 64, 64, 512, 10, 1, 1, 1),
        EccRequirements::new(1, 512),
        COARSE_VARIANTS,
        ChipFlags::HAS_QE_BIT,
        COARSE_ECC,
    ),
    ChipInfo::new(
        "F35SQA001G",
        ChipId::new(ReadIdMethod::Opcode, &[0x71]),
        Memorg::new(1, 2048, 64, 64, 1024, 20, 1, 1, 1),
        EccRequirements::new(1, 512),
        COARSE_VARIANTS,
        ChipFlags::HAS_QE_BIT,
        COARSE_ECC,
    ),
    ChipInfo::new(
        "F35SQA002G",
        ChipId::new(ReadIdMethod::Opcode, &[0x72]),
        Memorg::new(1, 2048, 64, 64, 2048, 40, 1, 1, 1),
        EccRequirements::new(1, 512),
        COARSE_VARIANTS,
        ChipFlags::HAS_QE_BIT,
        COARSE_ECC,
    ),
    ChipInfo::new(
        "F35UQA512M",
        ChipId::new(ReadIdMethod::Opcode, &[0x60]),
        Memorg::new(1, 2048, 64, 64, 512, 10, 1, 1, 1),
        EccRequirements::new(1, 512),
        COARSE_VARIANTS,
        ChipFlags::HAS_QE_BIT,
        COARSE_ECC,
    ),
    ChipInfo::new(
        "F35UQA001G",
        ChipId::new(ReadIdMethod::Opcode, &[0x61]),
        Memorg::new(1, 2048, 64, 64, 1024, 20, 1, 1, 1),
        EccRequirements::new(1, 512),
        COARSE_VARIANTS,
        ChipFlags::HAS_QE_BIT,
        COARSE_ECC,
    ),
    ChipInfo::new(
        "F35UQA002G",
        ChipId::new(ReadIdMethod::Opcode, &[0x62]),
        Memorg::new(1, 2048, 64, 64, 2048, 40, 1, 1, 1),
        EccRequirements::new(1, 512),
        COARSE_VARIANTS,
        ChipFlags::HAS_QE_BIT,
        COARSE_ECC,
    ),
];

static FORESEE_SES_CHIPS: [ChipInfo; 1] = [ChipInfo::new(
    "F35SQA001G",
    ChipId::new(ReadIdMethod::OpcodeAddr, &[0x71]),
    Memorg::new(1, 2048, 64, 64, 1024, 20, 1, 1, 1),
    EccRequirements::new(1, 512),
    OpVariants::new(
        &SES_READ_CACHE_VARIANTS,
        &SES_WRITE_CACHE_VARIANTS,
        &SES_UPDATE_CACHE_VARIANTS,
    ),
    ChipFlags::empty(),
    EccInfo::new(&ExposedEccLayout, ses_ecc_status),
)];

// ============================================================================
// Detection
// ============================================================================

/// Custom detect for the F35xQA family
///
/// An address byte is shifted in before the ID bytes are read out, so the
/// first raw byte is garbage: the manufacturer byte sits at index 1 and the
/// device byte at index 2.
fn foresee_detect(id: &RawId) -> Result<Option<&'static ChipInfo>> {
    let bytes = id.bytes();
    if bytes[1] != MFR_FORESEE {
        return Ok(None);
    }

    match match_devid(&FORESEE_CHIPS, bytes[2]) {
        Some(chip) => Ok(Some(chip)),
        None => Err(Error::ChipNotSupported),
    }
}

/// F35xQA family (internal ECC, custom detect)
pub static FORESEE: Manufacturer = Manufacturer {
    id: MFR_FORESEE,
    name: "Foresee",
    chips: &FORESEE_CHIPS,
    detect: Some(foresee_detect),
};

/// F35SQA001G revision with sector ECC status registers
pub static FORESEE_SES: Manufacturer = Manufacturer {
    id: MFR_FORESEE,
    name: "Foresee",
    chips: &FORESEE_SES_CHIPS,
    detect: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves canned SES register values and can fail on a chosen register
    struct SesRegs {
        values: [u8; 4],
        fail_reg: Option<u8>,
        reads: usize,
    }

    impl SesRegs {
        fn new(values: [u8; 4]) -> Self {
            Self {
                values,
                fail_reg: None,
                reads: 0,
            }
        }
    }

    impl FeatureReader for SesRegs {
        fn read_feature(&mut self, reg: u8) -> Result<u8> {
            if self.fail_reg == Some(reg) {
                return Err(Error::SpiTransferFailed);
            }
            self.reads += 1;
            let index = SES_REGS.iter().position(|&r| r == reg).unwrap();
            Ok(self.values[index])
        }
    }

    #[test]
    fn test_exposed_layout_regions() {
        let layout = ExposedEccLayout;
        for section in 0..4 {
            let ecc = layout.ecc(section).unwrap();
            assert_eq!(ecc, OobRegion::new(16 * section as u32 + 8, 8));

            let free = layout.free(section).unwrap();
            assert_eq!(free, OobRegion::new(16 * section as u32 + 1, 7));
        }
    }

    #[test]
    fn test_exposed_layout_range() {
        let layout = ExposedEccLayout;
        assert_eq!(layout.ecc(4), Err(Error::OobSectionOutOfRange));
        assert_eq!(layout.free(4), Err(Error::OobSectionOutOfRange));
    }

    #[test]
    fn test_hidden_layout_regions() {
        let layout = HiddenEccLayout;
        assert_eq!(layout.free(0).unwrap(), OobRegion::new(2, 14));
        for section in 1..4 {
            let free = layout.free(section).unwrap();
            assert_eq!(free, OobRegion::new(16 * section as u32, 16));
        }
        for section in 0..4 {
            assert!(layout.ecc(section).unwrap().is_empty());
        }
    }

    #[test]
    fn test_hidden_layout_range() {
        let layout = HiddenEccLayout;
        assert_eq!(layout.ecc(4), Err(Error::OobSectionOutOfRange));
        assert_eq!(layout.free(4), Err(Error::OobSectionOutOfRange));
    }

    #[test]
    fn test_coarse_status_exhaustive() {
        let mut reader = SesRegs::new([0; 4]);
        // Every encoding of the 2-bit field, with noise in the other bits.
        for noise in [0x00, 0x01, 0x8F] {
            assert_eq!(coarse_ecc_status(&mut reader, noise & !regs::STATUS_ECC_MASK), Ok(0));
            assert_eq!(
                coarse_ecc_status(&mut reader, (1 << 4) | (noise & !regs::STATUS_ECC_MASK)),
                Ok(1)
            );
            assert_eq!(
                coarse_ecc_status(&mut reader, (2 << 4) | (noise & !regs::STATUS_ECC_MASK)),
                Err(Error::EccUncorrectable)
            );
            assert_eq!(
                coarse_ecc_status(&mut reader, (3 << 4) | (noise & !regs::STATUS_ECC_MASK)),
                Err(Error::EccUncorrectable)
            );
        }
        // No decoder call touches the feature registers.
        assert_eq!(reader.reads, 0);
    }

    #[test]
    fn test_ses_status_counts_corrected_sectors() {
        for k in 0..=4usize {
            let mut values = [0u8; 4];
            for value in values.iter_mut().take(k) {
                *value = SES_SINGLE_BIT_CORRECTED;
            }
            let mut reader = SesRegs::new(values);
            assert_eq!(
                ses_ecc_status(&mut reader, regs::STATUS_ECC_HAS_BITFLIPS),
                Ok(k as u32)
            );
            assert_eq!(reader.reads, 4);
        }
    }

    #[test]
    fn test_ses_status_ignores_multi_bit_pattern() {
        // 0x3 carries the multi-bit flag; only exact 0x1 fields count.
        let mut reader = SesRegs::new([0x1, 0x3, 0x2, 0x1]);
        assert_eq!(
            ses_ecc_status(&mut reader, regs::STATUS_ECC_HAS_BITFLIPS),
            Ok(2)
        );
    }

    #[test]
    fn test_ses_status_clean_page_skips_registers() {
        let mut reader = SesRegs::new([0x1; 4]);
        assert_eq!(ses_ecc_status(&mut reader, regs::STATUS_ECC_NO_BITFLIPS), Ok(0));
        assert_eq!(reader.reads, 0);
    }

    #[test]
    fn test_ses_status_uncorrectable_and_unknown() {
        let mut reader = SesRegs::new([0; 4]);
        assert_eq!(
            ses_ecc_status(&mut reader, STATUS_ECC_UNCOR_ERROR_10),
            Err(Error::EccUncorrectable)
        );
        assert_eq!(
            ses_ecc_status(&mut reader, STATUS_ECC_UNCOR_ERROR_11),
            Err(Error::EccStatusUnknown)
        );
    }

    #[test]
    fn test_ses_read_failure_aborts() {
        let mut reader = SesRegs::new([0x1; 4]);
        reader.fail_reg = Some(0x88);
        assert_eq!(
            ses_ecc_status(&mut reader, regs::STATUS_ECC_HAS_BITFLIPS),
            Err(Error::SpiTransferFailed)
        );
        // The first two registers were read, then the failure aborted.
        assert_eq!(reader.reads, 2);
    }

    #[test]
    fn test_coarse_table() {
        assert_eq!(FORESEE_CHIPS.len(), 6);
        let devids: [u8; 6] = [0x70, 0x71, 0x72, 0x60, 0x61, 0x62];
        for (chip, devid) in FORESEE_CHIPS.iter().zip(devids) {
            assert_eq!(chip.id.bytes, &[devid]);
            assert_eq!(chip.memorg.pagesize, 2048);
            assert_eq!(chip.memorg.oobsize, 64);
            assert!(chip.flags.contains(ChipFlags::HAS_QE_BIT));
        }
        let two_gigabit = match_devid(&FORESEE_CHIPS, 0x72).unwrap();
        assert_eq!(two_gigabit.memorg.total_size(), 256 * 1024 * 1024);
    }

    #[test]
    fn test_detect_tristate() {
        let claimed = foresee_detect(&RawId::new([0xAA, 0xCD, 0x71, 0x00])).unwrap();
        assert_eq!(claimed.unwrap().model, "F35SQA001G");

        // Manufacturer matched, model unknown.
        assert!(matches!(
            foresee_detect(&RawId::new([0xAA, 0xCD, 0xFF, 0x00])),
            Err(Error::ChipNotSupported)
        ));

        // Not a Foresee part.
        assert!(matches!(
            foresee_detect(&RawId::new([0xAA, 0x2C, 0x71, 0x00])),
            Ok(None)
        ));
    }

    #[test]
    fn test_ses_generation_generic_match() {
        let id = RawId::new([0xCD, 0x71, 0x00, 0x00]);
        let chip = FORESEE_SES.match_chip(&id, ReadIdMethod::OpcodeAddr).unwrap();
        assert_eq!(chip.model, "F35SQA001G");
        assert!(chip.flags.is_empty());

        // Same bytes under a different read method do not match.
        assert!(FORESEE_SES.match_chip(&id, ReadIdMethod::Opcode).is_none());

        // Wrong manufacturer byte.
        let id = RawId::new([0xEF, 0x71, 0x00, 0x00]);
        assert!(FORESEE_SES.match_chip(&id, ReadIdMethod::OpcodeAddr).is_none());
    }
}
