//! rspinand-dummy - In-memory SPI NAND emulator for testing
//!
//! This crate provides a dummy controller that emulates the register plane
//! of a SPI NAND chip: ID readout in every shape, feature registers
//! (including the Foresee sector ECC status registers), reset, and write
//! enable. Page and cache transfers are out of scope - they belong to the
//! host that drives a real controller - so those opcodes are rejected.
//!
//! Useful for exercising detection and ECC status decoding without
//! hardware, including fault injection on feature reads.

#![cfg_attr(not(feature = "std"), no_std)]

use rspinand_core::controller::{ControllerCaps, SpiNandController};
use rspinand_core::error::{Error, Result};
use rspinand_core::regs;
use rspinand_core::spi::{check_io_mode_supported, opcodes, SpiNandOp};

/// Byte the emulated chip shifts out while it is still latching the
/// READ_ID address phase
const ID_GARBAGE: u8 = 0xFF;

/// Foresee sector ECC status registers
const SES_REGS: [u8; 4] = [0x80, 0x84, 0x88, 0x8C];

/// Power-on block lock value (whole array protected)
const BL_POWER_ON: u8 = 0x38;

/// Configuration for the dummy controller
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Manufacturer ID byte
    pub manufacturer_id: u8,
    /// Device ID byte
    pub device_id: u8,
    /// Chip expects an address byte before the ID bytes; reading without
    /// one leaks a garbage byte first (Foresee behavior)
    pub id_needs_addr: bool,
    /// Capabilities the emulated controller reports
    pub caps: ControllerCaps,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            manufacturer_id: 0xCD, // Foresee
            device_id: 0x71,       // F35SQA001G
            id_needs_addr: true,
            caps: ControllerCaps::DUAL | ControllerCaps::QUAD,
        }
    }
}

/// Dummy SPI NAND controller
///
/// Emulates the register plane of a single chip in memory.
pub struct DummyNand {
    config: DummyConfig,
    cfg_reg: u8,
    status_reg: u8,
    block_lock_reg: u8,
    ses_regs: [u8; 4],
    write_enabled: bool,
    fail_feature_reg: Option<u8>,
}

impl DummyNand {
    /// Create a new dummy controller with the given configuration
    pub fn new(config: DummyConfig) -> Self {
        Self {
            config,
            cfg_reg: regs::CFG_ECC_ENABLE,
            status_reg: 0,
            block_lock_reg: BL_POWER_ON,
            ses_regs: [0; 4],
            write_enabled: false,
            fail_feature_reg: None,
        }
    }

    /// Create a new dummy controller emulating an F35SQA001G
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Set the status register served to GET_FEATURE
    pub fn set_status(&mut self, status: u8) {
        self.status_reg = status;
    }

    /// Set the four sector ECC status registers
    pub fn set_ses(&mut self, ses: [u8; 4]) {
        self.ses_regs = ses;
    }

    /// Make every GET_FEATURE of `reg` fail with a transfer error
    pub fn fail_feature_reads_of(&mut self, reg: u8) {
        self.fail_feature_reg = Some(reg);
    }

    /// Current configuration register value
    pub fn cfg_reg(&self) -> u8 {
        self.cfg_reg
    }

    /// Current block lock register value
    pub fn block_lock_reg(&self) -> u8 {
        self.block_lock_reg
    }

    /// Whether the quad-enable bit is set
    pub fn quad_enabled(&self) -> bool {
        self.cfg_reg & regs::CFG_QUAD_ENABLE != 0
    }

    /// Whether the WEL bit is currently set
    pub fn write_enabled(&self) -> bool {
        self.write_enabled
    }

    fn serve_id(&self, op: &mut SpiNandOp<'_>) {
        let id = [self.config.manufacturer_id, self.config.device_id, 0, 0];
        let shifted = op.addr_bytes == 0 && op.dummy_bytes == 0 && self.config.id_needs_addr;

        for (index, byte) in op.read_buf.iter_mut().enumerate() {
            *byte = if shifted {
                if index == 0 {
                    ID_GARBAGE
                } else {
                    id[index - 1]
                }
            } else {
                *id.get(index).unwrap_or(&0)
            };
        }
    }

    fn feature_reg(&mut self, reg: u8) -> Result<&mut u8> {
        if let Some(index) = SES_REGS.iter().position(|&r| r == reg) {
            return Ok(&mut self.ses_regs[index]);
        }
        match reg {
            regs::REG_BLOCK_LOCK => Ok(&mut self.block_lock_reg),
            regs::REG_CFG => Ok(&mut self.cfg_reg),
            regs::REG_STATUS => Ok(&mut self.status_reg),
            _ => Err(Error::SpiTransferFailed),
        }
    }

    fn handle_get_feature(&mut self, op: &mut SpiNandOp<'_>) -> Result<()> {
        let reg = op.addr.unwrap_or(0) as u8;
        if self.fail_feature_reg == Some(reg) {
            return Err(Error::SpiTransferFailed);
        }
        let value = *self.feature_reg(reg)?;
        if let Some(out) = op.read_buf.first_mut() {
            *out = value;
        }
        Ok(())
    }

    fn handle_set_feature(&mut self, op: &SpiNandOp<'_>) -> Result<()> {
        let reg = op.addr.unwrap_or(0) as u8;
        let value = *op.write_data.first().unwrap_or(&0);
        // The status register is read-only.
        if reg != regs::REG_STATUS {
            *self.feature_reg(reg)? = value;
        }
        Ok(())
    }
}

impl SpiNandController for DummyNand {
    fn caps(&self) -> ControllerCaps {
        self.config.caps
    }

    fn max_transfer_len(&self) -> usize {
        2048 + 64
    }

    fn exec(&mut self, op: &mut SpiNandOp<'_>) -> Result<()> {
        check_io_mode_supported(op.io_mode, self.caps())?;

        match op.opcode {
            opcodes::RESET => {
                self.cfg_reg = regs::CFG_ECC_ENABLE;
                self.block_lock_reg = BL_POWER_ON;
                self.write_enabled = false;
                Ok(())
            }

            opcodes::READ_ID => {
                self.serve_id(op);
                Ok(())
            }

            opcodes::GET_FEATURE => self.handle_get_feature(op),
            opcodes::SET_FEATURE => self.handle_set_feature(op),

            opcodes::WRITE_ENABLE => {
                self.write_enabled = true;
                Ok(())
            }
            opcodes::WRITE_DISABLE => {
                self.write_enabled = false;
                Ok(())
            }

            // Page and cache transfers are the host core's concern.
            _ => {
                log::debug!("rejecting opcode {:#04x}", op.opcode);
                Err(Error::OpcodeNotSupported)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rspinand_core::chip::ChipFlags;
    use rspinand_core::device::SpiNandDevice;
    use rspinand_core::manufacturers::foresee::{FORESEE, FORESEE_SES};
    use rspinand_core::manufacturers::{Manufacturer, MANUFACTURERS};

    static SES_ONLY: &[&Manufacturer] = &[&FORESEE_SES];

    #[test]
    fn test_detect_f35sqa001g() {
        let dev = SpiNandDevice::detect(DummyNand::new_default(), MANUFACTURERS).unwrap();
        let chip = dev.chip();
        assert_eq!(chip.model, "F35SQA001G");
        assert!(chip.flags.contains(ChipFlags::HAS_QE_BIT));
        assert_eq!(chip.memorg.total_size(), 128 * 1024 * 1024);
        assert_eq!(dev.raw_id().bytes()[1], 0xCD);
        assert!(core::ptr::eq(dev.manufacturer(), &FORESEE));
    }

    #[test]
    fn test_detect_whole_family() {
        for (devid, model) in [
            (0x70, "F35SQA512M"),
            (0x72, "F35SQA002G"),
            (0x60, "F35UQA512M"),
            (0x61, "F35UQA001G"),
            (0x62, "F35UQA002G"),
        ] {
            let dummy = DummyNand::new(DummyConfig {
                device_id: devid,
                ..DummyConfig::default()
            });
            let dev = SpiNandDevice::detect(dummy, MANUFACTURERS).unwrap();
            assert_eq!(dev.chip().model, model);
        }
    }

    #[test]
    fn test_detect_unknown_model_fails() {
        let dummy = DummyNand::new(DummyConfig {
            device_id: 0xFF,
            ..DummyConfig::default()
        });
        assert_eq!(
            SpiNandDevice::detect(dummy, MANUFACTURERS).err(),
            Some(Error::ChipNotSupported)
        );
    }

    #[test]
    fn test_detect_foreign_manufacturer_fails() {
        let dummy = DummyNand::new(DummyConfig {
            manufacturer_id: 0xEF,
            ..DummyConfig::default()
        });
        assert_eq!(
            SpiNandDevice::detect(dummy, MANUFACTURERS).err(),
            Some(Error::ChipNotFound)
        );
    }

    #[test]
    fn test_init_configures_quad_and_unlocks() {
        let dev = SpiNandDevice::detect(DummyNand::new_default(), MANUFACTURERS).unwrap();
        // x4 read wins for a quad-capable controller, so QE must be set.
        assert_eq!(
            dev.selected_ops().read_cache.opcode,
            opcodes::READ_FROM_CACHE_X4
        );
        let dummy = dev.into_controller();
        assert!(dummy.quad_enabled());
        assert_eq!(dummy.block_lock_reg(), regs::BL_ALL_UNLOCKED);
    }

    #[test]
    fn test_no_quad_enable_without_quad_caps() {
        let dummy = DummyNand::new(DummyConfig {
            caps: ControllerCaps::DUAL,
            ..DummyConfig::default()
        });
        let dev = SpiNandDevice::detect(dummy, MANUFACTURERS).unwrap();
        assert_eq!(
            dev.selected_ops().read_cache.opcode,
            opcodes::READ_FROM_CACHE_X2
        );
        assert!(!dev.into_controller().quad_enabled());
    }

    #[test]
    fn test_single_line_controller_falls_back() {
        let dummy = DummyNand::new(DummyConfig {
            caps: ControllerCaps::empty(),
            ..DummyConfig::default()
        });
        let dev = SpiNandDevice::detect(dummy, MANUFACTURERS).unwrap();
        assert_eq!(dev.selected_ops().read_cache.opcode, opcodes::READ_FROM_CACHE);
        assert_eq!(dev.selected_ops().write_cache.opcode, opcodes::PROG_LOAD);
    }

    #[test]
    fn test_detect_ses_generation() {
        let dev = SpiNandDevice::detect(DummyNand::new_default(), SES_ONLY).unwrap();
        let chip = dev.chip();
        assert_eq!(chip.model, "F35SQA001G");
        assert!(chip.flags.is_empty());
        // Quad I/O leads this generation's read list.
        assert_eq!(
            dev.selected_ops().read_cache.opcode,
            opcodes::READ_FROM_CACHE_QUAD_IO
        );
        // No QE flag, so the configuration register keeps its reset value.
        assert!(!dev.into_controller().quad_enabled());
    }

    #[test]
    fn test_coarse_ecc_status_through_device() {
        let mut dev = SpiNandDevice::detect(DummyNand::new_default(), MANUFACTURERS).unwrap();
        dev.controller_mut()
            .set_status(regs::STATUS_ECC_HAS_BITFLIPS);
        let status = dev.read_status().unwrap();
        assert_eq!(dev.ecc_status(status), Ok(1));

        dev.controller_mut()
            .set_status(regs::STATUS_ECC_UNCOR_ERROR);
        let status = dev.read_status().unwrap();
        assert_eq!(dev.ecc_status(status), Err(Error::EccUncorrectable));
    }

    #[test]
    fn test_ses_ecc_status_through_device() {
        let mut dev = SpiNandDevice::detect(DummyNand::new_default(), SES_ONLY).unwrap();
        dev.controller_mut()
            .set_status(regs::STATUS_ECC_HAS_BITFLIPS);
        dev.controller_mut().set_ses([0x01, 0x01, 0x00, 0x01]);
        let status = dev.read_status().unwrap();
        assert_eq!(dev.ecc_status(status), Ok(3));
    }

    #[test]
    fn test_ses_read_failure_propagates() {
        let mut dev = SpiNandDevice::detect(DummyNand::new_default(), SES_ONLY).unwrap();
        dev.controller_mut()
            .set_status(regs::STATUS_ECC_HAS_BITFLIPS);
        dev.controller_mut().fail_feature_reads_of(0x84);
        let status = dev.read_status().unwrap();
        assert_eq!(dev.ecc_status(status), Err(Error::SpiTransferFailed));
    }

    #[test]
    fn test_oob_regions_through_device() {
        let dev = SpiNandDevice::detect(DummyNand::new_default(), MANUFACTURERS).unwrap();
        // This generation hides its ECC bytes.
        assert!(dev.oob_ecc_region(0).unwrap().is_empty());
        assert_eq!(dev.oob_free_region(0).unwrap().offset, 2);
        assert_eq!(dev.oob_free_region(0).unwrap().length, 14);
        assert_eq!(dev.oob_free_region(3).unwrap().offset, 48);
        assert_eq!(
            dev.oob_free_region(4).err(),
            Some(Error::OobSectionOutOfRange)
        );

        let dev = SpiNandDevice::detect(DummyNand::new_default(), SES_ONLY).unwrap();
        assert_eq!(dev.oob_ecc_region(2).unwrap().offset, 40);
        assert_eq!(dev.oob_ecc_region(2).unwrap().length, 8);
        assert_eq!(dev.oob_free_region(2).unwrap().offset, 33);
    }

    #[test]
    fn test_page_opcodes_rejected() {
        let mut dummy = DummyNand::new_default();
        let mut op = SpiNandOp::page_read(0);
        assert_eq!(dummy.exec(&mut op), Err(Error::OpcodeNotSupported));
    }

    #[test]
    fn test_write_enable_tracking() {
        let mut dummy = DummyNand::new_default();
        dummy.exec(&mut SpiNandOp::write_enable()).unwrap();
        assert!(dummy.write_enabled());
        dummy.exec(&mut SpiNandOp::write_disable()).unwrap();
        assert!(!dummy.write_enabled());
    }
}
