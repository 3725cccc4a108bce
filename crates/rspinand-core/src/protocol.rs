//! Register-level SPI NAND sequences
//!
//! The identification and feature-register helpers shared by detection and
//! vendor modules. Page data transfer sequencing is the integrating host's
//! job and deliberately absent here.

use crate::chip::ReadIdMethod;
use crate::controller::SpiNandController;
use crate::device::{RawId, MAX_ID_LEN};
use crate::error::Result;
use crate::spi::SpiNandOp;

/// Reset the device to its power-on state
pub fn reset<C: SpiNandController + ?Sized>(controller: &mut C) -> Result<()> {
    let mut op = SpiNandOp::reset();
    controller.exec(&mut op)
}

/// Read the raw ID bytes using the given method
pub fn read_id<C: SpiNandController + ?Sized>(
    controller: &mut C,
    method: ReadIdMethod,
) -> Result<RawId> {
    let mut buf = [0u8; MAX_ID_LEN];
    let mut op = match method {
        ReadIdMethod::Opcode => SpiNandOp::read_id(&mut buf),
        ReadIdMethod::OpcodeAddr => SpiNandOp::read_id_addr(&mut buf),
        ReadIdMethod::OpcodeDummy => SpiNandOp::read_id_dummy(&mut buf),
    };
    controller.exec(&mut op)?;
    Ok(RawId::new(buf))
}

/// Read one feature register
pub fn get_feature<C: SpiNandController + ?Sized>(controller: &mut C, reg: u8) -> Result<u8> {
    let mut buf = [0u8; 1];
    let mut op = SpiNandOp::get_feature(reg, &mut buf);
    controller.exec(&mut op)?;
    Ok(buf[0])
}

/// Write one feature register
pub fn set_feature<C: SpiNandController + ?Sized>(
    controller: &mut C,
    reg: u8,
    value: u8,
) -> Result<()> {
    let data = [value];
    let mut op = SpiNandOp::set_feature(reg, &data);
    controller.exec(&mut op)
}

/// Read-modify-write the masked bits of one feature register
pub fn upd_feature<C: SpiNandController + ?Sized>(
    controller: &mut C,
    reg: u8,
    mask: u8,
    value: u8,
) -> Result<()> {
    let current = get_feature(controller, reg)?;
    let updated = (current & !mask) | (value & mask);
    if updated == current {
        return Ok(());
    }
    set_feature(controller, reg, updated)
}
