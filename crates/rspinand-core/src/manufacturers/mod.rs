//! Manufacturer registration records
//!
//! Each vendor module exports one record per descriptor table; the host
//! hands a registry of records to [`SpiNandDevice::detect`]. Detection
//! claims a chip either through the record's custom detect callback (legacy
//! vendor code that inspects the raw ID itself) or through generic table
//! matching on the manufacturer byte plus the descriptor's device-ID bytes.
//!
//! [`SpiNandDevice::detect`]: crate::device::SpiNandDevice::detect

pub mod foresee;

use crate::chip::{ChipInfo, ReadIdMethod};
use crate::device::RawId;
use crate::error::Result;

/// Custom detect callback
///
/// Receives the raw ID captured with the plain opcode method. Returns
/// `Ok(None)` when the ID belongs to another manufacturer, `Ok(Some(_))` on
/// a table match, and an error when the manufacturer matched but the model
/// is unknown (or a transport failure occurred).
pub type DetectFn = fn(&RawId) -> Result<Option<&'static ChipInfo>>;

/// One manufacturer's registration record
pub struct Manufacturer {
    /// Manufacturer ID byte
    pub id: u8,
    /// Vendor name
    pub name: &'static str,
    /// Descriptor table
    pub chips: &'static [ChipInfo],
    /// Custom detect callback, when generic matching does not apply
    pub detect: Option<DetectFn>,
}

impl Manufacturer {
    /// Generic table matching for IDs captured with `method`
    ///
    /// The first raw byte must equal the manufacturer ID; the following
    /// bytes are compared against each descriptor declaring the same read
    /// method.
    pub fn match_chip(&self, id: &RawId, method: ReadIdMethod) -> Option<&'static ChipInfo> {
        let bytes = id.bytes();
        if bytes[0] != self.id {
            return None;
        }

        self.chips
            .iter()
            .find(|chip| chip.id.method == method && chip.id.matches(&bytes[1..]))
    }
}

/// Find the table entry matching a single device-ID byte
///
/// The match helper legacy detect callbacks are written against.
pub fn match_devid(chips: &'static [ChipInfo], devid: u8) -> Option<&'static ChipInfo> {
    chips.iter().find(|chip| chip.id.matches(&[devid]))
}

/// Registration records known to this crate
///
/// The coarse-generation Foresee record takes precedence; hosts integrating
/// the fine-grained firmware generation register [`foresee::FORESEE_SES`]
/// on its own instead (both generations answer to manufacturer ID 0xCD).
pub static MANUFACTURERS: &[&Manufacturer] = &[&foresee::FORESEE, &foresee::FORESEE_SES];
