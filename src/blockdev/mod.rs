//! Sector-addressed storage devices, and the bus interface through which the
//! CPU reaches them.

mod interface;
mod registry;
mod storage;

pub use interface::{BlockDeviceBus, BusLayout};
pub use registry::{DeviceKind, DeviceSpec};
pub use storage::SectoredStorage;

//===========================================================================//

/// The number of bytes in one sector.
pub const SECTOR_SIZE: usize = 0x100;

/// The number of bytes of backing storage in a standard block device (256
/// sectors of 256 bytes each).
pub const DEVICE_SIZE: usize = 0x100 * SECTOR_SIZE;

/// Status bit: the device has failed and should not be used.
pub const STATUS_MALFUNCTIONING: u8 = 0b0000_0001;
/// Status bit: the device is in the middle of an operation.
pub const STATUS_BUSY: u8 = 0b0000_0010;
/// Status bit: the device may supply boot code at reset.
pub const STATUS_BOOTABLE: u8 = 0b0000_0100;

const STATUS_CLASS_MASK: u8 = 0b0011_0000;

//===========================================================================//

/// The kind of storage a block device presents to software, as encoded in
/// bits 4-5 of its status byte.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DeviceClass {
    /// Persistent sectored storage (a disk drive).
    SectoredStorage,
    /// Volatile extended memory.
    ExtendedMemory,
}

impl DeviceClass {
    /// Returns the status bits that identify this device class.
    pub fn status_bits(self) -> u8 {
        match self {
            DeviceClass::SectoredStorage => 0b01 << 4,
            DeviceClass::ExtendedMemory => 0b10 << 4,
        }
    }

    /// Extracts the device class from a status byte, if it names a known one.
    pub fn from_status(status: u8) -> Option<DeviceClass> {
        match status & STATUS_CLASS_MASK {
            0b0001_0000 => Some(DeviceClass::SectoredStorage),
            0b0010_0000 => Some(DeviceClass::ExtendedMemory),
            _ => None,
        }
    }
}

//===========================================================================//

/// A unit of sector-addressed storage that can be attached to a
/// [BlockDeviceBus].
///
/// Implementations should *not* panic for any `(sector, offset)` pair.  Reads
/// of locations the device has no storage for return an arbitrary byte, and
/// writes to such locations are discarded.
pub trait BlockDevice {
    /// Returns a human-readable description of this device.
    fn description(&self) -> String;

    /// Reads the byte at `offset` within `sector`.
    ///
    /// Note that this is a `&mut self` method, since reading past the end of
    /// the device samples an undriven data line.
    fn fetch(&mut self, sector: u8, offset: u8) -> u8;

    /// Writes the byte at `offset` within `sector`.
    fn write(&mut self, sector: u8, offset: u8, data: u8);

    /// Returns the device's status byte (see the `STATUS_*` constants and
    /// [DeviceClass]).
    fn status(&self) -> u8;
}

//===========================================================================//


//===========================================================================//
