//! The Ozpex-128 memory map.
//!
//! ```text
//! $0000-$BFFF  RAM
//! $C000-$C1FF  I/O block
//!   $C000        serial port
//!   $C001-$C002  timer registers A and B
//!   $C003        block device sector register
//!   $C004        block device selector register
//!   $C005        block device status register
//!   $C006-$C0FF  reserved
//!   $C100-$C1FF  block device data window
//! $C200-$DFFF  unmapped
//! $E000-$FFFF  BIOS ROM
//! ```

use crate::blockdev::BusLayout;

/// First address of main RAM.
pub const RAM_START: u16 = 0x0000;
/// Last address of main RAM.
pub const RAM_END: u16 = 0xbfff;

/// First address of the I/O block.
pub const IO_START: u16 = 0xc000;
/// Last address of the I/O block.
pub const IO_END: u16 = 0xc1ff;

/// Register layout of the block device interface within the I/O block.
pub const BLOCK_DEVICES: BusLayout = BusLayout::OZPEX;

/// First address of the BIOS ROM.
pub const ROM_START: u16 = 0xe000;
/// Last address of the BIOS ROM.
pub const ROM_END: u16 = 0xffff;

/// Address of the little-endian reset vector.
pub const RESET_VECTOR: u16 = 0xfffc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_devices_sit_in_io_block() {
        for addr in [
            BLOCK_DEVICES.sector,
            BLOCK_DEVICES.selector,
            BLOCK_DEVICES.status,
            BLOCK_DEVICES.readout,
            BLOCK_DEVICES.readout + 0xff,
        ] {
            assert!((IO_START..=IO_END).contains(&addr), "${addr:04x}");
        }
    }

    #[test]
    fn regions_do_not_overlap() {
        assert!(RAM_END < IO_START);
        assert!(IO_END < ROM_START);
        assert!((ROM_START..=ROM_END).contains(&RESET_VECTOR));
    }
}
