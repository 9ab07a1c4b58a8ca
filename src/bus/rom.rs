use super::{MappedComponent, describe_size};
use std::io;
use std::ops::RangeInclusive;

//===========================================================================//

/// The value read from ROM locations that no image byte was loaded into.
const ERASED: u8 = 0xff;

//===========================================================================//

/// A simulated read-only memory occupying a contiguous range of addresses.
/// All writes will be ignored.
pub struct RomComponent {
    range: RangeInclusive<u16>,
    rom: Box<[u8]>,
}

impl RomComponent {
    /// Returns a new, erased ROM component spanning `start..=end`.  Panics if
    /// `end < start`.
    pub fn new(start: u16, end: u16) -> RomComponent {
        assert!(start <= end);
        let size = usize::from(end - start) + 1;
        RomComponent {
            range: start..=end,
            rom: vec![ERASED; size].into_boxed_slice(),
        }
    }

    /// Returns the number of bytes this ROM holds.
    pub fn size(&self) -> usize {
        self.rom.len()
    }

    /// Burns an image into the ROM, starting at its first address.  Any
    /// locations past the end of the image are left erased.  Returns an error
    /// if the image does not fit.
    pub fn load(&mut self, image: &[u8]) -> io::Result<()> {
        if image.len() > self.rom.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "image is {} bytes, but ROM only holds {}",
                    image.len(),
                    self.rom.len()
                ),
            ));
        }
        self.rom[..image.len()].copy_from_slice(image);
        self.rom[image.len()..].fill(ERASED);
        Ok(())
    }

    fn index(&self, addr: u16) -> usize {
        usize::from(addr.wrapping_sub(*self.range.start())) % self.rom.len()
    }
}

impl MappedComponent for RomComponent {
    fn description(&self) -> String {
        format!(
            "{} ROM at ${:04x}-${:04x}",
            describe_size(self.rom.len()),
            self.range.start(),
            self.range.end()
        )
    }

    fn owns(&self, addr: u16) -> bool {
        self.range.contains(&addr)
    }

    fn fetch(&mut self, addr: u16) -> u8 {
        self.rom[self.index(addr)]
    }

    fn write(&mut self, addr: u16, data: u8) {
        tracing::trace!(addr, data, "ignored write to ROM");
    }
}

//===========================================================================//


//===========================================================================//
