use super::{MappedComponent, describe_size};
use std::ops::RangeInclusive;

//===========================================================================//

/// A simulated block of RAM occupying a contiguous range of addresses.  The
/// contents start out zero-filled.
pub struct RamComponent {
    range: RangeInclusive<u16>,
    ram: Box<[u8]>,
}

impl RamComponent {
    /// Returns a new zero-filled RAM component spanning `start..=end`.
    /// Panics if `end < start`.
    pub fn new(start: u16, end: u16) -> RamComponent {
        assert!(start <= end);
        let size = usize::from(end - start) + 1;
        RamComponent {
            range: start..=end,
            ram: vec![0u8; size].into_boxed_slice(),
        }
    }

    fn index(&self, addr: u16) -> usize {
        usize::from(addr.wrapping_sub(*self.range.start())) % self.ram.len()
    }
}

impl MappedComponent for RamComponent {
    fn description(&self) -> String {
        format!(
            "{} RAM at ${:04x}-${:04x}",
            describe_size(self.ram.len()),
            self.range.start(),
            self.range.end()
        )
    }

    fn owns(&self, addr: u16) -> bool {
        self.range.contains(&addr)
    }

    fn fetch(&mut self, addr: u16) -> u8 {
        self.ram[self.index(addr)]
    }

    fn write(&mut self, addr: u16, data: u8) {
        let index = self.index(addr);
        self.ram[index] = data;
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::RamComponent;
    use crate::bus::MappedComponent;

    #[test]
    fn description() {
        let ram = RamComponent::new(0x0000, 0xbfff);
        assert_eq!(ram.description(), "48kB RAM at $0000-$bfff");
        let ram = RamComponent::new(0x0200, 0x020f);
        assert_eq!(ram.description(), "16B RAM at $0200-$020f");
    }

    #[test]
    fn ownership() {
        let ram = RamComponent::new(0x1000, 0x1fff);
        assert!(!ram.owns(0x0fff));
        assert!(ram.owns(0x1000));
        assert!(ram.owns(0x1fff));
        assert!(!ram.owns(0x2000));
    }

    #[test]
    fn starts_zeroed_and_stores_writes() {
        let mut ram = RamComponent::new(0x1000, 0x1fff);
        assert_eq!(ram.fetch(0x1234), 0x00);
        ram.write(0x1234, 0xab);
        assert_eq!(ram.fetch(0x1234), 0xab);
        assert_eq!(ram.fetch(0x1235), 0x00);
    }

    #[test]
    fn full_address_space() {
        let mut ram = RamComponent::new(0x0000, 0xffff);
        ram.write(0xffff, 0x5a);
        assert_eq!(ram.fetch(0xffff), 0x5a);
        assert!(ram.owns(0x0000));
    }
}

//===========================================================================//
