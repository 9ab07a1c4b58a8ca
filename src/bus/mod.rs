//! Facilities for representing a memory mapping and simulating the components
//! attached to the Ozpex address bus.

mod noise;
mod ram;
mod rom;

pub use noise::Noise;
pub use ram::RamComponent;
pub use rom::RomComponent;

//===========================================================================//

/// A hardware region attached to the 16-bit address bus.
///
/// The owner of the bus asks each attached component whether it
/// [owns](Self::owns) an address, and forwards the access to the first one
/// that does.  The [fetch](Self::fetch) and [write](Self::write) methods may
/// assume that `owns(addr)` holds; what they do for an address the component
/// does not own is up to the implementation, but they should *not* panic.
pub trait MappedComponent {
    /// Returns a human-readable description of this component.
    fn description(&self) -> String;

    /// Returns true if this component responds to the given address.  This
    /// must be free of side effects.
    fn owns(&self, addr: u16) -> bool;

    /// Returns a label for the given address, if there is one.
    fn label_at(&self, _addr: u16) -> Option<&str> {
        None
    }

    /// Reads a single byte from the component.
    ///
    /// Note that this is a `&mut self` method, since some hardware registers
    /// (and undriven data lines) may change state when read.
    fn fetch(&mut self, addr: u16) -> u8;

    /// Writes a single byte to the component.
    ///
    /// Depending on the implementation, the write may be ignored (e.g. if this
    /// component is read-only memory), and/or have other side effects.
    fn write(&mut self, addr: u16, data: u8);
}

//===========================================================================//

/// Formats a byte count the way component descriptions display it.
pub(crate) fn describe_size(size: usize) -> String {
    if size < 1024 {
        format!("{size}B")
    } else if size < 1024 * 1024 {
        format!("{}kB", size >> 10)
    } else {
        format!("{}MB", size >> 20)
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::describe_size;

    #[test]
    fn size_descriptions() {
        assert_eq!(describe_size(0x10), "16B");
        assert_eq!(describe_size(0x2000), "8kB");
        assert_eq!(describe_size(0xc000), "48kB");
        assert_eq!(describe_size(0x100000), "1MB");
    }
}

//===========================================================================//
