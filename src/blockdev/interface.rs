use super::BlockDevice;
use crate::bus::{MappedComponent, Noise};

//===========================================================================//

const NUM_SLOTS: usize = 256;

//===========================================================================//

/// The addresses at which a [BlockDeviceBus] exposes its registers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BusLayout {
    /// Address of the sector register.
    pub sector: u16,
    /// Address of the device selector register.
    pub selector: u16,
    /// Address of the (read-only) status register.
    pub status: u16,
    /// First address of the 256-byte data window.
    pub readout: u16,
}

impl BusLayout {
    /// The register layout used by the Ozpex-128's I/O block.
    pub const OZPEX: BusLayout = BusLayout {
        sector: 0xc003,
        selector: 0xc004,
        status: 0xc005,
        readout: 0xc100,
    };

    /// Returns the offset within the data window of the given address, if it
    /// falls inside the window.
    pub fn window_offset(&self, addr: u16) -> Option<u8> {
        if addr < self.readout {
            return None;
        }
        u8::try_from(addr - self.readout).ok()
    }

    fn is_register(&self, addr: u16) -> bool {
        addr == self.sector || addr == self.selector || addr == self.status
    }
}

//===========================================================================//

/// The bus-side interface to up to 256 block devices.
///
/// Software selects a device by writing its slot number to the selector
/// register, and a sector of that device by writing the sector register.  The
/// 256 bytes of the selected sector of the selected device then appear in the
/// data window.  The status register reports the selected device's status
/// byte, or zero if the slot is empty.
///
/// Reading the data window while an empty slot is selected samples undriven
/// data lines, and returns an arbitrary byte; writes to an empty slot are
/// dropped.
pub struct BlockDeviceBus {
    layout: BusLayout,
    sector: u8,
    selected: u8,
    devices: [Option<Box<dyn BlockDevice>>; NUM_SLOTS],
    noise: Noise,
}

impl BlockDeviceBus {
    /// Returns an interface with no devices attached.  The sector and
    /// selector registers power up holding arbitrary values drawn from
    /// `noise`.
    pub fn new(layout: BusLayout, mut noise: Noise) -> BlockDeviceBus {
        BlockDeviceBus {
            layout,
            sector: noise.byte(),
            selected: noise.byte(),
            devices: std::array::from_fn(|_| None),
            noise,
        }
    }

    /// Plugs a device into the given slot, returning whatever device was
    /// there before.  This is for assembling a machine; software running on
    /// the machine has no way to change what is plugged in.
    pub fn attach(
        &mut self,
        slot: u8,
        device: Box<dyn BlockDevice>,
    ) -> Option<Box<dyn BlockDevice>> {
        tracing::info!(
            slot,
            device = %device.description(),
            "attached block device"
        );
        self.devices[usize::from(slot)].replace(device)
    }

    /// Returns the register layout of this interface.
    pub fn layout(&self) -> &BusLayout {
        &self.layout
    }

    /// Returns the device plugged into the given slot, if any.
    pub fn device(&self, slot: u8) -> Option<&dyn BlockDevice> {
        self.devices[usize::from(slot)].as_deref()
    }

    /// Returns an iterator over the occupied slots and their devices.
    pub fn attached(&self) -> impl Iterator<Item = (u8, &dyn BlockDevice)> {
        (0..=u8::MAX)
            .filter_map(|slot| self.device(slot).map(|dev| (slot, dev)))
    }

    /// Returns the current value of the sector register.
    pub fn sector(&self) -> u8 {
        self.sector
    }

    /// Returns the current value of the selector register.
    pub fn selected(&self) -> u8 {
        self.selected
    }

    /// Returns the value the status register currently reads as.
    pub fn status(&self) -> u8 {
        self.device(self.selected).map_or(0, |dev| dev.status())
    }

    fn selected_device(&mut self) -> Option<&mut Box<dyn BlockDevice>> {
        self.devices[usize::from(self.selected)].as_mut()
    }
}

impl MappedComponent for BlockDeviceBus {
    fn description(&self) -> String {
        let count = self.attached().count();
        format!(
            "block device interface at ${:04x} with {} device{}",
            self.layout.readout,
            count,
            if count == 1 { "" } else { "s" }
        )
    }

    fn owns(&self, addr: u16) -> bool {
        self.layout.is_register(addr)
            || self.layout.window_offset(addr).is_some()
    }

    fn label_at(&self, addr: u16) -> Option<&str> {
        if addr == self.layout.status {
            Some("BLK_STATUS")
        } else if addr == self.layout.selector {
            Some("BLK_SELECT")
        } else if addr == self.layout.sector {
            Some("BLK_SECTOR")
        } else if addr == self.layout.readout {
            Some("BLK_DATA")
        } else {
            None
        }
    }

    fn fetch(&mut self, addr: u16) -> u8 {
        if addr == self.layout.status {
            return self.status();
        }
        if addr == self.layout.selector {
            return self.selected;
        }
        if addr == self.layout.sector {
            return self.sector;
        }
        let Some(offset) = self.layout.window_offset(addr) else {
            return self.noise.byte();
        };
        let sector = self.sector;
        match self.selected_device() {
            Some(device) => device.fetch(sector, offset),
            None => self.noise.byte(),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        if addr == self.layout.status {
            return;
        }
        if addr == self.layout.selector {
            self.selected = data;
            return;
        }
        if addr == self.layout.sector {
            self.sector = data;
            return;
        }
        let Some(offset) = self.layout.window_offset(addr) else {
            return;
        };
        let sector = self.sector;
        match self.selected_device() {
            Some(device) => device.write(sector, offset, data),
            None => tracing::trace!(
                slot = self.selected,
                "dropped write to empty slot"
            ),
        }
    }
}

//===========================================================================//


//===========================================================================//
