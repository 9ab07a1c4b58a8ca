use super::{
    BlockDevice, DEVICE_SIZE, DeviceClass, SECTOR_SIZE, STATUS_BOOTABLE,
};
use crate::bus::{Noise, describe_size};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

//===========================================================================//

/// A block device backed by an in-memory buffer.
///
/// Drives (bootable or not) and extended memory all use this one type; they
/// differ only in where their initial contents come from, in their bootable
/// flag, and in the [DeviceClass] they report.  Writes only ever change the
/// in-memory buffer; nothing is written back to the file a drive was loaded
/// from.
pub struct SectoredStorage {
    data: Box<[u8]>,
    bootable: bool,
    class: DeviceClass,
    noise: Noise,
}

impl SectoredStorage {
    /// Returns a device using the given buffer as its contents.  The buffer
    /// would normally be [DEVICE_SIZE] bytes long, but any length is allowed;
    /// locations past its end read as floating-pin noise.
    pub fn with_contents(
        data: Box<[u8]>,
        bootable: bool,
        class: DeviceClass,
    ) -> SectoredStorage {
        SectoredStorage { data, bootable, class, noise: Noise::default() }
    }

    /// Returns a zero-filled, non-bootable device of the standard size.  This
    /// is how extended memory is created.
    pub fn new_zeroed(class: DeviceClass) -> SectoredStorage {
        let data = vec![0u8; DEVICE_SIZE].into_boxed_slice();
        SectoredStorage::with_contents(data, false, class)
    }

    /// Reads a drive image from `reader`.
    ///
    /// Images shorter than [DEVICE_SIZE] are zero-padded.  Images longer than
    /// that keep only their first [DEVICE_SIZE] bytes, since the rest could
    /// never be addressed through the bus.
    pub fn from_reader<R: Read>(
        mut reader: R,
        bootable: bool,
    ) -> io::Result<SectoredStorage> {
        let mut data = Vec::with_capacity(DEVICE_SIZE);
        reader.by_ref().take(DEVICE_SIZE as u64).read_to_end(&mut data)?;
        let loaded = data.len();
        if loaded < DEVICE_SIZE {
            tracing::debug!(loaded, "zero-padding short drive image");
            data.resize(DEVICE_SIZE, 0);
        } else if reader.take(1).read_to_end(&mut Vec::new())? > 0 {
            tracing::warn!(
                "drive image is larger than {}; extra bytes ignored",
                describe_size(DEVICE_SIZE)
            );
        }
        Ok(SectoredStorage::with_contents(
            data.into_boxed_slice(),
            bootable,
            DeviceClass::SectoredStorage,
        ))
    }

    /// Reads a drive image from the file at `path` (see
    /// [from_reader](Self::from_reader)).
    pub fn from_file(
        path: &Path,
        bootable: bool,
    ) -> io::Result<SectoredStorage> {
        let file = File::open(path)?;
        SectoredStorage::from_reader(io::BufReader::new(file), bootable)
    }

    /// Replaces this device's floating-pin noise source.
    pub fn with_noise(mut self, noise: Noise) -> SectoredStorage {
        self.noise = noise;
        self
    }

    /// Returns true if this device advertises itself as bootable.
    pub fn is_bootable(&self) -> bool {
        self.bootable
    }

    /// Returns the class of storage this device reports.
    pub fn class(&self) -> DeviceClass {
        self.class
    }

    /// Returns the current contents of the device's buffer.
    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    fn index(sector: u8, offset: u8) -> usize {
        usize::from(sector) * SECTOR_SIZE + usize::from(offset)
    }
}

impl BlockDevice for SectoredStorage {
    fn description(&self) -> String {
        let size = describe_size(self.data.len());
        match (self.class, self.bootable) {
            (DeviceClass::SectoredStorage, true) => {
                format!("{size} bootable drive")
            }
            (DeviceClass::SectoredStorage, false) => format!("{size} drive"),
            (DeviceClass::ExtendedMemory, _) => {
                format!("{size} extended memory")
            }
        }
    }

    fn fetch(&mut self, sector: u8, offset: u8) -> u8 {
        match self.data.get(SectoredStorage::index(sector, offset)) {
            Some(&byte) => byte,
            None => self.noise.byte(),
        }
    }

    fn write(&mut self, sector: u8, offset: u8, data: u8) {
        let index = SectoredStorage::index(sector, offset);
        if let Some(byte) = self.data.get_mut(index) {
            *byte = data;
        }
    }

    fn status(&self) -> u8 {
        let mut status = self.class.status_bits();
        if self.bootable {
            status |= STATUS_BOOTABLE;
        }
        status
    }
}

//===========================================================================//


//===========================================================================//
