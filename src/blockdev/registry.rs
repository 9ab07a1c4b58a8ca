use super::{BlockDevice, DeviceClass, SectoredStorage};
use crate::bus::Noise;
use crate::error::AssemblyError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

//===========================================================================//

/// The types of block device that can be plugged into a machine.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DeviceKind {
    /// A bootable drive, loaded from an image file (`boot:PATH`).
    Boot,
    /// A non-bootable drive, loaded from an image file (`hdd:PATH`).
    Hdd,
    /// Zero-filled extended memory (`xmem`).
    Xmem,
}

impl DeviceKind {
    /// All device kinds, in the order they're documented.
    pub const ALL: [DeviceKind; 3] =
        [DeviceKind::Boot, DeviceKind::Hdd, DeviceKind::Xmem];

    /// Returns the tag that names this device kind in a device
    /// specification.
    pub fn tag(self) -> &'static str {
        match self {
            DeviceKind::Boot => "boot",
            DeviceKind::Hdd => "hdd",
            DeviceKind::Xmem => "xmem",
        }
    }

    /// Returns true if this kind of device is loaded from a file.
    pub fn is_file_backed(self) -> bool {
        match self {
            DeviceKind::Boot | DeviceKind::Hdd => true,
            DeviceKind::Xmem => false,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.tag())
    }
}

impl FromStr for DeviceKind {
    type Err = AssemblyError;

    fn from_str(tag: &str) -> Result<DeviceKind, AssemblyError> {
        DeviceKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| AssemblyError::UnknownDeviceType {
                tag: tag.to_string(),
            })
    }
}

//===========================================================================//

/// A request to plug a particular device into a particular slot, written as
/// `SLOT=TYPE[:ARG]` (e.g. `0=boot:disk.img` or `7=xmem`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeviceSpec {
    /// The slot the device goes into.
    pub slot: u8,
    /// What kind of device to create.
    pub kind: DeviceKind,
    /// The image file for file-backed devices.
    pub path: Option<PathBuf>,
}

impl DeviceSpec {
    /// Parses the `TYPE[:ARG]` part of a device specification, for a device
    /// going into the given slot.  Only the first `:` separates the type from
    /// its argument, so the path may itself contain colons.
    pub fn for_slot(
        slot: u8,
        device: &str,
    ) -> Result<DeviceSpec, AssemblyError> {
        let (tag, arg) = match device.split_once(':') {
            Some((tag, arg)) => (tag, Some(arg)),
            None => (device, None),
        };
        let kind = tag.parse::<DeviceKind>()?;
        let path = match (kind.is_file_backed(), arg) {
            (true, Some(arg)) if !arg.is_empty() => Some(PathBuf::from(arg)),
            (true, _) => {
                let tag = kind.tag();
                return Err(AssemblyError::MissingDevicePath { tag });
            }
            (false, None) => None,
            (false, Some(arg)) => {
                return Err(AssemblyError::UnexpectedDeviceArgument {
                    tag: kind.tag(),
                    arg: arg.to_string(),
                });
            }
        };
        Ok(DeviceSpec { slot, kind, path })
    }

    /// Constructs the device this specification describes.  File-backed
    /// devices read their whole image file here.
    pub fn build(
        &self,
        noise: Noise,
    ) -> Result<Box<dyn BlockDevice>, AssemblyError> {
        let storage = match (self.kind, &self.path) {
            (DeviceKind::Xmem, _) => {
                SectoredStorage::new_zeroed(DeviceClass::ExtendedMemory)
            }
            (kind, Some(path)) => {
                let bootable = kind == DeviceKind::Boot;
                SectoredStorage::from_file(path, bootable).map_err(|source| {
                    AssemblyError::Io { path: path.clone(), source }
                })?
            }
            (kind, None) => {
                let tag = kind.tag();
                return Err(AssemblyError::MissingDevicePath { tag });
            }
        };
        Ok(Box::new(storage.with_noise(noise)))
    }
}

impl FromStr for DeviceSpec {
    type Err = AssemblyError;

    fn from_str(spec: &str) -> Result<DeviceSpec, AssemblyError> {
        let malformed =
            || AssemblyError::MalformedDeviceSpec { spec: spec.to_string() };
        let (slot, device) = spec.split_once('=').ok_or_else(malformed)?;
        let slot = slot.trim().parse::<u8>().map_err(|_| malformed())?;
        DeviceSpec::for_slot(slot, device)
    }
}

impl fmt::Display for DeviceSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}={}", self.slot, self.kind)?;
        if let Some(path) = &self.path {
            write!(formatter, ":{}", path.display())?;
        }
        Ok(())
    }
}

//===========================================================================//


//===========================================================================//
