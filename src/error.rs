//! Errors that can stop a machine from being assembled.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

//===========================================================================//

/// An error encountered while assembling a machine.  None of these can occur
/// once the machine is running; every bus access succeeds.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// A device specification named a device type that doesn't exist.
    #[error("unknown device type {tag:?} (expected boot, hdd, or xmem)")]
    UnknownDeviceType {
        /// The unrecognized type tag.
        tag: String,
    },
    /// A file-backed device type was given without a file path.
    #[error("device type {tag:?} requires a file path (e.g. {tag}:disk.img)")]
    MissingDevicePath {
        /// The device type tag.
        tag: &'static str,
    },
    /// A device type that takes no argument was given one.
    #[error("device type {tag:?} takes no argument, but was given {arg:?}")]
    UnexpectedDeviceArgument {
        /// The device type tag.
        tag: &'static str,
        /// The argument that was given.
        arg: String,
    },
    /// A device specification could not be parsed at all.
    #[error(
        "malformed device specification {spec:?} (expected SLOT=TYPE[:ARG])"
    )]
    MalformedDeviceSpec {
        /// The offending text.
        spec: String,
    },
    /// Two devices were assigned to the same slot.
    #[error("slot {slot} was assigned more than one device")]
    DuplicateSlot {
        /// The slot index.
        slot: u8,
    },
    /// The BIOS image doesn't fit in the BIOS ROM.
    #[error(
        "BIOS image {} is {len} bytes, but the ROM only holds {capacity}",
        path.display()
    )]
    BiosTooLarge {
        /// Path to the BIOS image.
        path: PathBuf,
        /// Length of the image, in bytes.
        len: u64,
        /// Size of the BIOS ROM, in bytes.
        capacity: usize,
    },
    /// A device image or BIOS file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::AssemblyError;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn messages_name_the_culprit() {
        let err = AssemblyError::UnknownDeviceType { tag: "foo".to_string() };
        assert_eq!(
            err.to_string(),
            "unknown device type \"foo\" (expected boot, hdd, or xmem)"
        );
        let err = AssemblyError::DuplicateSlot { slot: 3 };
        assert_eq!(
            err.to_string(),
            "slot 3 was assigned more than one device"
        );
        let err = AssemblyError::Io {
            path: PathBuf::from("missing.img"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read missing.img: not found");
    }
}

//===========================================================================//
