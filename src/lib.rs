//! Emulator core for the Ozpex-128, a fictional 6502-based computer: its
//! address bus, memory, and block storage devices.

#![warn(missing_docs)]

pub mod blockdev;
pub mod bus;
pub mod error;
pub mod machine;

pub use error::AssemblyError;
pub use machine::{Machine, MachineConfig};
