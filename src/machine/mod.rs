//! Assembling components into a complete simulated Ozpex machine.

mod assemble;
pub mod map;

pub use assemble::MachineConfig;

use crate::bus::{MappedComponent, Noise};
use byteorder::{ByteOrder, LittleEndian};

//===========================================================================//

/// The owner of the Ozpex address bus.
///
/// A machine holds a named, ordered list of [MappedComponent]s.  Every access
/// is forwarded to the first component that owns the address.  Reads of
/// addresses that no component owns return floating-pin noise, and writes to
/// them are dropped.
pub struct Machine {
    components: Vec<(String, Box<dyn MappedComponent>)>,
    noise: Noise,
}

impl Machine {
    /// Returns a machine with nothing attached to its bus.
    pub fn new(noise: Noise) -> Machine {
        Machine { components: Vec::new(), noise }
    }

    /// Attaches a component to the bus.  Components attached earlier take
    /// precedence over later ones where their address ranges overlap.
    pub fn attach(
        &mut self,
        name: &str,
        component: Box<dyn MappedComponent>,
    ) {
        tracing::debug!(
            name,
            component = %component.description(),
            "attached component"
        );
        self.components.push((name.to_string(), component));
    }

    /// Returns the component with the given name, if any.
    pub fn component(&self, name: &str) -> Option<&dyn MappedComponent> {
        self.components
            .iter()
            .find(|(component_name, _)| component_name == name)
            .map(|(_, component)| component.as_ref())
    }

    /// Returns the names of the attached components, in precedence order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the name of the component that responds to the given address,
    /// if any.
    pub fn owner_of(&self, addr: u16) -> Option<&str> {
        self.components
            .iter()
            .find(|(_, component)| component.owns(addr))
            .map(|(name, _)| name.as_str())
    }

    /// Returns a label for the given address, if there is one.
    pub fn label_at(&self, addr: u16) -> Option<&str> {
        self.components
            .iter()
            .find(|(_, component)| component.owns(addr))
            .and_then(|(_, component)| component.label_at(addr))
    }

    /// Returns a human-readable, multi-line description of this machine.
    pub fn description(&self) -> String {
        self.components
            .iter()
            .map(|(name, component)| {
                format!("{}: {}\n", name, component.description())
            })
            .collect()
    }

    /// Reads a single byte from the bus.
    pub fn fetch(&mut self, addr: u16) -> u8 {
        match self.owner_mut(addr) {
            Some(component) => component.fetch(addr),
            None => self.noise.byte(),
        }
    }

    /// Writes a single byte to the bus.
    pub fn write(&mut self, addr: u16, data: u8) {
        match self.owner_mut(addr) {
            Some(component) => component.write(addr, data),
            None => {
                tracing::trace!(
                    addr,
                    data,
                    "dropped write to unmapped address"
                )
            }
        }
    }

    /// Reads the address the CPU starts executing from after reset.
    pub fn reset_vector(&mut self) -> u16 {
        let bytes = [
            self.fetch(map::RESET_VECTOR),
            self.fetch(map::RESET_VECTOR + 1),
        ];
        LittleEndian::read_u16(&bytes)
    }

    fn owner_mut(
        &mut self,
        addr: u16,
    ) -> Option<&mut Box<dyn MappedComponent>> {
        self.components
            .iter_mut()
            .find(|(_, component)| component.owns(addr))
            .map(|(_, component)| component)
    }
}

//===========================================================================//


//===========================================================================//
