use super::{Machine, map};
use crate::blockdev::{BlockDeviceBus, DeviceSpec};
use crate::bus::{Noise, RamComponent, RomComponent};
use crate::error::AssemblyError;
use std::fs;
use std::io;
use std::path::PathBuf;

//===========================================================================//

/// Everything needed to assemble an Ozpex machine.
#[derive(Clone, Debug)]
pub struct MachineConfig {
    /// Path to the BIOS image, which is loaded at the start of ROM.
    pub bios: PathBuf,
    /// Block devices to plug in.  No two may share a slot.
    pub devices: Vec<DeviceSpec>,
    /// Seed for floating-pin noise, or `None` to seed from system entropy.
    pub seed: Option<u64>,
}

impl MachineConfig {
    /// Returns a configuration with the given BIOS and no block devices.
    pub fn new(bios: impl Into<PathBuf>) -> MachineConfig {
        MachineConfig { bios: bios.into(), devices: Vec::new(), seed: None }
    }
}

//===========================================================================//

impl Machine {
    /// Builds a machine with the standard Ozpex memory map (see [map]).
    ///
    /// Every block device and the BIOS are loaded before anything is wired
    /// together, so an error leaves nothing half-built.
    pub fn assemble(config: &MachineConfig) -> Result<Machine, AssemblyError> {
        let mut noise = match config.seed {
            Some(seed) => Noise::seeded(seed),
            None => Noise::from_entropy(),
        };

        let mut occupied = [false; 256];
        for spec in &config.devices {
            let slot = usize::from(spec.slot);
            if occupied[slot] {
                return Err(AssemblyError::DuplicateSlot { slot: spec.slot });
            }
            occupied[slot] = true;
        }
        let mut devices = Vec::with_capacity(config.devices.len());
        for spec in &config.devices {
            devices.push((spec.slot, spec.build(noise.fork())?));
        }

        let rom = load_bios(config)?;

        let mut block_bus =
            BlockDeviceBus::new(map::BLOCK_DEVICES, noise.fork());
        for (slot, device) in devices {
            block_bus.attach(slot, device);
        }

        let mut machine = Machine::new(noise);
        let ram = RamComponent::new(map::RAM_START, map::RAM_END);
        machine.attach("ram", Box::new(ram));
        machine.attach("disk", Box::new(block_bus));
        machine.attach("rom", Box::new(rom));
        tracing::info!(
            bios = %config.bios.display(),
            devices = config.devices.len(),
            "assembled machine"
        );
        Ok(machine)
    }
}

fn load_bios(config: &MachineConfig) -> Result<RomComponent, AssemblyError> {
    let io_error = |source: io::Error| AssemblyError::Io {
        path: config.bios.clone(),
        source,
    };
    let image = fs::read(&config.bios).map_err(io_error)?;
    let mut rom = RomComponent::new(map::ROM_START, map::ROM_END);
    if image.len() > rom.size() {
        return Err(AssemblyError::BiosTooLarge {
            path: config.bios.clone(),
            len: image.len() as u64,
            capacity: rom.size(),
        });
    }
    rom.load(&image).map_err(io_error)?;
    Ok(rom)
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::MachineConfig;
    use crate::blockdev::{DeviceKind, DeviceSpec};
    use crate::error::AssemblyError;
    use crate::machine::{Machine, map};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn bios() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        let mut image = vec![0xeau8; 0x2000];
        image[0x1ffc] = 0x00;
        image[0x1ffd] = 0xe0;
        file.write_all(&image).unwrap();
        file
    }

    fn config(bios: &NamedTempFile) -> MachineConfig {
        MachineConfig { seed: Some(0), ..MachineConfig::new(bios.path()) }
    }

    #[test]
    fn standard_layout() {
        let bios = bios();
        let mut machine = Machine::assemble(&config(&bios)).unwrap();
        assert_eq!(
            machine.component_names().collect::<Vec<_>>(),
            vec!["ram", "disk", "rom"]
        );
        assert_eq!(machine.owner_of(0x0000), Some("ram"));
        assert_eq!(machine.owner_of(0xbfff), Some("ram"));
        assert_eq!(machine.owner_of(0xc000), None);
        assert_eq!(machine.owner_of(0xc003), Some("disk"));
        assert_eq!(machine.owner_of(0xc006), None);
        assert_eq!(machine.owner_of(0xc1ff), Some("disk"));
        assert_eq!(machine.owner_of(0xc200), None);
        assert_eq!(machine.owner_of(0xe000), Some("rom"));
        assert_eq!(machine.label_at(0xc005), Some("BLK_STATUS"));
        assert_eq!(machine.reset_vector(), 0xe000);
    }

    #[test]
    fn missing_bios() {
        let dir = tempfile::tempdir().unwrap();
        let config = MachineConfig::new(dir.path().join("monitor.bin"));
        assert!(matches!(
            Machine::assemble(&config),
            Err(AssemblyError::Io { .. })
        ));
    }

    #[test]
    fn oversized_bios() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 0x2001]).unwrap();
        match Machine::assemble(&MachineConfig::new(file.path())) {
            Err(AssemblyError::BiosTooLarge { len, capacity, .. }) => {
                assert_eq!(len, 0x2001);
                assert_eq!(capacity, 0x2000);
            }
            Err(err) => panic!("unexpected error: {err}"),
            Ok(_) => panic!("assembly should have failed"),
        }
    }

    #[test]
    fn duplicate_slot() {
        let bios = bios();
        let mut config = config(&bios);
        config.devices.push("4=xmem".parse().unwrap());
        config.devices.push("4=xmem".parse().unwrap());
        assert!(matches!(
            Machine::assemble(&config),
            Err(AssemblyError::DuplicateSlot { slot: 4 })
        ));
    }

    #[test]
    fn duplicate_slot_is_reported_before_reading_images() {
        let bios = bios();
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(&bios);
        config.devices.push(DeviceSpec {
            slot: 0,
            kind: DeviceKind::Hdd,
            path: Some(dir.path().join("gone.img")),
        });
        config.devices.push("0=xmem".parse().unwrap());
        assert!(matches!(
            Machine::assemble(&config),
            Err(AssemblyError::DuplicateSlot { slot: 0 })
        ));
    }

    #[test]
    fn missing_device_image_aborts_assembly() {
        let bios = bios();
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(&bios);
        config.devices.push("2=xmem".parse().unwrap());
        config.devices.push(DeviceSpec {
            slot: 3,
            kind: DeviceKind::Hdd,
            path: Some(dir.path().join("gone.img")),
        });
        assert!(matches!(
            Machine::assemble(&config),
            Err(AssemblyError::Io { .. })
        ));
    }

    #[test]
    fn devices_are_plugged_in() {
        let bios = bios();
        let mut config = config(&bios);
        config.devices.push("9=xmem".parse().unwrap());
        let mut machine = Machine::assemble(&config).unwrap();
        machine.write(map::BLOCK_DEVICES.selector, 9);
        assert_eq!(machine.fetch(map::BLOCK_DEVICES.status), 0x20);
        machine.write(map::BLOCK_DEVICES.selector, 8);
        assert_eq!(machine.fetch(map::BLOCK_DEVICES.status), 0x00);
    }
}

//===========================================================================//
