use clap::{ArgAction, Parser};
use ozpex::blockdev::{DeviceClass, DeviceSpec, STATUS_BOOTABLE};
use ozpex::machine::map;
use ozpex::{Machine, MachineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

//===========================================================================//

#[derive(Parser)]
#[clap(name = "ozpex-128", author, about, long_about = None, version)]
struct Cli {
    /// The BIOS image to load into ROM.
    #[clap(short, long, default_value = "roms/monitor.bin")]
    bios: PathBuf,
    /// Plugs a block device into a slot: SLOT=boot:PATH, SLOT=hdd:PATH, or
    /// SLOT=xmem.
    #[clap(short = 'D', long = "device", value_name = "SLOT=TYPE[:ARG]")]
    devices: Vec<DeviceSpec>,
    /// Seeds the floating-pin noise, for reproducible runs.
    #[clap(long)]
    seed: Option<u64>,
    /// Prints the memory map, with register labels.
    #[clap(long)]
    map: bool,
    /// Logs more detail (-v, -vv).
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

//===========================================================================//

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config =
        MachineConfig { bios: cli.bios, devices: cli.devices, seed: cli.seed };
    let mut machine = match Machine::assemble(&config) {
        Ok(machine) => machine,
        Err(err) => {
            eprintln!("ozpex: {err}");
            return ExitCode::FAILURE;
        }
    };
    print!("{}", machine.description());
    if cli.map {
        print_labels(&machine);
    }
    println!("reset vector: ${:04x}", machine.reset_vector());
    probe_devices(&mut machine, &config.devices);
    ExitCode::SUCCESS
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_labels(machine: &Machine) {
    for addr in 0..=u16::MAX {
        if let Some(label) = machine.label_at(addr) {
            println!("  ${addr:04x} {label}");
        }
    }
}

/// Reports each configured slot's status the way BIOS code would see it:
/// by selecting the slot and reading the status register.
fn probe_devices(machine: &mut Machine, devices: &[DeviceSpec]) {
    for spec in devices {
        machine.write(map::BLOCK_DEVICES.selector, spec.slot);
        let status = machine.fetch(map::BLOCK_DEVICES.status);
        let class = match DeviceClass::from_status(status) {
            Some(DeviceClass::SectoredStorage) => "storage",
            Some(DeviceClass::ExtendedMemory) => "extended memory",
            None => "unknown",
        };
        let boot =
            if status & STATUS_BOOTABLE != 0 { ", bootable" } else { "" };
        println!(
            "slot {:3}: {spec} (status ${status:02x}: {class}{boot})",
            spec.slot
        );
    }
}

//===========================================================================//
