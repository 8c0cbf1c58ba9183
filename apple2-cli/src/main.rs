use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use apple2_core::cpu::Cpu;
use apple2_core::disasm;
use apple2_core::disk::ImageType;
use apple2_core::log::{self, Severity};
use apple2_core::machine::Machine;

/// Headless Apple II core: loads up to two Disk II images, then either
/// disassembles or runs the CPU for a bounded number of instructions.
/// There is no renderer; window dimensions are accepted and recorded
/// only, per the emulator's documented scope.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Disk image for drive 1
    #[arg(long, value_name = "PATH")]
    disk1: Option<String>,

    /// Disk image for drive 2
    #[arg(long, value_name = "PATH")]
    disk2: Option<String>,

    /// Force the image type for both disks when it can't be inferred
    /// from the file extension (.do/.dsk, .po, .nib)
    #[arg(long, value_enum)]
    disk_type: Option<DiskTypeArg>,

    /// Print a disassembly of the program starting at the reset vector
    /// instead of running it
    #[arg(long)]
    disassemble: bool,

    /// Upper bound on instructions executed before exiting
    #[arg(long, default_value_t = 1_000_000)]
    max_instructions: u64,

    /// Override the log file path
    #[arg(long, value_name = "PATH", default_value = "/tmp/apple2.log")]
    log_file: String,

    /// Recorded only; no renderer is built here
    #[arg(long, default_value_t = 560)]
    width: u32,

    /// Recorded only; no renderer is built here
    #[arg(long, default_value_t = 384)]
    height: u32,
}

#[derive(Clone, Copy, ValueEnum)]
enum DiskTypeArg {
    Dos,
    ProDos,
    Nib,
}

impl From<DiskTypeArg> for ImageType {
    fn from(value: DiskTypeArg) -> Self {
        match value {
            DiskTypeArg::Dos => ImageType::Dos,
            DiskTypeArg::ProDos => ImageType::ProDos,
            DiskTypeArg::Nib => ImageType::Nib,
        }
    }
}

/// `.do`/`.dsk` imply a DOS 3.3 sector order, `.po` a ProDOS order, and
/// `.nib` an already-nibblized image; anything else needs `--disk-type`.
fn infer_image_type(path: &str) -> Option<ImageType> {
    let extension = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "do" | "dsk" => Some(ImageType::Dos),
        "po" => Some(ImageType::ProDos),
        "nib" => Some(ImageType::Nib),
        _ => None,
    }
}

fn resolve_image_type(path: &str, override_type: Option<DiskTypeArg>) -> Option<ImageType> {
    infer_image_type(path).or(override_type.map(ImageType::from))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    log::init_log(&cli.log_file);
    log::log(
        Severity::Info,
        &format!("window {}x{} (recorded only, no renderer)", cli.width, cli.height),
    );

    let machine = Machine::new_shared();

    if let Some(path) = &cli.disk1 {
        if let Err(error) = insert_disk(&machine, 1, path, cli.disk_type) {
            log::log(Severity::Crit, &format!("drive 1: {}", error));
            eprintln!("failed to insert disk1: {}", error);
            return ExitCode::FAILURE;
        }
    }
    if let Some(path) = &cli.disk2 {
        if let Err(error) = insert_disk(&machine, 2, path, cli.disk_type) {
            log::log(Severity::Crit, &format!("drive 2: {}", error));
            eprintln!("failed to insert disk2: {}", error);
            return ExitCode::FAILURE;
        }
    }

    if cli.disassemble {
        let reset_vector = {
            let mut m = machine.borrow_mut();
            let lo = m.get(0xFFFC) as u16;
            let hi = m.get(0xFFFD) as u16;
            lo | (hi << 8)
        };
        let text = {
            let m = machine.borrow();
            disasm::disassemble(&m.memory, reset_vector, 0xFFFF)
        };
        print!("{}", text);
        return ExitCode::SUCCESS;
    }

    let mut cpu = Cpu::new(machine.clone());
    for _ in 0..cli.max_instructions {
        cpu.step();
    }

    let mut m = machine.borrow_mut();
    if let Err(error) = m.peripherals.drive1.save() {
        log::log(Severity::Crit, &format!("drive 1 save failed: {}", error));
    }
    if let Err(error) = m.peripherals.drive2.save() {
        log::log(Severity::Crit, &format!("drive 2 save failed: {}", error));
    }

    ExitCode::SUCCESS
}

fn insert_disk(
    machine: &apple2_core::machine::SharedMachine,
    slot: u8,
    path: &str,
    override_type: Option<DiskTypeArg>,
) -> apple2_core::Result<()> {
    let image_type = resolve_image_type(path, override_type).ok_or_else(|| {
        apple2_core::EmulatorError::BadOption(format!(
            "cannot infer image type for {}; pass --disk-type",
            path
        ))
    })?;

    let mut m = machine.borrow_mut();
    let drive = if slot == 1 {
        &mut m.peripherals.drive1
    } else {
        &mut m.peripherals.drive2
    };
    drive.insert(path, image_type)?;
    drive.turn_on(true);
    Ok(())
}
