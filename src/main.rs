//! Runs an NROM cartridge on the CPU core until it stops.
//!
//! Usage: nes6502 path/to/game.nes
//! With `NES6502_LOG=trace NES6502_START_PC=C000` the stdout trace of nestest.nes
//! lines up with the reference log.

use std::process::ExitCode;

use log::info;
use nes6502::{bus::Memory, cartridge::cartridge::Cartridge, config::Config, cpu::cpu::CPU, logger};

/// nestest's automation entry point starts after the reset sequence.
const START_PC_CYCLES: u64 = 7;

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}\n\n{}", e, nes6502::config::USAGE);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = logger::init(config.log_level) {
        eprintln!("unable to install logger: {}", e);
    }

    let cart = match Cartridge::load(&config.rom_path) {
        Ok(cart) => cart,
        Err(e) => {
            logger::fatal(format_args!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    let mut memory = Memory::new(&cart);
    let mut cpu = CPU::new(&mut memory);
    cpu.reset();
    if let Some(pc) = config.start_pc {
        cpu.pc.set(pc);
        cpu.cycles = START_PC_CYCLES;
    }

    let mut steps: u64 = 0;
    while config.max_steps.is_none_or(|max| steps < max) {
        if let Err(e) = cpu.step() {
            logger::fatal(&e);
            logger::fatal(format_args!(
                "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} [{}] SP:{:02X} CYC:{}",
                cpu.a.get(),
                cpu.x.get(),
                cpu.y.get(),
                cpu.status.get(),
                cpu.status.describe(),
                cpu.sp.get(),
                cpu.cycles
            ));
            return ExitCode::FAILURE;
        }
        steps += 1;
    }

    info!("stopped after {} instructions, {} cycles", steps, cpu.cycles);
    ExitCode::SUCCESS
}
