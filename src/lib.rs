//! nes6502: the NES's 6502 CPU core, its memory map and NROM cartridges.
//!
//! Implements the CPU side of the NES as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide). There is no PPU, APU or
//! input; their register windows are plain storage.
//!
//! ## Modules (NESdev references)
//!
//! - **bits** – byte and bit helpers
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): RAM and PPU
//!   mirroring, APU/IO registers, cartridge window
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading; [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0)
//! - **config** – command line and environment
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU) / 2A03: official opcodes, nestest trace
//! - **logger** – coloured terminal backend for `log`

pub mod bits;
pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod logger;
