//! 6502 CPU emulation for the NES.
//!
//! Official NMOS instruction set, nestest-compatible timing. Memory and I/O go through
//! the [`Bus`](crate::bus::Bus) trait. BRK and interrupts are not executed.

pub mod addressing;
pub mod cpu;
pub mod flags;
mod instructions;
pub mod opcodes;
pub mod registers;
pub mod trace;
