use std::fmt;

use log::{Level, log_enabled, trace};

use crate::{
    bits,
    bus::Bus,
    cpu::{
        addressing::Operand,
        flags::POWER_UP_STATUS,
        opcodes::OPCODES,
        registers::{ByteRegister, StatusRegister, WordRegister},
    },
};

/// Log target of the per-instruction trace line.
pub const TRACE_TARGET: &str = "nes6502::trace";

const STACK_BASE: u16 = 0x0100;
const RESET_VECTOR: u16 = 0xFFFC;
const POWER_UP_SP: u8 = 0xFD;
/// Cycles the reset sequence takes before the first fetch.
const RESET_CYCLES: u64 = 7;

/// Why a step could not execute. The CPU state is untouched when this is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CpuError {
    /// The opcode is in the table but has no handler (BRK).
    UnimplementedOpcode {
        opcode: u8,
        mnemonic: &'static str,
        pc: u16,
    },
    /// No instruction is assigned to the opcode.
    UnknownOpcode { opcode: u8, pc: u16 },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::UnimplementedOpcode {
                opcode,
                mnemonic,
                pc,
            } => write!(
                f,
                "unimplemented opcode ${:02X} ({}) at ${:04X}",
                opcode, mnemonic, pc
            ),
            CpuError::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode ${:02X} at ${:04X}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for CpuError {}

/// The 2A03's 6502 core. Borrows the bus for its whole life.
pub struct CPU<'a> {
    pub a: ByteRegister,
    pub x: ByteRegister,
    pub y: ByteRegister,
    pub sp: ByteRegister,
    pub pc: WordRegister,
    pub status: StatusRegister,
    /// Cycles spent by the current instruction; reset at every step.
    pub step_cycles: u8,
    /// Running total since power-up.
    pub cycles: u64,
    pub bus: &'a mut dyn Bus,
}

impl<'a> CPU<'a> {
    /// Power-up state: registers cleared, SP=$FD, P=$24, PC=$0000.
    pub fn new(bus: &'a mut dyn Bus) -> Self {
        Self {
            a: ByteRegister::default(),
            x: ByteRegister::default(),
            y: ByteRegister::default(),
            sp: ByteRegister::new(POWER_UP_SP),
            pc: WordRegister::default(),
            status: StatusRegister::new(POWER_UP_STATUS),
            step_cycles: 0,
            cycles: 0,
            bus,
        }
    }

    pub fn reset(&mut self) {
        let lo = self.bus.read(RESET_VECTOR);
        let hi = self.bus.read(RESET_VECTOR + 1);
        self.pc.set(bits::combine_bytes(lo, hi));

        self.sp.set(POWER_UP_SP); // resets at $FD, as nestest logs it
        self.status.set(POWER_UP_STATUS);

        self.a.reset();
        self.x.reset();
        self.y.reset();

        self.step_cycles = 0;
        self.cycles = RESET_CYCLES;
    }

    /// Execute one instruction and return the cycles it took.
    pub fn step(&mut self) -> Result<u8, CpuError> {
        let pc = self.pc.get();
        let opcode = self.bus.read(pc);

        let Some(entry) = OPCODES[opcode as usize] else {
            return Err(CpuError::UnknownOpcode { opcode, pc });
        };
        let Some(handler) = entry.handler else {
            return Err(CpuError::UnimplementedOpcode {
                opcode,
                mnemonic: entry.mnemonic,
                pc,
            });
        };

        if log_enabled!(target: TRACE_TARGET, Level::Trace) {
            let line = self.trace_line();
            trace!(target: TRACE_TARGET, "{}", line);
        }

        self.pc.increment();
        self.step_cycles = entry.cycles + entry.mode.cycles();

        let (operand, page_crossed) = self.resolve(entry.mode);
        if page_crossed && entry.page_penalty {
            self.step_cycles += 1;
        }

        handler(self, operand);

        self.cycles += self.step_cycles as u64;
        Ok(self.step_cycles)
    }

    pub(super) fn fetch_byte(&mut self) -> u8 {
        let byte = self.bus.read(self.pc.get());
        self.pc.increment();
        byte
    }

    pub(super) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte();
        let hi = self.fetch_byte();
        bits::combine_bytes(lo, hi)
    }

    pub(super) fn push(&mut self, value: u8) {
        self.bus.write(STACK_BASE | self.sp.get() as u16, value);
        self.sp.decrement();
    }

    pub(super) fn pop(&mut self) -> u8 {
        self.sp.increment();
        self.bus.read(STACK_BASE | self.sp.get() as u16)
    }

    /// Value an instruction operates on.
    pub(super) fn read_operand(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::Accumulator => self.a.get(),
            Operand::Immediate(value) => value,
            Operand::Address(addr) => self.bus.read(addr),
            Operand::Implied | Operand::Relative(_) => {
                unreachable!("{:?} carries no value", operand)
            }
        }
    }

    /// Store back to where `read_operand` read from (read-modify-write and stores).
    pub(super) fn write_operand(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Accumulator => self.a.set(value),
            Operand::Address(addr) => self.bus.write(addr, value),
            Operand::Implied | Operand::Immediate(_) | Operand::Relative(_) => {
                unreachable!("cannot store to {:?}", operand)
            }
        }
    }

    pub(super) fn operand_address(&self, operand: Operand) -> u16 {
        match operand {
            Operand::Address(addr) => addr,
            _ => unreachable!("{:?} is not an address", operand),
        }
    }
}
