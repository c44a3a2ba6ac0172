//! Addressing modes and operand resolution.
//!
//! Each resolver consumes exactly the operand bytes of its mode from PC. Indexed modes
//! whose sum may leave the base page report the crossing; the opcode table decides
//! whether that costs a cycle.

use crate::{bits, cpu::cpu::CPU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// JMP ($nnnn) only.
    Indirect,
    /// ($nn,X)
    PreIndexedIndirect,
    /// ($nn),Y
    PostIndexedIndirect,
}

impl AddressingMode {
    /// Fixed cycles spent forming the address, added to the opcode's own cost.
    pub const fn cycles(self) -> u8 {
        match self {
            AddressingMode::Implied
            | AddressingMode::Accumulator
            | AddressingMode::Immediate
            | AddressingMode::Relative => 0,
            AddressingMode::ZeroPage => 1,
            AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY => 2,
            AddressingMode::PostIndexedIndirect => 3,
            AddressingMode::Indirect | AddressingMode::PreIndexedIndirect => 4,
        }
    }

    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::PreIndexedIndirect
            | AddressingMode::PostIndexedIndirect => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// A resolved operand, handed to the instruction handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    Address(u16),
    Relative(i8),
}

impl CPU<'_> {
    /// Resolve the operand for `mode`, advancing PC past it. The flag is true when an
    /// indexed address left the page of its base.
    pub(super) fn resolve(&mut self, mode: AddressingMode) -> (Operand, bool) {
        let operand = match mode {
            AddressingMode::Implied => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(self.fetch_byte()),
            AddressingMode::Relative => Operand::Relative(self.fetch_byte() as i8),
            AddressingMode::ZeroPage => Operand::Address(self.zero_page()),
            AddressingMode::ZeroPageX => Operand::Address(self.zero_page_x()),
            AddressingMode::ZeroPageY => Operand::Address(self.zero_page_y()),
            AddressingMode::Absolute => Operand::Address(self.absolute()),
            AddressingMode::Indirect => Operand::Address(self.indirect()),
            AddressingMode::PreIndexedIndirect => Operand::Address(self.pre_indexed_indirect()),
            AddressingMode::AbsoluteX => {
                let (addr, crossed) = self.absolute_x();
                return (Operand::Address(addr), crossed);
            }
            AddressingMode::AbsoluteY => {
                let (addr, crossed) = self.absolute_y();
                return (Operand::Address(addr), crossed);
            }
            AddressingMode::PostIndexedIndirect => {
                let (addr, crossed) = self.post_indexed_indirect();
                return (Operand::Address(addr), crossed);
            }
        };
        (operand, false)
    }

    pub(super) fn zero_page(&mut self) -> u16 {
        self.fetch_byte() as u16
    }

    pub(super) fn zero_page_x(&mut self) -> u16 {
        self.fetch_byte().wrapping_add(self.x.get()) as u16
    }

    pub(super) fn zero_page_y(&mut self) -> u16 {
        self.fetch_byte().wrapping_add(self.y.get()) as u16
    }

    /// ($nn,X): the pointer and its high byte both wrap inside page zero.
    pub(super) fn pre_indexed_indirect(&mut self) -> u16 {
        let ptr = self.fetch_byte().wrapping_add(self.x.get());
        self.read_zero_page_word(ptr)
    }

    /// ($nn),Y: Y is added to the full 16-bit pointer.
    pub(super) fn post_indexed_indirect(&mut self) -> (u16, bool) {
        let ptr = self.fetch_byte();
        let base = self.read_zero_page_word(ptr);
        let addr = base.wrapping_add(self.y.get() as u16);
        (addr, bits::page(base) != bits::page(addr))
    }

    pub(super) fn absolute(&mut self) -> u16 {
        self.fetch_word()
    }

    pub(super) fn absolute_x(&mut self) -> (u16, bool) {
        let base = self.fetch_word();
        let addr = base.wrapping_add(self.x.get() as u16);
        (addr, bits::page(base) != bits::page(addr))
    }

    pub(super) fn absolute_y(&mut self) -> (u16, bool) {
        let base = self.fetch_word();
        let addr = base.wrapping_add(self.y.get() as u16);
        (addr, bits::page(base) != bits::page(addr))
    }

    /// JMP ($nnnn). A pointer at $xxFF takes its high byte from $xx00 (page-boundary bug).
    pub(super) fn indirect(&mut self) -> u16 {
        let ptr = self.fetch_word();
        let lo = self.bus.read(ptr);
        let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
        let hi = self.bus.read(hi_addr);
        bits::combine_bytes(lo, hi)
    }

    fn read_zero_page_word(&mut self, ptr: u8) -> u16 {
        let lo = self.bus.read(ptr as u16);
        let hi = self.bus.read(ptr.wrapping_add(1) as u16);
        bits::combine_bytes(lo, hi)
    }
}
