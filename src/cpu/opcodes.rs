//! The 256-entry opcode table.
//!
//! Every official NMOS 6502 opcode has an entry binding its mnemonic, addressing mode,
//! own cycle cost and handler. The cycles an instruction takes are
//! `cycles + mode.cycles()`, plus one when `page_penalty` is set and the indexed
//! address crossed a page. Branches add their taken/page penalties themselves.
//! Unofficial opcodes have no entry.

use crate::cpu::{
    addressing::{
        AddressingMode::{self, *},
        Operand,
    },
    cpu::CPU,
    instructions::*,
};

pub type Handler = fn(&mut CPU<'_>, Operand);

#[derive(Clone, Copy)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    /// Cycles on top of what the addressing mode costs.
    pub cycles: u8,
    /// +1 cycle when the indexed address leaves the base page (read instructions).
    pub page_penalty: bool,
    /// `None` for opcodes that are decoded but not executed (BRK).
    pub handler: Option<Handler>,
}

impl Opcode {
    /// Cycles before any page or branch penalty.
    pub const fn base_cycles(&self) -> u8 {
        self.cycles + self.mode.cycles()
    }

    /// Instruction length including the opcode byte.
    pub const fn size(&self) -> u16 {
        1 + self.mode.operand_len()
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Opcode")
            .field("mnemonic", &self.mnemonic)
            .field("mode", &self.mode)
            .field("cycles", &self.cycles)
            .field("page_penalty", &self.page_penalty)
            .field("implemented", &self.handler.is_some())
            .finish()
    }
}

const fn op(mnemonic: &'static str, mode: AddressingMode, cycles: u8, handler: Handler) -> Option<Opcode> {
    Some(Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty: false,
        handler: Some(handler),
    })
}

/// Read instruction that pays for a page crossing.
const fn op_p(mnemonic: &'static str, mode: AddressingMode, cycles: u8, handler: Handler) -> Option<Opcode> {
    Some(Opcode {
        mnemonic,
        mode,
        cycles,
        page_penalty: true,
        handler: Some(handler),
    })
}

pub static OPCODES: [Option<Opcode>; 256] = build();

const fn build() -> [Option<Opcode>; 256] {
    let mut t: [Option<Opcode>; 256] = [None; 256];

    // Load / store
    t[0xA9] = op("LDA", Immediate, 2, lda);
    t[0xA5] = op("LDA", ZeroPage, 2, lda);
    t[0xB5] = op("LDA", ZeroPageX, 2, lda);
    t[0xAD] = op("LDA", Absolute, 2, lda);
    t[0xBD] = op_p("LDA", AbsoluteX, 2, lda);
    t[0xB9] = op_p("LDA", AbsoluteY, 2, lda);
    t[0xA1] = op("LDA", PreIndexedIndirect, 2, lda);
    t[0xB1] = op_p("LDA", PostIndexedIndirect, 2, lda);

    t[0xA2] = op("LDX", Immediate, 2, ldx);
    t[0xA6] = op("LDX", ZeroPage, 2, ldx);
    t[0xB6] = op("LDX", ZeroPageY, 2, ldx);
    t[0xAE] = op("LDX", Absolute, 2, ldx);
    t[0xBE] = op_p("LDX", AbsoluteY, 2, ldx);

    t[0xA0] = op("LDY", Immediate, 2, ldy);
    t[0xA4] = op("LDY", ZeroPage, 2, ldy);
    t[0xB4] = op("LDY", ZeroPageX, 2, ldy);
    t[0xAC] = op("LDY", Absolute, 2, ldy);
    t[0xBC] = op_p("LDY", AbsoluteX, 2, ldy);

    t[0x85] = op("STA", ZeroPage, 2, sta);
    t[0x95] = op("STA", ZeroPageX, 2, sta);
    t[0x8D] = op("STA", Absolute, 2, sta);
    t[0x9D] = op("STA", AbsoluteX, 3, sta);
    t[0x99] = op("STA", AbsoluteY, 3, sta);
    t[0x81] = op("STA", PreIndexedIndirect, 2, sta);
    t[0x91] = op("STA", PostIndexedIndirect, 3, sta);

    t[0x86] = op("STX", ZeroPage, 2, stx);
    t[0x96] = op("STX", ZeroPageY, 2, stx);
    t[0x8E] = op("STX", Absolute, 2, stx);

    t[0x84] = op("STY", ZeroPage, 2, sty);
    t[0x94] = op("STY", ZeroPageX, 2, sty);
    t[0x8C] = op("STY", Absolute, 2, sty);

    // Transfers
    t[0xAA] = op("TAX", Implied, 2, tax);
    t[0xA8] = op("TAY", Implied, 2, tay);
    t[0x8A] = op("TXA", Implied, 2, txa);
    t[0x98] = op("TYA", Implied, 2, tya);
    t[0xBA] = op("TSX", Implied, 2, tsx);
    t[0x9A] = op("TXS", Implied, 2, txs);

    // Stack
    t[0x48] = op("PHA", Implied, 3, pha);
    t[0x08] = op("PHP", Implied, 3, php);
    t[0x68] = op("PLA", Implied, 4, pla);
    t[0x28] = op("PLP", Implied, 4, plp);

    // Logical
    t[0x29] = op("AND", Immediate, 2, and);
    t[0x25] = op("AND", ZeroPage, 2, and);
    t[0x35] = op("AND", ZeroPageX, 2, and);
    t[0x2D] = op("AND", Absolute, 2, and);
    t[0x3D] = op_p("AND", AbsoluteX, 2, and);
    t[0x39] = op_p("AND", AbsoluteY, 2, and);
    t[0x21] = op("AND", PreIndexedIndirect, 2, and);
    t[0x31] = op_p("AND", PostIndexedIndirect, 2, and);

    t[0x09] = op("ORA", Immediate, 2, ora);
    t[0x05] = op("ORA", ZeroPage, 2, ora);
    t[0x15] = op("ORA", ZeroPageX, 2, ora);
    t[0x0D] = op("ORA", Absolute, 2, ora);
    t[0x1D] = op_p("ORA", AbsoluteX, 2, ora);
    t[0x19] = op_p("ORA", AbsoluteY, 2, ora);
    t[0x01] = op("ORA", PreIndexedIndirect, 2, ora);
    t[0x11] = op_p("ORA", PostIndexedIndirect, 2, ora);

    t[0x49] = op("EOR", Immediate, 2, eor);
    t[0x45] = op("EOR", ZeroPage, 2, eor);
    t[0x55] = op("EOR", ZeroPageX, 2, eor);
    t[0x4D] = op("EOR", Absolute, 2, eor);
    t[0x5D] = op_p("EOR", AbsoluteX, 2, eor);
    t[0x59] = op_p("EOR", AbsoluteY, 2, eor);
    t[0x41] = op("EOR", PreIndexedIndirect, 2, eor);
    t[0x51] = op_p("EOR", PostIndexedIndirect, 2, eor);

    t[0x24] = op("BIT", ZeroPage, 2, bit);
    t[0x2C] = op("BIT", Absolute, 2, bit);

    // Arithmetic
    t[0x69] = op("ADC", Immediate, 2, adc);
    t[0x65] = op("ADC", ZeroPage, 2, adc);
    t[0x75] = op("ADC", ZeroPageX, 2, adc);
    t[0x6D] = op("ADC", Absolute, 2, adc);
    t[0x7D] = op_p("ADC", AbsoluteX, 2, adc);
    t[0x79] = op_p("ADC", AbsoluteY, 2, adc);
    t[0x61] = op("ADC", PreIndexedIndirect, 2, adc);
    t[0x71] = op_p("ADC", PostIndexedIndirect, 2, adc);

    t[0xE9] = op("SBC", Immediate, 2, sbc);
    t[0xE5] = op("SBC", ZeroPage, 2, sbc);
    t[0xF5] = op("SBC", ZeroPageX, 2, sbc);
    t[0xED] = op("SBC", Absolute, 2, sbc);
    t[0xFD] = op_p("SBC", AbsoluteX, 2, sbc);
    t[0xF9] = op_p("SBC", AbsoluteY, 2, sbc);
    t[0xE1] = op("SBC", PreIndexedIndirect, 2, sbc);
    t[0xF1] = op_p("SBC", PostIndexedIndirect, 2, sbc);

    t[0xC9] = op("CMP", Immediate, 2, cmp);
    t[0xC5] = op("CMP", ZeroPage, 2, cmp);
    t[0xD5] = op("CMP", ZeroPageX, 2, cmp);
    t[0xCD] = op("CMP", Absolute, 2, cmp);
    t[0xDD] = op_p("CMP", AbsoluteX, 2, cmp);
    t[0xD9] = op_p("CMP", AbsoluteY, 2, cmp);
    t[0xC1] = op("CMP", PreIndexedIndirect, 2, cmp);
    t[0xD1] = op_p("CMP", PostIndexedIndirect, 2, cmp);

    t[0xE0] = op("CPX", Immediate, 2, cpx);
    t[0xE4] = op("CPX", ZeroPage, 2, cpx);
    t[0xEC] = op("CPX", Absolute, 2, cpx);

    t[0xC0] = op("CPY", Immediate, 2, cpy);
    t[0xC4] = op("CPY", ZeroPage, 2, cpy);
    t[0xCC] = op("CPY", Absolute, 2, cpy);

    // Increments / decrements
    t[0xE6] = op("INC", ZeroPage, 4, inc);
    t[0xF6] = op("INC", ZeroPageX, 4, inc);
    t[0xEE] = op("INC", Absolute, 4, inc);
    t[0xFE] = op("INC", AbsoluteX, 5, inc);

    t[0xC6] = op("DEC", ZeroPage, 4, dec);
    t[0xD6] = op("DEC", ZeroPageX, 4, dec);
    t[0xCE] = op("DEC", Absolute, 4, dec);
    t[0xDE] = op("DEC", AbsoluteX, 5, dec);

    t[0xE8] = op("INX", Implied, 2, inx);
    t[0xC8] = op("INY", Implied, 2, iny);
    t[0xCA] = op("DEX", Implied, 2, dex);
    t[0x88] = op("DEY", Implied, 2, dey);

    // Shifts and rotates
    t[0x0A] = op("ASL", Accumulator, 2, asl);
    t[0x06] = op("ASL", ZeroPage, 4, asl);
    t[0x16] = op("ASL", ZeroPageX, 4, asl);
    t[0x0E] = op("ASL", Absolute, 4, asl);
    t[0x1E] = op("ASL", AbsoluteX, 5, asl);

    t[0x4A] = op("LSR", Accumulator, 2, lsr);
    t[0x46] = op("LSR", ZeroPage, 4, lsr);
    t[0x56] = op("LSR", ZeroPageX, 4, lsr);
    t[0x4E] = op("LSR", Absolute, 4, lsr);
    t[0x5E] = op("LSR", AbsoluteX, 5, lsr);

    t[0x2A] = op("ROL", Accumulator, 2, rol);
    t[0x26] = op("ROL", ZeroPage, 4, rol);
    t[0x36] = op("ROL", ZeroPageX, 4, rol);
    t[0x2E] = op("ROL", Absolute, 4, rol);
    t[0x3E] = op("ROL", AbsoluteX, 5, rol);

    t[0x6A] = op("ROR", Accumulator, 2, ror);
    t[0x66] = op("ROR", ZeroPage, 4, ror);
    t[0x76] = op("ROR", ZeroPageX, 4, ror);
    t[0x6E] = op("ROR", Absolute, 4, ror);
    t[0x7E] = op("ROR", AbsoluteX, 5, ror);

    // Jumps and subroutines
    t[0x4C] = op("JMP", Absolute, 1, jmp);
    t[0x6C] = op("JMP", Indirect, 1, jmp);
    t[0x20] = op("JSR", Absolute, 4, jsr);
    t[0x60] = op("RTS", Implied, 6, rts);
    t[0x40] = op("RTI", Implied, 6, rti);
    t[0x00] = Some(Opcode {
        mnemonic: "BRK",
        mode: Implied,
        cycles: 7,
        page_penalty: false,
        handler: None,
    });

    // Branches
    t[0x10] = op("BPL", Relative, 2, bpl);
    t[0x30] = op("BMI", Relative, 2, bmi);
    t[0x50] = op("BVC", Relative, 2, bvc);
    t[0x70] = op("BVS", Relative, 2, bvs);
    t[0x90] = op("BCC", Relative, 2, bcc);
    t[0xB0] = op("BCS", Relative, 2, bcs);
    t[0xD0] = op("BNE", Relative, 2, bne);
    t[0xF0] = op("BEQ", Relative, 2, beq);

    // Flags
    t[0x18] = op("CLC", Implied, 2, clc);
    t[0x38] = op("SEC", Implied, 2, sec);
    t[0x58] = op("CLI", Implied, 2, cli);
    t[0x78] = op("SEI", Implied, 2, sei);
    t[0xD8] = op("CLD", Implied, 2, cld);
    t[0xF8] = op("SED", Implied, 2, sed);
    t[0xB8] = op("CLV", Implied, 2, clv);

    t[0xEA] = op("NOP", Implied, 2, nop);

    t
}
