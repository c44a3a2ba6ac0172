//! nestest-style trace lines and a one-instruction disassembler.

use crate::{
    bits,
    cpu::{addressing::AddressingMode, cpu::CPU, opcodes::OPCODES},
};

const PPU_DOTS_PER_SCANLINE: u64 = 341;
const PPU_SCANLINES: u64 = 262;

/// Format the instruction starting at `bytes[0]`, located at `pc`. Missing operand
/// bytes read as zero.
pub fn disassemble(pc: u16, bytes: &[u8]) -> String {
    let Some(&opcode) = bytes.first() else {
        return String::new();
    };
    let Some(entry) = OPCODES[opcode as usize] else {
        return format!(".db ${:02X}", opcode);
    };

    let lo = bytes.get(1).copied().unwrap_or(0);
    let hi = bytes.get(2).copied().unwrap_or(0);
    let word = bits::combine_bytes(lo, hi);

    let operand = match entry.mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${:02X}", lo),
        AddressingMode::ZeroPage => format!("${:02X}", lo),
        AddressingMode::ZeroPageX => format!("${:02X},X", lo),
        AddressingMode::ZeroPageY => format!("${:02X},Y", lo),
        AddressingMode::Relative => {
            let target = pc.wrapping_add(2).wrapping_add(lo as i8 as u16);
            format!("${:04X}", target)
        }
        AddressingMode::Absolute => format!("${:04X}", word),
        AddressingMode::AbsoluteX => format!("${:04X},X", word),
        AddressingMode::AbsoluteY => format!("${:04X},Y", word),
        AddressingMode::Indirect => format!("(${:04X})", word),
        AddressingMode::PreIndexedIndirect => format!("(${:02X},X)", lo),
        AddressingMode::PostIndexedIndirect => format!("(${:02X}),Y", lo),
    };

    if operand.is_empty() {
        entry.mnemonic.to_string()
    } else {
        format!("{} {}", entry.mnemonic, operand)
    }
}

impl CPU<'_> {
    /// The instruction at PC and the register state before it runs.
    ///
    /// `C000  4C F5 C5  JMP $C5F5    A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7`
    pub fn trace_line(&mut self) -> String {
        let pc = self.pc.get();
        let opcode = self.bus.read(pc);
        let size = OPCODES[opcode as usize].map_or(1, |entry| entry.size());

        let bytes: Vec<u8> = (0..size)
            .map(|offset| self.bus.read(pc.wrapping_add(offset)))
            .collect();
        let hex = bytes
            .iter()
            .map(|byte| format!("{:02X}", byte))
            .collect::<Vec<_>>()
            .join(" ");

        let ppu_cycles = self.cycles * 3;
        let scanline = (ppu_cycles / PPU_DOTS_PER_SCANLINE) % PPU_SCANLINES;
        let dot = ppu_cycles % PPU_DOTS_PER_SCANLINE;

        format!(
            "{:04X}  {:<8}  {:<30}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} PPU:{:>3},{:>3} CYC:{}",
            pc,
            hex,
            disassemble(pc, &bytes),
            self.a.get(),
            self.x.get(),
            self.y.get(),
            self.status.get(),
            self.sp.get(),
            scanline,
            dot,
            self.cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_every_addressing_mode() {
        assert_eq!(disassemble(0xC000, &[0xEA]), "NOP");
        assert_eq!(disassemble(0xC000, &[0x0A]), "ASL A");
        assert_eq!(disassemble(0xC000, &[0xA9, 0x05]), "LDA #$05");
        assert_eq!(disassemble(0xC000, &[0x85, 0x10]), "STA $10");
        assert_eq!(disassemble(0xC000, &[0xB5, 0x10]), "LDA $10,X");
        assert_eq!(disassemble(0xC000, &[0xB6, 0x10]), "LDX $10,Y");
        assert_eq!(disassemble(0xC000, &[0x4C, 0xF5, 0xC5]), "JMP $C5F5");
        assert_eq!(disassemble(0xC000, &[0xBD, 0x00, 0x02]), "LDA $0200,X");
        assert_eq!(disassemble(0xC000, &[0xB9, 0x00, 0x02]), "LDA $0200,Y");
        assert_eq!(disassemble(0xC000, &[0x6C, 0x00, 0x02]), "JMP ($0200)");
        assert_eq!(disassemble(0xC000, &[0xA1, 0x80]), "LDA ($80,X)");
        assert_eq!(disassemble(0xC000, &[0xB1, 0x80]), "LDA ($80),Y");
    }

    #[test]
    fn branch_targets_are_absolute() {
        assert_eq!(disassemble(0xC000, &[0xD0, 0x04]), "BNE $C006");
        assert_eq!(disassemble(0xC010, &[0xF0, 0xFC]), "BEQ $C00E");
    }

    #[test]
    fn unknown_opcodes_are_raw_bytes() {
        assert_eq!(disassemble(0x8000, &[0x02]), ".db $02");
        assert_eq!(disassemble(0x8000, &[]), "");
    }

    #[test]
    fn brk_is_named() {
        assert_eq!(disassemble(0x8000, &[0x00]), "BRK");
    }
}
