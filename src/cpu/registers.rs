//! CPU registers: plain 8/16-bit counters and the status register.
//!
//! All arithmetic wraps at the register width, matching the hardware.

use crate::bits;
use crate::cpu::flags::{BREAK, CARRY, DECIMAL, INTERRUPT_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO};

/// 8-bit register (A, X, Y, SP).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteRegister(u8);

impl ByteRegister {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, value: u8) {
        self.0 = value;
    }

    #[inline]
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    #[inline]
    pub fn decrement(&mut self) {
        self.0 = self.0.wrapping_sub(1);
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// 16-bit register (PC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordRegister(u16);

impl WordRegister {
    pub fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(&self) -> u16 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    #[inline]
    pub fn decrement(&mut self) {
        self.0 = self.0.wrapping_sub(1);
    }
}

/// Processor status (P). Each setter rewrites only its own bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusRegister(u8);

macro_rules! flag_accessors {
    ($($get:ident, $set:ident => $bit:expr;)*) => {
        $(
            #[inline]
            pub fn $get(&self) -> bool {
                bits::check_bit(self.0, $bit)
            }

            #[inline]
            pub fn $set(&mut self, on: bool) {
                self.0 = bits::set_bit_to(self.0, $bit, on);
            }
        )*
    };
}

impl StatusRegister {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, value: u8) {
        self.0 = value;
    }

    flag_accessors! {
        carry, set_carry => CARRY;
        zero, set_zero => ZERO;
        interrupt_disable, set_interrupt_disable => INTERRUPT_DISABLE;
        decimal, set_decimal => DECIMAL;
        break_command, set_break_command => BREAK;
        overflow, set_overflow => OVERFLOW;
        negative, set_negative => NEGATIVE;
    }

    /// Bit 5 has no flag behind it; exposed so PLP/RTI can preserve or force it.
    #[inline]
    pub fn unused(&self) -> bool {
        bits::check_bit(self.0, UNUSED)
    }

    #[inline]
    pub fn set_unused(&mut self, on: bool) {
        self.0 = bits::set_bit_to(self.0, UNUSED, on);
    }

    /// Zero and Negative from a result byte.
    #[inline]
    pub fn set_nz(&mut self, value: u8) {
        self.set_zero(value == 0);
        self.set_negative(value & 0x80 != 0);
    }

    /// `NV-BDIZC` with set flags upper-case, for the trace.
    pub fn describe(&self) -> String {
        const NAMES: [char; 8] = ['C', 'Z', 'I', 'D', 'B', '-', 'V', 'N'];
        (0..8u8)
            .rev()
            .map(|bit| {
                let name = NAMES[bit as usize];
                if bit == UNUSED {
                    '-'
                } else if bits::check_bit(self.0, bit) {
                    name
                } else {
                    name.to_ascii_lowercase()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_register_wraps() {
        let mut r = ByteRegister::new(0xFF);
        r.increment();
        assert_eq!(r.get(), 0x00);
        r.decrement();
        assert_eq!(r.get(), 0xFF);
        r.reset();
        assert_eq!(r.get(), 0);
    }

    #[test]
    fn word_register_wraps() {
        let mut pc = WordRegister::new(0xFFFF);
        pc.increment();
        assert_eq!(pc.get(), 0x0000);
        pc.decrement();
        assert_eq!(pc.get(), 0xFFFF);
    }

    #[test]
    fn flag_setters_touch_one_bit() {
        let mut p = StatusRegister::new(0x24);
        p.set_carry(true);
        assert_eq!(p.get(), 0x25);
        p.set_negative(true);
        assert_eq!(p.get(), 0xA5);
        p.set_interrupt_disable(false);
        assert_eq!(p.get(), 0xA1);
        assert!(p.unused());
        assert!(p.carry() && p.negative());
        assert!(!p.zero() && !p.overflow() && !p.decimal() && !p.break_command());
    }

    #[test]
    fn every_flag_maps_to_its_bit() {
        let mut p = StatusRegister::default();
        p.set_carry(true);
        p.set_zero(true);
        p.set_interrupt_disable(true);
        p.set_decimal(true);
        p.set_break_command(true);
        p.set_unused(true);
        p.set_overflow(true);
        p.set_negative(true);
        assert_eq!(p.get(), 0xFF);
    }

    #[test]
    fn describe_marks_set_flags() {
        assert_eq!(StatusRegister::new(0x24).describe(), "nv-bdIzc");
        assert_eq!(StatusRegister::new(0xC3).describe(), "NV-bdiZC");
    }
}
