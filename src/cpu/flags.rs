//! 6502 processor status register (P) bit positions.

pub const CARRY: u8 = 0;
pub const ZERO: u8 = 1;
pub const INTERRUPT_DISABLE: u8 = 2;
pub const DECIMAL: u8 = 3; // 2A03 has no BCD; the flag is storage only
pub const BREAK: u8 = 4; // Only exists in pushed copies of P
pub const UNUSED: u8 = 5; // Always 1 when pushed
pub const OVERFLOW: u8 = 6;
pub const NEGATIVE: u8 = 7;

/// Bits 5 and 4, forced on by PHP and left alone by PLP.
pub const PUSHED_BITS: u8 = (1 << UNUSED) | (1 << BREAK);

/// P after power-up as logged by nestest: I and the unused bit set.
pub const POWER_UP_STATUS: u8 = 0x24;
