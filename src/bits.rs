//! Bit helpers shared by the registers, the status flags and the iNES header parser.

/// True when `bit` (0 = LSB) of `value` is set.
#[inline]
pub fn check_bit(value: u8, bit: u8) -> bool {
    (value >> bit) & 1 != 0
}

#[inline]
pub fn set_bit(value: u8, bit: u8) -> u8 {
    value | (1 << bit)
}

#[inline]
pub fn clear_bit(value: u8, bit: u8) -> u8 {
    value & !(1 << bit)
}

/// Set or clear `bit` depending on `on`; every other bit is left untouched.
#[inline]
pub fn set_bit_to(value: u8, bit: u8, on: bool) -> u8 {
    if on {
        set_bit(value, bit)
    } else {
        clear_bit(value, bit)
    }
}

/// Little-endian word from its two halves.
#[inline]
pub fn combine_bytes(lo: u8, hi: u8) -> u16 {
    ((hi as u16) << 8) | lo as u16
}

/// Byte from two nibbles, e.g. the iNES mapper number split over flags 6 and 7.
#[inline]
pub fn combine_nibbles(upper: u8, lower: u8) -> u8 {
    ((upper & 0x0F) << 4) | (lower & 0x0F)
}

/// High byte of a word; used for page comparisons.
#[inline]
pub fn page(addr: u16) -> u8 {
    (addr >> 8) as u8
}
