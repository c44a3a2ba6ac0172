//! Memory bus and address decoding for the NES CPU.
//!
//! Maps CPU addresses to RAM, the PPU register window, APU/IO registers and the cartridge.

use log::debug;

use crate::cartridge::cartridge::Cartridge;

/// Trait for memory access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

/// CPU address space: one flat 64KB backing store addressed through its canonical
/// ranges, plus a borrowed cartridge for $4020-$FFFF.
///
/// ```text
/// $0000-$07FF  2KB internal RAM
/// $0800-$1FFF  mirrors of $0000-$07FF
/// $2000-$2007  PPU registers
/// $2008-$3FFF  mirrors of $2000-$2007 (every 8 bytes)
/// $4000-$4017  APU and IO registers
/// $4018-$401F  disabled APU/IO test registers
/// $4020-$FFFF  cartridge
/// ```
pub struct Memory<'c> {
    data: Box<[u8]>,
    cart: &'c Cartridge,
}

impl<'c> Memory<'c> {
    pub fn new(cart: &'c Cartridge) -> Self {
        Self {
            data: vec![0; 0x10000].into_boxed_slice(),
            cart,
        }
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            // Internal RAM and its three mirrors
            0x0000..=0x1FFF => self.data[(addr & 0x07FF) as usize],
            // PPU registers, mirrored every 8 bytes
            0x2000..=0x3FFF => self.data[(0x2000 | (addr & 0x0007)) as usize],
            0x4000..=0x4017 => self.data[addr as usize],
            0x4020..=0xFFFF => self.cart.read(addr),
            _ => {
                debug!("read from undefined address ${:04X}", addr);
                0
            }
        }
    }

    pub fn write_byte(&mut self, byte: u8, addr: u16) {
        match addr {
            0x0000..=0x1FFF => self.data[(addr & 0x07FF) as usize] = byte,
            0x2000..=0x3FFF => self.data[(0x2000 | (addr & 0x0007)) as usize] = byte,
            0x4000..=0x4017 => self.data[addr as usize] = byte,
            // PRG ROM is read-only and NROM has no registers
            0x4020..=0xFFFF => debug!("write ${:02X} to cartridge space ${:04X} ignored", byte, addr),
            _ => debug!("write ${:02X} to undefined address ${:04X} ignored", byte, addr),
        }
    }
}

impl Bus for Memory<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_byte(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.write_byte(data, addr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::cartridge::tests::nrom_image;

    fn cart() -> Cartridge {
        Cartridge::from_bytes(&nrom_image(1, &[0xEA, 0x4C], 0xC000)).unwrap()
    }

    #[test]
    fn ram_is_mirrored_four_times() {
        let cart = cart();
        let mut mem = Memory::new(&cart);
        mem.write_byte(0x5A, 0x0000);
        for addr in [0x0000, 0x0800, 0x1000, 0x1800] {
            assert_eq!(mem.read_byte(addr), 0x5A);
        }

        mem.write_byte(0x33, 0x1FFF);
        assert_eq!(mem.read_byte(0x07FF), 0x33);
    }

    #[test]
    fn ppu_registers_mirror_every_8_bytes() {
        let cart = cart();
        let mut mem = Memory::new(&cart);
        mem.write_byte(0x80, 0x2000);
        for addr in (0x2008..=0x3FF8).step_by(8) {
            assert_eq!(mem.read_byte(addr), 0x80, "${addr:04X}");
        }

        mem.write_byte(0x1E, 0x3FFF);
        assert_eq!(mem.read_byte(0x2007), 0x1E);
    }

    #[test]
    fn apu_io_is_flat() {
        let cart = cart();
        let mut mem = Memory::new(&cart);
        mem.write_byte(0x0F, 0x4015);
        mem.write_byte(0x40, 0x4017);
        assert_eq!(mem.read_byte(0x4015), 0x0F);
        assert_eq!(mem.read_byte(0x4017), 0x40);
        assert_eq!(mem.read_byte(0x4016), 0x00);
    }

    #[test]
    fn undefined_range_reads_zero_and_drops_writes() {
        let cart = cart();
        let mut mem = Memory::new(&cart);
        mem.write_byte(0xFF, 0x4018);
        mem.write_byte(0xFF, 0x401F);
        assert_eq!(mem.read_byte(0x4018), 0);
        assert_eq!(mem.read_byte(0x401F), 0);
    }

    #[test]
    fn cartridge_window_delegates_reads() {
        let cart = cart();
        let mut mem = Memory::new(&cart);
        assert_eq!(mem.read_byte(0x8000), 0xEA);
        assert_eq!(mem.read_byte(0xC001), 0x4C);
        assert_eq!(mem.read_byte(0xFFFD), 0xC0);
        assert_eq!(mem.read_byte(0x6000), 0);

        mem.write_byte(0x00, 0x8000);
        assert_eq!(mem.read_byte(0x8000), 0xEA);
    }

    #[test]
    fn bus_trait_matches_inherent_access() {
        let cart = cart();
        let mut mem = Memory::new(&cart);
        {
            let bus: &mut dyn Bus = &mut mem;
            bus.write(0x0801, 0x99);
            assert_eq!(bus.read(0x0001), 0x99);
        }
        assert_eq!(mem.read_byte(0x1801), 0x99);
    }
}
