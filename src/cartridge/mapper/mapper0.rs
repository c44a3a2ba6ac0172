//! Mapper 0 (NROM): no bank switching, 16/32KB PRG.

use log::error;

use crate::cartridge::mapper::{Mirroring, mapper::Mapper};

pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// NROM mapper: fixed PRG, 16KB images mirrored into $C000-$FFFF.
pub struct Mapper0 {
    prg_rom: Vec<u8>,
    mirroring: Mirroring,
}

impl Mapper0 {
    /// `prg_rom` must hold at least one bank; the cartridge loader guarantees it.
    pub fn new(prg_rom: Vec<u8>, mirroring: Mirroring) -> Self {
        debug_assert!(prg_rom.len() >= PRG_BANK_SIZE);
        Self { prg_rom, mirroring }
    }
}

impl Mapper for Mapper0 {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            // $8000-$BFFF first bank; $C000-$FFFF second bank or mirror of the first
            0x8000..=0xFFFF => {
                let offset = (addr - 0x8000) as usize;
                self.prg_rom[offset % self.prg_rom.len()]
            }
            _ => {
                error!("NROM: no PRG mapped at ${:04X}", addr);
                0
            }
        }
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
