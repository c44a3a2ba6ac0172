//! Mapper trait: CPU-side PRG access and mirroring.

use crate::cartridge::mapper::Mirroring;

/// Trait for NES cartridge mappers. The memory map hands every address in
/// $4020–$FFFF to the mapper.
pub trait Mapper {
    /// Read from the cartridge window. Unmapped addresses are logged and read as 0.
    fn read(&self, addr: u16) -> u8;
    /// Nametable mirroring wired on the board.
    fn mirroring(&self) -> Mirroring;
}
