//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: Parses iNES (.nes) images, holds the header, CHR and the mapper.
//! - **mapper**: NROM (0) PRG mapping and nametable mirroring.

pub mod cartridge;
pub mod mapper;
