//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mapper, etc.), an optional
//! 512-byte trainer, then PRG ROM, then CHR ROM. The image is parsed once and never changes; the
//! CPU only ever sees it through [`Cartridge::read`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::bits;
use crate::cartridge::mapper::mapper::Mapper;
use crate::cartridge::mapper::mapper0::{Mapper0, PRG_BANK_SIZE};
use crate::cartridge::mapper::{Mirroring, mapper_name};

pub const HEADER_SIZE: usize = 16;
pub const TRAINER_SIZE: usize = 512;
pub const CHR_BANK_SIZE: usize = 8 * 1024;
pub const PRG_RAM_BANK_SIZE: usize = 8 * 1024;

const MAGIC: &[u8; 4] = b"NES\x1A";

// Header byte offsets
const PRG_ROM_BANKS: usize = 4;
const CHR_ROM_BANKS: usize = 5;
const FLAGS_6: usize = 6;
const FLAGS_7: usize = 7;
const PRG_RAM_BANKS: usize = 8;
const FLAGS_9: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TvSystem {
    Ntsc,
    Pal,
}

/// Decoded iNES header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub prg_rom_banks: u8,
    pub chr_rom_banks: u8,
    /// 0 in the file means one bank for compatibility.
    pub prg_ram_banks: u8,
    pub mirroring: Mirroring,
    pub battery_backed: bool,
    pub trainer_present: bool,
    pub ignore_mirroring: bool,
    pub vs_unisystem: bool,
    pub playchoice_10: bool,
    pub mapper_number: u8,
    pub tv_system: TvSystem,
}

impl Header {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            bail!("image is {} bytes, shorter than the iNES header", data.len());
        }
        if &data[..4] != MAGIC {
            warn!("missing iNES magic, parsing header anyway");
        }

        let flags6 = data[FLAGS_6];
        let flags7 = data[FLAGS_7];

        Ok(Self {
            prg_rom_banks: data[PRG_ROM_BANKS],
            chr_rom_banks: data[CHR_ROM_BANKS],
            prg_ram_banks: data[PRG_RAM_BANKS].max(1),
            mirroring: if bits::check_bit(flags6, 0) {
                Mirroring::Vertical
            } else {
                Mirroring::Horizontal
            },
            battery_backed: bits::check_bit(flags6, 1),
            trainer_present: bits::check_bit(flags6, 2),
            ignore_mirroring: bits::check_bit(flags6, 3),
            vs_unisystem: bits::check_bit(flags7, 0),
            playchoice_10: bits::check_bit(flags7, 1),
            mapper_number: bits::combine_nibbles(flags7 >> 4, flags6 >> 4),
            tv_system: if bits::check_bit(data[FLAGS_9], 0) {
                TvSystem::Pal
            } else {
                TvSystem::Ntsc
            },
        })
    }

    pub fn prg_rom_size(&self) -> usize {
        self.prg_rom_banks as usize * PRG_BANK_SIZE
    }

    pub fn chr_rom_size(&self) -> usize {
        self.chr_rom_banks as usize * CHR_BANK_SIZE
    }

    pub fn prg_ram_size(&self) -> usize {
        self.prg_ram_banks as usize * PRG_RAM_BANK_SIZE
    }
}

/// Cartridge: the parsed header, CHR ROM and the mapper serving CPU reads.
pub struct Cartridge {
    pub header: Header,
    chr_rom: Vec<u8>,
    mapper: Box<dyn Mapper>,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("header", &self.header)
            .field("chr_rom", &format_args!("{} bytes", self.chr_rom.len()))
            .finish_non_exhaustive()
    }
}

impl Cartridge {
    /// Load and parse an iNES file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("unable to open {}", path.display()))?;
        info!("read {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(&data).with_context(|| format!("invalid ROM image {}", path.display()))
    }

    /// Parse an in-memory iNES image.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let header = Header::parse(data)?;

        if header.prg_rom_banks == 0 {
            bail!("header declares no PRG ROM");
        }
        if header.mapper_number != 0 {
            bail!(
                "unsupported mapper {} ({})",
                header.mapper_number,
                mapper_name(header.mapper_number)
            );
        }

        let prg_start = HEADER_SIZE + if header.trainer_present { TRAINER_SIZE } else { 0 };
        let prg_end = prg_start + header.prg_rom_size();
        let chr_end = prg_end + header.chr_rom_size();

        if data.len() < prg_end {
            bail!(
                "PRG ROM truncated: need {} bytes, image has {}",
                prg_end,
                data.len()
            );
        }
        if data.len() < chr_end {
            bail!(
                "CHR ROM truncated: need {} bytes, image has {}",
                chr_end,
                data.len()
            );
        }

        let prg_rom = data[prg_start..prg_end].to_vec();
        let chr_rom = data[prg_end..chr_end].to_vec();
        let mapper: Box<dyn Mapper> = Box::new(Mapper0::new(prg_rom, header.mirroring));

        info!(
            "PRG ROM {}KB, CHR ROM {}KB, PRG RAM {}KB, mapper {} ({}), {:?}, {:?}",
            header.prg_rom_size() / 1024,
            header.chr_rom_size() / 1024,
            header.prg_ram_size() / 1024,
            header.mapper_number,
            mapper_name(header.mapper_number),
            header.mirroring,
            header.tv_system,
        );

        Ok(Self {
            header,
            chr_rom,
            mapper,
        })
    }

    /// CPU read in $4020–$FFFF. Mapper dispatches.
    pub fn read(&self, addr: u16) -> u8 {
        self.mapper.read(addr)
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring()
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal NROM image: `prg` is placed at the start of the first bank and the
    /// reset vector points at `reset`.
    pub(crate) fn nrom_image(prg_banks: u8, prg: &[u8], reset: u16) -> Vec<u8> {
        let mut image = vec![0u8; HEADER_SIZE + prg_banks as usize * PRG_BANK_SIZE];
        image[..4].copy_from_slice(MAGIC);
        image[PRG_ROM_BANKS] = prg_banks;
        image[HEADER_SIZE..HEADER_SIZE + prg.len()].copy_from_slice(prg);
        let vector = image.len() - 4;
        image[vector] = reset as u8;
        image[vector + 1] = (reset >> 8) as u8;
        image
    }

    #[test]
    fn parses_header_flags() {
        let mut image = nrom_image(1, &[], 0xC000);
        image[CHR_ROM_BANKS] = 0;
        image[FLAGS_6] = 0b0000_1011; // vertical, battery, ignore mirroring
        image[FLAGS_7] = 0b0000_0011; // VS, PlayChoice
        image[PRG_RAM_BANKS] = 0;
        image[FLAGS_9] = 1;

        let header = Header::parse(&image).unwrap();
        assert_eq!(header.prg_rom_banks, 1);
        assert_eq!(header.prg_ram_banks, 1);
        assert_eq!(header.prg_ram_size(), 8 * 1024);
        assert_eq!(header.mirroring, Mirroring::Vertical);
        assert!(header.battery_backed);
        assert!(!header.trainer_present);
        assert!(header.ignore_mirroring);
        assert!(header.vs_unisystem);
        assert!(header.playchoice_10);
        assert_eq!(header.mapper_number, 0);
        assert_eq!(header.tv_system, TvSystem::Pal);
    }

    #[test]
    fn mapper_number_spans_flags_6_and_7() {
        let mut image = nrom_image(1, &[], 0xC000);
        image[FLAGS_6] = 0x10;
        image[FLAGS_7] = 0x40;
        assert_eq!(Header::parse(&image).unwrap().mapper_number, 0x41);
    }

    #[test]
    fn rejects_other_mappers() {
        let mut image = nrom_image(1, &[], 0xC000);
        image[FLAGS_6] = 0x10;
        let err = Cartridge::from_bytes(&image).err().unwrap();
        assert!(err.to_string().contains("unsupported mapper 1 (MMC1)"));
    }

    #[test]
    fn rejects_short_images() {
        assert!(Cartridge::from_bytes(&[0x4E, 0x45, 0x53]).is_err());

        let mut image = nrom_image(1, &[], 0xC000);
        image[PRG_ROM_BANKS] = 2;
        let err = Cartridge::from_bytes(&image).err().unwrap();
        assert!(err.to_string().contains("PRG ROM truncated"));
    }

    #[test]
    fn rejects_missing_prg() {
        let mut image = nrom_image(1, &[], 0xC000);
        image[PRG_ROM_BANKS] = 0;
        assert!(Cartridge::from_bytes(&image).is_err());
    }

    #[test]
    fn prg_reads_skip_the_header() {
        let cart = Cartridge::from_bytes(&nrom_image(1, &[0xA9, 0x05], 0xC000)).unwrap();
        assert_eq!(cart.read(0x8000), 0xA9);
        assert_eq!(cart.read(0xC001), 0x05);
        assert_eq!(cart.read(0xFFFC), 0x00);
        assert_eq!(cart.read(0xFFFD), 0xC0);
    }

    #[test]
    fn trainer_is_skipped() {
        let mut image = nrom_image(1, &[], 0xC000);
        image[FLAGS_6] = 0b0000_0100;
        let mut trainer = vec![0xEE; TRAINER_SIZE];
        trainer[0] = 0x11;
        image.splice(HEADER_SIZE..HEADER_SIZE, trainer);
        image[HEADER_SIZE + TRAINER_SIZE] = 0x42;

        let cart = Cartridge::from_bytes(&image).unwrap();
        assert!(cart.header.trainer_present);
        assert_eq!(cart.read(0x8000), 0x42);
    }

    #[test]
    fn chr_rom_follows_prg() {
        let mut image = nrom_image(1, &[], 0xC000);
        image[CHR_ROM_BANKS] = 1;
        image.extend(std::iter::repeat_n(0x77, CHR_BANK_SIZE));
        let cart = Cartridge::from_bytes(&image).unwrap();
        assert_eq!(cart.chr_rom().len(), CHR_BANK_SIZE);
        assert!(cart.chr_rom().iter().all(|&b| b == 0x77));
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
    }

    #[test]
    fn debug_shows_header_not_rom_bytes() {
        let cart = Cartridge::from_bytes(&nrom_image(1, &[], 0xC000)).unwrap();
        let text = format!("{:?}", cart);
        assert!(text.starts_with("Cartridge { header: Header {"), "{text}");
        assert!(text.contains("chr_rom: 0 bytes"), "{text}");
    }

    #[test]
    fn load_names_the_missing_file() {
        let err = Cartridge::load("/nonexistent/rom.nes").err().unwrap();
        assert!(format!("{err:#}").contains("/nonexistent/rom.nes"));
    }
}
