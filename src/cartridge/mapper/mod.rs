//! NES mappers for PRG memory mapping.
//!
//! Only Mapper0 (NROM) is implemented; the header still reports any mapper number.

/// Nametable mirroring selected by the iNES header (flags 6 bit 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

pub mod mapper;

pub mod mapper0;

/// Board name for a mapper number, for the load banner and error messages.
pub fn mapper_name(mapper_id: u8) -> &'static str {
    match mapper_id {
        0 => "NROM",
        1 => "MMC1",
        2 => "UxROM",
        3 => "CNROM",
        4 => "MMC3",
        5 => "MMC5",
        7 => "AxROM",
        9 => "MMC2",
        10 => "MMC4",
        66 => "GxROM",
        71 => "Camerica",
        _ => "unknown",
    }
}
