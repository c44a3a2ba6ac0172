//! Run configuration from the command line and environment.
//!
//! ```text
//! nes6502 <rom.nes>
//!
//! NES6502_LOG        error|warn|info|debug|trace|off (default info)
//! NES6502_START_PC   hex PC to start at instead of the reset vector, e.g. C000
//! NES6502_MAX_STEPS  stop after this many instructions
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::LevelFilter;

pub const USAGE: &str = "usage: nes6502 <rom.nes>

environment:
  NES6502_LOG        error|warn|info|debug|trace|off (default info)
  NES6502_START_PC   hex start address, overrides the reset vector
  NES6502_MAX_STEPS  stop after this many instructions";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub rom_path: PathBuf,
    pub log_level: LevelFilter,
    pub start_pc: Option<u16>,
    pub max_steps: Option<u64>,
}

impl Config {
    /// `args` excludes the program name. `env` looks up a variable by name.
    pub fn from_args<I, E>(args: I, env: E) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let (Some(rom), None) = (args.next(), args.next()) else {
            bail!("expected exactly one ROM path");
        };

        let log_level = match env("NES6502_LOG") {
            Some(level) => level
                .parse::<LevelFilter>()
                .ok()
                .with_context(|| format!("NES6502_LOG: unknown level {:?}", level))?,
            None => LevelFilter::Info,
        };

        let start_pc = env("NES6502_START_PC")
            .map(|pc| {
                let digits = pc.trim_start_matches('$').trim_start_matches("0x");
                u16::from_str_radix(digits, 16)
                    .with_context(|| format!("NES6502_START_PC: not a hex address: {:?}", pc))
            })
            .transpose()?;

        let max_steps = env("NES6502_MAX_STEPS")
            .map(|steps| {
                steps
                    .parse::<u64>()
                    .with_context(|| format!("NES6502_MAX_STEPS: not a count: {:?}", steps))
            })
            .transpose()?;

        Ok(Self {
            rom_path: PathBuf::from(rom),
            log_level,
            start_pc,
            max_steps,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_args(std::env::args().skip(1), |name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(args: &[&str], vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_args(args.iter().map(|a| a.to_string()), |name| {
            vars.get(name).cloned()
        })
    }

    #[test]
    fn defaults() {
        let config = parse(&["game.nes"], &[]).unwrap();
        assert_eq!(config.rom_path, PathBuf::from("game.nes"));
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.start_pc, None);
        assert_eq!(config.max_steps, None);
    }

    #[test]
    fn reads_environment() {
        let config = parse(
            &["nestest.nes"],
            &[
                ("NES6502_LOG", "trace"),
                ("NES6502_START_PC", "C000"),
                ("NES6502_MAX_STEPS", "8991"),
            ],
        )
        .unwrap();
        assert_eq!(config.log_level, LevelFilter::Trace);
        assert_eq!(config.start_pc, Some(0xC000));
        assert_eq!(config.max_steps, Some(8991));

        let config = parse(&["a.nes"], &[("NES6502_START_PC", "$8000")]).unwrap();
        assert_eq!(config.start_pc, Some(0x8000));
    }

    #[test]
    fn wrong_argument_count() {
        assert!(parse(&[], &[]).is_err());
        assert!(parse(&["a.nes", "b.nes"], &[]).is_err());
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(parse(&["a.nes"], &[("NES6502_LOG", "loud")]).is_err());
        assert!(parse(&["a.nes"], &[("NES6502_START_PC", "C0000")]).is_err());
        assert!(parse(&["a.nes"], &[("NES6502_MAX_STEPS", "-1")]).is_err());
    }
}
