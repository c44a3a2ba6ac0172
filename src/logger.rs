//! Terminal logger for the `log` facade.
//!
//! Records go to stderr as `LEVEL target: message`, the level painted the way the CPU
//! used to paint its INFO/ERROR tags. Trace lines from the CPU are printed bare to
//! stdout so a run can be diffed against a nestest log. Fatal errors bypass the level
//! filter.

use std::io::Write;

use ansi_term::{
    ANSIString,
    Colour::{Blue, Green, Red, Yellow},
    Style,
};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::cpu::cpu::TRACE_TARGET;

struct Logger {
    level: LevelFilter,
}

fn paint(level: Level) -> ANSIString<'static> {
    match level {
        Level::Error => Red.bold().paint("ERROR"),
        Level::Warn => Yellow.paint("WARN "),
        Level::Info => Green.paint("INFO "),
        Level::Debug => Blue.paint("DEBUG"),
        Level::Trace => Style::new().dimmed().paint("TRACE"),
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if record.target() == TRACE_TARGET {
            let _ = writeln!(std::io::stdout().lock(), "{}", record.args());
        } else {
            let _ = writeln!(
                std::io::stderr().lock(),
                "{} {}: {}",
                paint(record.level()),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

fn fatal_line(message: &dyn std::fmt::Display) -> String {
    format!("{} {}", paint(Level::Error), message)
}

/// Report an error that ends the run. Written to stderr whatever the configured level.
pub fn fatal(message: impl std::fmt::Display) {
    let _ = writeln!(std::io::stderr().lock(), "{}", fatal_line(&message));
}

/// Install the logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger { level }))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_tags_keep_their_text() {
        assert!(paint(Level::Error).to_string().contains("ERROR"));
        assert!(paint(Level::Trace).to_string().contains("TRACE"));
    }

    #[test]
    fn fatal_lines_carry_the_error_tag() {
        let line = fatal_line(&"unable to open missing.nes");
        assert!(line.contains("ERROR"), "{line}");
        assert!(line.ends_with(" unable to open missing.nes"), "{line}");
    }

    #[test]
    fn filters_by_level() {
        let logger = Logger {
            level: LevelFilter::Info,
        };
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }
}
