#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! A collection of testing helpers and utilities for umapper.
//!
//! Use the [`test`] attribute in place of the standard one; it calls
//! [`setup`] and lets the test body use `?`:
//!
//! ```rust,ignore
//! use umapper_testhelpers::test;
//!
//! #[test]
//! fn maps_cleanly() {
//!     let dto: Dto = map(&row)?;
//!     assert_eq!(dto.id, 7);
//! }
//! ```

pub use color_eyre::eyre;
pub use umapper_testhelpers_macros::test;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::{OwoColorize, Style};
use std::io::Write;

struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let level_style = match record.level() {
            Level::Error => Style::new().fg_rgb::<243, 139, 168>(),
            Level::Warn => Style::new().fg_rgb::<249, 226, 175>(),
            Level::Info => Style::new().fg_rgb::<166, 227, 161>(),
            Level::Debug => Style::new().fg_rgb::<137, 180, 250>(),
            Level::Trace => Style::new().fg_rgb::<148, 226, 213>(),
        };

        eprintln!(
            "{} - {}: {}",
            record.level().style(level_style),
            record
                .target()
                .style(Style::new().fg_rgb::<137, 180, 250>()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Installs color-eyre and a simple colored logger. Idempotent, so every
/// test can call it.
pub fn setup() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        #[cfg(not(miri))]
        color_eyre::install().expect("Failed to set up color-eyre");

        let logger = Box::new(SimpleLogger);
        log::set_boxed_logger(logger).expect("Failed to set up logger");
        log::set_max_level(LevelFilter::Trace);
    });
}
