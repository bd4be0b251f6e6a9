//! Core of the Smite launcher: builds legendary command lines, runs
//! the tool, and decodes its JSON into typed records behind the
//! [`Library`] and [`User`] facades. Everything here is blocking;
//! callers pick the threads and marshal the plain values back.

pub mod config;
pub mod error;
pub mod legendary;
pub mod logging;
pub mod settings;

pub use error::Error;
pub use legendary::{GameRecord, Library, User, UserAccount};
pub use settings::Settings;
