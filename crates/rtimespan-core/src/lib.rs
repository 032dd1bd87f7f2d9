//! Ambient support for the `rtimespan` crate: errors, settings and logging.

pub mod config;
pub mod error;
pub mod logging;
