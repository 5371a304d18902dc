//! Configuration and constants
//!
//! - [`defaults`] - Directory names, toolchain defaults and environment keys
//! - [`urls`] - Release download locations
//! - [`project`] - The per-module `crossbin.toml` file

pub mod defaults;
pub mod project;
pub mod urls;
