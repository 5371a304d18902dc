//! Crossbin - cross-compiling build helper for Go modules
//!
//! This library drives the Go toolchain to build a module for the host, a
//! single target, or a whole platform/architecture matrix, and lays the
//! resulting binaries out under one of several naming schemes.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Module layout, naming and build orchestration
//! - [`infra`] - Infrastructure layer (network, filesystem, processes)
//! - [`config`] - Project configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
