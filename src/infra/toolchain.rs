//! Toolchain management
//!
//! Wraps the compiler driver that builds, generates and installs for a module.

use crate::config::defaults;

/// Compiler toolchain wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Program name or path of the toolchain driver
    command: String,
}

impl Toolchain {
    /// Create a new toolchain wrapper
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Get the toolchain program
    pub fn command(&self) -> &str {
        &self.command
    }

    /// `<toolchain> <subcommand>` as the start of a command line
    pub fn subcommand(&self, subcommand: &str) -> Vec<String> {
        vec![self.command.clone(), subcommand.to_string()]
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::new(defaults::TOOLCHAIN_COMMAND)
    }
}
