//! Core build logic
//!
//! Module layout, naming, and build orchestration. Process execution,
//! filesystem access and network transfers belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`platform`] - Build contexts and host detection
//! - [`naming`] - Naming schemes for built binaries
//! - [`options`] - Per-build options (tags, scheme, flags)
//! - [`matrix`] - Platform/architecture matrices with an ignore list
//! - [`module`] - Module descriptor and derived directories
//! - [`builder`] - Build orchestration logic
//! - [`codegen`] - Generator tool installation and `generate`
//! - [`clean`] - Clean build artifacts logic
//! - [`url`] - Platform-specific download URLs
//! - [`protoc`] - protoc release URLs

pub mod builder;
pub mod clean;
pub mod codegen;
pub mod matrix;
pub mod module;
pub mod naming;
pub mod options;
pub mod platform;
pub mod protoc;
pub mod url;
