//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;
pub mod dirs;
pub mod download;
pub mod generate;
pub mod install_tools;
pub mod protoc;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::cli::output::{status, OutputConfig};
use crate::config::project::ProjectConfig;
use crate::core::module::Module;
use crate::core::naming::NamingScheme;
use crate::core::platform::BuildContext;
use crate::infra::process::ProcessRunner;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every executable in the module
    Build {
        /// Output directory (defaults to <root>/bin)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Build tag (repeatable; replaces the configured tags)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Naming scheme: undecorated, prefixed-dirs, suffixed-filenames
        #[arg(short, long)]
        scheme: Option<NamingScheme>,

        /// Target platform (requires --arch)
        #[arg(
            long,
            requires = "arch",
            conflicts_with_all = ["matrix", "platforms", "architectures"]
        )]
        platform: Option<String>,

        /// Target architecture (requires --platform)
        #[arg(
            long,
            requires = "platform",
            conflicts_with_all = ["matrix", "platforms", "architectures"]
        )]
        arch: Option<String>,

        /// Build the configured platform/architecture matrix
        #[arg(short, long)]
        matrix: bool,

        /// Matrix platforms (replaces the configured ones, implies --matrix)
        #[arg(long, value_delimiter = ',', value_name = "PLATFORM")]
        platforms: Vec<String>,

        /// Matrix architectures (replaces the configured ones, implies --matrix)
        #[arg(long, value_delimiter = ',', value_name = "ARCH")]
        architectures: Vec<String>,

        /// Matrix context to skip, as platform/architecture (repeatable)
        #[arg(long, value_name = "PLATFORM/ARCH")]
        ignore: Vec<String>,

        /// Extra flags passed to the toolchain after `--`
        #[arg(last = true)]
        flags: Vec<String>,
    },

    /// Run `go generate` with the codegen tools on PATH
    Generate {
        /// Install the configured codegen tools first
        #[arg(long)]
        install_tools: bool,
    },

    /// Install codegen tools into the module's tools directory
    InstallTools {
        /// Tools to install (defaults to the configured ones)
        tools: Vec<String>,
    },

    /// Download files into the module's download cache
    Download {
        /// URL to download (defaults to every configured download)
        url: Option<String>,

        /// Local file name (defaults to the URL's last path segment)
        #[arg(short, long, requires = "url")]
        filename: Option<String>,

        /// Store relative to the current directory instead of the module cache
        #[arg(long)]
        global: bool,

        /// Download even if the file is already present
        #[arg(long)]
        force: bool,
    },

    /// Show or download a protoc release for a platform
    Protoc {
        /// protoc release (defaults to [codegen] protoc)
        #[arg(short, long)]
        release: Option<String>,

        /// Target platform (requires --arch)
        #[arg(long, requires = "arch")]
        platform: Option<String>,

        /// Target architecture (requires --platform)
        #[arg(long, requires = "platform")]
        arch: Option<String>,

        /// Download the release archive into the module's download cache
        #[arg(short, long)]
        download: bool,
    },

    /// Remove build artifacts
    Clean {
        /// Remove only the binaries directory
        #[arg(long, conflicts_with = "build")]
        bin: bool,

        /// Remove only the build scratch directory
        #[arg(long)]
        build: bool,
    },

    /// Show the module's derived directories
    Dirs,
}

impl Commands {
    /// Execute the command against the module at `root`
    pub async fn run(self, root: Option<PathBuf>) -> Result<()> {
        let root = root.as_deref();

        match self {
            Self::Build {
                out,
                tags,
                scheme,
                platform,
                arch,
                matrix,
                platforms,
                architectures,
                ignore,
                flags,
            } => {
                let args = build::BuildArgs {
                    out,
                    tags,
                    scheme,
                    target: target_context(platform, arch),
                    matrix,
                    platforms,
                    architectures,
                    ignore,
                    flags,
                };
                build::execute(root, args).await
            }
            Self::Generate { install_tools } => generate::execute(root, install_tools).await,
            Self::InstallTools { tools } => install_tools::execute(root, tools).await,
            Self::Download {
                url,
                filename,
                global,
                force,
            } => {
                let args = download::DownloadArgs {
                    url,
                    filename,
                    global,
                    force,
                };
                download::execute(root, args).await
            }
            Self::Protoc {
                release,
                platform,
                arch,
                download,
            } => protoc::execute(root, release, target_context(platform, arch), download).await,
            Self::Clean { bin, build } => clean::execute(root, bin, build).await,
            Self::Dirs => dirs::execute(root).await,
        }
    }
}

/// A context from `--platform`/`--arch`; clap guarantees both or neither
fn target_context(platform: Option<String>, arch: Option<String>) -> Option<BuildContext> {
    platform
        .zip(arch)
        .map(|(platform, arch)| BuildContext::new(platform, arch))
}

/// The module at `root`, or in the current directory
pub(crate) fn open_module(root: Option<&Path>) -> Result<Module> {
    match root {
        Some(root) => Module::new(root)
            .with_context(|| format!("Failed to open module at {}", root.display())),
        None => Module::in_cwd().context("Failed to open module in the current directory"),
    }
}

/// Load the module at `root` together with its project configuration
pub(crate) fn load_project(root: Option<&Path>) -> Result<(Module, ProjectConfig)> {
    let module = open_module(root)?;
    let config = ProjectConfig::load(&module).with_context(|| {
        format!(
            "Failed to load project configuration for {}",
            module.root_dir().display()
        )
    })?;
    Ok((module, config))
}

/// Process runner that echoes each command line in human output mode
pub(crate) fn process_runner(output: &OutputConfig) -> ProcessRunner {
    if output.human() {
        ProcessRunner::with_observer(Box::new(|command: &[String]| {
            eprintln!("{} {}", status::INFO, command.join(" "));
        }))
    } else {
        ProcessRunner::new()
    }
}
