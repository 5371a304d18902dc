//! Build command implementation
//!
//! Implements `crossbin build` for the host, one target, or a matrix.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{status, OutputConfig};
use crate::config::project::ProjectConfig;
use crate::core::builder::Builder;
use crate::core::matrix::BuildMatrix;
use crate::core::naming::NamingScheme;
use crate::core::options::BuildOptions;
use crate::core::platform::BuildContext;
use crate::error::{ConfigError, CrossbinError};

/// Build arguments collected from the command line
#[derive(Debug, Default)]
pub struct BuildArgs {
    /// Output directory, relative to the current directory
    pub out: Option<PathBuf>,
    /// Build tags replacing the configured ones
    pub tags: Vec<String>,
    /// Naming scheme override
    pub scheme: Option<NamingScheme>,
    /// Single target context
    pub target: Option<BuildContext>,
    /// Build the configured matrix
    pub matrix: bool,
    /// Matrix platforms replacing the configured ones
    pub platforms: Vec<String>,
    /// Matrix architectures replacing the configured ones
    pub architectures: Vec<String>,
    /// Extra matrix contexts to skip
    pub ignore: Vec<String>,
    /// Toolchain flags replacing the configured ones
    pub flags: Vec<String>,
}

impl BuildArgs {
    fn wants_matrix(&self) -> bool {
        self.matrix || !self.platforms.is_empty() || !self.architectures.is_empty()
    }
}

#[derive(Serialize)]
struct BuildReport<'a> {
    out_dir: PathBuf,
    scheme: NamingScheme,
    contexts: &'a [BuildContext],
}

/// Execute the build command
pub async fn execute(root: Option<&Path>, args: BuildArgs) -> Result<()> {
    let (module, config) = super::load_project(root)?;
    let output = OutputConfig::current();

    let options = merged_options(&config, &args);
    let out_dir = match &args.out {
        Some(dir) if dir.is_relative() => Some(std::env::current_dir()?.join(dir)),
        Some(dir) => Some(dir.clone()),
        None => config.out_dir(&module),
    };

    let builder = Builder::new(&module, config.toolchain(), super::process_runner(&output));

    let built = if args.wants_matrix() {
        let matrix = merged_matrix(config.matrix.clone(), &args)?;
        builder
            .build_for_matrix(out_dir.as_deref(), &options, &matrix)
            .context("Matrix build failed")?
    } else {
        let context = args.target.clone().unwrap_or_else(BuildContext::host);
        builder
            .build_for_context(out_dir.as_deref(), &options, &context)
            .with_context(|| format!("Build for {context} failed"))?;
        vec![context]
    };

    let out_dir = out_dir.unwrap_or_else(|| module.binaries_dir());
    if output.json {
        output.print_json(&BuildReport {
            out_dir,
            scheme: options.scheme,
            contexts: &built,
        })?;
    } else {
        for context in &built {
            output.status(status::SUCCESS, &format!("Built {context}"));
        }
        output.status(
            status::INFO,
            &format!("Binaries are in {} ({})", out_dir.display(), options.scheme),
        );
    }

    Ok(())
}

/// Project build options with command-line overrides applied
fn merged_options(config: &ProjectConfig, args: &BuildArgs) -> BuildOptions {
    let mut options = config.build_options();
    if !args.tags.is_empty() {
        options.tags.clone_from(&args.tags);
    }
    if let Some(scheme) = args.scheme {
        options.scheme = scheme;
    }
    if !args.flags.is_empty() {
        options.flags.clone_from(&args.flags);
    }
    options
}

/// Project matrix with command-line overrides applied
fn merged_matrix(configured: Option<BuildMatrix>, args: &BuildArgs) -> Result<BuildMatrix> {
    let mut matrix = configured.unwrap_or_default();
    if !args.platforms.is_empty() {
        matrix.platforms.clone_from(&args.platforms);
    }
    if !args.architectures.is_empty() {
        matrix.architectures.clone_from(&args.architectures);
    }
    for key in &args.ignore {
        if BuildContext::parse(key).is_none() {
            return Err(invalid(format!(
                "ignore entry '{key}' is not of the form 'platform/architecture'"
            )));
        }
        matrix.ignore.push(key.clone());
    }

    if matrix.is_empty() {
        return Err(invalid(
            "build matrix has no contexts: add a [matrix] section to crossbin.toml \
             or pass --platforms and --architectures"
                .to_string(),
        ));
    }
    Ok(matrix)
}

fn invalid(message: String) -> anyhow::Error {
    CrossbinError::from(ConfigError::Invalid { message }).into()
}
