//! Build orchestration logic
//!
//! Drives the toolchain to compile every package of a module for one build
//! context, the host context, or a whole matrix of contexts, and lays the
//! resulting binaries out according to the naming scheme.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::config::defaults;
use crate::core::matrix::BuildMatrix;
use crate::core::module::Module;
use crate::core::naming::NamingScheme;
use crate::core::options::BuildOptions;
use crate::core::platform::BuildContext;
use crate::error::{BuildError, FilesystemError};
use crate::infra::filesystem;
use crate::infra::process::{CommandRunner, Invocation};
use crate::infra::toolchain::Toolchain;

/// Build driver for a single module
#[derive(Debug)]
pub struct Builder<'m, R> {
    module: &'m Module,
    toolchain: Toolchain,
    runner: R,
}

impl<'m, R: CommandRunner> Builder<'m, R> {
    /// Create a builder that runs `toolchain` through `runner`
    pub fn new(module: &'m Module, toolchain: Toolchain, runner: R) -> Self {
        Self {
            module,
            toolchain,
            runner,
        }
    }

    /// The module being built
    pub fn module(&self) -> &Module {
        self.module
    }

    /// The toolchain being driven
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub(crate) fn runner(&self) -> &R {
        &self.runner
    }

    /// Build every executable in the module for one context
    ///
    /// `out_dir` defaults to the module's binaries directory. With the
    /// suffixed scheme the toolchain writes into a staging directory first
    /// and each staged file is then moved into `out_dir` under its decorated
    /// name; the first failed move aborts without rolling back earlier ones.
    pub fn build_for_context(
        &self,
        out_dir: Option<&Path>,
        options: &BuildOptions,
        context: &BuildContext,
    ) -> Result<(), BuildError> {
        let mut out_dir = out_dir.map_or_else(|| self.module.binaries_dir(), Path::to_path_buf);

        if options.scheme == NamingScheme::PrefixedDirs {
            out_dir = out_dir.join(&context.platform).join(&context.architecture);
        }

        filesystem::create_dir_all(&out_dir)?;

        // Keep freshly built binaries away from undecorated ones already in out_dir
        let compile_dir = if options.scheme == NamingScheme::SuffixedFilenames {
            let staging = self.module.staging_dir(context);
            filesystem::create_dir_all(&staging)?;
            staging
        } else {
            out_dir.clone()
        };

        tracing::info!("Building {} for {context}", self.module.root_dir().display());
        self.runner
            .run(&self.compile_invocation(&compile_dir, options, context))?;

        if options.scheme == NamingScheme::SuffixedFilenames {
            let moved = move_decorated(&compile_dir, &out_dir, context)?;
            tracing::debug!("Moved {} staged binaries into {}", moved.len(), out_dir.display());
        }

        Ok(())
    }

    /// Build every executable in the module for the host context
    pub fn build_for_host(
        &self,
        out_dir: Option<&Path>,
        options: &BuildOptions,
    ) -> Result<(), BuildError> {
        self.build_for_context(out_dir, options, &BuildContext::host())
    }

    /// Build every executable in the module for each context of a matrix
    ///
    /// Stops at the first failing context. Contexts built before it stay on
    /// disk and are listed in the returned [`BuildError::Context`].
    pub fn build_for_matrix(
        &self,
        out_dir: Option<&Path>,
        options: &BuildOptions,
        matrix: &BuildMatrix,
    ) -> Result<Vec<BuildContext>, BuildError> {
        if options.scheme == NamingScheme::Undecorated {
            return Err(BuildError::Configuration {
                message: "using the undecorated naming scheme when building a matrix of \
                          configurations would clobber binaries"
                    .to_string(),
            });
        }

        let mut completed = Vec::new();
        for context in matrix.contexts() {
            if let Err(source) = self.build_for_context(out_dir, options, &context) {
                return Err(BuildError::Context {
                    context,
                    completed,
                    source: Box::new(source),
                });
            }
            completed.push(context);
        }

        Ok(completed)
    }

    /// `<toolchain> build -o <dir>/ -tags <tags> <flags...> ./...` for a context
    fn compile_invocation(
        &self,
        compile_dir: &Path,
        options: &BuildOptions,
        context: &BuildContext,
    ) -> Invocation {
        // The trailing separator makes the toolchain treat -o as a directory
        // even when the module has a single main package
        let output = format!("{}{MAIN_SEPARATOR}", compile_dir.display());

        let mut command = self.toolchain.subcommand("build");
        command.extend(["-o".to_string(), output]);
        command.extend(["-tags".to_string(), options.joined_tags()]);
        command.extend(options.flags.iter().cloned());
        command.push(defaults::ALL_PACKAGES.to_string());

        Invocation::new(command)
            .with_working_dir(self.module.root_dir())
            .with_env(defaults::ENV_TARGET_PLATFORM, &context.platform)
            .with_env(defaults::ENV_TARGET_ARCH, &context.architecture)
    }
}

/// Move every entry of `staging_dir` into `out_dir` with the context suffix
fn move_decorated(
    staging_dir: &Path,
    out_dir: &Path,
    context: &BuildContext,
) -> Result<Vec<PathBuf>, FilesystemError> {
    let mut moved = Vec::new();
    for staged in filesystem::list_entries(staging_dir)? {
        let Some(file_name) = staged.file_name() else {
            continue;
        };
        let name = file_name.to_string_lossy();
        let destination = out_dir.join(NamingScheme::SuffixedFilenames.decorate(&name, context));
        filesystem::rename(&staged, &destination)?;
        moved.push(destination);
    }
    Ok(moved)
}
