//! Code generation
//!
//! Installs generator tools into the module's codegen tools directory and
//! runs the toolchain's `generate` step with that directory on `PATH`.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::defaults;
use crate::core::builder::Builder;
use crate::error::ProcessError;
use crate::infra::process::{CommandRunner, Invocation};

impl<R: CommandRunner> Builder<'_, R> {
    /// Install each tool with `<toolchain> install`, stopping at the first failure
    pub fn install_tools<S: AsRef<str>>(&self, tools: &[S]) -> Result<(), ProcessError> {
        let tools_dir = self.module().codegen_tools_dir();

        for tool in tools {
            let mut command = self.toolchain().subcommand("install");
            command.push(tool.as_ref().to_string());

            let invocation = Invocation::new(command)
                .with_working_dir(self.module().root_dir())
                .with_env(defaults::ENV_INSTALL_DIR, tools_dir.display().to_string());
            self.runner().run(&invocation)?;
        }

        Ok(())
    }

    /// Run `<toolchain> generate ./...` with the codegen tools directory on `PATH`
    pub fn generate(&self) -> Result<(), ProcessError> {
        let path = extended_path(std::env::var_os("PATH"), self.module().codegen_tools_dir());

        let mut command = self.toolchain().subcommand("generate");
        command.push(defaults::ALL_PACKAGES.to_string());

        let invocation = Invocation::new(command)
            .with_working_dir(self.module().root_dir())
            .with_env("PATH", path);
        self.runner().run(&invocation)
    }
}

/// Append `dir` to a `PATH` value using the platform's list separator
fn extended_path(current: Option<OsString>, dir: PathBuf) -> String {
    let mut entries: Vec<PathBuf> = current
        .as_deref()
        .map(|value| std::env::split_paths(value).collect())
        .unwrap_or_default();
    entries.push(dir);

    // A tools dir containing the separator cannot be joined; keep PATH as it was
    std::env::join_paths(entries).map_or_else(
        |_| {
            current
                .as_deref()
                .map(|value| value.to_string_lossy().into_owned())
                .unwrap_or_default()
        },
        |joined| joined.to_string_lossy().into_owned(),
    )
}
