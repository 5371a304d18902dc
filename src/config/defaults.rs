//! Default configuration values

/// Toolchain driver used when nothing else is configured
pub const TOOLCHAIN_COMMAND: &str = "go";

/// Environment variable overriding the toolchain driver
pub const ENV_TOOLCHAIN: &str = "CROSSBIN_TOOLCHAIN";

/// Project configuration file, relative to the module root
pub const PROJECT_CONFIG_FILE: &str = "crossbin.toml";

/// Binaries directory, relative to the module root
pub const BINARIES_DIR: &str = "bin";

/// Build scratch directory, relative to the module root
pub const BUILD_DIR: &str = ".build";

/// Build scratch subdirectories
pub const STAGING_SUBDIR: &str = "staging";
pub const TOOLS_SUBDIR: &str = "tools";
pub const DOWNLOADS_SUBDIR: &str = "downloads";

/// Package pattern matching every package in the module
pub const ALL_PACKAGES: &str = "./...";

/// Environment variables understood by the toolchain
pub const ENV_TARGET_PLATFORM: &str = "GOOS";
pub const ENV_TARGET_ARCH: &str = "GOARCH";
pub const ENV_INSTALL_DIR: &str = "GOBIN";
