//! Output naming schemes
//!
//! A naming scheme decides how the build context of a binary is encoded in
//! its final location:
//!
//! | Scheme               | `tool.exe` for `windows/amd64`   |
//! |----------------------|----------------------------------|
//! | `undecorated`        | `tool.exe`                       |
//! | `prefixed-dirs`      | `windows/amd64/tool.exe`         |
//! | `suffixed-filenames` | `tool-windows-amd64.exe`         |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::platform::BuildContext;

/// Naming scheme for built binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingScheme {
    /// The build context is not represented at all
    #[default]
    Undecorated,
    /// The build context becomes `platform/architecture` directory segments
    PrefixedDirs,
    /// The build context is appended to the file stem
    SuffixedFilenames,
}

impl NamingScheme {
    /// All schemes, in declaration order
    pub const ALL: [Self; 3] = [
        Self::Undecorated,
        Self::PrefixedDirs,
        Self::SuffixedFilenames,
    ];

    /// Name used in config files and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undecorated => "undecorated",
            Self::PrefixedDirs => "prefixed-dirs",
            Self::SuffixedFilenames => "suffixed-filenames",
        }
    }

    /// Location of `file_name` relative to the output directory
    pub fn decorate(self, file_name: &str, context: &BuildContext) -> PathBuf {
        match self {
            Self::Undecorated => PathBuf::from(file_name),
            Self::PrefixedDirs => PathBuf::from(&context.platform)
                .join(&context.architecture)
                .join(file_name),
            Self::SuffixedFilenames => PathBuf::from(suffixed_file_name(file_name, context)),
        }
    }
}

impl fmt::Display for NamingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|s| s.as_str()).collect();
                format!(
                    "unknown naming scheme '{s}': must be one of {}",
                    names.join(", ")
                )
            })
    }
}

/// Split a file name into stem and extension
///
/// The extension starts at the last `.` and keeps it, so `tool.exe` splits
/// into `("tool", ".exe")` and `tool` into `("tool", "")`.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(index) => file_name.split_at(index),
        None => (file_name, ""),
    }
}

/// `stem-platform-architecture.ext`
pub fn suffixed_file_name(file_name: &str, context: &BuildContext) -> String {
    let (stem, extension) = split_extension(file_name);
    format!(
        "{stem}-{}-{}{extension}",
        context.platform, context.architecture
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_suffixed_windows_executable() {
        let ctx = BuildContext::new("windows", "amd64");
        assert_eq!(suffixed_file_name("tool.exe", &ctx), "tool-windows-amd64.exe");
    }

    #[test]
    fn test_suffixed_without_extension() {
        let ctx = BuildContext::new("linux", "arm64");
        assert_eq!(suffixed_file_name("tool", &ctx), "tool-linux-arm64");
    }

    #[test]
    fn test_split_extension_uses_last_dot() {
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("tool"), ("tool", ""));
    }

    #[test]
    fn test_decorate_per_scheme() {
        let ctx = BuildContext::new("darwin", "arm64");
        assert_eq!(
            NamingScheme::Undecorated.decorate("tool", &ctx),
            PathBuf::from("tool")
        );
        assert_eq!(
            NamingScheme::PrefixedDirs.decorate("tool", &ctx),
            PathBuf::from("darwin").join("arm64").join("tool")
        );
        assert_eq!(
            NamingScheme::SuffixedFilenames.decorate("tool", &ctx),
            PathBuf::from("tool-darwin-arm64")
        );
    }

    #[test]
    fn test_scheme_parse_and_display() {
        for scheme in NamingScheme::ALL {
            assert_eq!(scheme.to_string().parse::<NamingScheme>(), Ok(scheme));
        }
        assert!("suffixed".parse::<NamingScheme>().is_err());
    }

    #[test]
    fn test_scheme_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            scheme: NamingScheme,
        }
        let parsed: Wrapper = toml::from_str(r#"scheme = "prefixed-dirs""#).unwrap();
        assert_eq!(parsed.scheme, NamingScheme::PrefixedDirs);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Suffixing keeps the extension and inserts the context before it
        #[test]
        fn prop_suffix_preserves_extension(
            stem in "[a-z][a-z0-9_]{0,12}",
            ext in prop_oneof![Just(String::new()), "\\.[a-z]{1,4}"],
            platform in "[a-z]{3,8}",
            arch in "[a-z0-9]{3,8}",
        ) {
            let ctx = BuildContext::new(platform.clone(), arch.clone());
            let name = format!("{stem}{ext}");
            let decorated = suffixed_file_name(&name, &ctx);
            prop_assert_eq!(decorated, format!("{stem}-{platform}-{arch}{ext}"));
        }
    }
}
