//! protoc release lookup
//!
//! Maps build contexts to the asset names used by protobuf's GitHub releases.

use crate::config::urls;
use crate::core::platform::BuildContext;
use crate::core::url::PlatformSpecificUrl;

/// Release asset fragment for each supported `platform/architecture`
const RELEASE_ASSETS: &[(&str, &str)] = &[
    ("linux/arm64", "linux-aarch_64"),
    ("linux/ppc64le", "linux-ppcle_64"),
    ("linux/s390x", "linux-s390x"),
    ("linux/386", "linux-x86_32"),
    ("linux/amd64", "linux-x86_64"),
    ("darwin/amd64", "osx-x86_64"),
    ("darwin/arm64", "osx-aarch_64"),
    ("windows/386", "win32"),
    ("windows/amd64", "win64"),
];

/// The platform-specific download URL of a protoc release
pub fn release_url(release: &str) -> PlatformSpecificUrl {
    let pattern = format!(
        "{}/v{release}/protoc-{release}-%s.zip",
        urls::PROTOC_RELEASES
    );
    RELEASE_ASSETS
        .iter()
        .fold(PlatformSpecificUrl::new(pattern), |url, (key, asset)| {
            url.with_context(*key, [*asset])
        })
}

/// Download URL of a protoc release for a context
pub fn release_for_context(release: &str, context: &BuildContext) -> Option<String> {
    release_url(release).resolve(context)
}

/// Download URL of a protoc release for the host
pub fn release_for_host(release: &str) -> Option<String> {
    release_url(release).resolve_for_host()
}
