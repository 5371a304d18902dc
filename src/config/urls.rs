//! Release download URLs

/// protoc release downloads on GitHub
pub const PROTOC_RELEASES: &str = "https://github.com/protocolbuffers/protobuf/releases/download";
