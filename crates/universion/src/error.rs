//! Error type shared by the parsers, codecs and comparison

use thiserror::Error;

/// Error type for version parsing, decoding and ordering
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// No supported standard accepted the string
    #[error("Invalid version string \"{0}\": not PEP 440, SemVer or canonical")]
    InvalidVersionFormat(String),
    #[error("Invalid PEP 440 version \"{version}\": {reason}")]
    InvalidPep440Format { version: String, reason: String },
    #[error("Invalid SemVer version \"{version}\": {reason}")]
    InvalidSemverFormat { version: String, reason: String },
    #[error("Invalid canonical version \"{0}\"")]
    InvalidCanonicalFormat(String),
    /// The record's `universion` tag has no registered decoder
    #[error("Unsupported universion schema version: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnsupportedSchemaVersion(Option<String>),
    #[error("Malformed universion record: {0}")]
    InvalidRecord(String),
    /// Ordering across differing local/build metadata
    #[error("Cannot confidently order versions with differing local metadata: {left} vs {right}")]
    IncomparableVersions { left: String, right: String },
}
