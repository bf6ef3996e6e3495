//! Multi-standard version parsing

use crate::error::VersionError;
use crate::version::{Prerelease, Version};
use crate::{canonical, pep440};

/// SemVer prerelease words mapped onto their PEP 440 labels
const SEMVER_TO_PEP440_PRERELEASE: &[(&str, &str)] = &[("alpha", "a"), ("beta", "b"), ("rc", "rc")];

/// Parser for PEP 440, SemVer and canonical version strings
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionParser;

impl VersionParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a version string, trying PEP 440, then SemVer, then the
    /// canonical form. Only the final failure is reported.
    pub fn parse(&self, version: &str) -> Result<Version, VersionError> {
        let err = match self.parse_pep440(version) {
            Ok(parsed) => return Ok(parsed),
            Err(err) => err,
        };
        log::trace!("{err}, trying SemVer");

        let err = match self.parse_semver(version) {
            Ok(parsed) => return Ok(parsed),
            Err(err) => err,
        };
        log::trace!("{err}, trying canonical form");

        self.parse_canonical(version).map_err(|err| {
            log::debug!("No supported standard accepts \"{version}\": {err}");
            VersionError::InvalidVersionFormat(version.to_string())
        })
    }

    pub fn parse_pep440(&self, version: &str) -> Result<Version, VersionError> {
        pep440::parse(version)
    }

    /// Parse a SemVer 2.0 string.
    ///
    /// The first dot-separated prerelease identifier becomes the label and
    /// the second, when numeric, the number. Build metadata becomes the
    /// local segment. SemVer has no post or dev releases.
    pub fn parse_semver(&self, version: &str) -> Result<Version, VersionError> {
        let invalid = |reason: String| VersionError::InvalidSemverFormat {
            version: version.to_string(),
            reason,
        };

        let parsed = semver::Version::parse(version).map_err(|err| invalid(err.to_string()))?;

        let prerelease = if parsed.pre.is_empty() {
            None
        } else {
            Some(semver_prerelease(parsed.pre.as_str()).map_err(invalid)?)
        };
        let local = if parsed.build.is_empty() {
            None
        } else {
            Some(parsed.build.as_str().to_string())
        };

        Version::from_parts(
            vec![parsed.major, parsed.minor, parsed.patch],
            prerelease,
            None,
            None,
            local,
        )
        .map(|v| v.with_original(version))
        .map_err(invalid)
    }

    pub fn parse_canonical(&self, version: &str) -> Result<Version, VersionError> {
        canonical::decode(version).map(|v| v.with_original(version))
    }
}

fn semver_prerelease(pre: &str) -> Result<Prerelease, String> {
    let mut identifiers = pre.split('.');
    let label = identifiers.next().unwrap_or_default().to_lowercase();
    let label = SEMVER_TO_PEP440_PRERELEASE
        .iter()
        .find(|(semver_label, _)| *semver_label == label)
        .map(|(_, pep440_label)| pep440_label.to_string())
        .unwrap_or(label);

    let number = match identifiers.next() {
        Some(n) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => n
            .parse::<u64>()
            .map_err(|err| format!("prerelease number \"{n}\": {err}"))?,
        _ => 0,
    };

    Ok(Prerelease::new(label, number))
}
