//! PEP 440 version parsing into the universal value model

use std::str::FromStr;

use crate::error::VersionError;
use crate::version::{Prerelease, Version};

/// Parse a PEP 440 version string.
///
/// The grammar and its normalizations (label spellings, implicit numbers,
/// local segment folding) come from `pep440_rs`. What the value model cannot
/// hold is rejected afterwards: non-zero epochs and releases longer than
/// three components. A single-component release gains a trailing `0`, which
/// PEP 440 treats as equivalent.
pub(crate) fn parse(version: &str) -> Result<Version, VersionError> {
    let invalid = |reason: String| VersionError::InvalidPep440Format {
        version: version.to_string(),
        reason,
    };

    let parsed = pep440_rs::Version::from_str(version).map_err(invalid)?;

    if parsed.epoch != 0 {
        return Err(invalid(format!("epoch {} is not representable", parsed.epoch)));
    }

    let mut release: Vec<u64> = parsed.release.iter().map(|&n| n as u64).collect();
    if release.len() == 1 {
        release.push(0);
    }

    // `PreRelease` displays as `a`, `b` or `rc`
    let prerelease = parsed
        .pre
        .map(|(kind, number)| Prerelease::new(kind.to_string(), number as u64));

    let local = parsed.local.map(|segments| {
        segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    });

    Version::from_parts(
        release,
        prerelease,
        parsed.post.map(|n| n as u64),
        parsed.dev.map(|n| n as u64),
        local,
    )
        .map(|version_value| version_value.with_original(version))
        .map_err(invalid)
}
