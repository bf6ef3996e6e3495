//! UniVersion facade providing high-level version operations

use std::cmp::Ordering;

use serde_json::Value;

use crate::{structured, Version, VersionError, VersionParser};

/// Main facade for universal version operations on strings
pub struct UniVersion;

impl UniVersion {
    /// Parse from PEP 440, SemVer or canonical form
    pub fn parse(version: &str) -> Result<Version, VersionError> {
        VersionParser::new().parse(version)
    }

    /// Normalize any supported version string to its canonical form
    pub fn canonicalize(version: &str) -> Result<String, VersionError> {
        Ok(Self::parse(version)?.to_canonical_string())
    }

    /// Compare two version strings.
    ///
    /// Fails when either string is unparseable or when the two carry
    /// different local metadata.
    pub fn compare(version1: &str, version2: &str) -> Result<Ordering, VersionError> {
        Self::parse(version1)?.try_cmp(&Self::parse(version2)?)
    }

    /// Check if two version strings denote the same version
    pub fn equal_to(version1: &str, version2: &str) -> Result<bool, VersionError> {
        Ok(Self::parse(version1)? == Self::parse(version2)?)
    }

    pub fn to_structured_record(version: &str) -> Result<Value, VersionError> {
        Ok(structured::encode(&Self::parse(version)?))
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Result<Vec<String>, VersionError> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Result<Vec<String>, VersionError> {
        Self::usort(versions, false)
    }

    /// Sorting needs a total order, so every version must share the same
    /// local metadata; otherwise the first mismatching pair is reported.
    fn usort(versions: &[&str], ascending: bool) -> Result<Vec<String>, VersionError> {
        let parser = VersionParser::new();

        let mut parsed = versions
            .iter()
            .enumerate()
            .map(|(i, v)| Ok((parser.parse(v)?, i)))
            .collect::<Result<Vec<_>, VersionError>>()?;

        if let Some((first, _)) = parsed.first() {
            if let Some((other, _)) = parsed.iter().find(|(v, _)| v.local() != first.local()) {
                first.try_cmp(other)?;
            }
        }

        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = a.cmp_precedence(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        Ok(parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect())
    }
}
