//! The normalized version value and its conservative comparison rules

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VersionError;
use crate::{canonical, structured, VersionParser};

/// Pre-release marker such as `a1`, `b0` or `rc2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prerelease {
    label: String,
    number: u64,
}

impl Prerelease {
    pub(crate) fn new(label: impl Into<String>, number: u64) -> Self {
        Self {
            label: label.into(),
            number,
        }
    }

    /// Lowercase label, e.g. `a`, `b`, `rc`
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for Prerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label, self.number)
    }
}

/// A version normalized from PEP 440, SemVer or the canonical form.
///
/// Equality and hashing cover the release, prerelease, postrelease,
/// devrelease and local fields. The original input string is kept for
/// diagnostics only.
///
/// Ordering is partial: two versions with different local metadata have no
/// order, and [`Version::try_cmp`] reports that as
/// [`VersionError::IncomparableVersions`] while `partial_cmp` yields `None`.
#[derive(Clone)]
pub struct Version {
    release: Vec<u64>,
    prerelease: Option<Prerelease>,
    postrelease: Option<u64>,
    devrelease: Option<u64>,
    local: Option<String>,
    original: Option<String>,
}

impl Version {
    /// Build a version from already-parsed fields.
    ///
    /// Only the parsers and decoders call this. The checks keep every value
    /// expressible in the canonical grammar, so the returned error is a bare
    /// reason for the caller to wrap in its own error kind.
    pub(crate) fn from_parts(
        release: Vec<u64>,
        prerelease: Option<Prerelease>,
        postrelease: Option<u64>,
        devrelease: Option<u64>,
        local: Option<String>,
    ) -> Result<Self, String> {
        if !(2..=3).contains(&release.len()) {
            return Err(format!(
                "release must have 2 or 3 components, found {}",
                release.len()
            ));
        }
        if let Some(pre) = &prerelease {
            if pre.label.is_empty() || !pre.label.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(format!(
                    "prerelease label \"{}\" must be lowercase letters",
                    pre.label
                ));
            }
        }
        if let Some(local) = &local {
            if local.is_empty() || local.contains('\n') {
                return Err(format!("local segment {local:?} must be non-empty on a single line"));
            }
        }

        Ok(Self {
            release,
            prerelease,
            postrelease,
            devrelease,
            local,
            original: None,
        })
    }

    pub(crate) fn with_original(mut self, original: &str) -> Self {
        self.original = Some(original.to_string());
        self
    }

    pub fn release(&self) -> &[u64] {
        &self.release
    }

    pub fn prerelease(&self) -> Option<&Prerelease> {
        self.prerelease.as_ref()
    }

    pub fn postrelease(&self) -> Option<u64> {
        self.postrelease
    }

    pub fn devrelease(&self) -> Option<u64> {
        self.devrelease
    }

    /// Local version label (PEP 440) or build metadata (SemVer)
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// The string this version was parsed from, if it came from a parser
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    pub fn is_postrelease(&self) -> bool {
        self.postrelease.is_some()
    }

    pub fn is_devrelease(&self) -> bool {
        self.devrelease.is_some()
    }

    pub fn is_local(&self) -> bool {
        self.local.is_some()
    }

    /// Deterministic hash of the fields that take part in equality
    pub fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Compare two versions, refusing when their local metadata differs
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, VersionError> {
        if self.local != other.local {
            return Err(VersionError::IncomparableVersions {
                left: self.describe(),
                right: other.describe(),
            });
        }
        Ok(self.cmp_precedence(other))
    }

    /// Lexicographic comparison of `(release, prerelease, post, dev)`.
    ///
    /// Absent prerelease sorts last, absent post sorts first, absent dev
    /// sorts last. Local metadata is ignored here.
    pub(crate) fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.release
            .cmp(&other.release)
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
            .then_with(|| self.postrelease.cmp(&other.postrelease))
            .then_with(|| match (self.devrelease, other.devrelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(&b),
            })
    }

    pub fn to_canonical_string(&self) -> String {
        canonical::encode(self)
    }

    pub fn from_canonical_string(version: &str) -> Result<Self, VersionError> {
        canonical::decode(version)
    }

    /// Encode as a versioned structured record, see [`structured`]
    pub fn to_structured_record(&self) -> serde_json::Value {
        structured::encode(self)
    }

    pub fn from_structured_record(record: &serde_json::Value) -> Result<Self, VersionError> {
        structured::decode(record)
    }

    fn describe(&self) -> String {
        match &self.original {
            Some(original) => original.clone(),
            None => self.to_canonical_string(),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.release == other.release
            && self.prerelease == other.prerelease
            && self.postrelease == other.postrelease
            && self.devrelease == other.devrelease
            && self.local == other.local
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.release.hash(state);
        self.prerelease.hash(state);
        self.postrelease.hash(state);
        self.devrelease.hash(state);
        self.local.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.local != other.local {
            return None;
        }
        Some(self.cmp_precedence(other))
    }
}

/// Shows the input the version was parsed from, e.g. `Version("v1.2.3")`
impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Version").field(&self.describe()).finish()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&canonical::encode(self))
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Parses with the PEP 440, SemVer, canonical fallback chain
    fn from_str(version: &str) -> Result<Self, Self::Err> {
        VersionParser::new().parse(version)
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(
        release: &[u64],
        pre: Option<(&str, u64)>,
        post: Option<u64>,
        dev: Option<u64>,
        local: Option<&str>,
    ) -> Version {
        Version::from_parts(
            release.to_vec(),
            pre.map(|(label, number)| Prerelease::new(label, number)),
            post,
            dev,
            local.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn test_from_parts_rejects_bad_release_arity() {
        assert!(Version::from_parts(vec![1], None, None, None, None).is_err());
        assert!(Version::from_parts(vec![1, 2, 3, 4], None, None, None, None).is_err());
        assert!(Version::from_parts(vec![1, 2], None, None, None, None).is_ok());
    }

    #[test]
    fn test_from_parts_rejects_bad_label_and_local() {
        let upper = Some(Prerelease::new("Alpha", 1));
        assert!(Version::from_parts(vec![1, 0], upper, None, None, None).is_err());
        let digits = Some(Prerelease::new("x1", 1));
        assert!(Version::from_parts(vec![1, 0], digits, None, None, None).is_err());
        assert!(Version::from_parts(vec![1, 0], None, None, None, Some(String::new())).is_err());
        assert!(Version::from_parts(vec![1, 0], None, None, None, Some("a\nb".into())).is_err());
    }

    #[test]
    fn test_from_parts_accepts_local_with_inner_whitespace() {
        let v = version(&[1, 0], None, None, None, Some("build 7"));
        assert_eq!(v.local(), Some("build 7"));
        let tab = version(&[1, 0], None, None, None, Some("a\tb"));
        assert_eq!(tab.local(), Some("a\tb"));
    }

    #[test]
    fn test_original_does_not_affect_equality_or_hash() {
        let a = version(&[1, 2, 3], None, None, None, None).with_original("v1.2.3");
        let b = version(&[1, 2, 3], None, None, None, None).with_original("1.2.3");
        assert_eq!(a, b);
        assert_eq!(a.hash_value(), b.hash_value());
        assert_eq!(a.original(), Some("v1.2.3"));
    }

    #[test]
    fn test_local_takes_part_in_equality() {
        let plain = version(&[1, 2, 3], None, None, None, None);
        let local = version(&[1, 2, 3], None, None, None, Some("abc"));
        assert_ne!(plain, local);
    }

    #[test]
    fn test_prerelease_sorts_before_final() {
        let pre = version(&[1, 0, 0], Some(("rc", 9)), None, None, None);
        let fin = version(&[1, 0, 0], None, None, None, None);
        assert_eq!(pre.try_cmp(&fin), Ok(Ordering::Less));
        assert_eq!(fin.try_cmp(&pre), Ok(Ordering::Greater));
    }

    #[test]
    fn test_prerelease_labels_compare_lexically() {
        let a = version(&[1, 0], Some(("a", 5)), None, None, None);
        let b = version(&[1, 0], Some(("b", 0)), None, None, None);
        let rc = version(&[1, 0], Some(("rc", 0)), None, None, None);
        let snapshot = version(&[1, 0], Some(("snapshot", 0)), None, None, None);
        assert!(a < b);
        assert!(b < rc);
        assert!(rc < snapshot);
    }

    #[test]
    fn test_absent_post_sorts_first() {
        let none = version(&[1, 0], None, None, None, None);
        let post0 = version(&[1, 0], None, Some(0), None, None);
        assert!(none < post0);
    }

    #[test]
    fn test_absent_dev_sorts_last() {
        let dev = version(&[1, 0], None, None, Some(7), None);
        let none = version(&[1, 0], None, None, None, None);
        assert!(dev < none);
    }

    #[test]
    fn test_release_length_compares_lexicographically() {
        let short = version(&[1, 2], None, None, None, None);
        let long = version(&[1, 2, 0], None, None, None, None);
        assert!(short < long);
        assert_ne!(short, long);
    }

    #[test]
    fn test_differing_local_is_incomparable() {
        let a = version(&[1, 2, 3], None, None, None, Some("build1"));
        let b = version(&[1, 2, 3], None, None, None, Some("build2"));
        assert!(matches!(
            a.try_cmp(&b),
            Err(VersionError::IncomparableVersions { .. })
        ));
        assert_eq!(a.partial_cmp(&b), None);
        assert!(!(a < b) && !(a > b) && a != b);
    }

    #[test]
    fn test_same_local_is_comparable() {
        let a = version(&[1, 2, 3], None, None, None, Some("abc"));
        let b = version(&[1, 2, 4], None, None, None, Some("abc"));
        assert_eq!(a.try_cmp(&b), Ok(Ordering::Less));
    }

    #[test]
    fn test_equal_precedence_is_equal() {
        let a = version(&[1, 2], Some(("a", 1)), Some(2), Some(3), None);
        let b = version(&[1, 2], Some(("a", 1)), Some(2), Some(3), None);
        assert_eq!(a.try_cmp(&b), Ok(Ordering::Equal));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_is_canonical() {
        let v = version(&[1, 2, 3], Some(("a", 1)), Some(2), Some(3), Some("local"));
        assert_eq!(v.to_string(), "1.2.3-a1.post2.dev3+local");
    }

    #[test]
    fn test_debug_shows_original_input() {
        let parsed = version(&[1, 2, 3], None, None, None, None).with_original("v1.2.3");
        assert_eq!(format!("{parsed:?}"), r#"Version("v1.2.3")"#);

        let decoded = version(&[1, 0], Some(("rc", 1)), None, None, None);
        assert_eq!(format!("{decoded:?}"), r#"Version("1.0-rc1")"#);
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let v = version(&[1, 2, 3], Some(("rc", 1)), None, None, None);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"1.2.3-rc1\"");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<Version>("\"not a version\"").is_err());
    }
}
