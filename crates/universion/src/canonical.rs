//! Reversible canonical string form.
//!
//! ```text
//! release    := INT ("." INT){1,2}
//! prerelease := "-" LABEL INT?
//! post       := ".post" INT
//! dev        := ".dev" INT
//! local      := "+" ANY_NONEMPTY
//! full       := release prerelease? post? dev? local?
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::VersionError;
use crate::version::{Prerelease, Version};

lazy_static! {
    static ref CANONICAL_VERSION_RE: Regex = Regex::new(
        r"(?x)
        ^
        (?P<release>[0-9]+(?:\.[0-9]+){1,2})
        (?:-(?P<pre_label>[a-z]+)(?P<pre_number>[0-9]*))?
        (?:\.post(?P<post>[0-9]+))?
        (?:\.dev(?P<dev>[0-9]+))?
        (?:\+(?P<local>.+))?
        $"
    )
    .unwrap();
}

/// Render the canonical string, e.g. `1.2.3-a1.post2.dev3+local`
pub fn encode(version: &Version) -> String {
    let mut canonical = version
        .release()
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".");

    if let Some(pre) = version.prerelease() {
        canonical.push('-');
        canonical.push_str(&pre.to_string());
    }
    if let Some(post) = version.postrelease() {
        canonical.push_str(&format!(".post{post}"));
    }
    if let Some(dev) = version.devrelease() {
        canonical.push_str(&format!(".dev{dev}"));
    }
    if let Some(local) = version.local() {
        canonical.push('+');
        canonical.push_str(local);
    }

    canonical
}

/// Parse a canonical string. A missing prerelease number reads as 0.
pub fn decode(version: &str) -> Result<Version, VersionError> {
    let invalid = || VersionError::InvalidCanonicalFormat(version.to_string());

    let captures = CANONICAL_VERSION_RE.captures(version).ok_or_else(invalid)?;

    let number = |digits: &str| digits.parse::<u64>().map_err(|_| invalid());
    let optional_number = |name: &str| {
        captures
            .name(name)
            .map(|m| number(m.as_str()))
            .transpose()
    };

    let release = captures
        .name("release")
        .ok_or_else(invalid)?
        .as_str()
        .split('.')
        .map(number)
        .collect::<Result<Vec<_>, _>>()?;

    let prerelease = match captures.name("pre_label") {
        Some(label) => {
            let digits = captures.name("pre_number").map_or("", |m| m.as_str());
            let pre_number = if digits.is_empty() { 0 } else { number(digits)? };
            Some(Prerelease::new(label.as_str(), pre_number))
        }
        None => None,
    };

    let postrelease = optional_number("post")?;
    let devrelease = optional_number("dev")?;
    let local = captures.name("local").map(|m| m.as_str().to_string());

    Version::from_parts(release, prerelease, postrelease, devrelease, local).map_err(|reason| {
        log::trace!("Canonical version \"{version}\" rejected: {reason}");
        invalid()
    })
}
