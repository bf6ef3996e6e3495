//! Universal version type
//!
//! This crate parses PEP 440, SemVer and its own canonical version strings
//! into one normalized [`Version`], with conservative equality and ordering,
//! a reversible canonical string form and a versioned structured record.
//!
//! ```
//! use universion::{UniVersion, Version};
//!
//! let semver: Version = "1.2.3-alpha.1".parse().unwrap();
//! let pep440: Version = "1.2.3a1".parse().unwrap();
//! assert_eq!(semver, pep440);
//! assert_eq!(semver.to_canonical_string(), "1.2.3-a1");
//!
//! // Differing local metadata has no order
//! assert!(UniVersion::compare("1.0+a", "1.0+b").is_err());
//! ```

pub mod canonical;
mod error;
mod pep440;
pub mod structured;
mod universion;
mod version;
mod version_parser;

pub use error::VersionError;
pub use structured::{UNIVERSION_CONTEXT, UNIVERSION_TYPE, UNIVERSION_VERSION};
pub use universion::UniVersion;
pub use version::{Prerelease, Version};
pub use version_parser::VersionParser;
