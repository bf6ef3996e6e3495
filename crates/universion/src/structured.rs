//! Versioned structured (JSON-LD) records.
//!
//! Every record carries a `universion` tag naming the schema of the record
//! itself, independent of the version it describes. Decoding dispatches on
//! that tag, so records written under an older schema stay readable after
//! a new one is introduced.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::VersionError;
use crate::version::{Prerelease, Version};

/// Schema version stamped on newly encoded records
pub const UNIVERSION_VERSION: &str = "1.0.0";

pub const UNIVERSION_CONTEXT: &str =
    "https://gitlab.com/willynilly/universion/-/raw/main/src/universion/context/v1.0.0.jsonld";

pub const UNIVERSION_TYPE: &str = "UniVersion";

type RecordDecoder = fn(&Value) -> Result<Version, VersionError>;

/// Decoder per schema version. Append new schemas; never edit old entries.
const SCHEMA_DECODERS: &[(&str, RecordDecoder)] = &[("1.0.0", decode_v1_0_0)];

/// Encode a version as a record of the current schema
pub fn encode(version: &Version) -> Value {
    json!({
        "@context": UNIVERSION_CONTEXT,
        "@type": UNIVERSION_TYPE,
        "universion": UNIVERSION_VERSION,
        "release": version.release(),
        "prerelease": version.prerelease().map(|pre| json!([pre.label(), pre.number()])),
        "postrelease": version.postrelease(),
        "devrelease": version.devrelease(),
        "local": version.local(),
    })
}

/// Decode a record, dispatching on its `universion` schema tag
pub fn decode(record: &Value) -> Result<Version, VersionError> {
    let schema = record
        .get("universion")
        .map(|tag| tag.as_str().map_or_else(|| tag.to_string(), str::to_string));

    let decoder = SCHEMA_DECODERS
        .iter()
        .find(|(known, _)| schema.as_deref() == Some(*known))
        .map(|(_, decoder)| decoder)
        .ok_or_else(|| {
            log::debug!("No decoder for universion schema {schema:?}");
            VersionError::UnsupportedSchemaVersion(schema.clone())
        })?;

    decoder(record)
}

/// Encode as compact JSON text
pub fn to_json(version: &Version) -> String {
    encode(version).to_string()
}

/// Decode from JSON text
pub fn from_json(json: &str) -> Result<Version, VersionError> {
    let record: Value =
        serde_json::from_str(json).map_err(|err| VersionError::InvalidRecord(err.to_string()))?;
    decode(&record)
}

#[derive(Debug, Deserialize)]
struct RecordV1 {
    #[serde(rename = "@type")]
    kind: Option<String>,
    release: Vec<u64>,
    prerelease: Option<(String, u64)>,
    postrelease: Option<u64>,
    devrelease: Option<u64>,
    local: Option<String>,
}

fn decode_v1_0_0(record: &Value) -> Result<Version, VersionError> {
    let record = RecordV1::deserialize(record)
        .map_err(|err| VersionError::InvalidRecord(err.to_string()))?;

    if let Some(kind) = &record.kind {
        if kind != UNIVERSION_TYPE {
            return Err(VersionError::InvalidRecord(format!(
                "expected @type \"{UNIVERSION_TYPE}\", found \"{kind}\""
            )));
        }
    }

    Version::from_parts(
        record.release,
        record
            .prerelease
            .map(|(label, number)| Prerelease::new(label, number)),
        record.postrelease,
        record.devrelease,
        record.local,
    )
    .map_err(VersionError::InvalidRecord)
}
