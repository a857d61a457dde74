//! Validated newtype wrappers for the identifiers that scope a filing.
//!
//! Each newtype enforces a regex-based shape constraint at construction time via
//! [`TryFrom<&str>`]. Serde `Deserialize` impls re-run validation so malformed
//! identifiers cannot enter the engine from untrusted JSON.
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Errors produced when constructing a validated newtype from an invalid string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewtypeError {
    /// The string did not match the expected format.
    #[error("invalid {type_name}: expected {expected}, got {got:?}")]
    InvalidFormat {
        /// Name of the type that rejected the input.
        type_name: &'static str,
        /// A human-readable description of the expected format.
        expected: &'static str,
        /// The input that was rejected.
        got: String,
    },
}

// ---------------------------------------------------------------------------
// Regex statics
//
// The patterns are string literals and always compile. The workspace bans
// expect() and unwrap(), so a failed compile falls back to a pattern that
// never matches.
// ---------------------------------------------------------------------------

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .or_else(|_| Regex::new("a^"))
        .unwrap_or_else(|_| unreachable!("regex engine broken"))
}

/// Eight characters: uppercase letters and digits (e.g. `01234567`, `SC123456`).
static COMPANY_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z0-9]{8}$"));

/// Opaque resource identifiers issued by the filing API.
static RESOURCE_ID_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z0-9_-]+$"));

// ---------------------------------------------------------------------------
// CompanyNumber
// ---------------------------------------------------------------------------

/// A Companies House company number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompanyNumber(String);

impl TryFrom<&str> for CompanyNumber {
    type Error = NewtypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if COMPANY_NUMBER_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(NewtypeError::InvalidFormat {
                type_name: "CompanyNumber",
                expected: "8 uppercase letters or digits (e.g. 01234567)",
                got: s.to_owned(),
            })
        }
    }
}

impl Deref for CompanyNumber {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CompanyNumber {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CompanyNumber {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// CompanyAccountId
// ---------------------------------------------------------------------------

/// Identifier of the company-account aggregate that owns every sibling
/// resource (periods, notes, reports) of one filing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompanyAccountId(String);

impl TryFrom<&str> for CompanyAccountId {
    type Error = NewtypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if RESOURCE_ID_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(NewtypeError::InvalidFormat {
                type_name: "CompanyAccountId",
                expected: "non-empty [A-Za-z0-9_-]",
                got: s.to_owned(),
            })
        }
    }
}

impl Deref for CompanyAccountId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CompanyAccountId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CompanyAccountId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// TransactionId
// ---------------------------------------------------------------------------

/// Identifier of the filing transaction a submission belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(String);

impl TryFrom<&str> for TransactionId {
    type Error = NewtypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if RESOURCE_ID_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(NewtypeError::InvalidFormat {
                type_name: "TransactionId",
                expected: "non-empty [A-Za-z0-9_-]",
                got: s.to_owned(),
            })
        }
    }
}

impl Deref for TransactionId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}
