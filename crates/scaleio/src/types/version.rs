//! API version type.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{Error, InvalidInputError};

static VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)").expect("version pattern is valid"));

/// A negotiated gateway API version, reduced to `major.minor`.
///
/// Anything after the minor component is dropped, so the build string
/// `3.5.1.2` becomes `3.5`.
///
/// # Example
///
/// ```
/// use scaleio::ApiVersion;
///
/// let v = ApiVersion::parse("\"3.5.1.2\"").unwrap();
/// assert_eq!(v.to_string(), "3.5");
/// assert_eq!(v.content_type(), "application/json;version=3.5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    major: u32,
    minor: u32,
}

impl ApiVersion {
    /// Create a version from its components.
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse a version string, tolerating surrounding JSON quotes.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not start with `<digits>.<digits>`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim().trim_matches('"');
        let invalid = |reason: &str| InvalidInputError::Version {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let caps = VERSION_PREFIX
            .captures(trimmed)
            .ok_or_else(|| invalid("expected <major>.<minor>"))?;

        let major = caps[1]
            .parse()
            .map_err(|_| invalid("major component out of range"))?;
        let minor = caps[2]
            .parse()
            .map_err(|_| invalid("minor component out of range"))?;

        Ok(Self { major, minor })
    }

    /// Returns the major component.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Returns the minor component.
    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// The versioned media type sent in `Accept` and `Content-Type`.
    pub fn content_type(&self) -> String {
        format!("application/json;version={}", self)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ApiVersion> for String {
    fn from(v: ApiVersion) -> Self {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_quotes_and_build_suffix() {
        let v = ApiVersion::parse("\"3.5.1.2\"").unwrap();
        assert_eq!(v, ApiVersion::new(3, 5));
        assert_eq!(v.to_string(), "3.5");
    }

    #[test]
    fn plain_major_minor() {
        assert_eq!(ApiVersion::parse("2.0").unwrap().to_string(), "2.0");
    }

    #[test]
    fn rejects_missing_minor() {
        assert!(ApiVersion::parse("\"3\"").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(ApiVersion::parse("v3.5").is_err());
        assert!(ApiVersion::parse("").is_err());
    }

    #[test]
    fn orders_numerically() {
        assert!(ApiVersion::new(2, 10) > ApiVersion::new(2, 9));
    }
}
