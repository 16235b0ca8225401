//! OCAPI version definitions.
//!
//! This module provides the [`ApiVersion`] enum for specifying which version
//! of the Open Commerce API to address. OCAPI versions are path segments of
//! the form `vYY_N` (e.g. `v20_4`).

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// OCAPI version.
///
/// # Example
///
/// ```rust
/// use salesforce_ocapi::ApiVersion;
///
/// let version = ApiVersion::default();
/// assert_eq!(version, ApiVersion::V20_4);
///
/// let version: ApiVersion = "v21_3".parse().unwrap();
/// assert_eq!(version.to_string(), "v21_3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    /// OCAPI 19.10
    V19_10,
    /// OCAPI 20.2
    V20_2,
    /// OCAPI 20.4, the version the SDK endpoints are written against.
    #[default]
    V20_4,
    /// Any other well-formed version string.
    Custom(String),
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V19_10 => "v19_10",
            Self::V20_2 => "v20_2",
            Self::V20_4 => "v20_4",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "v19_10" => Ok(Self::V19_10),
            "v20_2" => Ok(Self::V20_2),
            "v20_4" => Ok(Self::V20_4),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

impl ApiVersion {
    // Format: vYY_N or vYY_NN
    fn is_valid_version_format(s: &str) -> bool {
        let Some(rest) = s.strip_prefix('v') else {
            return false;
        };
        let Some((year, release)) = rest.split_once('_') else {
            return false;
        };

        year.len() == 2
            && year.chars().all(|c| c.is_ascii_digit())
            && (1..=2).contains(&release.len())
            && release.chars().all(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_versions_parse() {
        assert_eq!("v20_4".parse::<ApiVersion>().unwrap(), ApiVersion::V20_4);
        assert_eq!("V19_10".parse::<ApiVersion>().unwrap(), ApiVersion::V19_10);
    }

    #[test]
    fn test_custom_version_parse() {
        let version: ApiVersion = "v23_2".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("v23_2".to_string()));
        assert_eq!(version.to_string(), "v23_2");
    }

    #[test]
    fn test_invalid_versions_rejected() {
        for bad in ["20_4", "v2020_4", "v20-4", "v20_", "latest", ""] {
            assert!(
                matches!(
                    bad.parse::<ApiVersion>(),
                    Err(ConfigError::InvalidApiVersion { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
