//! Credential sources consulted by [`OcapiConfigBuilder`](super::OcapiConfigBuilder).
//!
//! A [`CredentialSource`] is an immutable snapshot of credential key/value
//! pairs taken from the process environment, a `.env` file, or a profile
//! section of an INI credentials file. Snapshots are taken once; the builder
//! never re-reads the environment after `build()`.
//!
//! Keys are normalized to the builder field names: `client_id`,
//! `client_secret`, `instance`, `bm_user` and `bm_password`.
//!
//! # Example
//!
//! ```rust
//! use salesforce_ocapi::config::CredentialSource;
//!
//! let profile = CredentialSource::from_profile_str(
//!     "[default]\nclient_id = abc\n\n[dev15]\ninstance = https://dev15.example.com\n",
//!     "dev15",
//! )
//! .unwrap();
//!
//! assert_eq!(profile.get("client_id"), Some("abc"));
//! assert_eq!(profile.get("instance"), Some("https://dev15.example.com"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::ConfigError;

/// Credential field names understood by the builder.
pub const CREDENTIAL_KEYS: [&str; 5] = [
    "client_id",
    "client_secret",
    "instance",
    "bm_user",
    "bm_password",
];

/// Environment variable names and the credential field each one supplies.
pub const ENV_VARS: [(&str, &str); 5] = [
    ("OCAPI_CLIENT_ID", "client_id"),
    ("OCAPI_CLIENT_SECRET", "client_secret"),
    ("OCAPI_INSTANCE", "instance"),
    ("OCAPI_USERNAME", "bm_user"),
    ("OCAPI_PASSWORD", "bm_password"),
];

/// Default profile section name.
pub const DEFAULT_PROFILE: &str = "default";

/// An immutable snapshot of credential values from one source.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSource {
    values: HashMap<String, String>,
}

impl CredentialSource {
    /// Snapshots the `OCAPI_*` variables of the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(std::env::vars())
    }

    /// Builds a source from arbitrary environment-style pairs.
    ///
    /// Only the `OCAPI_*` names listed in [`ENV_VARS`] are kept; empty values
    /// are treated as unset.
    pub fn from_env_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = HashMap::new();
        for (name, value) in vars {
            let Some((_, field)) = ENV_VARS.iter().find(|(var, _)| *var == name.as_ref()) else {
                continue;
            };
            let value = value.into();
            if !value.is_empty() {
                values.insert((*field).to_string(), value);
            }
        }
        Self { values }
    }

    /// Reads `OCAPI_*` variables from a `.env` file without touching the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be opened or a
    /// line cannot be parsed.
    pub fn from_dotenv(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_error = |reason: String| ConfigError::FileRead {
            path: path.display().to_string(),
            reason,
        };

        let iter = dotenvy::from_path_iter(path).map_err(|e| file_error(e.to_string()))?;
        let mut pairs = Vec::new();
        for item in iter {
            pairs.push(item.map_err(|e| file_error(e.to_string()))?);
        }

        Ok(Self::from_env_vars(pairs))
    }

    /// Reads a profile section from an INI credentials file.
    ///
    /// Values from the `default` section are merged underneath the named
    /// section, so the named section wins on conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be parsed and
    /// [`ConfigError::ProfileNotFound`] if the section does not exist.
    pub fn from_profile(path: impl AsRef<Path>, profile: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini, profile, &path.display().to_string())
    }

    /// Reads a profile section from INI text.
    ///
    /// # Errors
    ///
    /// See [`CredentialSource::from_profile`].
    pub fn from_profile_str(contents: &str, profile: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents).map_err(|e| ConfigError::FileRead {
            path: "<string>".to_string(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini, profile, "<string>")
    }

    /// Reads a profile from `~/.sfcc/credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the home directory cannot be
    /// determined, plus any error from [`CredentialSource::from_profile`].
    pub fn from_default_profile(profile: &str) -> Result<Self, ConfigError> {
        let path = default_profile_path().ok_or_else(|| ConfigError::FileRead {
            path: "~/.sfcc/credentials".to_string(),
            reason: "home directory could not be determined".to_string(),
        })?;
        Self::from_profile(path, profile)
    }

    fn from_ini(ini: &Ini, profile: &str, path: &str) -> Result<Self, ConfigError> {
        let named = ini
            .section(Some(profile))
            .ok_or_else(|| ConfigError::ProfileNotFound {
                path: path.to_string(),
                profile: profile.to_string(),
            })?;

        let mut values = HashMap::new();
        let layers = ini.section(Some(DEFAULT_PROFILE)).into_iter().chain([named]);
        for section in layers {
            for (key, value) in section.iter() {
                let key = key.trim().to_lowercase();
                if CREDENTIAL_KEYS.contains(&key.as_str()) && !value.is_empty() {
                    values.insert(key, value.to_string());
                }
            }
        }

        Ok(Self { values })
    }

    /// Returns the value for a credential field, if this source has one.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns `true` if this source supplies no credentials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("CredentialSource")
            .field("keys", &keys)
            .finish()
    }
}

/// Returns `~/.sfcc/credentials`, if the home directory is known.
#[must_use]
pub fn default_profile_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sfcc").join("credentials"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CREDENTIALS: &str = "\
[default]
client_id = 11111111-2222-3333-4444-555555555555
client_secret = abcdefghijklmnopqrstuvwxyz

[dev15]
instance = https://dev15-eu01-example.demandware.net
bm_user = example@company.com
bm_password = strongpassword

[other]
client_id = override-id
";

    #[test]
    fn test_env_vars_are_mapped_to_fields() {
        let source = CredentialSource::from_env_vars([
            ("OCAPI_CLIENT_ID", "id"),
            ("OCAPI_USERNAME", "user"),
            ("PATH", "/usr/bin"),
            ("OCAPI_PASSWORD", ""),
        ]);

        assert_eq!(source.get("client_id"), Some("id"));
        assert_eq!(source.get("bm_user"), Some("user"));
        assert_eq!(source.get("bm_password"), None);
        assert_eq!(source.get("PATH"), None);
    }

    #[test]
    fn test_profile_merges_default_section() {
        let source = CredentialSource::from_profile_str(CREDENTIALS, "dev15").unwrap();
        assert_eq!(
            source.get("client_id"),
            Some("11111111-2222-3333-4444-555555555555")
        );
        assert_eq!(source.get("bm_user"), Some("example@company.com"));
    }

    #[test]
    fn test_named_profile_overrides_default() {
        let source = CredentialSource::from_profile_str(CREDENTIALS, "other").unwrap();
        assert_eq!(source.get("client_id"), Some("override-id"));
        assert_eq!(source.get("client_secret"), Some("abcdefghijklmnopqrstuvwxyz"));
    }

    #[test]
    fn test_missing_profile_is_an_error() {
        let result = CredentialSource::from_profile_str(CREDENTIALS, "prod");
        assert!(matches!(
            result,
            Err(ConfigError::ProfileNotFound { profile, .. }) if profile == "prod"
        ));
    }

    #[test]
    fn test_dotenv_file_is_read_without_mutating_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "OCAPI_CLIENT_ID=from-dotenv").unwrap();
        writeln!(file, "OCAPI_INSTANCE=\"https://dotenv.example.com\"").unwrap();
        writeln!(file, "UNRELATED=1").unwrap();

        let source = CredentialSource::from_dotenv(file.path()).unwrap();
        assert_eq!(source.get("client_id"), Some("from-dotenv"));
        assert_eq!(source.get("instance"), Some("https://dotenv.example.com"));
        assert!(std::env::var("UNRELATED").is_err());
    }

    #[test]
    fn test_debug_output_hides_values() {
        let source = CredentialSource::from_env_vars([("OCAPI_CLIENT_SECRET", "hunter2")]);
        let debug = format!("{source:?}");
        assert!(debug.contains("client_secret"));
        assert!(!debug.contains("hunter2"));
    }
}
