//! Profile configuration
//!
//! Credentials live in a YAML file mapping profile names to connection
//! details, by default at ~/.config/oss-cli/config.yaml:
//!
//! ```yaml
//! default:
//!   access_key: AKIA...
//!   secret_access_key: ...
//!   region: us-east-1
//!   endpoint_url: http://localhost:9000
//!   buckets: my-bucket
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default profile name when none is given on the command line
pub const DEFAULT_PROFILE: &str = "default";

/// Connection details for one named profile
///
/// The `buckets` field holds the single bucket this profile is bound to;
/// the field name is part of the on-disk format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub access_key: String,

    #[serde(default)]
    pub secret_access_key: String,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub endpoint_url: String,

    /// Bucket the session is bound to (one bucket per session)
    #[serde(default)]
    pub buckets: String,
}

impl Profile {
    /// Check that every field required for session construction is present.
    ///
    /// A missing profile loads as all-fields-empty and fails here, so a
    /// typo in the profile name surfaces before any network call.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("access_key", &self.access_key),
            ("secret_access_key", &self.secret_access_key),
            ("region", &self.region),
            ("endpoint_url", &self.endpoint_url),
            ("buckets", &self.buckets),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(Error::Config(format!(
                    "profile field `{name}` is missing or empty"
                )));
            }
        }
        Ok(())
    }
}

/// Loads named profiles from the YAML config file
#[derive(Debug)]
pub struct ProfileStore {
    config_path: PathBuf,
}

impl ProfileStore {
    /// Create a ProfileStore pointing at the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("oss-cli").join("config.yaml");
        Ok(Self { config_path })
    }

    /// Create a ProfileStore with a custom path (useful for testing and --config-path)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the named profile
    ///
    /// A missing config file or unknown profile name yields an empty
    /// profile; session construction rejects it via [`Profile::validate`].
    pub fn load(&self, name: &str) -> Result<Profile> {
        if !self.config_path.exists() {
            tracing::warn!(path = %self.config_path.display(), "config file not found");
            return Ok(Profile::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut profiles: HashMap<String, Profile> = serde_yaml::from_str(&content)?;
        Ok(profiles.remove(name).unwrap_or_default())
    }
}
