//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::policy::{DebugIdentity, DEFAULT_DEBUG_ALIAS, DEFAULT_DEBUG_PASSWORD};
use crate::types::PolicyMode;

use super::defaults::{DEFAULT_BUILD_TYPE, DEFAULT_CANDIDATE_DIRS, DEFAULT_PROPERTIES_FILE};

/// Main configuration for Keygate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Properties file describing the release keystore, relative to the
    /// project root
    pub properties_file: PathBuf,

    /// Base directories searched for a relative `storeFile`, in priority
    /// order, relative to the project root
    pub candidate_dirs: Vec<PathBuf>,

    /// Identity used by permissive build types when release signing is
    /// unavailable
    pub debug_identity: DebugIdentityConfig,

    /// Per build type policy
    pub build_types: BTreeMap<String, BuildTypeConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let mut build_types = BTreeMap::new();
        build_types.insert(DEFAULT_BUILD_TYPE.to_string(), BuildTypeConfig::default());

        Self {
            properties_file: PathBuf::from(DEFAULT_PROPERTIES_FILE),
            candidate_dirs: DEFAULT_CANDIDATE_DIRS.iter().map(PathBuf::from).collect(),
            debug_identity: DebugIdentityConfig::default(),
            build_types,
        }
    }
}

impl Config {
    /// Names of all configured build types, sorted
    pub fn build_type_names(&self) -> Vec<&str> {
        self.build_types.keys().map(String::as_str).collect()
    }
}

/// Build type configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildTypeConfig {
    /// Whether missing release signing aborts the pass or falls back
    pub policy: PolicyMode,
}

/// Debug identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugIdentityConfig {
    /// Debug keystore; defaults to `$HOME/.android/debug.keystore`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keystore: Option<PathBuf>,

    /// Key alias in the debug keystore
    pub key_alias: String,

    /// Debug keystore password
    pub store_password: String,

    /// Debug key password
    pub key_password: String,
}

impl Default for DebugIdentityConfig {
    fn default() -> Self {
        Self {
            keystore: None,
            key_alias: DEFAULT_DEBUG_ALIAS.to_string(),
            store_password: DEFAULT_DEBUG_PASSWORD.to_string(),
            key_password: DEFAULT_DEBUG_PASSWORD.to_string(),
        }
    }
}

impl DebugIdentityConfig {
    /// Build the identity, filling in the default keystore location
    pub fn to_identity(&self) -> DebugIdentity {
        DebugIdentity {
            keystore: self
                .keystore
                .clone()
                .unwrap_or_else(DebugIdentity::default_keystore),
            key_alias: self.key_alias.clone(),
            store_password: self.store_password.clone(),
            key_password: self.key_password.clone(),
        }
    }
}
