//! Error types for Keygate

use std::path::PathBuf;
use thiserror::Error;

use crate::decision::UnavailableReason;

/// Result type alias using KeygateError
pub type Result<T> = std::result::Result<T, KeygateError>;

/// Main error type for Keygate operations
#[derive(Debug, Error)]
pub enum KeygateError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Properties file errors
    #[error(transparent)]
    Properties(#[from] PropertiesError),

    /// Signing policy errors
    #[error(transparent)]
    Signing(#[from] SigningError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// A build type was requested that the configuration does not define
    #[error("Unknown build type '{name}' (configured: {known})")]
    UnknownBuildType { name: String, known: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Properties file errors
///
/// A missing properties file is not an error; this only covers a file that
/// exists but could not be read.
#[derive(Debug, Error)]
pub enum PropertiesError {
    /// The file exists but reading it failed
    #[error("Failed to read properties file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Signing policy errors
#[derive(Debug, Error)]
pub enum SigningError {
    /// Strict policy and no usable release keystore
    #[error(
        "Release signing is not configured for build type '{build_type}': {reason}. \
         Expected a properties file at {properties_file} with a '{key}' entry pointing \
         to an existing keystore. No debug signing fallback was taken (policy is strict)."
    )]
    ReleaseSigningMissing {
        build_type: String,
        properties_file: PathBuf,
        key: &'static str,
        reason: UnavailableReason,
    },
}

impl KeygateError {
    /// Whether this error means release signing was required but missing
    pub fn is_release_signing_missing(&self) -> bool {
        matches!(
            self,
            Self::Signing(SigningError::ReleaseSigningMissing { .. })
        )
    }
}
