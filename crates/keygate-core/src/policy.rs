//! Release signing policy
//!
//! | policy     | decision    | outcome                          |
//! |------------|-------------|----------------------------------|
//! | strict     | available   | release credentials              |
//! | strict     | unavailable | `ReleaseSigningMissing` (fatal)  |
//! | permissive | available   | release credentials              |
//! | permissive | unavailable | debug identity                   |

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::credentials::{SigningCredentials, STORE_FILE};
use crate::decision::{SigningDecision, UnavailableReason};
use crate::error::SigningError;
use crate::types::PolicyMode;

/// Alias of the Android SDK debug key
pub const DEFAULT_DEBUG_ALIAS: &str = "androiddebugkey";

/// Store and key password of the Android SDK debug keystore
pub const DEFAULT_DEBUG_PASSWORD: &str = "android";

/// The fallback identity used by permissive build types
#[derive(Clone, PartialEq, Eq)]
pub struct DebugIdentity {
    pub keystore: PathBuf,
    pub key_alias: String,
    pub store_password: String,
    pub key_password: String,
}

impl DebugIdentity {
    /// Default SDK location, `$HOME/.android/debug.keystore`
    pub fn default_keystore() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_default()
            .join(".android")
            .join("debug.keystore")
    }
}

impl Default for DebugIdentity {
    fn default() -> Self {
        Self {
            keystore: Self::default_keystore(),
            key_alias: DEFAULT_DEBUG_ALIAS.to_string(),
            store_password: DEFAULT_DEBUG_PASSWORD.to_string(),
            key_password: DEFAULT_DEBUG_PASSWORD.to_string(),
        }
    }
}

impl std::fmt::Debug for DebugIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugIdentity")
            .field("keystore", &self.keystore)
            .field("key_alias", &self.key_alias)
            .finish_non_exhaustive()
    }
}

/// What a build type is signed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningOutcome {
    /// The resolved release keystore
    Release {
        credentials: SigningCredentials,
        keystore: PathBuf,
    },
    /// The debug identity, because release signing was unavailable
    Debug {
        identity: DebugIdentity,
        reason: UnavailableReason,
    },
}

impl SigningOutcome {
    /// Whether this is the release identity
    pub fn is_release(&self) -> bool {
        matches!(self, Self::Release { .. })
    }

    /// `"release"` or `"debug"`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Release { .. } => "release",
            Self::Debug { .. } => "debug",
        }
    }

    /// Keystore the build type will be signed with
    pub fn keystore(&self) -> &Path {
        match self {
            Self::Release { keystore, .. } => keystore,
            Self::Debug { identity, .. } => &identity.keystore,
        }
    }

    /// Key alias the build type will be signed with
    pub fn key_alias(&self) -> &str {
        match self {
            Self::Release { credentials, .. } => &credentials.key_alias,
            Self::Debug { identity, .. } => &identity.key_alias,
        }
    }

    /// Keystore password
    pub fn store_password(&self) -> &str {
        match self {
            Self::Release { credentials, .. } => &credentials.store_password,
            Self::Debug { identity, .. } => &identity.store_password,
        }
    }

    /// Key password
    pub fn key_password(&self) -> &str {
        match self {
            Self::Release { credentials, .. } => &credentials.key_password,
            Self::Debug { identity, .. } => &identity.key_password,
        }
    }
}

/// Inputs needed to explain a strict-mode failure and to fall back
#[derive(Debug, Clone)]
pub struct PolicyContext {
    /// Where the properties file was expected
    pub properties_file: PathBuf,
    /// Identity to use when falling back
    pub debug_identity: DebugIdentity,
}

/// Apply a build type's policy to the signing decision
pub fn apply_policy(
    build_type: &str,
    mode: PolicyMode,
    decision: &SigningDecision,
    ctx: &PolicyContext,
) -> Result<SigningOutcome, SigningError> {
    debug!(build_type, policy = %mode, "applying signing policy");

    match decision {
        SigningDecision::Available {
            credentials,
            keystore,
        } => Ok(SigningOutcome::Release {
            credentials: credentials.clone(),
            keystore: keystore.clone(),
        }),
        SigningDecision::Unavailable { reason } => match mode {
            PolicyMode::Strict => Err(SigningError::ReleaseSigningMissing {
                build_type: build_type.to_string(),
                properties_file: ctx.properties_file.clone(),
                key: STORE_FILE,
                reason: reason.clone(),
            }),
            PolicyMode::Permissive => {
                info!(
                    build_type,
                    reason = %reason,
                    keystore = %ctx.debug_identity.keystore.display(),
                    "release signing unavailable, using debug identity"
                );
                Ok(SigningOutcome::Debug {
                    identity: ctx.debug_identity.clone(),
                    reason: reason.clone(),
                })
            }
        },
    }
}
