//! Keygate Core - Release signing resolution for build tools
//!
//! This crate reads a `key.properties` style file, locates the keystore it
//! names among an ordered list of candidate directories, and decides per
//! build type whether release signing is applied, the debug identity is
//! substituted, or the build must stop.

pub mod config;
pub mod credentials;
pub mod decision;
pub mod error;
pub mod pass;
pub mod policy;
pub mod properties;
pub mod resolver;
pub mod types;

pub use credentials::SigningCredentials;
pub use decision::{SigningDecision, UnavailableReason};
pub use error::{ConfigError, KeygateError, PropertiesError, Result, SigningError};
pub use pass::{BuildTypeSigning, PassOptions, Resolution, SigningPass, SigningPlan};
pub use policy::{apply_policy, DebugIdentity, PolicyContext, SigningOutcome};
pub use properties::PropertyMap;
pub use resolver::{resolve, resolve_keystore_path, ResolvedKeystorePath, SigningResolver};
pub use types::PolicyMode;
