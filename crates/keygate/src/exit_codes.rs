//! Exit codes for the CLI

use keygate_core::KeygateError;

/// Success
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error, including an unreadable properties file
pub const CONFIG_ERROR: i32 = 2;

/// Validation error
pub const VALIDATION_ERROR: i32 = 5;

/// Strict build type without release signing
pub const SIGNING_MISSING: i32 = 6;

/// Marker error for a failed `validate` run whose problems were already
/// reported
#[derive(Debug)]
pub struct ValidationFailed(pub usize);

impl std::fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed with {} error(s)", self.0)
    }
}

impl std::error::Error for ValidationFailed {}

/// Pick the exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ValidationFailed>().is_some() {
        return VALIDATION_ERROR;
    }

    match err.downcast_ref::<KeygateError>() {
        Some(KeygateError::Signing(_)) => SIGNING_MISSING,
        Some(KeygateError::Config(_)) | Some(KeygateError::Properties(_)) => CONFIG_ERROR,
        _ => ERROR,
    }
}
