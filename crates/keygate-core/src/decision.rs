//! Signing availability decision

use std::fmt;
use std::path::{Path, PathBuf};

use crate::credentials::SigningCredentials;

/// Outcome of resolving release signing for one build-configuration pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningDecision {
    /// A keystore file was found; the credentials may still be blank
    Available {
        credentials: SigningCredentials,
        keystore: PathBuf,
    },
    /// Release signing cannot be configured
    Unavailable { reason: UnavailableReason },
}

/// Why release signing is unavailable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// No `storeFile` entry, or no properties file at all
    NoStoreFile,
    /// `storeFile` is absolute and nothing exists there
    NotFoundAtAbsolutePath { path: PathBuf },
    /// `storeFile` is relative and no candidate directory contains it
    NotFoundInCandidates {
        store_file: String,
        searched: Vec<PathBuf>,
    },
}

impl SigningDecision {
    /// Whether a usable release keystore was found
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// Resolved keystore path, if available
    pub fn keystore(&self) -> Option<&Path> {
        match self {
            Self::Available { keystore, .. } => Some(keystore),
            Self::Unavailable { .. } => None,
        }
    }

    /// Credentials, if available
    pub fn credentials(&self) -> Option<&SigningCredentials> {
        match self {
            Self::Available { credentials, .. } => Some(credentials),
            Self::Unavailable { .. } => None,
        }
    }

    /// Reason for unavailability, if unavailable
    pub fn reason(&self) -> Option<&UnavailableReason> {
        match self {
            Self::Available { .. } => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

impl UnavailableReason {
    /// Short machine-friendly identifier
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoStoreFile => "no_store_file",
            Self::NotFoundAtAbsolutePath { .. } => "not_found_at_absolute_path",
            Self::NotFoundInCandidates { .. } => "not_found_in_candidates",
        }
    }

    /// Paths that were checked before giving up
    pub fn searched(&self) -> &[PathBuf] {
        match self {
            Self::NoStoreFile => &[],
            Self::NotFoundAtAbsolutePath { path } => std::slice::from_ref(path),
            Self::NotFoundInCandidates { searched, .. } => searched,
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStoreFile => write!(f, "no store file path configured"),
            Self::NotFoundAtAbsolutePath { path } => write!(
                f,
                "keystore file not found at absolute path ({})",
                path.display()
            ),
            Self::NotFoundInCandidates { store_file, .. } => write!(
                f,
                "keystore file not found in any candidate directory ({})",
                store_file
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_messages() {
        assert_eq!(
            UnavailableReason::NoStoreFile.to_string(),
            "no store file path configured"
        );
        let absolute = UnavailableReason::NotFoundAtAbsolutePath {
            path: PathBuf::from("/keys/release.jks"),
        };
        assert_eq!(
            absolute.to_string(),
            "keystore file not found at absolute path (/keys/release.jks)"
        );

        let relative = UnavailableReason::NotFoundInCandidates {
            store_file: "release.jks".to_string(),
            searched: vec![],
        };
        assert_eq!(
            relative.to_string(),
            "keystore file not found in any candidate directory (release.jks)"
        );
    }

    #[test]
    fn test_accessors() {
        let available = SigningDecision::Available {
            credentials: SigningCredentials::default(),
            keystore: PathBuf::from("app/release.jks"),
        };
        assert!(available.is_available());
        assert_eq!(available.keystore(), Some(Path::new("app/release.jks")));
        assert!(available.reason().is_none());

        let unavailable = SigningDecision::Unavailable {
            reason: UnavailableReason::NoStoreFile,
        };
        assert!(!unavailable.is_available());
        assert!(unavailable.credentials().is_none());
        let code = unavailable.reason().map(UnavailableReason::code);
        assert_eq!(code, Some("no_store_file"));
    }

    #[test]
    fn test_searched_paths() {
        let reason = UnavailableReason::NotFoundInCandidates {
            store_file: "release.jks".to_string(),
            searched: vec![
                PathBuf::from("app/release.jks"),
                PathBuf::from("./release.jks"),
            ],
        };
        assert_eq!(reason.searched().len(), 2);
        assert!(UnavailableReason::NoStoreFile.searched().is_empty());
    }
}
