//! Keystore path resolution
//!
//! A relative `storeFile` is looked up under each candidate base directory
//! in order and the first existing file wins. An absolute `storeFile` is
//! checked on its own and the candidates are ignored. Only regular files
//! count as found.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::credentials::SigningCredentials;
use crate::decision::{SigningDecision, UnavailableReason};
use crate::properties::PropertyMap;

/// Result of looking up a keystore path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedKeystorePath {
    /// The keystore exists at this path
    Found(PathBuf),
    /// Nothing existed at any of these paths
    NotFound { searched: Vec<PathBuf> },
}

/// Locate `store_file` on disk.
///
/// `store_file` must be non-empty.
pub fn resolve_keystore_path(
    store_file: &str,
    candidate_dirs: &[PathBuf],
) -> ResolvedKeystorePath {
    let raw = Path::new(store_file);

    let candidates: Vec<PathBuf> = if raw.is_absolute() {
        vec![raw.to_path_buf()]
    } else {
        candidate_dirs.iter().map(|dir| dir.join(raw)).collect()
    };

    for candidate in &candidates {
        let exists = candidate.is_file();
        debug!(candidate = %candidate.display(), exists, "checking keystore candidate");
        if exists {
            return ResolvedKeystorePath::Found(candidate.clone());
        }
    }

    ResolvedKeystorePath::NotFound {
        searched: candidates,
    }
}

/// Decides whether release signing is available for a set of candidate
/// base directories.
#[derive(Debug, Clone, Default)]
pub struct SigningResolver {
    candidate_dirs: Vec<PathBuf>,
}

impl SigningResolver {
    /// Create a resolver; the order of `candidate_dirs` is the lookup priority
    pub fn new(candidate_dirs: Vec<PathBuf>) -> Self {
        Self { candidate_dirs }
    }

    /// Resolve the signing decision for a properties map.
    ///
    /// Only the keystore path is checked. Blank aliases or passwords still
    /// produce [`SigningDecision::Available`] when the file is found.
    pub fn resolve(&self, props: &PropertyMap) -> SigningDecision {
        let credentials = SigningCredentials::from_properties(props);

        if !credentials.has_store_file() {
            info!("release signing unavailable: no store file configured");
            return SigningDecision::Unavailable {
                reason: UnavailableReason::NoStoreFile,
            };
        }

        let is_absolute = Path::new(&credentials.store_file).is_absolute();
        match resolve_keystore_path(&credentials.store_file, &self.candidate_dirs) {
            ResolvedKeystorePath::Found(keystore) => {
                info!(keystore = %keystore.display(), "release keystore resolved");
                SigningDecision::Available {
                    credentials,
                    keystore,
                }
            }
            ResolvedKeystorePath::NotFound { searched } => {
                let reason = if is_absolute {
                    UnavailableReason::NotFoundAtAbsolutePath {
                        path: PathBuf::from(&credentials.store_file),
                    }
                } else {
                    UnavailableReason::NotFoundInCandidates {
                        store_file: credentials.store_file.clone(),
                        searched,
                    }
                };
                info!(reason = %reason, "release signing unavailable");
                SigningDecision::Unavailable { reason }
            }
        }
    }
}

/// Resolve a signing decision without keeping a resolver around
pub fn resolve(props: &PropertyMap, candidate_dirs: &[PathBuf]) -> SigningDecision {
    SigningResolver::new(candidate_dirs.to_vec()).resolve(props)
}
