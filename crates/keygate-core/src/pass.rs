//! Build-configuration pass orchestration
//!
//! One pass loads the properties file once, resolves the keystore once, and
//! applies every selected build type's policy to that single decision. A
//! strict build type without release signing aborts the whole pass, so a
//! plan is either complete or not produced at all.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::decision::SigningDecision;
use crate::error::{ConfigError, Result};
use crate::policy::{apply_policy, PolicyContext, SigningOutcome};
use crate::properties::PropertyMap;
use crate::resolver::SigningResolver;
use crate::types::PolicyMode;

/// Options for a pass
#[derive(Debug, Clone, Default)]
pub struct PassOptions {
    /// Use this policy for every build type instead of the configured ones
    pub policy_override: Option<PolicyMode>,
    /// Only plan this build type
    pub build_type: Option<String>,
    /// Properties file to read instead of the configured one, used as given
    pub properties_file: Option<PathBuf>,
    /// Candidate directories to search instead of the configured ones,
    /// used as given
    pub candidate_dirs: Option<Vec<PathBuf>>,
}

impl PassOptions {
    /// Force a policy for every build type
    pub fn with_policy(mut self, mode: PolicyMode) -> Self {
        self.policy_override = Some(mode);
        self
    }

    /// Restrict the pass to one build type
    pub fn with_build_type(mut self, name: impl Into<String>) -> Self {
        self.build_type = Some(name.into());
        self
    }

    /// Read a different properties file
    pub fn with_properties_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.properties_file = Some(path.into());
        self
    }

    /// Search different candidate directories
    pub fn with_candidate_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.candidate_dirs = Some(dirs);
        self
    }
}

/// Signing chosen for one build type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTypeSigning {
    pub name: String,
    pub policy: PolicyMode,
    pub outcome: SigningOutcome,
}

/// Loaded properties and the decision derived from them
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Properties file that was read (or expected)
    pub properties_file: PathBuf,
    /// Whether the properties file existed
    pub properties_present: bool,
    /// Candidate directories, in the order they were searched
    pub candidate_dirs: Vec<PathBuf>,
    pub decision: SigningDecision,
}

/// Result of a complete pass
#[derive(Debug, Clone)]
pub struct SigningPlan {
    pub resolution: Resolution,
    pub build_types: Vec<BuildTypeSigning>,
}

impl SigningPlan {
    /// Signing for a build type, if it was planned
    pub fn get(&self, name: &str) -> Option<&BuildTypeSigning> {
        self.build_types.iter().find(|b| b.name == name)
    }
}

/// Runs a build-configuration pass
pub struct SigningPass<'a> {
    config: &'a Config,
    project_root: PathBuf,
    options: PassOptions,
}

impl<'a> SigningPass<'a> {
    /// Create a pass; relative configured paths are taken from `project_root`
    pub fn new(
        config: &'a Config,
        project_root: impl Into<PathBuf>,
        options: PassOptions,
    ) -> Self {
        Self {
            config,
            project_root: project_root.into(),
            options,
        }
    }

    /// Properties file this pass reads
    pub fn properties_file(&self) -> PathBuf {
        match &self.options.properties_file {
            Some(path) => path.clone(),
            None => join_root(&self.project_root, &self.config.properties_file),
        }
    }

    /// Candidate directories this pass searches
    pub fn candidate_dirs(&self) -> Vec<PathBuf> {
        match &self.options.candidate_dirs {
            Some(dirs) => dirs.clone(),
            None => self
                .config
                .candidate_dirs
                .iter()
                .map(|dir| join_root(&self.project_root, dir))
                .collect(),
        }
    }

    /// Load properties and resolve the keystore, without applying policy
    pub fn resolve(&self) -> Result<Resolution> {
        let properties_file = self.properties_file();
        let candidate_dirs = self.candidate_dirs();

        let properties_present = properties_file.is_file();
        let props = PropertyMap::load(&properties_file)?;
        let mut keys: Vec<&str> = props.iter().map(|(key, _)| key).collect();
        keys.sort_unstable();
        debug!(
            path = %properties_file.display(),
            present = properties_present,
            keys = ?keys,
            "properties loaded"
        );

        let decision = SigningResolver::new(candidate_dirs.clone()).resolve(&props);

        Ok(Resolution {
            properties_file,
            properties_present,
            candidate_dirs,
            decision,
        })
    }

    /// Run the full pass
    pub fn execute(&self) -> Result<SigningPlan> {
        let selected = self.selected_build_types()?;
        info!(
            build_types = ?selected,
            policy_override = ?self.options.policy_override,
            "executing signing pass"
        );

        let resolution = self.resolve()?;
        let ctx = PolicyContext {
            properties_file: resolution.properties_file.clone(),
            debug_identity: self.config.debug_identity.to_identity(),
        };

        let mut build_types = Vec::with_capacity(selected.len());
        for name in selected {
            let policy = self
                .options
                .policy_override
                .unwrap_or(self.config.build_types[name].policy);
            let outcome = apply_policy(name, policy, &resolution.decision, &ctx)?;
            debug!(
                build_type = name,
                signing = outcome.kind(),
                "build type planned"
            );
            build_types.push(BuildTypeSigning {
                name: name.to_string(),
                policy,
                outcome,
            });
        }

        Ok(SigningPlan {
            resolution,
            build_types,
        })
    }

    fn selected_build_types(&self) -> Result<Vec<&'a str>> {
        let config: &'a Config = self.config;
        match &self.options.build_type {
            Some(name) => match config.build_types.get_key_value(name) {
                Some((key, _)) => Ok(vec![key.as_str()]),
                None => Err(ConfigError::UnknownBuildType {
                    name: name.clone(),
                    known: config.build_type_names().join(", "),
                }
                .into()),
            },
            None => Ok(config.build_type_names()),
        }
    }
}

fn join_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
