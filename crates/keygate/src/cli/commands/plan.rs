//! Plan command

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use console::style;
use tracing::{debug, info, warn};

use keygate_core::{PassOptions, PolicyMode, SigningOutcome, SigningPass, SigningPlan};

use crate::cli::output;
use crate::cli::{load_project_config, Cli, OutputFormat, SourceArgs};

/// Decide release signing for each build type
#[derive(Debug, Args)]
pub struct PlanCommand {
    /// Only plan this build type
    #[arg(short, long, value_name = "NAME")]
    pub build_type: Option<String>,

    /// Policy for every planned build type, overriding the configuration
    #[arg(long, value_enum, env = "KEYGATE_POLICY")]
    pub policy: Option<PolicyArg>,

    /// Write the plan as a properties file for the build tool to read
    #[arg(long, value_name = "PATH")]
    pub emit: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Policy modes accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Fail when release signing is missing
    Strict,
    /// Fall back to the debug identity
    Permissive,
}

impl From<PolicyArg> for PolicyMode {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => PolicyMode::Strict,
            PolicyArg::Permissive => PolicyMode::Permissive,
        }
    }
}

impl PlanCommand {
    /// Execute the plan command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            build_type = ?self.build_type,
            policy = ?self.policy,
            "executing plan command"
        );
        let loaded = load_project_config()?;
        debug!(config = ?loaded.path, root = %loaded.root.display(), "project configuration");

        let mut options = self.source.apply(PassOptions::default());
        if let Some(policy) = self.policy {
            options = options.with_policy(policy.into());
        }
        if let Some(name) = &self.build_type {
            options = options.with_build_type(name.clone());
        }

        let plan = match SigningPass::new(&loaded.config, &loaded.root, options).execute() {
            Ok(plan) => plan,
            Err(err) => {
                // A previous plan left at the emit path must not outlive a failed one
                if let Some(path) = &self.emit {
                    remove_stale_emit(path);
                }
                return Err(err.into());
            }
        };

        if let Some(path) = &self.emit {
            std::fs::write(path, render_properties(&plan))?;
            info!(path = %path.display(), "wrote signing properties");
        }

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&plan_json(&plan))?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_plan(&plan);
                    if let Some(path) = &self.emit {
                        output::success(&format!(
                            "Wrote signing properties to {}",
                            output::path_style().apply_to(path.display())
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

fn print_plan(plan: &SigningPlan) {
    let resolution = &plan.resolution;
    let presence = if resolution.properties_present {
        style("(found)").dim()
    } else {
        style("(missing)").yellow()
    };
    let properties = output::path_style().apply_to(resolution.properties_file.display());

    println!("{}", output::header("Signing Plan"));
    println!();
    let properties_line = format!("{} {}", properties, presence);
    println!("{}", output::key_value("Properties", &properties_line));
    if let Some(reason) = resolution.decision.reason() {
        let reason = reason.to_string();
        println!("{}", output::key_value("Release keystore", &reason));
    }
    println!();

    for build in &plan.build_types {
        let outcome = &build.outcome;
        let label = match outcome {
            SigningOutcome::Release { .. } => output::release_style().apply_to("release signing"),
            SigningOutcome::Debug { .. } => output::debug_style().apply_to("debug signing"),
        };
        let name = style(&build.name).bold();
        let keystore = output::path_style().apply_to(outcome.keystore().display());
        let store_password = output::secret_state(outcome.store_password());
        let key_password = output::secret_state(outcome.key_password());

        println!("{} {} ({})", name, label, build.policy);
        println!("{}", output::key_value("Keystore", &keystore.to_string()));
        println!("{}", output::key_value("Key alias", outcome.key_alias()));
        println!("{}", output::key_value("Store password", store_password));
        println!("{}", output::key_value("Key password", key_password));
        if let SigningOutcome::Debug { reason, .. } = outcome {
            output::warning(&format!(
                "{} falls back to the debug identity: {}",
                build.name, reason
            ));
        }
        println!();
    }
}

fn plan_json(plan: &SigningPlan) -> serde_json::Value {
    let resolution = &plan.resolution;
    serde_json::json!({
        "properties_file": resolution.properties_file.to_string_lossy(),
        "properties_present": resolution.properties_present,
        "candidate_dirs": resolution
            .candidate_dirs
            .iter()
            .map(|d| d.to_string_lossy().to_string())
            .collect::<Vec<_>>(),
        "release_available": resolution.decision.is_available(),
        "build_types": plan.build_types.iter().map(|b| {
            let reason = match &b.outcome {
                SigningOutcome::Debug { reason, .. } => Some(reason.code()),
                SigningOutcome::Release { .. } => None,
            };
            serde_json::json!({
                "name": b.name,
                "policy": b.policy.as_str(),
                "signing": b.outcome.kind(),
                "keystore": b.outcome.keystore().to_string_lossy(),
                "key_alias": b.outcome.key_alias(),
                "store_password_set": !b.outcome.store_password().is_empty(),
                "key_password_set": !b.outcome.key_password().is_empty(),
                "fallback_reason": reason,
            })
        }).collect::<Vec<_>>(),
    })
}

fn remove_stale_emit(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => info!(path = %path.display(), "removed stale signing properties"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "could not remove stale signing properties"
        ),
    }
}

const EMIT_HEADER: &str = "# Generated by keygate. Contains passwords, do not commit.\n";

/// Render the plan as `<buildType>.<key>=value` lines
fn render_properties(plan: &SigningPlan) -> String {
    let mut out = String::from(EMIT_HEADER);
    for build in &plan.build_types {
        let outcome = &build.outcome;
        let keystore = outcome.keystore().display().to_string();
        let entries = [
            ("signing", outcome.kind()),
            ("storeFile", keystore.as_str()),
            ("keyAlias", outcome.key_alias()),
            ("storePassword", outcome.store_password()),
            ("keyPassword", outcome.key_password()),
        ];
        for (key, value) in entries {
            out.push_str(&format!("{}.{}={}\n", build.name, key, value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use keygate_core::config::Config;
    use keygate_core::PropertyMap;
    use tempfile::TempDir;

    fn release_plan(temp: &TempDir) -> SigningPlan {
        std::fs::write(
            temp.path().join("key.properties"),
            "storeFile=release.jks\nkeyAlias=upload\nstorePassword=sp\nkeyPassword=kp\n",
        )
        .unwrap();
        std::fs::write(temp.path().join("release.jks"), "ks").unwrap();

        let config = Config::default();
        SigningPass::new(&config, temp.path(), PassOptions::default())
            .execute()
            .unwrap()
    }

    #[test]
    fn test_policy_arg_conversion() {
        assert_eq!(PolicyMode::from(PolicyArg::Strict), PolicyMode::Strict);
        assert_eq!(
            PolicyMode::from(PolicyArg::Permissive),
            PolicyMode::Permissive
        );
    }

    #[test]
    fn test_render_properties_reads_back() {
        let temp = TempDir::new().unwrap();
        let plan = release_plan(&temp);

        let props = PropertyMap::parse_str(&render_properties(&plan));
        assert_eq!(props.get("release.signing"), Some("release"));
        assert_eq!(props.get("release.keyAlias"), Some("upload"));
        assert_eq!(props.get("release.storePassword"), Some("sp"));
        assert!(props
            .get("release.storeFile")
            .is_some_and(|p| p.ends_with("release.jks")));
    }

    #[test]
    fn test_remove_stale_emit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("signing.properties");
        std::fs::write(&path, "release.signing=release\n").unwrap();

        remove_stale_emit(&path);
        assert!(!path.exists());

        // Nothing to remove is fine
        remove_stale_emit(&path);
        assert!(!path.exists());
    }

    #[test]
    fn test_plan_json_omits_passwords() {
        let temp = TempDir::new().unwrap();
        let plan = release_plan(&temp);

        let json = plan_json(&plan);
        let rendered = json.to_string();
        assert!(!rendered.contains("\"sp\""));
        assert!(!rendered.contains("\"kp\""));
        assert_eq!(json["build_types"][0]["signing"], "release");
        assert_eq!(json["build_types"][0]["store_password_set"], true);
        assert_eq!(json["release_available"], true);
    }
}
