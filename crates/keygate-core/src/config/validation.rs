//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_properties_file(config)?;
    validate_candidate_dirs(config)?;
    validate_build_types(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_properties_file(config: &Config) -> Result<()> {
    if config.properties_file.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "properties_file".to_string(),
            message: "properties file path cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_candidate_dirs(config: &Config) -> Result<()> {
    if config.candidate_dirs.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "candidate_dirs".to_string(),
            message: "at least one candidate directory is required".to_string(),
        }
        .into());
    }

    for (i, dir) in config.candidate_dirs.iter().enumerate() {
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("candidate_dirs[{}]", i),
                message: "candidate directory cannot be empty (use \".\" for the project root)"
                    .to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_build_types(config: &Config) -> Result<()> {
    if config.build_types.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "build_types".to_string(),
            message: "at least one build type is required".to_string(),
        }
        .into());
    }

    debug!(count = config.build_types.len(), "validating build types");
    for name in config.build_types.keys() {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: format!("build_types.{}", name),
                message: "name must be non-empty with no whitespace".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildTypeConfig;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_properties_file() {
        let mut config = Config::default();
        config.properties_file = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_no_candidate_dirs() {
        let mut config = Config::default();
        config.candidate_dirs.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_candidate_dir() {
        let mut config = Config::default();
        config.candidate_dirs.push(PathBuf::new());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("candidate_dirs[2]"));
    }

    #[test]
    fn test_validate_no_build_types() {
        let mut config = Config::default();
        config.build_types.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_build_type_with_whitespace() {
        let mut config = Config::default();
        config
            .build_types
            .insert("staging release".to_string(), BuildTypeConfig::default());
        assert!(validate_config(&config).is_err());
    }
}
