//! Default configuration values

use super::types::Config;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "keygate.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "keygate.yaml";

/// Default properties file name, as read by Gradle builds
pub const DEFAULT_PROPERTIES_FILE: &str = "key.properties";

/// Module directory first, then the project root
pub const DEFAULT_CANDIDATE_DIRS: &[&str] = &["app", "."];

/// Build type configured out of the box
pub const DEFAULT_BUILD_TYPE: &str = "release";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".keygate.toml",
        ".keygate.yaml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Generate default configuration YAML
pub fn default_config_yaml() -> String {
    serde_yaml::to_string(&Config::default()).unwrap_or_default()
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Keygate Configuration

# Properties file with keyAlias, keyPassword, storeFile and storePassword,
# relative to this file's directory
properties_file = "key.properties"

# Directories searched for a relative storeFile, first match wins
candidate_dirs = ["app", "."]

# Identity used when a permissive build type has no release keystore
[debug_identity]
key_alias = "androiddebugkey"
store_password = "android"
key_password = "android"

# strict: fail the build when release signing is missing
# permissive: sign with the debug identity instead
[build_types.release]
policy = "strict"
"#;

/// Template for a new properties file
pub const PROPERTIES_TEMPLATE: &str = r#"# Release signing configuration. Do not commit this file.
storePassword=
keyPassword=
keyAlias=upload
storeFile=upload-keystore.jks
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyMap;

    #[test]
    fn test_template_parses_to_default() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let default = Config::default();
        assert_eq!(config.properties_file, default.properties_file);
        assert_eq!(config.candidate_dirs, default.candidate_dirs);
        assert_eq!(config.build_types, default.build_types);
    }

    #[test]
    fn test_generated_toml_parses() {
        let config: Config = toml::from_str(&default_config_toml()).unwrap();
        assert_eq!(config.build_type_names(), vec![DEFAULT_BUILD_TYPE]);
    }

    #[test]
    fn test_generated_yaml_parses() {
        let config: Config = serde_yaml::from_str(&default_config_yaml()).unwrap();
        assert_eq!(config.candidate_dirs, Config::default().candidate_dirs);
        assert_eq!(config.build_type_names(), vec![DEFAULT_BUILD_TYPE]);
    }

    #[test]
    fn test_properties_template() {
        let props = PropertyMap::parse_str(PROPERTIES_TEMPLATE);
        assert_eq!(props.get("storeFile"), Some("upload-keystore.jks"));
        assert_eq!(props.get("storePassword"), Some(""));
    }
}
