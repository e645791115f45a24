//! Core types for Keygate

use serde::{Deserialize, Serialize};

/// What to do when release signing is unavailable for a build type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    /// Abort the pass; never fall back to the debug identity
    #[default]
    Strict,
    /// Sign with the debug identity instead
    Permissive,
}

impl PolicyMode {
    /// Returns the string representation of the policy mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Permissive => "permissive",
        }
    }

    /// Whether a debug fallback is allowed
    pub fn allows_debug_fallback(&self) -> bool {
        matches!(self, Self::Permissive)
    }
}

impl std::fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PolicyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            _ => Err(format!("Unknown policy mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_mode_display() {
        assert_eq!(PolicyMode::Strict.to_string(), "strict");
        assert_eq!(PolicyMode::Permissive.to_string(), "permissive");
    }

    #[test]
    fn test_policy_mode_from_str() {
        assert_eq!("strict".parse::<PolicyMode>().unwrap(), PolicyMode::Strict);
        assert_eq!(
            "PERMISSIVE".parse::<PolicyMode>().unwrap(),
            PolicyMode::Permissive
        );
        assert!("lenient".parse::<PolicyMode>().is_err());
    }

    #[test]
    fn test_policy_mode_fallback() {
        assert!(!PolicyMode::Strict.allows_debug_fallback());
        assert!(PolicyMode::Permissive.allows_debug_fallback());
    }
}
