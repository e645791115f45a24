//! Signing credentials read from a properties map

use std::fmt;

use crate::properties::PropertyMap;

/// Property key holding the key alias
pub const KEY_ALIAS: &str = "keyAlias";

/// Property key holding the key password
pub const KEY_PASSWORD: &str = "keyPassword";

/// Property key holding the keystore password
pub const STORE_PASSWORD: &str = "storePassword";

/// Property key holding the keystore path
pub const STORE_FILE: &str = "storeFile";

/// Release signing credentials as written in the properties file.
///
/// Every field falls back to an empty string when its key is missing.
/// `store_file` is the raw, unresolved path.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SigningCredentials {
    pub key_alias: String,
    pub key_password: String,
    pub store_password: String,
    pub store_file: String,
}

impl SigningCredentials {
    /// Read the four recognised keys from a properties map
    pub fn from_properties(props: &PropertyMap) -> Self {
        Self {
            key_alias: props.get_or_empty(KEY_ALIAS).to_string(),
            key_password: props.get_or_empty(KEY_PASSWORD).to_string(),
            store_password: props.get_or_empty(STORE_PASSWORD).to_string(),
            store_file: props.get_or_empty(STORE_FILE).to_string(),
        }
    }

    /// Whether a keystore path was given at all
    pub fn has_store_file(&self) -> bool {
        !self.store_file.is_empty()
    }

    /// Property keys whose values are blank, apart from `storeFile`.
    ///
    /// Blank credentials do not make signing unavailable; this is for
    /// reporting only.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            (KEY_ALIAS, &self.key_alias),
            (KEY_PASSWORD, &self.key_password),
            (STORE_PASSWORD, &self.store_password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("key_alias", &self.key_alias)
            .field("key_password", &redact(&self.key_password))
            .field("store_password", &redact(&self.store_password))
            .field("store_file", &self.store_file)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_properties_reads_all_keys() {
        let props = PropertyMap::parse_str(
            "keyAlias=upload\nkeyPassword=kp\nstorePassword=sp\nstoreFile=upload.jks\n",
        );
        let creds = SigningCredentials::from_properties(&props);

        assert_eq!(creds.key_alias, "upload");
        assert_eq!(creds.key_password, "kp");
        assert_eq!(creds.store_password, "sp");
        assert_eq!(creds.store_file, "upload.jks");
        assert!(creds.has_store_file());
        assert!(creds.blank_fields().is_empty());
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let creds = SigningCredentials::from_properties(&PropertyMap::default());

        assert_eq!(creds, SigningCredentials::default());
        assert!(!creds.has_store_file());
        assert_eq!(
            creds.blank_fields(),
            vec![KEY_ALIAS, KEY_PASSWORD, STORE_PASSWORD]
        );
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let props = PropertyMap::parse_str("keyPassword=topsecret\nstorePassword=alsosecret\n");
        let rendered = format!("{:?}", SigningCredentials::from_properties(&props));

        assert!(!rendered.contains("topsecret"));
        assert!(!rendered.contains("alsosecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
