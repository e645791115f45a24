//! Permissive `key=value` properties loading
//!
//! Reads files such as Gradle's `key.properties`:
//!
//! ```text
//! # release keystore
//! storeFile=release.jks
//! storePassword=hunter2
//! ```
//!
//! Lines whose first non-blank character is `#` are comments. Lines without
//! an `=` are ignored. Everything else is split on the first `=`, and both
//! halves are trimmed. A missing file yields an empty map.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::debug;

use crate::error::PropertiesError;

/// Parsed properties, keyed by name. Later duplicates win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: HashMap<String, String>,
}

impl PropertyMap {
    /// Load a properties file.
    ///
    /// A file that does not exist is not an error: it produces an empty map,
    /// meaning nothing custom is configured. Any other failure to open or
    /// read the file is returned as [`PropertiesError::Read`].
    pub fn load(path: &Path) -> Result<Self, PropertiesError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "properties file absent");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(PropertiesError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        debug!(path = %path.display(), "loading properties file");
        Self::parse(BufReader::new(file)).map_err(|source| PropertiesError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse properties from any buffered reader.
    pub fn parse<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut props = Self::default();
        for line in reader.lines() {
            props.insert_line(&line?);
        }

        debug!(entries = props.len(), "properties parsed");
        Ok(props)
    }

    /// Parse properties from an in-memory string.
    pub fn parse_str(content: &str) -> Self {
        let mut props = Self::default();
        for line in content.lines() {
            props.insert_line(line);
        }
        props
    }

    fn insert_line(&mut self, line: &str) {
        let Some((key, value)) = parse_line(line) else {
            return;
        };
        // Values are never logged, they are usually passwords
        if self
            .entries
            .insert(key.to_string(), value.to_string())
            .is_some()
        {
            debug!(key, "duplicate property overrides earlier value");
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get a value by key, or an empty string when absent
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Split one line into a trimmed key and value, or `None` when the line
/// is a comment or has no `=`.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    if line.trim_start().starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic_entries() {
        let props = PropertyMap::parse_str(
            "storePassword=secret\nkeyPassword=secret2\nkeyAlias=upload\nstoreFile=upload.jks\n",
        );

        assert_eq!(props.len(), 4);
        assert_eq!(props.get("storeFile"), Some("upload.jks"));
        assert_eq!(props.get("keyAlias"), Some("upload"));
    }

    #[test]
    fn test_parse_skips_comments_and_lines_without_equals() {
        let props = PropertyMap::parse_str(
            "# comment=ignored\n   # indented=comment\n\njust some text\nkeyAlias=upload\n",
        );

        assert_eq!(props.len(), 1);
        assert_eq!(props.get("keyAlias"), Some("upload"));
        assert!(props.get("# comment").is_none());
    }

    #[test]
    fn test_parse_splits_on_first_equals_only() {
        let props = PropertyMap::parse_str("storePassword=a=b==c\n");
        assert_eq!(props.get("storePassword"), Some("a=b==c"));
    }

    #[test]
    fn test_parse_trims_key_and_value() {
        let props = PropertyMap::parse_str("  keyAlias \t=  upload key  \r\n");
        assert_eq!(props.get("keyAlias"), Some("upload key"));
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let props = PropertyMap::parse_str("a=1\na=2");
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("a"), Some("2"));
    }

    #[test]
    fn test_hash_inside_value_is_kept() {
        let props = PropertyMap::parse_str("storePassword=abc#123\n");
        assert_eq!(props.get("storePassword"), Some("abc#123"));
    }

    #[test]
    fn test_unrecognized_keys_are_preserved() {
        let props = PropertyMap::parse_str("storeFile=a.jks\nflavor=prod\n");
        assert_eq!(props.get("flavor"), Some("prod"));
    }

    #[test]
    fn test_parse_reader_matches_parse_str() {
        let content = "# header\nkeyAlias=upload\nstoreFile = ks/upload.jks\n";
        let from_reader = PropertyMap::parse(Cursor::new(content)).unwrap();
        assert_eq!(from_reader, PropertyMap::parse_str(content));
    }

    #[test]
    fn test_parse_reader_invalid_utf8_is_error() {
        let bytes: &[u8] = b"keyAlias=\xff\xfe\n";
        assert!(PropertyMap::parse(Cursor::new(bytes)).is_err());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let props = PropertyMap::load(&temp.path().join("key.properties")).unwrap();
        assert!(props.is_empty());
    }

    #[test]
    fn test_load_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.properties");
        std::fs::write(&path, "storeFile=release.jks\nkeyAlias=release\n").unwrap();

        let props = PropertyMap::load(&path).unwrap();
        assert_eq!(props.get("storeFile"), Some("release.jks"));
        assert_eq!(props.get("keyAlias"), Some("release"));
    }

    #[test]
    fn test_load_unreadable_source_is_error() {
        // A directory exists but cannot be read as a text file
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.properties");
        std::fs::create_dir(&path).unwrap();

        let err = PropertyMap::load(&path).unwrap_err();
        assert!(matches!(err, PropertiesError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_utf8_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.properties");
        std::fs::write(&path, b"storeFile=\xc3\x28\n").unwrap();

        assert!(PropertyMap::load(&path).is_err());
    }

    #[test]
    fn test_iter_and_missing_keys() {
        let props = PropertyMap::parse_str("storeFile=a.jks\nkeyAlias=a\n");
        let mut keys: Vec<&str> = props.iter().map(|(key, _)| key).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["keyAlias", "storeFile"]);
        assert_eq!(props.get_or_empty("storeFile"), "a.jks");
        assert_eq!(props.get_or_empty("storePassword"), "");
    }

    proptest! {
        #[test]
        fn prop_well_formed_lines_round_trip(
            key in "[A-Za-z_][A-Za-z0-9_.]{0,15}",
            value in "[A-Za-z0-9_./=#:-]{0,24}",
            lead in "[ \t]{0,3}",
            pad in "[ \t]{0,3}",
        ) {
            let line = format!("{lead}{key}{pad}={pad}{value}{pad}\n");
            let props = PropertyMap::parse_str(&line);
            prop_assert_eq!(props.len(), 1);
            prop_assert_eq!(props.get(&key), Some(value.as_str()));
        }

        #[test]
        fn prop_comment_lines_never_contribute(body in "[A-Za-z0-9=_ ]{0,30}") {
            let props = PropertyMap::parse_str(&format!("  #{body}\n"));
            prop_assert!(props.is_empty());
        }
    }
}
