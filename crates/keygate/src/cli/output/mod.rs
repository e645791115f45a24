//! Output formatting utilities

use console::{style, Style};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Style for release signing
pub fn release_style() -> Style {
    Style::new().green().bold()
}

/// Style for debug fallback signing
pub fn debug_style() -> Style {
    Style::new().yellow().bold()
}

/// Render a password as set or unset, never its value
pub fn secret_state(value: &str) -> &'static str {
    if value.is_empty() {
        "(empty)"
    } else {
        "(set)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_state_hides_value() {
        assert_eq!(secret_state(""), "(empty)");
        assert_eq!(secret_state("hunter2"), "(set)");
    }

    #[test]
    fn test_key_value_contains_both_parts() {
        let line = key_value("Keystore", "app/upload.jks");
        assert!(line.contains("Keystore"));
        assert!(line.contains("app/upload.jks"));
    }
}
