//! Missing-value handling for medal counts

use serde::{Serialize, Deserialize};

/// Cell contents that mean "no count"; such cells read as zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullConfig {
    /// Patterns to treat as missing
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                String::new(),
                "-".to_string(),
                "N/A".to_string(),
                "NA".to_string(),
                "null".to_string(),
                "None".to_string(),
            ],
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Check if a cell should be treated as missing
    pub fn is_null(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// Parse a medal count. Missing cells give `Some(0)`, anything else that
    /// is not a non-negative integer gives `None`.
    pub fn parse_count(&self, value: &str) -> Option<u32> {
        if self.is_null(value) {
            return Some(0);
        }
        value.trim().parse::<u32>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_counts_read_as_zero() {
        let config = NullConfig::default();
        assert_eq!(config.parse_count(""), Some(0));
        assert_eq!(config.parse_count("  "), Some(0));
        assert_eq!(config.parse_count("n/a"), Some(0));
        assert_eq!(config.parse_count("-"), Some(0));
        assert_eq!(config.parse_count(" 12 "), Some(12));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let config = NullConfig::default();
        assert_eq!(config.parse_count("twelve"), None);
        assert_eq!(config.parse_count("-3"), None);
        assert_eq!(config.parse_count("1.5"), None);
    }

    #[test]
    fn test_case_sensitive_patterns() {
        let config = NullConfig {
            patterns: vec!["NULL".to_string()],
            trim_whitespace: false,
            case_sensitive: true,
        };
        assert!(config.is_null("NULL"));
        assert!(!config.is_null("null"));
        assert!(!config.is_null(" NULL"));
    }
}
