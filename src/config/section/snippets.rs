//! `[snippets]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [snippets]
//! source = "https://example.org/deduce-code"   # or a directory
//! extension = "pf"                              # block files are <id>.pf
//! blocks = ["intro", "lists"]                   # default: every file in a local source
//! strip_imports = true                          # hide leading imports
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetsConfig {
    /// Directory (relative to the project root) or http(s) base URL.
    pub source: String,

    /// File extension of raw blocks, without the dot.
    pub extension: String,

    /// Block ids rendered when none are given on the command line.
    pub blocks: Vec<String>,

    /// Drop leading `import` lines before rendering.
    pub strip_imports: bool,
}

impl SnippetsConfig {
    pub const SOURCE: FieldPath = FieldPath::new("snippets.source");
    pub const EXTENSION: FieldPath = FieldPath::new("snippets.extension");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.source.trim().is_empty() {
            diag.error(Self::SOURCE, "must not be empty");
        }

        if self.extension.is_empty() {
            diag.error(Self::EXTENSION, "must not be empty");
        } else if let Some(bare) = self.extension.strip_prefix('.') {
            diag.error_with_hint(
                Self::EXTENSION,
                "must not start with `.`",
                format!("use `extension = \"{bare}\"`"),
            );
        }
    }
}

impl Default for SnippetsConfig {
    fn default() -> Self {
        Self {
            source: "deduce-code".into(),
            extension: "pf".into(),
            blocks: Vec::new(),
            strip_imports: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_snippets_config() {
        let config = test_parse_config(
            "[snippets]\nsource = \"https://example.org/code\"\nextension = \"ded\"\nblocks = [\"a\", \"b\"]\nstrip_imports = false",
        );

        assert_eq!(config.snippets.source, "https://example.org/code");
        assert_eq!(config.snippets.extension, "ded");
        assert_eq!(config.snippets.blocks, ["a", "b"]);
        assert!(!config.snippets.strip_imports);
    }

    #[test]
    fn test_snippets_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.snippets.source, "deduce-code");
        assert_eq!(config.snippets.extension, "pf");
        assert!(config.snippets.blocks.is_empty());
        assert!(config.snippets.strip_imports);
    }

    #[test]
    fn test_snippets_validate_extension() {
        let mut diag = ConfigDiagnostics::new();
        let config = SnippetsConfig {
            extension: ".pf".into(),
            ..Default::default()
        };
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].hint.as_deref(), Some("use `extension = \"pf\"`"));

        let mut diag = ConfigDiagnostics::new();
        let config = SnippetsConfig {
            extension: String::new(),
            source: " ".into(),
            ..Default::default()
        };
        config.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}
