//! `[sandbox]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sandbox]
//! endpoint = "https://deduce.vercel.app/deduce"   # POST target for `run`
//! contact = "jsiek@iu.edu"                        # shown when a run fails
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub endpoint: String,
    pub contact: String,
}

impl SandboxConfig {
    pub const ENDPOINT: FieldPath = FieldPath::new("sandbox.endpoint");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match url::Url::parse(&self.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => diag.error(
                Self::ENDPOINT,
                format!("unsupported scheme `{}`", url.scheme()),
            ),
            Err(e) => diag.error(Self::ENDPOINT, format!("invalid url: {e}")),
        }
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://deduce.vercel.app/deduce".into(),
            contact: "jsiek@iu.edu".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_sandbox_config() {
        let config = test_parse_config(
            "[sandbox]\nendpoint = \"http://localhost:3000/run\"\ncontact = \"a@b.c\"",
        );
        assert_eq!(config.sandbox.endpoint, "http://localhost:3000/run");
        assert_eq!(config.sandbox.contact, "a@b.c");
    }

    #[test]
    fn test_sandbox_validate() {
        let mut diag = ConfigDiagnostics::new();
        SandboxConfig::default().validate(&mut diag);
        assert!(diag.is_empty());

        for endpoint in ["not a url", "ftp://example.org/run"] {
            let mut diag = ConfigDiagnostics::new();
            let config = SandboxConfig {
                endpoint: endpoint.into(),
                ..Default::default()
            };
            config.validate(&mut diag);
            assert_eq!(diag.len(), 1, "{endpoint}");
        }
    }
}
