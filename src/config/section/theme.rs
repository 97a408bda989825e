//! `[theme]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [theme]
//! default = "deduce"                          # used when no theme cookie is set
//! cookie_days = 1                             # cookie lifetime
//! sections = ["thm-details", "pf-details"]    # collapsible sections with a cookie
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::theme::ColorScheme;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Scheme name used when the request carries no theme cookie.
    pub default: String,

    /// Lifetime of the theme and section cookies, in days.
    pub cookie_days: u32,

    /// Ids of collapsible page sections whose open state is remembered.
    pub sections: Vec<String>,
}

impl ThemeConfig {
    pub const DEFAULT: FieldPath = FieldPath::new("theme.default");
    pub const COOKIE_DAYS: FieldPath = FieldPath::new("theme.cookie_days");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if ColorScheme::by_name(&self.default).is_none() {
            diag.error_with_hint(
                Self::DEFAULT,
                format!("unknown theme `{}`", self.default),
                format!("use one of: {}", ColorScheme::names().join(", ")),
            );
        }

        if self.cookie_days == 0 {
            diag.error(Self::COOKIE_DAYS, "must be at least 1");
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: "deduce".into(),
            cookie_days: 1,
            sections: vec!["thm-details".into(), "pf-details".into()],
        }
    }
}
