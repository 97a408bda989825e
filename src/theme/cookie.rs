//! Theme and section state persisted in cookies.
//!
//! ```text
//! Cookie: theme=vs-dark; thm-details=false
//!            │                 └── section closed (missing = open)
//!            └── colour scheme (missing = configured default)
//! ```

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;

use super::ColorScheme;
use crate::config::ThemeConfig;
use crate::utils::date::DateTimeUtc;

pub const THEME_COOKIE: &str = "theme";

const SECS_PER_DAY: u64 = 86_400;

/// Theme choice plus the open state of each collapsible section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePreference {
    pub theme: String,
    pub sections: BTreeMap<String, bool>,
}

impl ThemePreference {
    /// Resolve the preference carried by a `Cookie` request header.
    ///
    /// Empty or missing values fall back to the defaults: the configured
    /// theme, and open for every configured section. A theme cookie naming
    /// an unknown scheme also falls back.
    pub fn from_cookie_header(header: &str, config: &ThemeConfig) -> Self {
        let theme = get_cookie(header, THEME_COOKIE)
            .filter(|name| ColorScheme::by_name(name).is_some())
            .unwrap_or_else(|| config.default.clone());

        let sections = config
            .sections
            .iter()
            .map(|id| {
                let open = get_cookie(header, id).is_none_or(|value| value == "true");
                (id.clone(), open)
            })
            .collect();

        Self { theme, sections }
    }

    /// Missing sections are open.
    pub fn is_open(&self, section: &str) -> bool {
        self.sections.get(section).copied().unwrap_or(true)
    }

    pub fn scheme(&self) -> Option<&'static ColorScheme> {
        ColorScheme::by_name(&self.theme)
    }

    /// `Set-Cookie` values for the theme and every section, expiring
    /// `days` after `now` (Unix seconds).
    pub fn set_cookies(&self, days: u32, now: u64) -> Vec<String> {
        std::iter::once(set_cookie(THEME_COOKIE, &self.theme, days, now))
            .chain(
                self.sections
                    .iter()
                    .map(|(id, open)| set_cookie(id, if *open { "true" } else { "false" }, days, now)),
            )
            .collect()
    }
}

/// Value of the first cookie named `name`, percent-decoded.
/// Empty values count as absent.
pub fn get_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim_start().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value.trim_end()).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

/// `name=value; expires=<date>; path=/`
pub fn set_cookie(name: &str, value: &str, days: u32, now: u64) -> String {
    let expires = DateTimeUtc::from_unix(now + u64::from(days) * SECS_PER_DAY);
    format!("{name}={value}; expires={}; path=/", expires.to_rfc2822())
}
