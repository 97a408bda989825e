//! Config field paths.

use owo_colors::OwoColorize;
use std::fmt;

/// Dotted path of a field in `deduce.toml`, e.g. `theme.cookie_days`.
///
/// Sections expose their fields as associated constants so diagnostics
/// never spell paths by hand:
///
/// ```ignore
/// impl ThemeConfig {
///     pub const COOKIE_DAYS: FieldPath = FieldPath::new("theme.cookie_days");
/// }
///
/// diag.error(ThemeConfig::COOKIE_DAYS, "must be at least 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}
