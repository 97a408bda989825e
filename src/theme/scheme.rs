//! Site colour schemes.
//!
//! Each scheme assigns a colour to every CSS variable in [`VARIABLES`]; the
//! highlighter's span classes (`keyword`, `operator`, `type`, `prim`,
//! `comment`) are styled through the variables of the same name.

use std::fmt::Write;

/// CSS custom properties set by every scheme, in declaration order.
pub const VARIABLES: [&str; 13] = [
    "background",
    "foreground",
    "hover-bg",
    "keyword",
    "operator",
    "type",
    "prim",
    "comment",
    "import",
    "union",
    "function",
    "theorem",
    "constructor",
];

/// A named colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub name: &'static str,
    /// Output panel of the sandbox gets light text.
    pub dark: bool,
    /// Background of the sandbox output panel.
    pub sandbox_background: &'static str,
    /// One colour per entry of [`VARIABLES`].
    colors: [&'static str; 13],
}

pub const SCHEMES: [ColorScheme; 5] = [
    ColorScheme {
        name: "deduce-dark",
        dark: true,
        sandbox_background: "#202022",
        colors: [
            "#202022", "#fa7188", "#4e3c63", "#e9cc60", "#cfd6e3", "#b689fe", "#f18bea",
            "#999999", "#b689fe", "#b689fe", "#67bef9", "#67bef9", "#67bef9",
        ],
    },
    ColorScheme {
        name: "deduce",
        dark: false,
        sandbox_background: "#fefef8",
        colors: [
            "#fefef8", "#2e2d31", "pink", "#d85311", "#2e2d31", "#0f95af", "#9329ab",
            "#666666", "#0f95af", "#0f95af", "#c553e9", "#c553e9", "#c553e9",
        ],
    },
    ColorScheme {
        name: "vs-dark",
        dark: true,
        sandbox_background: "#1e1e1e",
        colors: [
            "#1e1e1e", "#d4d4d4", "#4e3c63", "#c586c0", "#d4d4d4", "#569cd6", "#b5ce9f",
            "#da9955", "#569cd6", "#569cd6", "#9cdcf3", "#9cdcf3", "#9cdcf3",
        ],
    },
    ColorScheme {
        name: "vs",
        dark: false,
        sandbox_background: "#fffffe",
        colors: [
            "#fff", "#000", "pink", "#0000ff", "#000", "#0000ff", "#098658", "#008000",
            "#0000ff", "#0000ff", "#0000ff", "#0000ff", "#0000ff",
        ],
    },
    ColorScheme {
        name: "hc-black",
        dark: true,
        sandbox_background: "#000",
        colors: [
            "#000", "#fff", "black", "#c586c0", "#d4d4d4", "#569cd6", "#b5ce9f", "#da9955",
            "#569cd6", "#569cd6", "#9cdcf3", "#9cdcf3", "#9cdcf3",
        ],
    },
];

impl ColorScheme {
    pub fn by_name(name: &str) -> Option<&'static Self> {
        SCHEMES.iter().find(|s| s.name == name)
    }

    pub fn names() -> Vec<&'static str> {
        SCHEMES.iter().map(|s| s.name).collect()
    }

    /// Colour of one CSS variable (without the leading `--`).
    pub fn color(&self, variable: &str) -> Option<&'static str> {
        VARIABLES
            .iter()
            .position(|v| *v == variable)
            .map(|i| self.colors[i])
    }

    /// `(variable, colour)` pairs in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        VARIABLES.iter().copied().zip(self.colors.iter().copied())
    }

    /// The scheme as a `:root` block of custom properties.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (variable, color) in self.variables() {
            let _ = writeln!(css, "  --{variable}: {color};");
        }
        css.push_str("}\n");
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(ColorScheme::names(), ["deduce-dark", "deduce", "vs-dark", "vs", "hc-black"]);
        assert!(ColorScheme::by_name("solarized").is_none());

        let dark = ColorScheme::by_name("deduce-dark").unwrap();
        assert_eq!(dark.color("keyword"), Some("#e9cc60"));
        assert_eq!(dark.color("hover-bg"), Some("#4e3c63"));
        assert_eq!(dark.color("--keyword"), None);
    }

    #[test]
    fn test_dark_flags() {
        let dark: Vec<_> = SCHEMES.iter().filter(|s| s.dark).map(|s| s.name).collect();
        assert_eq!(dark, ["deduce-dark", "vs-dark", "hc-black"]);
    }

    #[test]
    fn test_to_css() {
        let css = ColorScheme::by_name("vs").unwrap().to_css();
        assert!(css.starts_with(":root {\n  --background: #fff;\n  --foreground: #000;\n"));
        assert!(css.ends_with("  --constructor: #0000ff;\n}\n"));
        assert_eq!(css.lines().count(), VARIABLES.len() + 2);
    }
}
