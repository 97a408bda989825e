//! Registration data for the embedded code editor.
//!
//! The sandbox editor tokenizes Deduce with its own tables; they are
//! generated from the same [`Grammar`] the highlighter uses so both agree
//! on what a keyword is. Serialized as JSON in the shape the editor's
//! language and theme registration calls expect.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{ColorScheme, SCHEMES};
use crate::highlight::Grammar;

pub const LANGUAGE_ID: &str = "deduce";

/// Editor themes derived from site schemes: `(scheme, base theme, token background)`.
const EDITOR_THEMES: [(&str, &str, &str); 2] = [
    ("deduce-dark", "vs-dark", "1e1e1e"),
    ("deduce", "vs", "fefef8"),
];

const LINE_HIGHLIGHT: &str = "#D7D7D708";

/// Token category tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTable {
    pub keywords: Vec<String>,
    pub type_keywords: Vec<String>,
    pub operators: Vec<String>,
    pub defines: Vec<String>,
    pub prims: Vec<String>,
    pub prim_symbols: Vec<String>,
}

impl TokenTable {
    pub fn from_grammar(grammar: &Grammar) -> Self {
        Self {
            keywords: grammar.keywords.clone(),
            type_keywords: grammar.types.clone(),
            operators: grammar.operators.clone(),
            defines: grammar.defines.clone(),
            // the editor matches whole words; regex fragments like `[0-9]+` are
            // covered by its own number rule
            prims: grammar
                .prims
                .iter()
                .filter(|p| p.chars().all(|c| c.is_alphanumeric() || c == '_'))
                .cloned()
                .collect(),
            prim_symbols: grammar.prim_symbols.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRule {
    pub token: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl TokenRule {
    fn foreground(token: &'static str, color: &str) -> Self {
        Self {
            token,
            foreground: Some(color.trim_start_matches('#').to_string()),
            background: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorTheme {
    pub base: &'static str,
    pub inherit: bool,
    pub rules: Vec<TokenRule>,
    pub colors: BTreeMap<&'static str, String>,
}

impl EditorTheme {
    /// Map editor token kinds onto a site scheme's colours.
    fn from_scheme(scheme: &ColorScheme, base: &'static str, token_background: &str) -> Self {
        let color = |variable: &str| scheme.color(variable).unwrap_or_default();

        let rules = vec![
            TokenRule {
                token: "",
                foreground: None,
                background: Some(token_background.to_string()),
            },
            TokenRule::foreground("keyword", color("keyword")),
            TokenRule::foreground("typeKeyword", color("type")),
            TokenRule::foreground("operator", color("operator")),
            TokenRule::foreground("brackets", color("operator")),
            TokenRule::foreground("number", color("prim")),
            TokenRule::foreground("primitive", color("prim")),
            TokenRule::foreground("comment", color("comment")),
            TokenRule::foreground("defined", color("function")),
            TokenRule::foreground("identifier", color("foreground")),
        ];

        let colors = BTreeMap::from([
            ("editor.background", color("background").to_string()),
            ("editor.lineHighlightBackground", LINE_HIGHLIGHT.to_string()),
        ]);

        Self {
            base,
            inherit: false,
            rules,
            colors,
        }
    }
}

/// Everything the sandbox page needs to set up the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorRegistration {
    pub language: &'static str,
    pub tokens: TokenTable,
    pub themes: BTreeMap<&'static str, EditorTheme>,
    /// Output panel background per scheme.
    pub backgrounds: BTreeMap<&'static str, &'static str>,
    pub dark_themes: Vec<&'static str>,
}

impl EditorRegistration {
    pub fn new(grammar: &Grammar) -> Self {
        let themes = EDITOR_THEMES
            .iter()
            .filter_map(|(name, base, background)| {
                ColorScheme::by_name(name)
                    .map(|scheme| (*name, EditorTheme::from_scheme(scheme, base, background)))
            })
            .collect();

        Self {
            language: LANGUAGE_ID,
            tokens: TokenTable::from_grammar(grammar),
            themes,
            backgrounds: SCHEMES
                .iter()
                .map(|s| (s.name, s.sandbox_background))
                .collect(),
            dark_themes: SCHEMES.iter().filter(|s| s.dark).map(|s| s.name).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> EditorRegistration {
        EditorRegistration::new(&Grammar::deduce())
    }

    fn rule<'a>(theme: &'a EditorTheme, token: &str) -> &'a TokenRule {
        theme.rules.iter().find(|r| r.token == token).unwrap()
    }

    #[test]
    fn test_token_table_from_grammar() {
        let tokens = registration().tokens;
        assert!(tokens.keywords.iter().any(|k| k == "theorem"));
        assert!(tokens.type_keywords.iter().any(|t| t == "Nat"));
        assert_eq!(tokens.prims, ["true", "false", "empty"]);
        assert_eq!(tokens.prim_symbols, ["∅", "[0]", "?"]);
    }

    #[test]
    fn test_dark_editor_theme() {
        let reg = registration();
        let dark = &reg.themes["deduce-dark"];

        assert_eq!(dark.base, "vs-dark");
        assert_eq!(rule(dark, "keyword").foreground.as_deref(), Some("e9cc60"));
        assert_eq!(rule(dark, "typeKeyword").foreground.as_deref(), Some("b689fe"));
        assert_eq!(rule(dark, "defined").foreground.as_deref(), Some("67bef9"));
        assert_eq!(rule(dark, "identifier").foreground.as_deref(), Some("fa7188"));
        assert_eq!(rule(dark, "").background.as_deref(), Some("1e1e1e"));
        assert_eq!(dark.colors["editor.background"], "#202022");
    }

    #[test]
    fn test_light_editor_theme() {
        let reg = registration();
        let light = &reg.themes["deduce"];

        assert_eq!(light.base, "vs");
        assert_eq!(rule(light, "keyword").foreground.as_deref(), Some("d85311"));
        assert_eq!(rule(light, "number").foreground.as_deref(), Some("9329ab"));
        assert_eq!(light.colors["editor.lineHighlightBackground"], "#D7D7D708");
    }

    #[test]
    fn test_backgrounds_and_dark_themes() {
        let reg = registration();
        assert_eq!(reg.backgrounds["vs"], "#fffffe");
        assert_eq!(reg.backgrounds["deduce-dark"], "#202022");
        assert_eq!(reg.dark_themes, ["deduce-dark", "vs-dark", "hc-black"]);
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&registration().to_json().unwrap()).unwrap();
        assert_eq!(json["language"], "deduce");
        assert!(json["tokens"]["typeKeywords"].is_array());
        assert!(json["tokens"]["primSymbols"].is_array());
        assert!(json["darkThemes"].is_array());
        // background-only rule carries no foreground key
        assert!(json["themes"]["deduce"]["rules"][0].get("foreground").is_none());
    }
}
