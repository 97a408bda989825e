//! The substitution pipeline turning raw source into highlighted markup.
//!
//! Passes run in a fixed order over the whole text, each wrapping every
//! match of its pattern in `<span class="...">`:
//!
//! ```text
//! comment → operator → prim → type → keyword → defines
//! ```
//!
//! A later pass is not excluded from text an earlier pass already wrapped,
//! so nested spans are expected output (a `//` inside a comment comes out
//! as operator spans inside the comment span; a discovered `List` inside
//! the type span). Keep the order: the nesting is part of the output
//! format the site's stylesheets are written against.

use std::collections::BTreeSet;

use regex::Regex;

use super::discover::discover_identifiers;
use super::entity::{escape_source, numeric_references};
use super::grammar::Grammar;
use super::pattern::{self, compile, either};
use super::HighlightError;

/// Stands in for spaces while the passes run (private use area).
const SPACE_SENTINEL: char = '\u{E000}';

/// Lexical category of a run of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Comment,
    Operator,
    Primitive,
    Type,
    Keyword,
    UserDefined,
    Plain,
}

impl Category {
    /// Wrapping categories in pass order.
    #[cfg(test)]
    pub const PASS_ORDER: [Self; 6] = [
        Self::Comment,
        Self::Operator,
        Self::Primitive,
        Self::Type,
        Self::Keyword,
        Self::UserDefined,
    ];

    /// CSS class used in the generated markup (`None` for plain text).
    #[cfg(test)]
    pub const fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Comment => Some("comment"),
            Self::Operator => Some("operator"),
            Self::Primitive => Some("prim"),
            Self::Type => Some("type"),
            Self::Keyword => Some("keyword"),
            Self::UserDefined => Some("defines"),
            Self::Plain => None,
        }
    }

    const fn replacement(self) -> &'static str {
        match self {
            Self::Comment => r#"<span class="comment">${0}</span>"#,
            Self::Operator => r#"<span class="operator">${0}</span>"#,
            Self::Primitive => r#"<span class="prim">${0}</span>"#,
            Self::Type => r#"<span class="type">${0}</span>"#,
            Self::Keyword => r#"<span class="keyword">${0}</span>"#,
            Self::UserDefined => r#"<span class="defines">${0}</span>"#,
            Self::Plain => "${0}",
        }
    }
}

/// Compiled passes for one grammar.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Comment through keyword passes, in order.
    passes: Vec<(Category, Regex)>,
    /// Static defines; combined with discovered names on each render.
    defines: String,
    defines_static: Regex,
}

impl Classifier {
    /// Compile the grammar's pass patterns.
    pub fn new(grammar: Grammar) -> Result<Self, HighlightError> {
        let comment = pattern::raw_alternation(grammar.comments.iter().map(String::as_str));
        let operator = pattern::symbol_alternation(grammar.operators.iter().map(String::as_str));
        let prim = either(
            pattern::word_alternation(grammar.prims.iter().map(String::as_str)),
            pattern::symbol_alternation(grammar.prim_symbols.iter().map(String::as_str)),
        );
        let types = pattern::literal_words(grammar.type_names());
        let keyword = pattern::literal_words(grammar.keywords.iter().map(String::as_str));
        let defines = pattern::literal_words(grammar.defines.iter().map(String::as_str));

        let passes = vec![
            (Category::Comment, compile("comment", &comment)?),
            (Category::Operator, compile("operator", &operator)?),
            (Category::Primitive, compile("prim", &prim)?),
            (Category::Type, compile("type", &types)?),
            (Category::Keyword, compile("keyword", &keyword)?),
        ];
        let defines_static = compile("defines", &defines)?;

        Ok(Self {
            passes,
            defines,
            defines_static,
        })
    }

    /// Classifier for the built-in Deduce grammar.
    #[cfg(test)]
    pub fn deduce() -> Self {
        Self::new(Grammar::deduce()).unwrap()
    }

    /// Render raw source as highlighted markup.
    ///
    /// Never fails: any text is valid input. Output is a pure function of
    /// the input and the grammar.
    pub fn render(&self, raw: &str) -> String {
        let discovered = discover_identifiers(raw);

        let code = raw.strip_prefix('\n').unwrap_or(raw);
        // a literal sentinel would come out as `&nbsp;`
        let mut code = escape_source(code)
            .replace(SPACE_SENTINEL, "")
            .replace('\t', "    ")
            .replace(' ', &SPACE_SENTINEL.to_string());

        for (category, re) in &self.passes {
            code = wrap(re, &code, *category);
        }
        code = match self.defines_pass(&discovered) {
            Some(re) => wrap(&re, &code, Category::UserDefined),
            None => wrap(&self.defines_static, &code, Category::UserDefined),
        };

        let code = code
            .replace('\n', "<br>\n")
            .replace(SPACE_SENTINEL, "&nbsp;");

        numeric_references(&code).into_owned()
    }

    /// Static defines plus discovered names, or `None` when nothing was
    /// discovered (the static pattern is reused).
    fn defines_pass(&self, discovered: &BTreeSet<String>) -> Option<Regex> {
        if discovered.is_empty() {
            return None;
        }

        let names = pattern::literal_words(discovered.iter().map(String::as_str));
        match compile("defines", &either(self.defines.clone(), names)) {
            Ok(re) => Some(re),
            Err(e) => {
                crate::debug!("highlight"; "discovered names ignored: {}", e);
                None
            }
        }
    }
}

#[inline]
fn wrap(re: &Regex, text: &str, category: Category) -> String {
    re.replace_all(text, category.replacement()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> String {
        Classifier::deduce().render(source)
    }

    /// Drop generated tags, leaving only the text content.
    fn strip_tags(markup: &str) -> String {
        Regex::new(r"<[^<>]*>")
            .unwrap()
            .replace_all(markup, "")
            .into_owned()
    }

    #[test]
    fn test_deduce_grammar_compiles() {
        assert!(Classifier::new(Grammar::deduce()).is_ok());
    }

    #[test]
    fn test_render_is_idempotent() {
        let source = "union List<T> {\n  empty\n  node(T, List<T>)\n}\n// done\n";
        assert_eq!(render(source), render(source));
    }

    #[test]
    fn test_no_raw_angle_brackets_outside_tags() {
        let markup = render("if a < b then a > b else a <= b\nList<Nat>");
        let text = strip_tags(&markup);
        assert!(!text.contains('<'), "raw '<' in {text}");
        assert!(!text.contains('>'), "raw '>' in {text}");
    }

    #[test]
    fn test_plain_text_whitespace() {
        assert_eq!(render("x y\nz"), "x&nbsp;y<br>\nz");
        assert_eq!(render("x\ty"), "x&nbsp;&nbsp;&nbsp;&nbsp;y");
    }

    #[test]
    fn test_control_characters_are_not_spaces() {
        assert_eq!(render("f\0g"), "f\0g");
        assert_eq!(render("f\u{E000}g"), "fg");
    }

    #[test]
    fn test_user_names_matching_late_markup() {
        let markup = render("define nbsp = 1");
        assert!(markup.contains(r#"<span class="defines">nbsp</span>"#), "{markup}");
        assert!(markup.contains("&nbsp;"));
    }

    #[test]
    fn test_leading_newline_stripped() {
        assert_eq!(render("\ndefine"), r#"<span class="keyword">define</span>"#);
        // only one
        assert_eq!(render("\n\nx"), "<br>\nx");
    }

    #[test]
    fn test_operator_and_prim() {
        assert_eq!(
            render("x = 42"),
            r#"x&nbsp;<span class="operator">&equals;</span>&nbsp;<span class="prim">42</span>"#
        );
        assert_eq!(
            render("a -> b"),
            r#"a&nbsp;<span class="operator">-&gt;</span>&nbsp;b"#
        );
    }

    #[test]
    fn test_comment_rewrapped_by_operator_pass() {
        assert_eq!(
            render("// a -> b"),
            concat!(
                r#"<span class="comment">"#,
                r#"<span class="operator">&sol;</span><span class="operator">&sol;</span>"#,
                r#"&nbsp;a&nbsp;<span class="operator">-&gt;</span>&nbsp;b</span>"#,
            )
        );
    }

    #[test]
    fn test_discovered_type_name_nested() {
        assert_eq!(
            render("union List"),
            concat!(
                r#"<span class="keyword">union</span>&nbsp;"#,
                r#"<span class="type"><span class="defines">List</span></span>"#,
            )
        );
    }

    #[test]
    fn test_keyword_inside_library_name_not_tagged() {
        assert_eq!(
            render("import UIntToFrom"),
            r#"<span class="keyword">import</span>&nbsp;<span class="type">UIntToFrom</span>"#
        );
    }

    #[test]
    fn test_math_symbols_as_numeric_references() {
        assert_eq!(
            render("λ"),
            r#"<span class="operator">&#x03BB;</span>"#
        );
        assert_eq!(render("∅"), r#"<span class="prim">&#x2205;</span>"#);
    }

    #[test]
    fn test_static_defines() {
        assert_eq!(
            render("suc"),
            r#"<span class="defines">suc</span>"#
        );
    }

    #[test]
    fn test_empty_grammar_only_escapes() {
        let classifier = Classifier::new(Grammar::empty()).unwrap();
        assert_eq!(classifier.render("a < b"), "a&nbsp;&lt;&nbsp;b");
    }

    #[test]
    fn test_malformed_input_still_renders() {
        let markup = render("/* unterminated ((( <<< ;;; \u{1F600}");
        assert!(!markup.is_empty());
    }

    #[test]
    fn test_category_classes_in_pass_order() {
        let classes: Vec<_> = Category::PASS_ORDER
            .iter()
            .filter_map(|c| c.css_class())
            .collect();
        assert_eq!(
            classes,
            ["comment", "operator", "prim", "type", "keyword", "defines"]
        );
        assert_eq!(Category::Plain.css_class(), None);
    }
}
