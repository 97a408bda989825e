//! Alternation building for the category passes.

use regex::Regex;

use super::HighlightError;
use super::entity::escape_source;

/// A pattern that can never match: no position is both a word boundary
/// and not a word boundary.
pub const NEVER: &str = r"\b\B";

/// `\bA\b|\bB\b|...` over regex fragments.
pub fn word_alternation<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    join(fragments.into_iter().map(|f| format!(r"\b{f}\b")))
}

/// Word alternation over literal names (regex metacharacters escaped).
pub fn literal_words<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    word_alternation_owned(names.into_iter().map(regex::escape))
}

/// `A|B|...` over raw symbols, matched at the character level.
///
/// Each symbol is first put through the source escaper so it lines up
/// with the escaped text it will be matched against.
pub fn symbol_alternation<'a>(symbols: impl IntoIterator<Item = &'a str>) -> String {
    join(
        symbols
            .into_iter()
            .map(|s| regex::escape(&escape_source(s))),
    )
}

/// `A|B|...` over regex fragments, used as-is.
pub fn raw_alternation<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    join(fragments.into_iter().map(str::to_string))
}

/// Join two alternations, dropping a side that can never match.
pub fn either(left: String, right: String) -> String {
    match (left.as_str(), right.as_str()) {
        (NEVER, _) => right,
        (_, NEVER) => left,
        _ => format!("{left}|{right}"),
    }
}

/// Compile a pass pattern, tagging failures with the category name.
pub fn compile(category: &'static str, pattern: &str) -> Result<Regex, HighlightError> {
    Regex::new(pattern).map_err(|source| HighlightError::Pattern { category, source })
}

fn word_alternation_owned(fragments: impl Iterator<Item = String>) -> String {
    join(fragments.map(|f| format!(r"\b{f}\b")))
}

fn join(parts: impl Iterator<Item = String>) -> String {
    let joined = parts.collect::<Vec<_>>().join("|");
    if joined.is_empty() {
        NEVER.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_never_matches() {
        let re = Regex::new(&word_alternation(std::iter::empty::<&str>())).unwrap();
        assert!(!re.is_match(""));
        assert!(!re.is_match("anything at all"));

        let re = Regex::new(&symbol_alternation(std::iter::empty::<&str>())).unwrap();
        assert!(!re.is_match("+-*/"));
    }

    #[test]
    fn test_word_alternation_respects_boundaries() {
        let re = Regex::new(&literal_words(["in", "to"])).unwrap();
        assert!(re.is_match("x in y"));
        assert!(!re.is_match("inside"));
        assert!(!re.is_match("UIntToFrom"));
    }

    #[test]
    fn test_symbol_alternation_uses_entity_alphabet() {
        let pattern = symbol_alternation(["<=", "/"]);
        let re = Regex::new(&pattern).unwrap();

        assert!(re.is_match("a &lt;&equals; b"));
        assert!(re.is_match("&sol;"));
        assert!(!re.is_match("a <= b"));
    }

    #[test]
    fn test_symbols_have_no_word_boundaries() {
        let re = Regex::new(&symbol_alternation(["+"])).unwrap();
        assert_eq!(re.find("a+b").map(|m| m.as_str()), Some("+"));
    }

    #[test]
    fn test_either_drops_never() {
        assert_eq!(either(NEVER.to_string(), "a".to_string()), "a");
        assert_eq!(either("a".to_string(), NEVER.to_string()), "a");
        assert_eq!(either("a".to_string(), "b".to_string()), "a|b");
    }

    #[test]
    fn test_compile_reports_category() {
        let err = compile("keyword", "(unclosed").unwrap_err();
        assert!(err.to_string().contains("keyword"));
    }
}
