//! User-defined identifier discovery.
//!
//! Runs on the raw source (before escaping). Every name found here is
//! highlighted as `defines`, on top of the grammar's static defines.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Declaration sites, each capturing the declared name in group 1.
static DECLARATIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bfunction\s([0-9A-Za-z_]+)\s*[(|<]",
        r"\brecursive\s([0-9A-Za-z_]+)\s*[(|<]",
        r"\b(?:theorem|lemma)\s([0-9A-Za-z_]+)\s*:",
        r"\bunion\s([0-9A-Za-z_]+)",
        r"\bdefine\s([0-9A-Za-z_]+)",
        // call site: any name directly followed by '('
        r"([0-9A-Za-z_]+)\(",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Names never treated as user-defined.
///
/// `operator` is the placeholder name of operator definitions. The rest are
/// the words the classifier's own markup and entities are made of; wrapping
/// them would corrupt tag syntax.
const RESERVED: &[&str] = &[
    "operator", "span", "class", "lt", "gt", "amp", "semi", "equals", "sol",
    "comment", "prim", "type", "keyword", "defines",
];

/// Collect declared and called names from raw source.
///
/// A name counts even if it is declared and never used.
pub fn discover_identifiers(source: &str) -> BTreeSet<String> {
    DECLARATIONS
        .iter()
        .flat_map(|re| re.captures_iter(source))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !RESERVED.contains(name))
        .map(str::to_string)
        .collect()
}
