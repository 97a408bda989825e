//! Entity alphabet shared by the escaper and the pattern builder.
//!
//! Escaping runs before any category pass, so from that point on the
//! patterns match entity text (`&lt;&equals;`), never raw symbols. The
//! markup the passes insert (`<span class="...">`) uses raw `<`, `=`, `"`
//! and `>`, which no pattern built from this alphabet can match.

use std::borrow::Cow;

/// Characters rewritten before tokenizing.
const SOURCE_ESCAPES: [char; 6] = ['&', '<', '>', ';', '=', '/'];

/// Non-ASCII math symbols emitted as numeric references after tokenizing.
const NUMERIC_REFERENCES: [(char, &str); 11] = [
    ('λ', "&#x03BB;"),
    ('≠', "&#x2260;"),
    ('≤', "&#x2264;"),
    ('≥', "&#x2265;"),
    ('⊆', "&#x2286;"),
    ('∈', "&#x2208;"),
    ('∪', "&#x222A;"),
    ('∩', "&#x2229;"),
    ('⨄', "&#x2A04;"),
    ('∘', "&#x2218;"),
    ('∅', "&#x2205;"),
];

#[inline]
fn source_entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        ';' => Some("&semi;"),
        '=' => Some("&equals;"),
        '/' => Some("&sol;"),
        _ => None,
    }
}

/// Escape structurally significant characters of raw source.
///
/// All six characters are rewritten in one scan, so the `;` and `&` that
/// entities introduce are never escaped a second time.
pub fn escape_source(s: &str) -> Cow<'_, str> {
    if !s.contains(&SOURCE_ESCAPES[..]) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + s.len() / 4);
    for c in s.chars() {
        match source_entity(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Replace math symbols with numeric character references.
pub fn numeric_references(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| numeric_reference(c).is_some()) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match numeric_reference(c) {
            Some(reference) => result.push_str(reference),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[inline]
fn numeric_reference(c: char) -> Option<&'static str> {
    NUMERIC_REFERENCES
        .iter()
        .find(|(symbol, _)| *symbol == c)
        .map(|(_, reference)| *reference)
}
