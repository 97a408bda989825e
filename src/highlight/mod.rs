//! Regex-pass syntax highlighting for Deduce snippets.
//!
//! # Module Structure
//!
//! ```text
//! highlight/
//! ├── grammar    # Grammar tables (keywords, operators, types, ...)
//! ├── pattern    # Alternation building over the entity alphabet
//! ├── entity     # Source escaping and numeric character references
//! ├── discover   # User-defined identifier discovery
//! ├── classify   # The substitution pipeline (Classifier::render)
//! └── imports    # Leading import stripping
//! ```
//!
//! # Example
//!
//! ```ignore
//! let classifier = Classifier::new(Grammar::deduce())?;
//! let markup = classifier.render(&strip_leading_imports(&source));
//! ```

mod classify;
mod discover;
mod entity;
mod grammar;
mod imports;
mod pattern;

pub use classify::Classifier;
pub use grammar::Grammar;
pub use imports::strip_leading_imports;

use thiserror::Error;

/// Highlighting errors.
///
/// Rendering itself never fails; only building a classifier from a
/// grammar with a malformed fragment does.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("invalid {category} pattern")]
    Pattern {
        category: &'static str,
        #[source]
        source: regex::Error,
    },
}
