//! Grammar tables for the Deduce language.
//!
//! A [`Grammar`] is a plain immutable value: build it once at startup
//! (usually with [`Grammar::deduce`]) and hand it to the classifier.
//!
//! | Set            | Contents                                  | Matched as          |
//! |----------------|-------------------------------------------|---------------------|
//! | `comments`     | regex fragments over the entity alphabet  | verbatim            |
//! | `operators`    | raw symbols (`->`, `<=`, `∈`)             | escaped, unbounded  |
//! | `prims`        | regex fragments (`[0-9]+`, `true`)        | word-bounded        |
//! | `prim_symbols` | raw symbols (`∅`, `?`)                    | escaped, unbounded  |
//! | `types`        | built-in type names                       | word-bounded        |
//! | `libs`         | standard library module names             | word-bounded        |
//! | `keywords`     | reserved words                            | word-bounded        |
//! | `defines`      | well-known library functions/constructors | word-bounded        |
//!
//! Alternation is leftmost-first, so symbols that share a prefix must list
//! the longer one first (`<=>` before `<=` before `<`).

/// Line and block comments, written against escaped source (`/` is `&sol;`).
const COMMENTS: &[&str] = &[r"&sol;\*(?s:.*?)\*&sol;", r"&sol;&sol;[^\n]*"];

const OPERATORS: &[&str] = &[
    "<=>", "⇔", "->", "++", ".+.", "[+]", "[o]", "(=", "<=", ">=", "/=", "≠", "⊆", "≤", "≥",
    "∈", "∪", "∩", "⨄", "∘", "∸", "≲", "≈", "⊝", "λ", "+", "-", "%", "*", "^", "|", "&", "/",
    "@", ":", "<", ">", "(", ")", "{", "}", "[", "]", ",", "=", ".", ";", "#", "$",
];

const PRIMS: &[&str] = &["true", "false", "[0-9]+", "empty"];

const PRIM_SYMBOLS: &[&str] = &["∅", "[0]", "?"];

const TYPES: &[&str] = &[
    "MultiSet", "Option", "Pair", "Set", "List", "Int", "Nat", "int", "bool", "fn", "type",
];

const LIBS: &[&str] = &[
    "UInt", "NatLess", "NatMonus", "UIntAdd", "IntDefs", "NatMult", "NatPowLog", "Base", "NatSum",
    "UIntToFrom", "NatDefs", "UIntLess", "IntMult", "UIntDefs", "IntAddSub", "UIntDiv",
    "UIntEvenOdd", "NatAdd", "UIntMult", "UIntMonus", "UIntPowLog", "BigO", "NatEvenOdd", "Maps",
    "NatDiv",
];

const KEYWORDS: &[&str] = &[
    "define", "function", "fun", "switch", "case", "union", "if", "then", "else", "import",
    "export", "module", "generic", "assert", "have", "transitive", "symmetric", "associative",
    "extensionality", "reflexive", "injective", "sorry", "help", "conclude", "suffices", "enough",
    "by", "rewrite", "conjunct", "induction", "where", "suppose", "with", "definition", "apply",
    "to", "cases", "obtain", "stop", "equations", "of", "arbitrary", "choose", "term", "from",
    "assume", "for", "recall", "in", "and", "or", "print", "not", "some", "all", "theorem",
    "lemma", "postulate", "proof", "end", "replace", "expand", "evaluate", "contradict", "show",
    "recursive", "recfun", "measure", "terminates", "public", "private", "opaque", "auto",
];

const DEFINES: &[&str] = &[
    "node",
    "suc",
    "take",
    "set_of",
    "empty_no_members",
    "single",
    "member_union",
    "single_equal",
    "length",
];

/// Named pattern sets driving the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub comments: Vec<String>,
    pub operators: Vec<String>,
    pub prims: Vec<String>,
    pub prim_symbols: Vec<String>,
    pub types: Vec<String>,
    pub libs: Vec<String>,
    pub keywords: Vec<String>,
    pub defines: Vec<String>,
}

impl Grammar {
    /// The Deduce grammar used by the documentation site.
    pub fn deduce() -> Self {
        Self {
            comments: owned(COMMENTS),
            operators: owned(OPERATORS),
            prims: owned(PRIMS),
            prim_symbols: owned(PRIM_SYMBOLS),
            types: owned(TYPES),
            libs: owned(LIBS),
            keywords: owned(KEYWORDS),
            defines: owned(DEFINES),
        }
    }

    /// A grammar with every set empty. Rendering with it only escapes.
    pub fn empty() -> Self {
        Self {
            comments: Vec::new(),
            operators: Vec::new(),
            prims: Vec::new(),
            prim_symbols: Vec::new(),
            types: Vec::new(),
            libs: Vec::new(),
            keywords: Vec::new(),
            defines: Vec::new(),
        }
    }

    /// Type names and library names, in that order (they share a pass).
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().chain(&self.libs).map(String::as_str)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::deduce()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_prefix_symbols_listed_longest_first() {
        let grammar = Grammar::deduce();
        let pos = |s: &str| grammar.operators.iter().position(|o| o == s).unwrap();

        assert!(pos("<=>") < pos("<="));
        assert!(pos("<=") < pos("<"));
        assert!(pos("->") < pos("-"));
        assert!(pos("/=") < pos("/"));
        assert!(pos("(=") < pos("("));
        assert!(pos(".+.") < pos("."));
    }

    #[test]
    fn test_type_names_chain_libs() {
        let grammar = Grammar::deduce();
        let names: Vec<_> = grammar.type_names().collect();

        assert_eq!(names.first(), Some(&"MultiSet"));
        assert!(names.contains(&"UIntToFrom"));
        assert_eq!(names.len(), grammar.types.len() + grammar.libs.len());
    }

    #[test]
    fn test_empty_grammar() {
        let grammar = Grammar::empty();
        assert!(grammar.keywords.is_empty());
        assert_eq!(grammar.type_names().count(), 0);
    }
}
