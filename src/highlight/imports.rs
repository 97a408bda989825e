//! Leading import removal for displayed snippets.

const IMPORT: &str = "import";

/// Drop import lines and blank lines from the head of a snippet.
///
/// Only the head is affected: once a line is neither an import nor blank,
/// the rest of the text is returned untouched, imports included. A line
/// counts as an import when its trimmed content starts with `import`.
pub fn strip_leading_imports(text: &str) -> &str {
    let mut rest = text;

    loop {
        let (line, tail) = match rest.split_once('\n') {
            Some((line, tail)) => (line, Some(tail)),
            None => (rest, None),
        };

        let trimmed = line.trim();
        if !(trimmed.is_empty() || trimmed.starts_with(IMPORT)) {
            return rest;
        }

        match tail {
            Some(tail) => rest = tail,
            None => return "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imports_then_blank_line() {
        assert_eq!(
            strip_leading_imports("import Nat\nimport List\n\ndefine x := 1\n"),
            "define x := 1\n"
        );
    }

    #[test]
    fn test_interleaved_blank_and_import_lines() {
        assert_eq!(
            strip_leading_imports("\n  import Nat\n\n\timport Set\n\nx\n"),
            "x\n"
        );
    }

    #[test]
    fn test_later_imports_untouched() {
        let text = "define x := 1\nimport Nat\n";
        assert_eq!(strip_leading_imports(text), text);
    }

    #[test]
    fn test_only_imports() {
        assert_eq!(strip_leading_imports("import Nat\nimport List\n"), "");
        assert_eq!(strip_leading_imports(""), "");
    }

    #[test]
    fn test_leading_indentation_of_first_kept_line_preserved() {
        assert_eq!(strip_leading_imports("import Nat\n  define y = 2"), "  define y = 2");
    }
}
