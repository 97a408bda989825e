//! `highlight`: render one file to stdout.

use std::path::Path;

use anyhow::Result;

use super::common::read_input;
use crate::highlight::{Classifier, Grammar, strip_leading_imports};

pub fn highlight_file(file: &Path, strip_imports: bool) -> Result<()> {
    let source = read_input(file)?;
    println!("{}", highlight_source(&source, strip_imports)?);
    Ok(())
}

fn highlight_source(source: &str, strip_imports: bool) -> Result<String> {
    let text = if strip_imports {
        strip_leading_imports(source)
    } else {
        source
    };
    Ok(Classifier::new(Grammar::deduce())?.render(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_source() {
        let html = highlight_source("import Nat\nassert true", true).unwrap();
        assert!(!html.contains("import"));
        assert!(html.starts_with(r#"<span class="keyword">assert</span>"#));

        let html = highlight_source("import Nat", false).unwrap();
        assert!(html.starts_with(r#"<span class="keyword">import</span>"#));
    }
}
