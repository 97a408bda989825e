//! Common utilities shared across CLI commands.

use std::future::Future;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::cache::Attributes;

/// Read a source file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse `name=value`.
pub fn parse_pair(s: &str) -> Result<(String, String)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected `name=value`, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("empty name in `{s}`");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parse `id=true|false`.
pub fn parse_section(s: &str) -> Result<(String, bool)> {
    let (id, value) = parse_pair(s)?;
    let open = value
        .parse()
        .map_err(|_| anyhow!("expected `true` or `false` for `{id}`, got `{value}`"))?;
    Ok((id, open))
}

pub fn attributes(pairs: &[(String, String)]) -> Attributes {
    pairs.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// Run a future to completion on a fresh multi-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("codeID=ex1").unwrap(),
            ("codeID".to_string(), "ex1".to_string())
        );
        // only the first `=` separates
        assert_eq!(parse_pair("a=b=c").unwrap().1, "b=c");
        assert_eq!(parse_pair("type=").unwrap().1, "");
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn test_parse_section() {
        assert_eq!(parse_section("pf-details=false").unwrap(), ("pf-details".to_string(), false));
        assert!(parse_section("pf-details=closed").is_err());
    }

    #[test]
    fn test_attributes() {
        let attrs = attributes(&[
            ("type".to_string(), "html".to_string()),
            ("codeID".to_string(), "ex1".to_string()),
        ]);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("codeID"), Some("ex1"));
    }

    #[test]
    fn test_read_input_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.pf");
        std::fs::write(&path, "theorem t: true").unwrap();

        assert_eq!(read_input(&path).unwrap(), "theorem t: true");
        assert!(read_input(&dir.path().join("missing.pf")).is_err());
    }
}
