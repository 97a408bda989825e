//! Snippet sources.
//!
//! Every code block on the site is a file `<id>.<ext>` under one source,
//! either a directory of the project or a base URL.

use std::path::{Path, PathBuf};

use url::Url;

use super::{RemoteError, Result};
use crate::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetSource {
    /// Base URL; blocks are `<base>/<id>.<ext>`.
    Http(Url),
    /// Directory on disk.
    Dir(PathBuf),
}

impl SnippetSource {
    /// Interpret a configured source. `http(s)://` values are URLs,
    /// anything else is a directory relative to `root`.
    pub fn parse(source: &str, root: &Path) -> Result<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(RemoteError::InvalidSource(source.to_string()));
        }

        if source.starts_with("http://") || source.starts_with("https://") {
            let mut url =
                Url::parse(source).map_err(|_| RemoteError::InvalidSource(source.to_string()))?;
            // joining onto `a/b` would replace `b`
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Self::Http(url))
        } else {
            Ok(Self::Dir(root.join(source)))
        }
    }

    /// Location of one block, for messages.
    pub fn locate(&self, id: &str, ext: &str) -> String {
        let file = format!("{id}.{ext}");
        match self {
            Self::Http(base) => base
                .join(&file)
                .map(String::from)
                .unwrap_or_else(|_| format!("{base}{file}")),
            Self::Dir(dir) => dir.join(file).display().to_string(),
        }
    }

    /// Fetch the raw text of block `id`.
    pub async fn fetch(&self, client: &reqwest::Client, id: &str, ext: &str) -> Result<String> {
        let file = format!("{id}.{ext}");
        match self {
            Self::Http(base) => {
                let url = base
                    .join(&file)
                    .map_err(|_| RemoteError::InvalidSource(file.clone()))?;
                debug!("fetch"; "GET {}", url);

                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(RemoteError::Status {
                        url: url.into(),
                        status,
                    });
                }
                Ok(response.text().await?)
            }
            Self::Dir(dir) => {
                let path = dir.join(file);
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|err| RemoteError::Io(path, err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{client, test_server};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_directory() {
        let source = SnippetSource::parse("deduce-code", Path::new("/site")).unwrap();
        assert_eq!(source, SnippetSource::Dir(PathBuf::from("/site/deduce-code")));
        assert_eq!(source.locate("ex1", "pf"), "/site/deduce-code/ex1.pf");
    }

    #[test]
    fn test_parse_url_adds_trailing_slash() {
        let source = SnippetSource::parse("https://example.org/docs/code", Path::new("/")).unwrap();
        assert_eq!(source.locate("ex1", "pf"), "https://example.org/docs/code/ex1.pf");
    }

    #[test]
    fn test_parse_rejects_empty_and_malformed() {
        assert!(SnippetSource::parse("  ", Path::new("/")).is_err());
        assert!(SnippetSource::parse("http://", Path::new("/")).is_err());
    }

    #[tokio::test]
    async fn test_fetch_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ex1.pf"), "theorem t: true").unwrap();

        let source = SnippetSource::Dir(dir.path().to_path_buf());
        let client = client().unwrap();

        assert_eq!(source.fetch(&client, "ex1", "pf").await.unwrap(), "theorem t: true");
        assert!(matches!(
            source.fetch(&client, "missing", "pf").await,
            Err(RemoteError::Io(..))
        ));
    }

    #[tokio::test]
    async fn test_fetch_over_http() {
        let (base, server) = test_server::serve(2, |method, url, _| {
            assert_eq!(method, "GET");
            match url {
                "/code/ex1.pf" => (200, "define x = 1".to_string()),
                _ => (404, "not found".to_string()),
            }
        });

        let source = SnippetSource::parse(&format!("{base}/code"), Path::new("/")).unwrap();
        let client = client().unwrap();

        assert_eq!(source.fetch(&client, "ex1", "pf").await.unwrap(), "define x = 1");

        let err = source.fetch(&client, "ex2", "pf").await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status, .. } if status.as_u16() == 404));

        server.join().unwrap();
    }
}
