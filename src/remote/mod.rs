//! Snippet retrieval and remote proof checking.
//!
//! ```text
//! remote/
//! ├── snippet   # Where block sources live (site directory or URL)
//! └── execute   # Sandbox endpoint and output markup
//! ```

mod execute;
mod snippet;

pub use execute::{apology, execute, prepare_output};
pub use snippet::SnippetSource;

use std::path::PathBuf;
use thiserror::Error;

/// Errors talking to the snippet host or the sandbox.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid snippet source `{0}`")]
    InvalidSource(String),
}

pub type Result<T> = std::result::Result<T, RemoteError>;

/// Shared HTTP client.
pub fn client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("deduce-site/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::io::Read;
    use std::thread::{self, JoinHandle};

    use tiny_http::{Response, Server};

    /// Serve `count` requests on an ephemeral port.
    ///
    /// The handler gets `(method, url, body)` and returns `(status, body)`.
    pub fn serve<F>(count: usize, handler: F) -> (String, JoinHandle<()>)
    where
        F: Fn(&str, &str, &str) -> (u16, String) + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();

        let handle = thread::spawn(move || {
            for _ in 0..count {
                let mut request = server.recv().unwrap();
                let mut body = String::new();
                request.as_reader().read_to_string(&mut body).unwrap();

                let method = request.method().to_string();
                let url = request.url().to_string();
                let (status, reply) = handler(&method, &url, &body);

                request
                    .respond(Response::from_string(reply).with_status_code(status))
                    .unwrap();
            }
        });

        (format!("http://127.0.0.1:{port}"), handle)
    }
}
