//! Sandbox execution.
//!
//! The sandbox endpoint takes the program as the raw POST body and answers
//! with the checker's plain-text output. Output is turned into markup for
//! the page's output panel with [`prepare_output`].

use super::{RemoteError, Result};
use crate::debug;
use crate::utils::html::{escape, escape_angles, escape_attr};

/// Send `code` to the sandbox and return its output.
///
/// Checker failures (a proof that does not go through) are ordinary
/// output; only transport failures and non-2xx statuses are errors.
pub async fn execute(client: &reqwest::Client, endpoint: &str, code: &str) -> Result<String> {
    debug!("sandbox"; "POST {} ({} bytes)", endpoint, code.len());

    let response = client
        .post(endpoint)
        .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(code.to_string())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            url: endpoint.to_string(),
            status,
        });
    }
    Ok(response.text().await?)
}

/// Markup for checker output.
///
/// Angle brackets are escaped, line breaks become `<br>`, tabs four spaces
/// and spaces `&nbsp;`. Error output is wrapped in `<span class="error">`.
pub fn prepare_output(out: &str, is_error: bool) -> String {
    let mut html = String::with_capacity(out.len() + out.len() / 4);
    for c in escape_angles(out).chars() {
        match c {
            '\n' => html.push_str("<br>"),
            '\t' => html.push_str("&nbsp;&nbsp;&nbsp;&nbsp;"),
            ' ' => html.push_str("&nbsp;"),
            c => html.push(c),
        }
    }

    if is_error {
        format!(r#"<span class="error">{html}</span>"#)
    } else {
        html
    }
}

/// Shown in place of output when the sandbox cannot be reached.
pub fn apology(contact: &str) -> String {
    format!(
        concat!(
            r#"<span class="error">Something went wrong internally.<br>"#,
            r#"If this error persists please reach us at "#,
            r#"<a href="mailto:{attr}">{text}</a>.</span>"#,
        ),
        attr = escape_attr(contact),
        text = escape(contact),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{client, test_server};

    #[test]
    fn test_prepare_output() {
        assert_eq!(
            prepare_output("a < b\n\tok", false),
            "a&nbsp;&lt;&nbsp;b<br>&nbsp;&nbsp;&nbsp;&nbsp;ok"
        );
        assert_eq!(prepare_output("", false), "");
    }

    #[test]
    fn test_prepare_output_error() {
        assert_eq!(
            prepare_output("bad>", true),
            r#"<span class="error">bad&gt;</span>"#
        );
    }

    #[test]
    fn test_prepare_output_keeps_entities() {
        // only angle brackets are escaped
        assert_eq!(prepare_output("&amp;", false), "&amp;");
    }

    #[test]
    fn test_apology() {
        let html = apology("jsiek@iu.edu");
        assert!(html.starts_with(r#"<span class="error">Something went wrong internally.<br>"#));
        assert!(html.ends_with(r#"<a href="mailto:jsiek@iu.edu">jsiek@iu.edu</a>.</span>"#));
    }

    #[tokio::test]
    async fn test_execute_posts_body() {
        let (base, server) = test_server::serve(1, |method, url, body| {
            assert_eq!(method, "POST");
            assert_eq!(url, "/deduce");
            (200, format!("checked {} bytes\n", body.len()))
        });

        let client = client().unwrap();
        let out = execute(&client, &format!("{base}/deduce"), "theorem t: true")
            .await
            .unwrap();
        assert_eq!(out, "checked 15 bytes\n");

        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_execute_server_error() {
        let (base, server) = test_server::serve(1, |_, _, _| (500, String::new()));

        let client = client().unwrap();
        let err = execute(&client, &base, "x").await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status, .. } if status.as_u16() == 500));

        server.join().unwrap();
    }
}
