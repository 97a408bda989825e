//! `run`: check a program with the remote sandbox.

use std::path::Path;

use anyhow::Result;

use super::common::{block_on, read_input};
use crate::config::SiteConfig;
use crate::log;
use crate::remote::{self, apology, prepare_output};

pub fn run_file(config: &SiteConfig, file: &Path, html: bool) -> Result<()> {
    let code = read_input(file)?;
    let endpoint = config.sandbox.endpoint.as_str();

    let result = block_on(async {
        let client = remote::client()?;
        remote::execute(&client, endpoint, &code).await
    })?;

    match result {
        Ok(out) => {
            print!("{}", format_output(&out, html));
            Ok(())
        }
        Err(e) => {
            log!("sandbox"; "{:#}", anyhow::Error::from(e));
            println!("{}", failure_message(&config.sandbox.contact, html));
            std::process::exit(1);
        }
    }
}

fn format_output(out: &str, html: bool) -> String {
    if html {
        format!("{}\n", prepare_output(out, false))
    } else {
        out.to_string()
    }
}

fn failure_message(contact: &str, html: bool) -> String {
    if html {
        apology(contact)
    } else {
        format!(
            "Something went wrong internally.\nIf this error persists please reach us at {contact}."
        )
    }
}
