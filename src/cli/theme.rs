//! `theme`: scheme CSS, preference cookies and editor registration.

use std::collections::BTreeMap;

use anyhow::{Result, bail};

use super::args::ThemeCommand;
use crate::cache::current_timestamp;
use crate::config::SiteConfig;
use crate::highlight::Grammar;
use crate::theme::{ColorScheme, EditorRegistration, ThemePreference};

pub fn run_theme(config: &SiteConfig, command: &ThemeCommand) -> Result<()> {
    let output = theme_output(config, command, current_timestamp())?;
    println!("{}", output.trim_end());
    Ok(())
}

fn theme_output(config: &SiteConfig, command: &ThemeCommand, now: u64) -> Result<String> {
    match command {
        ThemeCommand::Css { name } => {
            let name = name.as_deref().unwrap_or(&config.theme.default);
            Ok(scheme(name)?.to_css())
        }
        ThemeCommand::Cookie { name, sections } => {
            scheme(name)?;

            let mut open: BTreeMap<String, bool> = config
                .theme
                .sections
                .iter()
                .map(|id| (id.clone(), true))
                .collect();
            open.extend(sections.iter().cloned());

            let preference = ThemePreference {
                theme: name.clone(),
                sections: open,
            };
            Ok(preference.set_cookies(config.theme.cookie_days, now).join("\n"))
        }
        ThemeCommand::Resolve { header } => {
            let preference = ThemePreference::from_cookie_header(header, &config.theme);

            let mut lines = vec![format!("theme: {}", preference.theme)];
            for (id, open) in &preference.sections {
                let state = if *open { "open" } else { "closed" };
                lines.push(format!("{id}: {state}"));
            }
            Ok(lines.join("\n"))
        }
        ThemeCommand::Editor => Ok(EditorRegistration::new(&Grammar::deduce()).to_json()?),
    }
}

fn scheme(name: &str) -> Result<&'static ColorScheme> {
    match ColorScheme::by_name(name) {
        Some(scheme) => Ok(scheme),
        None => bail!(
            "unknown theme `{name}`, use one of: {}",
            ColorScheme::names().join(", ")
        ),
    }
}
