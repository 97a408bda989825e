//! deduce-site - highlighting, snippet caching and sandbox tooling for the
//! Deduce documentation site.

#![allow(dead_code)]

mod cache;
mod cli;
mod config;
mod highlight;
mod logger;
mod remote;
mod theme;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Render { args } => cli::render::render_blocks(&config, args).map(|_| ()),
        Commands::Highlight {
            file,
            strip_imports,
        } => cli::highlight::highlight_file(file, *strip_imports),
        Commands::Run { file, html } => cli::run::run_file(&config, file, *html),
        Commands::Cache { command } => cli::cache::run_cache(&config, command),
        Commands::Theme { command } => cli::theme::run_theme(&config, command),
    }
}
