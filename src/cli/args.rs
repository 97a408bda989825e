//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use super::common::{parse_pair, parse_section};

/// Deduce documentation site tooling
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: deduce.toml)
    #[arg(short = 'C', long, global = true, default_value = "deduce.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Highlight code blocks and publish them to the output directory
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Highlight one file and print the markup
    #[command(visible_alias = "hl")]
    Highlight {
        /// Source file, or `-` for stdin
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Drop leading import lines first
        #[arg(short, long)]
        strip_imports: bool,
    },

    /// Check a program with the remote sandbox
    Run {
        /// Source file, or `-` for stdin
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Print output as markup for the sandbox output panel
        #[arg(long)]
        html: bool,
    },

    /// Inspect or prune the snippet cache
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    /// Colour schemes, theme cookies and editor registration
    Theme {
        #[command(subcommand)]
        command: ThemeCommand,
    },
}

/// Render command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Block ids to render. If omitted, uses `[snippets] blocks`, then
    /// every block file in a local source directory.
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,

    /// Ignore cached markup and fetch every block
    #[arg(short, long)]
    pub no_cache: bool,

    /// Clear the cache before rendering
    #[arg(short, long)]
    pub clear: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheCommand {
    /// Print a cached value
    Get {
        /// Key attribute, `name=value` (repeatable)
        #[arg(short, long = "key", value_name = "NAME=VALUE", value_parser = parse_pair, required = true)]
        keys: Vec<(String, String)>,
    },

    /// Remove entries by key or by context
    #[command(arg_required_else_help = true)]
    Remove {
        /// Key attribute, `name=value` (repeatable)
        #[arg(short, long = "key", value_name = "NAME=VALUE", value_parser = parse_pair)]
        keys: Vec<(String, String)>,

        /// Context, `name=value` (repeatable); removes every entry indexed under it
        #[arg(short = 'x', long = "context", value_name = "NAME=VALUE", value_parser = parse_pair, conflicts_with = "keys")]
        contexts: Vec<(String, String)>,
    },

    /// Remove everything
    Clear,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ThemeCommand {
    /// Print a scheme as CSS custom properties
    Css {
        /// Scheme name (default: `[theme] default`)
        name: Option<String>,
    },

    /// Print `Set-Cookie` values persisting a theme choice
    Cookie {
        /// Scheme name
        name: String,

        /// Section state, `id=true|false` (repeatable)
        #[arg(short, long = "section", value_name = "ID=BOOL", value_parser = parse_section)]
        sections: Vec<(String, bool)>,
    },

    /// Resolve the preference carried by a `Cookie` header
    Resolve {
        /// Header value, e.g. `theme=vs; pf-details=false`
        #[arg(default_value = "")]
        header: String,
    },

    /// Print editor language and theme registration as JSON
    Editor,
}
