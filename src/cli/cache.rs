//! `cache`: inspect and prune the snippet cache.

use anyhow::{Result, bail};

use super::args::CacheCommand;
use super::common::attributes;
use crate::cache::SnippetCache;
use crate::config::SiteConfig;
use crate::log;
use crate::utils::plural::plural_count;

pub fn run_cache(config: &SiteConfig, command: &CacheCommand) -> Result<()> {
    let mut cache = SnippetCache::open(&config.cache, config.get_root());

    match command {
        CacheCommand::Get { .. } => print!("{}", apply(&mut cache, command)?),
        _ => log!("cache"; "{}", apply(&mut cache, command)?),
    }
    Ok(())
}

/// Run `command` against `cache`: the value for `get`, a report otherwise.
fn apply(cache: &mut SnippetCache, command: &CacheCommand) -> Result<String> {
    match command {
        CacheCommand::Get { keys } => {
            let attrs = attributes(keys);
            match cache.get(&attrs) {
                Some(value) => Ok(value),
                None => bail!("no entry for {attrs}"),
            }
        }
        CacheCommand::Remove { contexts, .. } if !contexts.is_empty() => {
            let removed = cache.remove_by_context(&attributes(contexts))?;
            Ok(format!("removed {}", plural_count(removed, "cached value")))
        }
        CacheCommand::Remove { keys, .. } => {
            let attrs = attributes(keys);
            if cache.remove_by_key(&attrs)? {
                Ok(format!("removed {attrs}"))
            } else {
                Ok(format!("no entry for {attrs}"))
            }
        }
        CacheCommand::Clear => {
            cache.clear()?;
            Ok("cleared".to_string())
        }
    }
}
