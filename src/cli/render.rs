//! `render`: highlight code blocks and publish them to the output directory.
//!
//! ```text
//! ids ─▶ cache lookup ─┬─ hit ──────────────────────────────┬─▶ <output>/<id>.html
//!                      └─ miss ─▶ fetch ─▶ strip ─▶ render ─┘   <output>/<id>.txt
//!                                  (async)         (rayon)
//! ```
//!
//! A block is a hit only when both its markup and its source text are
//! cached. Blocks that cannot be fetched are published as a placeholder;
//! malformed ids are logged, counted as failed and skipped.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tokio::task::JoinSet;

use super::args::RenderArgs;
use super::common::block_on;
use crate::cache::{Attributes, CacheError, SnippetCache};
use crate::config::SiteConfig;
use crate::highlight::{Classifier, Grammar, strip_leading_imports};
use crate::logger::ProgressLine;
use crate::remote::{self, RemoteError, SnippetSource};
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Markup published for a block that could not be loaded.
pub const PLACEHOLDER: &str = "Error loading code block...";

/// Outcome counts of one render run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub cached: usize,
    pub fetched: usize,
    pub failed: usize,
}

struct Block {
    id: String,
    html: String,
    text: String,
}

type Fetched = Vec<(String, Result<String>)>;

pub fn render_blocks(config: &SiteConfig, args: &RenderArgs) -> Result<RenderSummary> {
    let source = SnippetSource::parse(&config.snippets.source, config.get_root())?;
    let ext = config.snippets.extension.as_str();

    let (ids, invalid): (Vec<_>, Vec<_>) = block_ids(&args.ids, config, &source)?
        .into_iter()
        .partition(|id| is_valid_id(id));
    for id in &invalid {
        log!("error"; "invalid block id `{id}`");
    }
    if ids.is_empty() {
        if invalid.is_empty() {
            log!("render"; "no code blocks found in {}", config.snippets.source);
        }
        return Ok(RenderSummary {
            failed: invalid.len(),
            ..RenderSummary::default()
        });
    }

    let mut cache = SnippetCache::open(&config.cache, config.get_root());
    if args.clear {
        cache.clear()?;
        log!("cache"; "cleared");
    }

    let mut hits = Vec::new();
    let mut misses = Vec::new();
    for id in ids {
        let cached = if args.no_cache {
            None
        } else {
            cached_block(&mut cache, &id)
        };
        match cached {
            Some(block) => hits.push(block),
            None => misses.push(id),
        }
    }
    debug!("render"; "{} cached, {} to fetch", hits.len(), misses.len());

    let out_dir = config.output_dir();
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let progress = ProgressLine::new("render", &[("cached", hits.len()), ("fetched", misses.len())]);

    for block in &hits {
        publish(&out_dir, &block.id, &block.html, &block.text)?;
        progress.inc("cached");
    }

    let fetched = block_on(fetch_all(source.clone(), ext, misses, &progress))??;

    let mut failed = invalid.len();
    let mut texts = Vec::with_capacity(fetched.len());
    for (id, result) in fetched {
        match result {
            Ok(raw) => texts.push((id, raw)),
            Err(e) => {
                log!("error"; "{}: {:#}", source.locate(&id, ext), e);
                publish(&out_dir, &id, PLACEHOLDER, "")?;
                failed += 1;
            }
        }
    }

    let classifier = Classifier::new(Grammar::deduce())?;
    let strip = config.snippets.strip_imports;
    let rendered: Vec<Block> = texts
        .into_par_iter()
        .map(|(id, raw)| {
            let text = if strip {
                strip_leading_imports(&raw).to_string()
            } else {
                raw
            };
            let html = classifier.render(&text);
            Block { id, html, text }
        })
        .collect();

    let ttl = Some(config.cache.snippet_ttl);
    for block in &rendered {
        if let Err(e) = store(&mut cache, block, ttl) {
            log!("cache"; "failed to store {}: {}", block.id, e);
        }
        publish(&out_dir, &block.id, &block.html, &block.text)?;
    }

    progress.finish();

    let summary = RenderSummary {
        cached: hits.len(),
        fetched: rendered.len(),
        failed,
    };
    log!(
        "render";
        "{} ({} cached, {} fetched, {} failed) -> {}",
        plural_count(summary.cached + summary.fetched + summary.failed, "block"),
        summary.cached,
        summary.fetched,
        summary.failed,
        out_dir.display()
    );
    Ok(summary)
}

/// Ids from the command line, then `[snippets] blocks`, then every block
/// file of a local source. Duplicates are dropped, order is kept.
fn block_ids(args: &[String], config: &SiteConfig, source: &SnippetSource) -> Result<Vec<String>> {
    let mut ids = if !args.is_empty() {
        args.to_vec()
    } else if !config.snippets.blocks.is_empty() {
        config.snippets.blocks.clone()
    } else {
        match source {
            SnippetSource::Dir(dir) => list_blocks(dir, &config.snippets.extension)?,
            SnippetSource::Http(url) => {
                bail!("no block ids given; list them in `[snippets] blocks` to render from {url}")
            }
        }
    };

    let mut seen = FxHashSet::default();
    ids.retain(|id| seen.insert(id.clone()));
    Ok(ids)
}

/// Ids name a file inside the source, never a path.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

/// Stems of `*.<ext>` files in `dir`, sorted.
fn list_blocks(dir: &Path, ext: &str) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut ids: Vec<String> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == ext))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    ids.sort();
    Ok(ids)
}

fn block_key(id: &str, kind: &str) -> Attributes {
    Attributes::new().with("codeID", id).with("type", kind)
}

fn cached_block(cache: &mut SnippetCache, id: &str) -> Option<Block> {
    let html = cache.get(&block_key(id, "html"))?;
    let text = cache.get(&block_key(id, "text"))?;
    Some(Block {
        id: id.to_string(),
        html,
        text,
    })
}

fn store(cache: &mut SnippetCache, block: &Block, ttl: Option<u64>) -> Result<(), CacheError> {
    let context = Attributes::new().with("codeID", &block.id);
    cache.set(&block_key(&block.id, "html"), &block.html, ttl, Some(&context))?;
    cache.set(&block_key(&block.id, "text"), &block.text, ttl, Some(&context))
}

fn publish(out_dir: &Path, id: &str, html: &str, text: &str) -> Result<()> {
    for (ext, content) in [("html", html), ("txt", text)] {
        let path = out_dir.join(format!("{id}.{ext}"));
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Fetch every block concurrently. Results keep the order of `ids`, and a
/// task that never reports back yields an error for its block.
async fn fetch_all(
    source: SnippetSource,
    ext: &str,
    ids: Vec<String>,
    progress: &ProgressLine,
) -> Result<Fetched, RemoteError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let client = remote::client()?;
    let source = Arc::new(source);
    let ext: Arc<str> = Arc::from(ext);

    let mut slots: Vec<(String, Option<Result<String>>)> =
        ids.into_iter().map(|id| (id, None)).collect();

    let mut tasks = JoinSet::new();
    for (index, (id, _)) in slots.iter().enumerate() {
        let (client, source, ext) = (client.clone(), Arc::clone(&source), Arc::clone(&ext));
        let id = id.clone();
        tasks.spawn(async move { (index, source.fetch(&client, &id, &ext).await) });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index].1 = Some(result.map_err(anyhow::Error::from)),
            Err(e) => debug!("render"; "fetch task failed: {}", e),
        }
        progress.inc("fetched");
    }

    Ok(settle(slots))
}

fn settle(slots: Vec<(String, Option<Result<String>>)>) -> Fetched {
    slots
        .into_iter()
        .map(|(id, result)| {
            let result = result.unwrap_or_else(|| Err(anyhow!("fetch task did not complete")));
            (id, result)
        })
        .collect()
}
