//! Build command implementation.

use crate::cli::BuildArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, Report};
use lkb_domain::DictionaryLocation;
use lkb_feed::{EntityFeed, FeedResolver};
use lkb_feeder::{DictionaryLoader, EntityDictionary, LoadOutcome};
use lkb_store::SqliteDictionaryCache;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result of loading a dictionary.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    /// Absolute dictionary directory
    pub location: String,
    /// Feed tier
    pub feed: String,
    /// Cache database used
    pub cache: String,
    /// How the load was satisfied
    pub outcome: String,
    /// Records loaded
    pub entities: usize,
    /// Distinct aliases loaded
    pub aliases: usize,
    /// Feed failure hidden by the cache, if any
    pub feed_error: Option<String>,
}

impl Report for BuildReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Location", self.location.clone()),
            ("Feed", self.feed.clone()),
            ("Cache", self.cache.clone()),
            ("Outcome", self.outcome.clone()),
            ("Entities", self.entities.to_string()),
            ("Aliases", self.aliases.to_string()),
        ];
        if let Some(error) = &self.feed_error {
            rows.push(("Feed error", error.clone()));
        }
        rows
    }
}

/// Load the feed into a dictionary through the cache at `cache_path`.
pub fn build_dictionary(
    location: &DictionaryLocation,
    feed: &EntityFeed,
    cache_path: &Path,
) -> Result<(BuildReport, EntityDictionary)> {
    let cache = SqliteDictionaryCache::new(cache_path)?;
    let mut loader = DictionaryLoader::new(cache);
    let mut dictionary = EntityDictionary::new();
    let outcome = loader.load(feed, &mut dictionary)?;

    let (label, feed_error) = match &outcome {
        LoadOutcome::CacheHit { .. } => ("cache-hit", None),
        LoadOutcome::Rebuilt { .. } => ("rebuilt", None),
        LoadOutcome::CacheFallback { error, .. } => ("cache-fallback", Some(error.to_string())),
    };

    let report = BuildReport {
        location: location.root().display().to_string(),
        feed: feed.kind().to_string(),
        cache: cache_path.display().to_string(),
        outcome: label.to_string(),
        entities: dictionary.len(),
        aliases: dictionary.alias_count(),
        feed_error,
    };
    Ok((report, dictionary))
}

/// Execute the build command.
pub fn execute_build(args: BuildArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let location = DictionaryLocation::new(&args.directory);
    let cache_path: PathBuf = args
        .cache
        .unwrap_or_else(|| location.root().join(&config.cache_file_name));

    let feed = FeedResolver::from_config(&config.feed).resolve(&location);
    let (report, _) = build_dictionary(&location, &feed, &cache_path)?;

    if formatter.is_human() {
        if let Some(error) = &report.feed_error {
            eprintln!("{}", formatter.warning(&format!("Feed failed, using cache: {}", error)));
        }
    }
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}
