//! Resolve command implementation.

use crate::cli::LocationArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, Report};
use lkb_domain::DictionaryLocation;
use lkb_feed::{EntityFeed, FeedResolver};
use serde::Serialize;

/// Which feed a dictionary directory resolves to.
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    /// Absolute dictionary directory
    pub location: String,
    /// Feed tier
    pub feed: String,
    /// Fingerprint, for local repository feeds only
    pub fingerprint: Option<i32>,
}

impl ResolveReport {
    /// Describe a resolved feed
    pub fn new(location: &DictionaryLocation, feed: &EntityFeed) -> Self {
        Self {
            location: location.root().display().to_string(),
            feed: feed.kind().to_string(),
            fingerprint: feed.fingerprint().map(|f| f.value()),
        }
    }
}

impl Report for ResolveReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Location", self.location.clone()),
            ("Feed", self.feed.clone()),
            (
                "Fingerprint",
                self.fingerprint
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }
}

/// Execute the resolve command.
pub fn execute_resolve(args: LocationArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let location = DictionaryLocation::new(&args.directory);
    let feed = FeedResolver::from_config(&config.feed).resolve(&location);

    println!("{}", formatter.format_report(&ResolveReport::new(&location, &feed))?);
    Ok(())
}
