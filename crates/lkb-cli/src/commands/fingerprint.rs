//! Fingerprint command implementation.

use crate::cli::LocationArgs;
use crate::error::{CliError, Result};
use crate::output::{Formatter, Report};
use lkb_domain::DictionaryLocation;
use serde::Serialize;
use std::fs;

/// Settings fingerprint of a dictionary directory.
#[derive(Debug, Serialize)]
pub struct FingerprintReport {
    /// Absolute dictionary directory
    pub location: String,
    /// Whether config.ttl could be read
    pub config_readable: bool,
    /// Fingerprint value
    pub fingerprint: i32,
}

impl Report for FingerprintReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Location", self.location.clone()),
            ("Config readable", self.config_readable.to_string()),
            ("Fingerprint", self.fingerprint.to_string()),
        ]
    }
}

/// Compute the fingerprint the loader would compare against its cache.
pub fn fingerprint_location(location: &DictionaryLocation) -> Result<FingerprintReport> {
    let query = fs::read_to_string(location.query_path())?;
    let config_url = location.config_url().ok_or_else(|| {
        CliError::InvalidInput(format!(
            "{} cannot be expressed as a file URL",
            location.config_path().display()
        ))
    })?;

    Ok(FingerprintReport {
        location: location.root().display().to_string(),
        config_readable: fs::metadata(location.config_path()).is_ok_and(|m| m.is_file()),
        fingerprint: lkb_feed::fingerprint(&config_url, &query).value(),
    })
}

/// Execute the fingerprint command.
pub fn execute_fingerprint(args: LocationArgs, formatter: &Formatter) -> Result<()> {
    let location = DictionaryLocation::new(&args.directory);
    let report = fingerprint_location(&location)?;
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}
