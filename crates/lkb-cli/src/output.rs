//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a command report as a two-column table or as JSON.
    pub fn format_report<R>(&self, report: &R) -> Result<String>
    where
        R: Serialize + Report,
    {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_table(&report.rows())),
        }
    }

    fn format_table(&self, rows: &[(&'static str, String)]) -> String {
        if rows.is_empty() {
            return self.colorize("Nothing to report.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (field, value) in rows {
            builder.push_record([*field, value.as_str()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether messages should be printed alongside the report.
    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Table
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// A command result that can be shown as field/value rows.
pub trait Report {
    /// Rows in display order
    fn rows(&self) -> Vec<(&'static str, String)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        location: String,
        entities: usize,
    }

    impl Report for Sample {
        fn rows(&self) -> Vec<(&'static str, String)> {
            vec![
                ("Location", self.location.clone()),
                ("Entities", self.entities.to_string()),
            ]
        }
    }

    fn sample() -> Sample {
        Sample {
            location: "/dict/cities".to_string(),
            entities: 3,
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&sample()).unwrap();
        assert!(output.contains("\"entities\": 3"));
        assert!(!formatter.is_human());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&sample()).unwrap();
        assert!(output.contains("Location"));
        assert!(output.contains("/dict/cities"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.warning("stale"), "⚠ stale");
    }
}
