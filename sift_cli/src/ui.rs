//! Styled terminal output helpers for the Sift CLI

use std::fmt;
use std::str::FromStr;

use console::style;
use serde::Serialize;
use sift_core::{FilterRow, ParamValue, PillSummary, QueryParams};

/// Output format of command results.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

pub fn header(message: &str) {
    eprintln!("{}", style(message).bold());
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

pub fn info(message: &str) {
    eprintln!("{}", style(message).dim());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

pub fn error_with_details(message: &str, details: &str) {
    eprintln!("{} {}: {}", style("✗").red(), message, style(details).dim());
}

pub fn json_output<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error_with_details("Couldn't serialize output", &e.to_string()),
    }
}

pub fn pretty_output_pills(pills: &[PillSummary]) {
    if pills.is_empty() {
        info("No active filters");
        return;
    }
    for pill in pills {
        let operation = pill.operation.as_deref().unwrap_or("is");
        println!(
            "{} {} {}",
            style(&pill.label).bold(),
            style(operation).dim(),
            style(&pill.summary).cyan(),
        );
    }
}

pub fn pretty_output_rows(rows: &[FilterRow]) {
    for row in rows {
        let count = if row.count > 0 {
            format!(" ({})", row.count)
        } else {
            String::new()
        };
        println!("{}  {}{}", style(&row.key).cyan(), row.label, count);
    }
}

pub fn pretty_output_params(params: &QueryParams) {
    if params.is_empty() {
        info("No query parameters");
        return;
    }
    for (key, value) in params {
        let rendered = match value {
            ParamValue::Single(v) => v.clone(),
            ParamValue::Many(vs) => vs.join(", "),
        };
        println!("{}={}", style(key).cyan(), rendered);
    }
}
