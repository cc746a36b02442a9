//! Rendering of analysis results for the command line.

use crate::analyzer::{AnalysisResult, Finding};
use crate::verdict::Verdict;
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}', expected text or json", other)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub score: f64,
    pub threshold: f64,
    pub verdict: Verdict,
    pub reasons: Vec<&'a str>,
    pub findings: &'a [Finding],
}

impl<'a> Report<'a> {
    pub fn new(result: &'a AnalysisResult, threshold: f64) -> Self {
        Self {
            score: result.score(),
            threshold,
            verdict: Verdict::classify(result.score(), threshold),
            reasons: result.reasons(),
            findings: result.findings(),
        }
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    /// Whole-number deltas print as an integer. Once a fractional delta has
    /// fired the score keeps its decimal point, so `1.5 + 0.5` prints `2.0`.
    fn score_text(&self) -> String {
        if self.findings.iter().any(|f| f.delta.fract() != 0.0) {
            format!("{:?}", self.score)
        } else {
            format!("{}", self.score)
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n< < < Analysis Results > > >");
        let _ = writeln!(out, "\nPhishing Score: {}", self.score_text());
        let _ = writeln!(out, "\n{}", self.verdict.message());
        let _ = writeln!(out, "\nReasons:");
        for reason in &self.reasons {
            let _ = writeln!(out, "- {}", reason);
        }
        out
    }
}
