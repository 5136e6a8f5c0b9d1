//! Criterion's line-delimited JSON messages.

use serde::Deserialize;
use serde_json::Value;

use crate::{BenchReportError, units::TimeUnit};

pub const BENCHMARK_COMPLETE: &str = "benchmark-complete";
pub const NO_CHANGE_TAG: &str = "NoChange";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Estimate {
    pub estimate: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChangeDescriptor {
    pub change: String,
    pub mean: Estimate,
}

impl ChangeDescriptor {
    pub fn relative(&self) -> f64 {
        self.mean.estimate
    }

    pub fn label(&self) -> &str {
        if self.change == NO_CHANGE_TAG {
            "No change"
        } else {
            &self.change
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    pub id: String,
    pub unit: TimeUnit,
    pub typical: Estimate,
    #[serde(default)]
    pub change: Option<ChangeDescriptor>,
}

impl BenchmarkRecord {
    /// Trailing segment of the slash-delimited id.
    pub fn category(&self) -> &str {
        self.id
            .rsplit_once('/')
            .map_or(self.id.as_str(), |(_, tail)| tail)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParsedLine {
    Benchmark(BenchmarkRecord),
    Skipped { reason: String },
}

/// Parses one input line. `line` is 1-based and only used for error messages.
pub fn parse_line(line: usize, text: &str) -> Result<ParsedLine, BenchReportError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| BenchReportError::malformed_json(line, e.to_string()))?;
    match value.get("reason") {
        None => {
            return Err(BenchReportError::invalid_record(line, "missing field `reason`"));
        }
        Some(reason) if reason.as_str() != Some(BENCHMARK_COMPLETE) => {
            let reason = reason
                .as_str()
                .map_or_else(|| reason.to_string(), str::to_string);
            return Ok(ParsedLine::Skipped { reason });
        }
        Some(_) => {}
    }
    let record = serde_json::from_value(value)
        .map_err(|e| BenchReportError::invalid_record(line, e.to_string()))?;
    Ok(ParsedLine::Benchmark(record))
}
