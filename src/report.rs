//! Markdown report over Criterion's JSON output: one row per finished benchmark, then the
//! average change per category.

use std::{
    fmt,
    io::{BufRead, Write},
};

use ahash::AHashMap;
use tracing::{debug, info};

use crate::{
    BenchReportError,
    numfmt::{format_signed, round2},
    record::{BenchmarkRecord, ParsedLine, parse_line},
    units::{Measurement, bump, bump_capped},
};

pub const ROW_HEADER: &str = "| benchmark | current time | previous time | diff | diff% | change |";
pub const ROW_SEPARATOR: &str = "| --------- | ------------ | ------------- | ---- | ----- | ------ |";
pub const TREND_HEADER: &str = "| category | average diff% | trend |";
pub const TREND_SEPARATOR: &str = "| -------- | ------------- | ----- |";
pub const PLACEHOLDER: &str = "-";
pub const DEFAULT_TREND_THRESHOLD: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub previous: Measurement,
    pub diff: Measurement,
    pub diff_percent: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormattedRow {
    pub id: String,
    pub current: Measurement,
    pub comparison: Option<Comparison>,
}

impl FormattedRow {
    pub fn from_record(record: &BenchmarkRecord) -> Self {
        let typical = record.typical.estimate;
        let current = bump(typical, record.unit);
        let comparison = record.change.as_ref().map(|change| {
            let relative = change.relative();
            let previous = typical * (1.0 + relative);
            Comparison {
                previous: bump_capped(previous, record.unit, current.unit),
                diff: bump_capped(previous - typical, record.unit, current.unit),
                diff_percent: round2(100.0 * relative),
                label: change.label().to_string(),
            }
        });
        Self {
            id: record.id.clone(),
            current,
            comparison,
        }
    }
}

impl fmt::Display for FormattedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "| {} | {} |", self.id, self.current)?;
        match &self.comparison {
            Some(cmp) => write!(
                f,
                " {} | {} | {}% | {} |",
                cmp.previous,
                cmp.diff.signed(),
                format_signed(cmp.diff_percent),
                cmp.label
            ),
            None => write!(
                f,
                " {PLACEHOLDER} | {PLACEHOLDER} | {PLACEHOLDER} | {PLACEHOLDER} |"
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Regressed,
    Improved,
    NoChange,
}

impl Trend {
    pub fn classify(average: f64, threshold: f64) -> Self {
        if average > threshold {
            Trend::Regressed
        } else if average < -threshold {
            Trend::Improved
        } else {
            Trend::NoChange
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Regressed => "Regressed",
            Trend::Improved => "Improved",
            Trend::NoChange => "No Change",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub sum: f64,
    pub count: usize,
}

impl CategoryTotal {
    pub fn average(&self) -> f64 {
        round2(self.sum / self.count as f64)
    }
}

/// Running (sum, count) of diff percents per category, kept in first-insertion order.
#[derive(Clone, Debug, Default)]
pub struct CategoryAccumulator {
    index: AHashMap<String, usize>,
    totals: Vec<CategoryTotal>,
}

impl CategoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: &str, diff_percent: f64) {
        let slot = match self.index.get(category).copied() {
            Some(slot) => slot,
            None => {
                self.totals.push(CategoryTotal {
                    category: category.to_string(),
                    sum: 0.0,
                    count: 0,
                });
                self.index.insert(category.to_string(), self.totals.len() - 1);
                self.totals.len() - 1
            }
        };
        let total = &mut self.totals[slot];
        total.sum += diff_percent;
        total.count += 1;
    }

    pub fn get(&self, category: &str) -> Option<&CategoryTotal> {
        self.index.get(category).map(|&slot| &self.totals[slot])
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.totals.iter()
    }

    pub fn summarize(&self, threshold: f64) -> Vec<CategorySummary> {
        self.totals
            .iter()
            .filter(|total| total.count > 0)
            .map(|total| {
                let average = total.average();
                CategorySummary {
                    category: total.category.clone(),
                    average,
                    trend: Trend::classify(average, threshold),
                }
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub average: f64,
    pub trend: Trend,
}

impl fmt::Display for CategorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| {} | {}% | {} |",
            self.category,
            format_signed(self.average),
            self.trend.as_str()
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportSummary {
    pub rows: usize,
    pub skipped: usize,
    pub categories: Vec<CategorySummary>,
}

/// Streaming formatter; rows are written as soon as their line is read.
#[derive(Debug)]
pub struct ReportFormatter {
    threshold: f64,
    accumulator: CategoryAccumulator,
    rows: usize,
    skipped: usize,
}

impl ReportFormatter {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            accumulator: CategoryAccumulator::new(),
            rows: 0,
            skipped: 0,
        }
    }

    pub fn write_header<W: Write>(&self, out: &mut W) -> Result<(), BenchReportError> {
        writeln!(out, "{ROW_HEADER}")?;
        writeln!(out, "{ROW_SEPARATOR}")?;
        Ok(())
    }

    pub fn process_line<W: Write>(
        &mut self,
        line: usize,
        text: &str,
        out: &mut W,
    ) -> Result<Option<FormattedRow>, BenchReportError> {
        let record = match parse_line(line, text)? {
            ParsedLine::Benchmark(record) => record,
            ParsedLine::Skipped { reason } => {
                debug!(line, reason = %reason, "skipping record");
                self.skipped += 1;
                return Ok(None);
            }
        };
        let row = FormattedRow::from_record(&record);
        writeln!(out, "{row}")?;
        if let Some(cmp) = &row.comparison {
            self.accumulator.record(record.category(), cmp.diff_percent);
        }
        self.rows += 1;
        Ok(Some(row))
    }

    pub fn finish<W: Write>(self, out: &mut W) -> Result<ReportSummary, BenchReportError> {
        let categories = self.accumulator.summarize(self.threshold);
        writeln!(out)?;
        writeln!(out, "{TREND_HEADER}")?;
        writeln!(out, "{TREND_SEPARATOR}")?;
        for summary in &categories {
            writeln!(out, "{summary}")?;
        }
        Ok(ReportSummary {
            rows: self.rows,
            skipped: self.skipped,
            categories,
        })
    }
}

/// Reads JSON lines from `input` until exhausted and writes both tables to `output`.
///
/// The first malformed line aborts the run; everything written before it is flushed.
pub fn format_report<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    threshold: f64,
) -> Result<ReportSummary, BenchReportError> {
    let result = write_report(input, output, threshold);
    output.flush()?;
    let summary = result?;
    info!(
        rows = summary.rows,
        skipped = summary.skipped,
        categories = summary.categories.len(),
        "benchmark report written"
    );
    Ok(summary)
}

fn write_report<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    threshold: f64,
) -> Result<ReportSummary, BenchReportError> {
    let mut formatter = ReportFormatter::new(threshold);
    formatter.write_header(output)?;
    for (idx, line) in input.lines().enumerate() {
        let text = line?;
        formatter.process_line(idx + 1, &text, output)?;
    }
    formatter.finish(output)
}
