//! Post-processing for `cargo bench` output in CI.
//! `cleanup_bench` trims the build log; `format_bench` turns Criterion's JSON messages into
//! Markdown tables with a per-category trend summary.

pub mod bench_utils;
pub mod cli;
pub mod errors;
pub mod log_cleaner;
pub mod logging;
pub mod numfmt;
pub mod record;
pub mod report;
pub mod units;

pub use crate::errors::BenchReportError;
pub use crate::log_cleaner::{CleanSummary, LogCleaner, clean_log};
pub use crate::record::{BenchmarkRecord, ChangeDescriptor, ParsedLine};
pub use crate::report::{ReportSummary, format_report};
pub use crate::units::{Measurement, TimeUnit};
