//! Strips a `cargo bench` log down to the benchmark output.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::BenchReportError;

pub const DEFAULT_MARKER: &str = "Finished bench";
const DEPS_RUNNER: &str = "running target/release/deps";
const TEST_WORD: &str = "test";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleanerState {
    AwaitingMarker,
    SkippingLeadingBlanks,
    Emitting,
}

#[derive(Clone, Debug)]
pub struct LogCleaner {
    marker: String,
    state: CleanerState,
}

impl LogCleaner {
    pub fn new<T: Into<String>>(marker: T) -> Self {
        Self {
            marker: marker.into(),
            state: CleanerState::AwaitingMarker,
        }
    }

    pub fn state(&self) -> CleanerState {
        self.state
    }

    /// Feeds one line and returns whether it should be emitted.
    pub fn accept(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        match self.state {
            CleanerState::AwaitingMarker => {
                if trimmed.starts_with(self.marker.as_str()) {
                    debug!("compilation marker found");
                    self.state = CleanerState::SkippingLeadingBlanks;
                }
                false
            }
            CleanerState::SkippingLeadingBlanks => {
                if trimmed.is_empty() {
                    return false;
                }
                self.state = CleanerState::Emitting;
                !is_noise(trimmed)
            }
            CleanerState::Emitting => !is_noise(trimmed),
        }
    }
}

impl Default for LogCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

/// Runner banners and test harness chatter.
pub fn is_noise(trimmed: &str) -> bool {
    let lower = trimmed.to_lowercase();
    lower.contains(DEPS_RUNNER) || lower.contains(TEST_WORD)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub kept: usize,
    pub dropped: usize,
    pub marker_found: bool,
}

/// Copies the lines of `input` that survive filtering to `output`, byte for byte.
pub fn clean_log<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    marker: &str,
) -> Result<CleanSummary, BenchReportError> {
    if marker.trim().is_empty() {
        return Err(BenchReportError::invalid_argument("marker must not be empty"));
    }
    let result = copy_lines(input, output, marker);
    output.flush()?;
    let summary = result?;
    info!(
        kept = summary.kept,
        dropped = summary.dropped,
        marker_found = summary.marker_found,
        "log cleaned"
    );
    Ok(summary)
}

fn copy_lines<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    marker: &str,
) -> Result<CleanSummary, BenchReportError> {
    let mut cleaner = LogCleaner::new(marker);
    let mut summary = CleanSummary::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        if cleaner.accept(&text) {
            output.write_all(&buf)?;
            summary.kept += 1;
        } else {
            summary.dropped += 1;
        }
    }
    summary.marker_found = cleaner.state() != CleanerState::AwaitingMarker;
    Ok(summary)
}
