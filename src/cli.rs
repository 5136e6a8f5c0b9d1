use crate::{log_cleaner::DEFAULT_MARKER, report::DEFAULT_TREND_THRESHOLD};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanupConfig {
    pub marker: String,
}

impl CleanupConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut marker = String::from(DEFAULT_MARKER);
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--marker" => {
                    marker = iter
                        .next()
                        .ok_or_else(|| "--marker requires a value".to_string())?
                        .to_string();
                    if marker.trim().is_empty() {
                        return Err("--marker must not be empty".into());
                    }
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                other => return Err(format!("unexpected argument {other}")),
            }
        }
        Ok(Self { marker })
    }

    pub fn help() -> &'static str {
        "Usage: cleanup_bench [--marker TEXT] < bench.log\n"
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormatConfig {
    pub threshold: f64,
}

impl FormatConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut threshold = DEFAULT_TREND_THRESHOLD;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--threshold" => {
                    let raw = iter
                        .next()
                        .ok_or_else(|| "--threshold requires a value".to_string())?;
                    threshold = parse_threshold(raw)?;
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                other => return Err(format!("unexpected argument {other}")),
            }
        }
        Ok(Self { threshold })
    }

    pub fn help() -> &'static str {
        "Usage: format_bench [--threshold PCT] < criterion.jsonl\n"
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_TREND_THRESHOLD,
        }
    }
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("invalid threshold {raw}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("threshold must be a non-negative number, got {raw}"));
    }
    Ok(value)
}
