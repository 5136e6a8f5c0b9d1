use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchReportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: malformed json: {message}")]
    MalformedJson { line: usize, message: String },
    #[error("line {line}: invalid benchmark record: {message}")]
    InvalidRecord { line: usize, message: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl BenchReportError {
    pub fn malformed_json<T: Into<String>>(line: usize, msg: T) -> Self {
        BenchReportError::MalformedJson {
            line,
            message: msg.into(),
        }
    }

    pub fn invalid_record<T: Into<String>>(line: usize, msg: T) -> Self {
        BenchReportError::InvalidRecord {
            line,
            message: msg.into(),
        }
    }

    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        BenchReportError::InvalidArgument(msg.into())
    }
}
