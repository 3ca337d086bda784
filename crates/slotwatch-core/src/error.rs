use thiserror::Error;

/// Validation errors for configuration values and scan inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("month must be within 1..=12: {value}")]
    InvalidMonth { value: u8 },
    #[error("year {value} is outside the supported calendar range")]
    InvalidYear { value: i32 },
    #[error("date must be ISO formatted (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },

    #[error("concurrency must be within {min}..={max}: {value}")]
    ConcurrencyOutOfRange { value: usize, min: usize, max: usize },
    #[error("retry window must be one of 60, 120, 180, 300 seconds: {value}")]
    UnsupportedRetryWindow { value: u64 },
    #[error("jitter window must satisfy 0 < min < max (min={min_ms}ms, max={max_ms}ms)")]
    InvalidJitterWindow { min_ms: u64, max_ms: u64 },

    #[error("endpoint must be an http(s) URL: '{value}'")]
    InvalidEndpoint { value: String },
}

/// Failure of a single call to the ticketing API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network failure, timeout, or a non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Body was not JSON, or not the JSON object the API wraps its results in.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Errors that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("date listing failed: {0}")]
    DateList(#[from] ApiError),

    #[error("poll worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("worker pool closed before all dates were polled")]
    PoolClosed(#[from] tokio::sync::AcquireError),
}
