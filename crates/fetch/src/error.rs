// ABOUTME: Error types for the fetch engine including ErrorCode enum and FetchError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing different categories of fetch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Timeout,
    Parse,
    Config,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Parse => "parse error",
            ErrorCode::Config => "configuration error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for fetch and resolve operations.
#[derive(Debug, thiserror::Error)]
pub struct FetchError {
    pub code: ErrorCode,
    pub location: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gleaner: {} {}: {}", self.op, self.location, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl FetchError {
    /// Create an InvalidUrl error.
    pub fn invalid_url(
        location: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidUrl,
            location: location.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Fetch error.
    pub fn fetch(
        location: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Fetch,
            location: location.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Timeout error.
    pub fn timeout(
        location: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Timeout,
            location: location.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Parse error.
    pub fn parse(
        location: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Parse,
            location: location.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Config error.
    pub fn config(
        location: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Config,
            location: location.into(),
            op: op.into(),
            source,
        }
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a Config error.
    pub fn is_config(&self) -> bool {
        self.code == ErrorCode::Config
    }
}
