//! Error handling for the typosquat detection pipeline.
//!
//! This module defines a comprehensive error type that covers all the different
//! ways a detection run can fail, from network issues to invalid configuration.

use std::fmt;

/// Main error type for typosquat detection operations.
///
/// This enum covers all possible failure modes in the detection pipeline,
/// providing detailed context for debugging and user-friendly error messages.
#[derive(Debug, Clone)]
pub enum TypoCheckError {
    /// Typo generation via the text-generation API failed
    GenerationError {
        domain: String,
        message: String,
        status_code: Option<u16>,
    },

    /// Network-related errors (connection, timeout, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// DNS resolution failed in a way that is not a recognized
    /// "not registered" outcome
    DnsError { domain: String, message: String },

    /// WHOIS lookup failures (only surfaced internally; the registrant
    /// lookup normalizes these to an absent entity)
    WhoisError { domain: String, message: String },

    /// JSON parsing errors for completions responses
    ParseError {
        message: String,
        content: Option<String>,
    },

    /// Configuration errors (missing API key, invalid settings, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading domain lists or writing findings
    FileError { path: String, message: String },

    /// Timeout errors when operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl TypoCheckError {
    /// Create a new generation error.
    pub fn generation<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::GenerationError {
            domain: domain.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a new generation error with HTTP status code.
    pub fn generation_with_status<D: Into<String>, M: Into<String>>(
        domain: D,
        message: M,
        status_code: u16,
    ) -> Self {
        Self::GenerationError {
            domain: domain.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new DNS error.
    pub fn dns<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::DnsError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new WHOIS error.
    pub fn whois<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::WhoisError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new parse error.
    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::ParseError {
            message: message.into(),
            content: None,
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error came from the typo-generation stage.
    ///
    /// A run skips the affected source domain and continues on these;
    /// everything else (DNS failures, file errors) aborts the run.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Self::GenerationError { .. }
                | Self::NetworkError { .. }
                | Self::ParseError { .. }
                | Self::Timeout { .. }
        )
    }
}

impl fmt::Display for TypoCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerationError {
                domain,
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(
                        f,
                        "Generation error for '{}' (HTTP {}): {}",
                        domain, code, message
                    )
                } else {
                    write!(f, "Generation error for '{}': {}", domain, message)
                }
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::DnsError { domain, message } => {
                write!(f, "DNS error for '{}': {}", domain, message)
            }
            Self::WhoisError { domain, message } => {
                write!(f, "WHOIS error for '{}': {}", domain, message)
            }
            Self::ParseError { message, content: _ } => {
                write!(f, "Parse error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for TypoCheckError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for TypoCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(60))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for TypoCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
            content: None,
        }
    }
}

impl From<std::io::Error> for TypoCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_stage_errors_are_skippable() {
        assert!(TypoCheckError::generation("example.com", "service down").is_generation_failure());
        assert!(TypoCheckError::network("connection refused").is_generation_failure());
        assert!(TypoCheckError::parse("bad JSON").is_generation_failure());
        assert!(
            TypoCheckError::timeout("HTTP request", std::time::Duration::from_secs(60))
                .is_generation_failure()
        );
    }

    #[test]
    fn test_other_errors_are_not_skippable() {
        assert!(!TypoCheckError::dns("example.com", "SERVFAIL").is_generation_failure());
        assert!(!TypoCheckError::file_error("/tmp/x", "denied").is_generation_failure());
        assert!(!TypoCheckError::config("bad selector").is_generation_failure());
    }
}
