//! Error type definitions.
//!
//! This module defines the error enums returned across module seams and the
//! error, warning and info categories counted by [`super::ProcessingStats`].

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// A column value could not be converted to or from its model type.
    #[error("Invalid value for column {column}: {message}")]
    ColumnValueError { column: &'static str, message: String },
}

/// A page session could not be established.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The underlying HTTP client could not be built.
    #[error("failed to build session client: {0}")]
    ClientBuild(#[from] ReqwestError),

    /// The session runtime refused to hand out a session.
    #[error("session runtime unavailable: {0}")]
    Unavailable(String),
}

/// A single navigation did not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationFailure {
    /// Nothing usable arrived within the navigation timeout.
    #[error("navigation timed out after {0:?}")]
    Timeout(Duration),

    /// DNS, connect, TLS, redirect or body failure.
    #[error("{0}")]
    Failed(String),
}

/// Fatal failure of one `analyze` call.
///
/// No partial report accompanies any of these; the session has already been
/// released by the time one is returned.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Input URL missing or malformed. Raised before any session exists.
    #[error("{0}")]
    Validation(String),

    /// Session setup failed.
    #[error("Failed to start page session: {0}")]
    Session(#[from] SessionError),

    /// The analyzed page (or its restore after the link walk) did not load.
    #[error("Failed to load {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: NavigationFailure,
    },
}

impl AnalysisError {
    /// Counter category for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            AnalysisError::Validation(_) => ErrorType::ValidationError,
            AnalysisError::Session(_) => ErrorType::SessionError,
            AnalysisError::Navigation {
                source: NavigationFailure::Timeout(_),
                ..
            } => ErrorType::NavigationTimeout,
            AnalysisError::Navigation { .. } => ErrorType::NavigationError,
        }
    }

    /// Whether the caller supplied bad input (as opposed to a runtime failure).
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }
}

/// Types of errors counted during analysis.
///
/// `Link*` variants are per-link failures of the accessibility walk; they are
/// folded into the report's inaccessible-link counter and never abort a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    ValidationError,
    SessionError,
    NavigationTimeout,
    NavigationError,
    LinkHttpError, // 4xx/5xx response
    LinkTimeout,
    LinkNetworkError, // DNS, connect, TLS, unsupported scheme
    StorageError,
}

/// Types of warnings recorded during analysis.
///
/// Warnings describe the analyzed document, not a failure of the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(clippy::enum_variant_names)]
pub enum WarningType {
    MissingTitle,
    MissingDoctype,
}

/// Types of informational metrics recorded during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    AnalysisStarted, // input validated, session about to launch
    AnalysisCompleted,
    PageRedirected, // final URL differs from the requested one
    LinkChecked,
    LoginFormDetected,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ValidationError => "Validation error",
            ErrorType::SessionError => "Session error",
            ErrorType::NavigationTimeout => "Navigation timeout",
            ErrorType::NavigationError => "Navigation error",
            ErrorType::LinkHttpError => "Link HTTP error (4xx/5xx)",
            ErrorType::LinkTimeout => "Link timeout",
            ErrorType::LinkNetworkError => "Link network error",
            ErrorType::StorageError => "Storage error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingTitle => "Missing title",
            WarningType::MissingDoctype => "Missing doctype",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::AnalysisStarted => "Analysis started",
            InfoType::AnalysisCompleted => "Analysis completed",
            InfoType::PageRedirected => "Page redirected",
            InfoType::LinkChecked => "Link checked",
            InfoType::LoginFormDetected => "Login form detected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_type_as_str_unique() {
        let names: Vec<&str> = ErrorType::iter().map(|e| e.as_str()).collect();
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }

    #[test]
    fn test_error_type_display_matches_as_str() {
        for error_type in ErrorType::iter() {
            assert_eq!(error_type.to_string(), error_type.as_str());
        }
    }

    #[test]
    fn test_analysis_error_categories() {
        let validation = AnalysisError::Validation("Missing url parameter".into());
        assert_eq!(validation.error_type(), ErrorType::ValidationError);
        assert!(validation.is_client_error());

        let session = AnalysisError::Session(SessionError::Unavailable("no runtime".into()));
        assert_eq!(session.error_type(), ErrorType::SessionError);
        assert!(!session.is_client_error());

        let timeout = AnalysisError::Navigation {
            url: "https://example.com/".into(),
            source: NavigationFailure::Timeout(Duration::from_secs(120)),
        };
        assert_eq!(timeout.error_type(), ErrorType::NavigationTimeout);

        let failed = AnalysisError::Navigation {
            url: "https://example.com/".into(),
            source: NavigationFailure::Failed("connection refused".into()),
        };
        assert_eq!(failed.error_type(), ErrorType::NavigationError);
    }

    #[test]
    fn test_navigation_error_message_names_url() {
        let err = AnalysisError::Navigation {
            url: "https://example.com/".into(),
            source: NavigationFailure::Timeout(Duration::from_secs(120)),
        };
        let message = err.to_string();
        assert!(message.contains("https://example.com/"));
        assert!(message.contains("timed out"));
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = AnalysisError::Validation("Missing url parameter".into());
        assert_eq!(err.to_string(), "Missing url parameter");
    }
}
