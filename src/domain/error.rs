use crate::domain::model::ServiceId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Closed set of failure kinds a translation attempt can end in.
///
/// Each kind carries a fixed policy: whether retrying the same request later
/// may succeed, and whether the orchestrator should move on to the next
/// enabled service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    NetworkError,
    InvalidCredential,
    QuotaExceeded,
    RateLimited,
    ServiceUnavailable,
    InvalidLanguage,
    TextTooLong,
    ScrapingFailed,
    AllServicesFailed,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::NetworkError | Self::RateLimited)
    }

    /// Input-shape problems and the terminal kind never move on to another service.
    pub fn triggers_fallback(self) -> bool {
        !matches!(
            self,
            Self::InvalidLanguage | Self::TextTooLong | Self::AllServicesFailed
        )
    }

    /// Short, stable message safe to show to end users.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::NetworkError => "Network error. Check your connection and try again.",
            Self::InvalidCredential => "The API key is missing or invalid.",
            Self::QuotaExceeded => "The translation quota for this service is used up.",
            Self::RateLimited => "Too many requests. Please wait a moment.",
            Self::ServiceUnavailable => "The translation service is unavailable right now.",
            Self::InvalidLanguage => "That language is not supported.",
            Self::TextTooLong => "The text is too long to translate.",
            Self::ScrapingFailed => "Could not read the translation from the service.",
            Self::AllServicesFailed => "No translation service could handle the request.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NetworkError => "network-error",
            Self::InvalidCredential => "invalid-credential",
            Self::QuotaExceeded => "quota-exceeded",
            Self::RateLimited => "rate-limited",
            Self::ServiceUnavailable => "service-unavailable",
            Self::InvalidLanguage => "invalid-language",
            Self::TextTooLong => "text-too-long",
            Self::ScrapingFailed => "scraping-failed",
            Self::AllServicesFailed => "all-services-failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified translation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TranslationError {
    pub kind: ErrorKind,
    pub message: String,
    pub service: Option<ServiceId>,
    pub status: Option<u16>,
}

impl TranslationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            service: None,
            status: None,
        }
    }

    pub fn with_service(mut self, service: ServiceId) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach `service` unless the error already names one.
    pub fn or_service(mut self, service: ServiceId) -> Self {
        self.service.get_or_insert(service);
        self
    }

    /// Classify a non-2xx HTTP response.
    pub fn from_status(service: ServiceId, status: u16, quota_status: Option<u16>) -> Self {
        let kind = classify_status(status, quota_status);
        Self::new(kind, format!("{} responded with HTTP {}", service, status))
            .with_service(service)
            .with_status(status)
    }

    pub fn network(service: ServiceId, detail: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::NetworkError,
            format!("Request to {} failed: {}", service, detail),
        )
        .with_service(service)
    }

    pub fn unavailable(service: ServiceId, detail: impl fmt::Display) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, detail.to_string()).with_service(service)
    }

    pub fn scraping_failed(service: ServiceId) -> Self {
        Self::new(
            ErrorKind::ScrapingFailed,
            format!("No translation found in the {} page", service),
        )
        .with_service(service)
    }

    pub fn no_services_enabled() -> Self {
        Self::new(
            ErrorKind::AllServicesFailed,
            "No translation services are enabled",
        )
    }

    pub fn no_services_available() -> Self {
        Self::new(
            ErrorKind::AllServicesFailed,
            "None of the enabled translation services are available",
        )
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    pub fn triggers_fallback(&self) -> bool {
        self.kind.triggers_fallback()
    }

    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }
}

/// Map an HTTP status to an error kind. `quota_status` is the provider's own
/// "quota used up" code, if it has one.
pub fn classify_status(status: u16, quota_status: Option<u16>) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::InvalidCredential,
        429 => ErrorKind::RateLimited,
        s if Some(s) == quota_status => ErrorKind::QuotaExceeded,
        _ => ErrorKind::ServiceUnavailable,
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error(transparent)]
    Translation(#[from] TranslationError),
}
