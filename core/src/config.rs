//! Process-level defaults for the orchestrator.

use crate::error::FetchError;

/// Environment variable holding the default backend base URL.
pub const BASE_URL_ENV: &str = "BACKEND_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchConfig {
    base_url: Option<String>,
}

impl FetchConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: non_blank(base_url),
        }
    }

    /// Load `.env` if one exists, then read `BACKEND_URL`.
    ///
    /// A missing variable is not an error here; it only fails once a
    /// descriptor without its own base URL is issued.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self {
            base_url: std::env::var(BASE_URL_ENV).ok().as_deref().and_then(non_blank),
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Pick the descriptor override first, then the configured default.
    ///
    /// An explicit override is never replaced by the default, so a blank
    /// override is an error rather than a fallback.
    pub fn resolve_base_url<'a>(&'a self, override_url: Option<&'a str>) -> Result<&'a str, FetchError> {
        match override_url {
            Some(url) if url.trim().is_empty() => {
                Err(FetchError::Config("the request sets an empty base URL".to_string()))
            }
            Some(url) => Ok(url),
            None => self.base_url().ok_or_else(|| {
                FetchError::Config(format!(
                    "no base URL on the request and {BASE_URL_ENV} is not set"
                ))
            }),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
