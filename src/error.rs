use std::path::PathBuf;

use thiserror::Error;

/// Invalid invocation or configuration; fatal before any download starts
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("navigator {name} not found expected one of {available:?}")]
    UnknownNavigator {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("output {name} not found expected one of {available:?}")]
    UnknownOutput {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("digest {name} is not supported, expected one of {available:?}")]
    UnknownDigest {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("argument --template requires matching --root")]
    TemplateWithoutRoot,

    #[error("navigator {navigator} requires --root")]
    RootRequired { navigator: &'static str },

    #[error("invalid --version-format {pattern:?}: {reason}")]
    InvalidVersionFormat { pattern: String, reason: String },

    #[error("invalid filename template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("invalid config file {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

/// A single URL could not be digested
///
/// Recoverable: the harvest loop reports it inline and moves on to the next URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("download failed [{0}]")]
pub struct DownloadFailed(pub String);

#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error("couldn't open the login page {url}: response was {status}")]
    LoginPage { url: String, status: u16 },

    #[error("bad response from the login form at {url}: response was {status}")]
    LoginRejected { url: String, status: u16 },

    #[error("login form not found: {0}")]
    FormNotFound(String),

    #[error("cannot log in again before a first login")]
    NotLoggedIn,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NavigatorError {
    /// Whether the failure came from the login procedure
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            NavigatorError::LoginPage { .. }
                | NavigatorError::LoginRejected { .. }
                | NavigatorError::FormNotFound(_)
                | NavigatorError::NotLoggedIn
        )
    }
}

/// Errors that end a run
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Navigator(#[from] NavigatorError),

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
