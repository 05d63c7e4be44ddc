//! The HTTP session shared by navigation and downloads
//!
//! A [`Session`] is created once per run and handed to the navigator. Cookies
//! set during login live in the session's jar, so downloads made through the
//! same session are authenticated too.

use std::fmt;
use std::time::Duration;

use reqwest::redirect::Policy;

use crate::config::{MAX_REDIRECTS, RunConfig};

/// Username and password for HTTP and form authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub user_agent: String,
    /// Applied separately to connecting and to each read
    pub timeout: Duration,
}

impl From<&RunConfig> for SessionOptions {
    fn from(config: &RunConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
        }
    }
}

/// A cookie-keeping HTTP client
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    options: SessionOptions,
}

impl Session {
    pub fn new(options: SessionOptions) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(&options.user_agent)
            .cookie_store(true)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .connect_timeout(options.timeout)
            .read_timeout(options.timeout)
            .build()?;

        Ok(Self { client, options })
    }

    /// Builds a new session with the same options and an empty cookie jar.
    pub fn fresh(&self) -> Result<Self, reqwest::Error> {
        Self::new(self.options.clone())
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}
