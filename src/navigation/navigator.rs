//! The navigator trait and the version index shared by concrete navigators

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;

use crate::error::NavigatorError;
use crate::navigation::browser::Browser;
use crate::navigation::form::FormDescriptor;
use crate::session::{Credentials, Session};
use crate::version::extract::{UrlVersions, extract_versions, order_urls};
use crate::version::string::VersionString;

/// Descriptive metadata about the package whose files are being hashed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// Discovers the URLs to hash
///
/// Implementors own a [`Browser`], which owns the run's session; login and
/// re-login go through it.
#[async_trait]
pub trait Navigator: Send {
    /// Registered name of the navigator
    fn name(&self) -> &'static str;

    fn browser(&self) -> &Browser;

    fn browser_mut(&mut self) -> &mut Browser;

    /// Candidate URLs, newest version first when `sorted_by_version` is set.
    async fn get_urls(&mut self, sorted_by_version: bool) -> Result<Vec<String>, NavigatorError>;

    /// Logs in at `root` and remembers the parameters for later re-login.
    ///
    /// Without a form descriptor this is a plain GET of `root`.
    async fn login_with_form(
        &mut self,
        root: &str,
        credentials: Option<Credentials>,
        form: Option<FormDescriptor>,
        verbosity: u8,
    ) -> Result<(), NavigatorError> {
        self.browser_mut()
            .login(root, credentials, form, verbosity)
            .await
            .map(|_| ())
    }

    /// The current session; replaced when the navigator logs in again
    fn session(&self) -> &Session {
        self.browser().session()
    }

    fn get_version_info(&self, _url: &str) -> Option<VersionString> {
        None
    }

    fn get_package_info(&self) -> Option<PackageInfo> {
        None
    }

    /// URLs from the last [`Navigator::get_urls`] whose version could not be found
    fn unmatched_urls(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Versions extracted from discovered URLs with the run's regex
#[derive(Debug, Clone)]
pub struct VersionIndex {
    regex: Regex,
    versions: UrlVersions,
    unmatched: Vec<String>,
}

impl VersionIndex {
    pub fn new(regex: Regex) -> Self {
        Self {
            regex,
            versions: UrlVersions::new(),
            unmatched: Vec::new(),
        }
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Replaces the index with `urls` and returns them, ordered if requested.
    pub fn index<I, S>(&mut self, urls: I, sorted_by_version: bool) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extraction = extract_versions(urls, &self.regex);
        self.versions = extraction.versions;
        self.unmatched = extraction.unmatched;
        order_urls(&self.versions, sorted_by_version)
    }

    pub fn version_of(&self, url: &str) -> Option<VersionString> {
        self.versions.get(url).cloned()
    }

    /// URLs of the last [`VersionIndex::index`] call that fell back to the sentinel
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }
}
