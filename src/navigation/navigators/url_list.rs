use async_trait::async_trait;

use crate::config::RunConfig;
use crate::error::NavigatorError;
use crate::navigation::browser::Browser;
use crate::navigation::navigator::{Navigator, VersionIndex};
use crate::session::Session;
use crate::version::string::VersionString;

/// Hashes the URLs given on the command line
pub struct UrlNavigator {
    browser: Browser,
    urls: Vec<String>,
    index: VersionIndex,
}

impl UrlNavigator {
    pub const NAME: &'static str = "url";

    pub fn new(session: Session, config: &RunConfig) -> Self {
        Self {
            browser: Browser::new(session),
            urls: config.urls.clone(),
            index: VersionIndex::new(config.version_regex.clone()),
        }
    }
}

#[async_trait]
impl Navigator for UrlNavigator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn browser(&self) -> &Browser {
        &self.browser
    }

    fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    async fn get_urls(&mut self, sorted_by_version: bool) -> Result<Vec<String>, NavigatorError> {
        Ok(self.index.index(self.urls.iter().cloned(), sorted_by_version))
    }

    fn get_version_info(&self, url: &str) -> Option<VersionString> {
        self.index.version_of(url)
    }

    fn unmatched_urls(&self) -> Vec<String> {
        self.index.unmatched().to_vec()
    }
}
