use async_trait::async_trait;
use globset::GlobSet;
use tracing::info;

use crate::config::RunConfig;
use crate::error::{NavigatorError, UsageError};
use crate::navigation::browser::Browser;
use crate::navigation::listing::{compile_templates, matches_template};
use crate::navigation::navigator::{Navigator, VersionIndex};
use crate::navigation::navigators::scan_root;
use crate::session::Session;
use crate::version::string::VersionString;

/// Matches the positional filename templates against the links on the root page
pub struct TemplateNavigator {
    browser: Browser,
    root: String,
    templates: GlobSet,
    index: VersionIndex,
}

impl TemplateNavigator {
    pub const NAME: &'static str = "template";

    pub fn new(session: Session, config: &RunConfig) -> Result<Self, UsageError> {
        let root = config.root.clone().ok_or(UsageError::TemplateWithoutRoot)?;

        Ok(Self {
            browser: Browser::new(session),
            root,
            templates: compile_templates(&config.urls)?,
            index: VersionIndex::new(config.version_regex.clone()),
        })
    }
}

#[async_trait]
impl Navigator for TemplateNavigator {
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
        let links = scan_root(&mut self.browser, &self.root).await?;
        let matching: Vec<String> = links
            .into_iter()
            .filter(|link| matches_template(&self.templates, link))
            .collect();
        info!("{} links on {} match the templates", matching.len(), self.root);

        Ok(self.index.index(matching, sorted_by_version))
    }

    fn get_version_info(&self, url: &str) -> Option<VersionString> {
        self.index.version_of(url)
    }

    fn unmatched_urls(&self) -> Vec<String> {
        self.index.unmatched().to_vec()
    }
}
