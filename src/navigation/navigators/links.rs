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

/// Keeps every link on the root page whose URL carries a version
///
/// Positional arguments, when given, are filename templates that narrow the
/// selection further.
pub struct LinkNavigator {
    browser: Browser,
    root: String,
    templates: Option<GlobSet>,
    index: VersionIndex,
}

impl LinkNavigator {
    pub const NAME: &'static str = "links";

    pub fn new(session: Session, config: &RunConfig) -> Result<Self, UsageError> {
        let root = config
            .root
            .clone()
            .ok_or(UsageError::RootRequired {
                navigator: Self::NAME,
            })?;

        let templates = if config.urls.is_empty() {
            None
        } else {
            Some(compile_templates(&config.urls)?)
        };

        Ok(Self {
            browser: Browser::new(session),
            root,
            templates,
            index: VersionIndex::new(config.version_regex.clone()),
        })
    }
}

#[async_trait]
impl Navigator for LinkNavigator {
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
        let regex = self.index.regex();
        let versioned: Vec<String> = links
            .into_iter()
            .filter(|link| regex.is_match(link))
            .filter(|link| {
                self.templates
                    .as_ref()
                    .is_none_or(|templates| matches_template(templates, link))
            })
            .collect();
        info!("{} versioned links on {}", versioned.len(), self.root);

        Ok(self.index.index(versioned, sorted_by_version))
    }

    fn get_version_info(&self, url: &str) -> Option<VersionString> {
        self.index.version_of(url)
    }

    fn unmatched_urls(&self) -> Vec<String> {
        self.index.unmatched().to_vec()
    }
}
