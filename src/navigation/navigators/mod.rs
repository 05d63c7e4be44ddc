//! Concrete navigator implementations

pub mod github;
pub mod links;
pub mod template;
pub mod url_list;

pub use github::GitHubNavigator;
pub use links::LinkNavigator;
pub use template::TemplateNavigator;
pub use url_list::UrlNavigator;

use reqwest::StatusCode;

use crate::error::NavigatorError;
use crate::navigation::browser::Browser;
use crate::navigation::listing::extract_links;

/// Opens the root listing page and returns its links.
pub(crate) async fn scan_root(browser: &mut Browser, root: &str) -> Result<Vec<String>, NavigatorError> {
    let page = browser.open(root).await?;

    if page.status == StatusCode::NOT_FOUND.as_u16() {
        return Err(NavigatorError::NotFound(root.to_string()));
    }
    if !page.is_ok() {
        return Err(NavigatorError::InvalidResponse(format!(
            "{} answered {}",
            root, page.status
        )));
    }

    Ok(extract_links(&page.body, &page.url))
}
