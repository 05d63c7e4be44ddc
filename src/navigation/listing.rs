//! Link extraction from listing pages and filename template matching

use std::sync::LazyLock;

use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexSet;
use scraper::{Html, Selector};
use url::Url;

use crate::error::UsageError;

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Absolute http(s) link targets of `html`, resolved against `base`, de-duplicated in page order.
///
/// Fragments are dropped, so `a.zip#sha` and `a.zip` are the same link.
pub fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = IndexSet::new();

    for anchor in document.select(&LINK_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(mut url) = base.join(href.trim()) else {
            continue;
        };
        if !matches!(url.scheme(), "http" | "https") {
            continue;
        }
        url.set_fragment(None);
        links.insert(url.to_string());
    }

    links.into_iter().collect()
}

/// Compiles unix filename templates such as `app-*.tar.gz`.
pub fn compile_templates<S: AsRef<str>>(templates: &[S]) -> Result<GlobSet, UsageError> {
    let mut builder = GlobSetBuilder::new();
    for template in templates {
        let template = template.as_ref();
        let glob = Glob::new(template).map_err(|e| UsageError::InvalidTemplate {
            template: template.to_string(),
            reason: e.to_string(),
        })?;
        builder.add(glob);
    }

    builder.build().map_err(|e| UsageError::InvalidTemplate {
        template: templates
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" "),
        reason: e.to_string(),
    })
}

/// Last path segment of `url`, if it has a non-empty one
pub fn file_name(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

pub fn matches_template(templates: &GlobSet, url: &str) -> bool {
    file_name(url).is_some_and(|name| templates.is_match(name))
}
