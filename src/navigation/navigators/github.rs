//! GitHub Releases navigator
//!
//! Positional arguments are `owner/repo` names. Every asset of every release
//! becomes a URL, versioned by the release tag with a leading `v` removed.
//! Releases are read 100 per page, following the `Link` header.

use async_trait::async_trait;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, LINK};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::error::NavigatorError;
use crate::navigation::browser::Browser;
use crate::navigation::navigator::{Navigator, PackageInfo};
use crate::session::Session;
use crate::version::extract::{UrlVersions, order_urls};
use crate::version::string::VersionString;

const RELEASES_PER_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    browser_download_url: String,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
    html_url: Option<String>,
    description: Option<String>,
}

pub struct GitHubNavigator {
    browser: Browser,
    base_url: String,
    repos: Vec<String>,
    versions: UrlVersions,
    package: Option<PackageInfo>,
}

impl GitHubNavigator {
    pub const NAME: &'static str = "github";

    pub fn new(session: Session, config: &RunConfig) -> Self {
        Self {
            browser: Browser::new(session),
            base_url: config.github_api_url.trim_end_matches('/').to_string(),
            repos: config.urls.clone(),
            versions: UrlVersions::new(),
            package: None,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, name: &str) -> Result<T, NavigatorError> {
        let url = format!("{}{}", self.base_url, path);
        let (value, _) = self.get_page(&url, name).await?;
        Ok(value)
    }

    /// One API response and the URL of the next page, if any.
    async fn get_page<T: DeserializeOwned>(
        &self,
        url: &str,
        name: &str,
    ) -> Result<(T, Option<String>), NavigatorError> {
        let response = self
            .browser
            .session()
            .client()
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers();

        if status == StatusCode::NOT_FOUND {
            return Err(NavigatorError::NotFound(name.to_string()));
        }

        if is_rate_limited(status, headers) {
            return Err(NavigatorError::RateLimited {
                retry_after_secs: retry_after_secs(headers),
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(NavigatorError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let next = next_page(headers);
        let value = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub response from {}: {}", url, e);
            NavigatorError::InvalidResponse(e.to_string())
        })?;
        Ok((value, next))
    }

    /// Every release of `repo`, following the API's pagination.
    async fn fetch_releases(&self, repo: &str) -> Result<Vec<Release>, NavigatorError> {
        let mut releases = Vec::new();
        let mut url = Some(format!(
            "{}/repos/{repo}/releases?per_page={RELEASES_PER_PAGE}",
            self.base_url
        ));

        while let Some(current) = url {
            let (page, next): (Vec<Release>, _) = self.get_page(&current, repo).await?;
            debug!("{} releases on {}", page.len(), current);
            releases.extend(page);
            url = next;
        }

        Ok(releases)
    }

    async fn fetch_repository(&self, repo: &str) -> Result<PackageInfo, NavigatorError> {
        let repository: Repository = self.get_json(&format!("/repos/{repo}"), repo).await?;
        Ok(PackageInfo {
            name: repository.full_name,
            version: None,
            website: repository.html_url,
            info: repository.description,
        })
    }
}

/// 429, or 403 once the primary quota is spent
fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && headers
                .get("x-ratelimit-remaining")
                .is_some_and(|remaining| remaining.as_bytes() == b"0"))
}

/// `retry-after`, else the distance to `x-ratelimit-reset` (epoch seconds)
fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };

    header("retry-after").or_else(|| {
        let reset = header("x-ratelimit-reset")?;
        let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
        Some(reset.saturating_sub(now))
    })
}

/// The `rel="next"` target of a `Link` header
fn next_page(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|param| param.trim().replace(' ', "") == r#"rel="next""#);
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        is_next.then(|| target.to_string())
    })
}

fn tag_version(tag: &str) -> VersionString {
    let tag = tag.strip_prefix(['v', 'V']).unwrap_or(tag);
    VersionString::new(tag)
}

#[async_trait]
impl Navigator for GitHubNavigator {
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
        let mut versions = UrlVersions::new();
        let mut package = None;

        for repo in &self.repos {
            let releases: Vec<Release> = self
                .fetch_releases(repo)
                .await?
                .into_iter()
                .filter(|r| !r.draft)
                .collect();
            info!("{} has {} releases", repo, releases.len());

            if package.is_none() {
                let mut info = self.fetch_repository(repo).await?;
                info.version = releases
                    .first()
                    .map(|release| tag_version(&release.tag_name).to_string());
                package = Some(info);
            }

            for release in releases {
                let version = tag_version(&release.tag_name);
                for asset in release.assets {
                    versions.insert(asset.browser_download_url, version.clone());
                }
            }
        }

        self.versions = versions;
        self.package = package;
        Ok(order_urls(&self.versions, sorted_by_version))
    }

    fn get_version_info(&self, url: &str) -> Option<VersionString> {
        self.versions.get(url).cloned()
    }

    fn get_package_info(&self) -> Option<PackageInfo> {
        self.package.clone()
    }
}
