//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;

use checksum_url::cli::Cli;
use checksum_url::config::{FileConfig, RunConfig};
use checksum_url::digest::DigestAlgorithm;
use checksum_url::error::NavigatorError;
use checksum_url::gate::ConsentGate;
use checksum_url::navigation::browser::Browser;
use checksum_url::navigation::{Navigator, PackageInfo};
use checksum_url::output::Output;
use checksum_url::session::{Session, SessionOptions};
use checksum_url::version::{VersionInfo, VersionString};

pub fn session() -> Session {
    Session::new(SessionOptions {
        user_agent: "checksum-url-test".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

/// Resolves a run configuration from command-line style arguments.
pub fn run_config(args: &[&str]) -> RunConfig {
    let cli = Cli::parse_from(std::iter::once("checksum-url").chain(args.iter().copied()));
    RunConfig::resolve(&cli, FileConfig::default()).unwrap()
}

/// Navigator returning a fixed list of URLs in the given order
pub struct FakeNavigator {
    browser: Browser,
    urls: Vec<(String, String)>,
    package: Option<PackageInfo>,
}

impl FakeNavigator {
    pub fn new(urls: Vec<(String, &str)>) -> Self {
        Self {
            browser: Browser::new(session()),
            urls: urls
                .into_iter()
                .map(|(url, version)| (url, version.to_string()))
                .collect(),
            package: None,
        }
    }

    pub fn with_package(mut self, package: PackageInfo) -> Self {
        self.package = Some(package);
        self
    }
}

#[async_trait]
impl Navigator for FakeNavigator {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn browser(&self) -> &Browser {
        &self.browser
    }

    fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    async fn get_urls(&mut self, _sorted_by_version: bool) -> Result<Vec<String>, NavigatorError> {
        Ok(self.urls.iter().map(|(url, _)| url.clone()).collect())
    }

    fn get_version_info(&self, url: &str) -> Option<VersionString> {
        self.urls
            .iter()
            .find(|(candidate, _)| candidate == url)
            .map(|(_, version)| VersionString::new(version.as_str()))
    }

    fn get_package_info(&self) -> Option<PackageInfo> {
        self.package.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedHash {
    pub url: String,
    pub hash: String,
    pub index: usize,
    pub total: usize,
    pub algorithm: DigestAlgorithm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFailure {
    pub url: String,
    pub message: String,
    pub index: usize,
}

/// Output keeping everything it is given
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub hashes: Vec<RecordedHash>,
    pub failures: Vec<RecordedFailure>,
    pub finished: Option<(Option<PackageInfo>, VersionInfo)>,
}

impl Output for RecordingOutput {
    fn display_hash(
        &mut self,
        url: &str,
        hash: &str,
        _max_url_length: usize,
        index: usize,
        total: usize,
        algorithm: DigestAlgorithm,
    ) -> io::Result<()> {
        self.hashes.push(RecordedHash {
            url: url.to_string(),
            hash: hash.to_string(),
            index,
            total,
            algorithm,
        });
        Ok(())
    }

    fn display_failure(
        &mut self,
        url: &str,
        message: &str,
        _max_url_length: usize,
        index: usize,
        _total: usize,
    ) -> io::Result<()> {
        self.failures.push(RecordedFailure {
            url: url.to_string(),
            message: message.to_string(),
            index,
        });
        Ok(())
    }

    fn finish(&mut self, package: Option<&PackageInfo>, versions: &VersionInfo) -> io::Result<()> {
        self.finished = Some((package.cloned(), versions.clone()));
        Ok(())
    }
}

/// Gate answering from a script; panics when asked more often than scripted
#[derive(Debug, Default)]
pub struct ScriptedGate {
    answers: VecDeque<bool>,
    pub prompts: Vec<String>,
}

impl ScriptedGate {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }
}

impl ConsentGate for ScriptedGate {
    fn confirm(&mut self, prompt: &str, _timeout: Duration) -> bool {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected confirmation: {prompt}"))
    }
}
