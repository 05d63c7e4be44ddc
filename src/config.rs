use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::cli::Cli;
use crate::digest::algorithm::DigestAlgorithm;
use crate::error::UsageError;
use crate::navigation::form::FormDescriptor;
use crate::session::Credentials;

// =============================================================================
// Network constants
// =============================================================================

/// Connect and read timeout for every request (10 seconds)
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Size of the blocks fed to the hasher while streaming a download
pub const CHUNK_SIZE: usize = 4096;

/// Maximum number of redirects followed per request
pub const MAX_REDIRECTS: usize = 10;

pub const DEFAULT_USER_AGENT: &str = concat!("checksum-url/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

// =============================================================================
// Harvest defaults
// =============================================================================

/// Countdown before an unanswered confirmation is accepted (10 seconds)
pub const CONSENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Version assigned to URLs where the version regex finds nothing
pub const UNKNOWN_VERSION: &str = "0.0.0";

/// Dotted version such as `1.2`, `3.2.1-rc1` or `10.0.2_beta`
pub const DEFAULT_VERSION_REGEX: &str =
    r"([0-9]+\.(?:[0-9][A-Za-z0-9_-]*)(?:\.[0-9][A-Za-z0-9_-]*)*)";

pub const DEFAULT_DIGEST: &str = "sha256";
pub const DEFAULT_NAVIGATOR: &str = "url";
pub const DEFAULT_OUTPUT: &str = "simple";

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "CHECKSUM_URL_LOG";

/// Optional defaults read from the config file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub digest: Option<String>,
    pub navigator: Option<String>,
    pub output: Option<String>,
    pub version_format: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub github_api_url: Option<String>,
}

impl FileConfig {
    /// Reads the config file at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, UsageError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(UsageError::InvalidConfig {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| UsageError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Everything a run needs, resolved from CLI flags, the config file and defaults
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub urls: Vec<String>,
    pub root: Option<String>,
    pub template: bool,
    pub credentials: Option<Credentials>,
    pub form: Option<FormDescriptor>,
    pub navigator: String,
    pub output: String,
    pub digest: DigestAlgorithm,
    pub version_regex: Regex,
    pub verbosity: u8,
    pub fail_early: bool,
    pub assume_yes: bool,
    pub debug: bool,
    pub user_agent: String,
    pub timeout: Duration,
    pub github_api_url: String,
}

impl RunConfig {
    /// Merges CLI flags over file defaults and validates the result.
    ///
    /// Template mode without a root URL is rejected here for every navigator.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, UsageError> {
        if cli.template && cli.root.is_none() {
            return Err(UsageError::TemplateWithoutRoot);
        }

        let digest = cli
            .digest
            .as_deref()
            .or(file.digest.as_deref())
            .unwrap_or(DEFAULT_DIGEST)
            .parse::<DigestAlgorithm>()?;

        let version_format = cli.version_format.as_deref().or(file.version_format.as_deref());
        let version_regex = compile_version_regex(version_format)?;

        let credentials = match cli.password.as_deref() {
            Some([username, password]) => Some(Credentials::new(username, password)),
            _ => None,
        };

        let form = match cli.form.as_deref() {
            Some([selector, username_field, password_field, submit_field]) => Some(
                FormDescriptor::new(selector, username_field, password_field, submit_field),
            ),
            _ => None,
        };

        Ok(Self {
            urls: cli.urls.clone(),
            root: cli.root.clone(),
            template: cli.template,
            credentials,
            form,
            navigator: cli
                .navigator
                .clone()
                .or(file.navigator)
                .unwrap_or_else(|| DEFAULT_NAVIGATOR.to_string()),
            output: cli
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
            digest,
            version_regex,
            verbosity: cli.verbose,
            fail_early: cli.fail_early,
            assume_yes: cli.yes,
            debug: cli.debug,
            user_agent: file
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: Duration::from_secs(file.timeout_secs.unwrap_or(FETCH_TIMEOUT_SECS)),
            github_api_url: file
                .github_api_url
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
        })
    }
}

/// Compiles the version regex, which must have exactly one capture group.
pub fn compile_version_regex(pattern: Option<&str>) -> Result<Regex, UsageError> {
    let pattern = pattern.unwrap_or(DEFAULT_VERSION_REGEX);
    let regex = Regex::new(pattern).map_err(|e| UsageError::InvalidVersionFormat {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    // captures_len counts the implicit whole-match group
    if regex.captures_len() != 2 {
        return Err(UsageError::InvalidVersionFormat {
            pattern: pattern.to_string(),
            reason: format!(
                "expected exactly one capture group, found {}",
                regex.captures_len() - 1
            ),
        });
    }

    Ok(regex)
}

/// Returns the path to the config directory for checksum-url.
/// Uses $XDG_CONFIG_HOME/checksum-url if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/checksum-url,
/// or ./checksum-url if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("checksum-url")
}
