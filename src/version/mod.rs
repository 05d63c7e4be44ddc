//! Version tokens scraped from URLs
//!
//! # Modules
//!
//! - [`string`]: [`VersionString`], a tolerant and totally ordered version token
//! - [`extract`]: regex-based extraction of versions from URLs and ordering by version

pub mod extract;
pub mod string;

pub use extract::{UrlVersions, VersionExtraction, VersionInfo, extract_versions, sort_by_version};
pub use string::VersionString;
