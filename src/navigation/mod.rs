//! Discovery of the URLs to hash
//!
//! # Modules
//!
//! - [`navigator`]: the [`Navigator`] trait, [`PackageInfo`] and the shared version index
//! - [`browser`]: page fetching with form login and silent re-login
//! - [`form`]: login form selection and submission
//! - [`listing`]: link extraction and filename template matching
//! - [`navigators`]: concrete navigators (`url`, `template`, `links`, `github`)

pub mod browser;
pub mod form;
pub mod listing;
pub mod navigator;
pub mod navigators;

pub use navigator::{Navigator, PackageInfo};
