//! Streaming digests of downloaded content
//!
//! # Modules
//!
//! - [`algorithm`]: the supported digest algorithms, selected by name
//! - [`hasher`]: incremental hasher trait and its implementations
//! - [`auth`]: HTTP Basic and Digest authentication for downloads
//! - [`reader`]: fetches a URL and streams its body through a hasher
//! - [`progress`]: transfer progress bar
//! - [`describe`]: turns transport errors into short human-readable causes

pub mod algorithm;
pub mod auth;
pub mod describe;
pub mod hasher;
pub mod progress;
pub mod reader;

pub use algorithm::DigestAlgorithm;
pub use reader::{DigestReader, DigestResult};
