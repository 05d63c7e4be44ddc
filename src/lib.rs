//! Harvest version-labelled checksums of files discovered by navigating web pages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Navigator  │────▶│   Harvest   │────▶│   Output    │
//! │ (discover)  │     │   (loop)    │     │  (report)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Version   │     │   Digest    │
//! │ (extract,   │     │ (stream +   │
//! │  order)     │     │  hash)      │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: wires CLI arguments, configuration and the registry into one run
//! - [`cli`]: command-line surface
//! - [`config`]: constants, config file and the resolved [`config::RunConfig`]
//! - [`digest`]: digest algorithms and the streaming download hasher
//! - [`error`]: error types shared across layers
//! - [`gate`]: interactive confirmation prompts
//! - [`harvest`]: the per-URL orchestration loop
//! - [`logging`]: tracing subscriber setup
//! - [`navigation`]: navigator trait, login handling and concrete navigators
//! - [`output`]: result reporting
//! - [`registry`]: name to constructor lookup for navigators and outputs
//! - [`session`]: the HTTP session shared by navigation and downloads
//! - [`version`]: version tokens, extraction and ordering

pub mod app;
pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod gate;
pub mod harvest;
pub mod logging;
pub mod navigation;
pub mod output;
pub mod registry;
pub mod session;
pub mod version;
