//! Result reporting
//!
//! - [`simple`]: aligned `sum [i] url hash` lines
//! - [`json`]: a JSON manifest written when the run finishes

pub mod json;
pub mod simple;
pub mod traits;

pub use json::JsonOutput;
pub use simple::SimpleOutput;
pub use traits::Output;
