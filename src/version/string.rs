//! Tolerant, total ordering over version tokens scraped from URLs
//!
//! Tokens such as `1.14.2-beta`, `2024.01` or even `latest` all parse. A token is
//! split into alternating runs of ASCII digits and non-digits, and two tokens
//! compare run by run:
//!
//! - digit runs compare by numeric value (any length, leading zeros ignored)
//! - text runs compare byte-wise
//! - a text run sorts below a digit run
//! - when one token is a prefix of the other, the longer token is greater

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::config::UNKNOWN_VERSION;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    /// Digit run with leading zeros removed, so `"007"` and `"7"` are equal
    Number(String),
    Text(String),
}

impl Segment {
    fn number(digits: &str) -> Self {
        Segment::Number(digits.trim_start_matches('0').to_string())
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Without leading zeros a longer run is always the larger number
            (Segment::Number(a), Segment::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn parse_segments(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (index, ch) in raw.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(previous) if previous != is_digit => {
                segments.push(make_segment(&raw[start..index], previous));
                start = index;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }

    if let Some(previous) = in_digits {
        segments.push(make_segment(&raw[start..], previous));
    }

    segments
}

fn make_segment(run: &str, is_digit: bool) -> Segment {
    if is_digit {
        Segment::number(run)
    } else {
        Segment::Text(run.to_string())
    }
}

/// A version token with segment-wise ordering.
///
/// Equality and hashing follow the parsed segments, not the raw text, so
/// `"1.01"` and `"1.1"` are the same version. Display renders the raw text.
#[derive(Debug, Clone)]
pub struct VersionString {
    raw: String,
    segments: Vec<Segment>,
}

impl VersionString {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = parse_segments(&raw);
        Self { raw, segments }
    }

    /// The placeholder assigned to URLs with no recognisable version
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_VERSION)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for VersionString {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for VersionString {}

impl Hash for VersionString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl Ord for VersionString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl PartialOrd for VersionString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for VersionString {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for VersionString {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl FromStr for VersionString {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl Serialize for VersionString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
