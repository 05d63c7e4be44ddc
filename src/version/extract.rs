//! Version extraction from URLs and ordering by version

use indexmap::IndexMap;
use regex::Regex;
use tracing::warn;

use crate::version::string::VersionString;

/// URL to version, in discovery (or sorted) order
pub type UrlVersions = IndexMap<String, VersionString>;

/// Per-URL version reported to outputs; `None` when the navigator has no opinion
pub type VersionInfo = IndexMap<String, Option<VersionString>>;

#[derive(Debug, Clone, Default)]
pub struct VersionExtraction {
    pub versions: UrlVersions,
    /// URLs where the regex found nothing; they are still present in `versions`
    pub unmatched: Vec<String>,
}

/// Applies `regex` to every URL and takes its first capture group as the version.
///
/// URLs without a match get [`VersionString::unknown`] and a warning.
pub fn extract_versions<I, S>(urls: I, regex: &Regex) -> VersionExtraction
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut extraction = VersionExtraction::default();

    for url in urls {
        let url = url.into();
        let version = match regex.captures(&url).and_then(|captures| captures.get(1)) {
            Some(found) => VersionString::new(found.as_str()),
            None => {
                warn!("version not found in {}", url);
                extraction.unmatched.push(url.clone());
                VersionString::unknown()
            }
        };
        extraction.versions.insert(url, version);
    }

    extraction
}

/// Orders the mapping by version, keeping discovery order among equal versions.
pub fn sort_by_version(mut versions: UrlVersions, descending: bool) -> UrlVersions {
    if descending {
        versions.sort_by(|_, a, _, b| b.cmp(a));
    } else {
        versions.sort_by(|_, a, _, b| a.cmp(b));
    }
    versions
}

/// The URLs of `versions`, sorted descending when `sorted` is set.
pub fn order_urls(versions: &UrlVersions, sorted: bool) -> Vec<String> {
    if sorted {
        sort_by_version(versions.clone(), true).into_keys().collect()
    } else {
        versions.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::compile_version_regex;
    use rstest::rstest;

    fn default_regex() -> Regex {
        compile_version_regex(None).unwrap()
    }

    #[rstest]
    #[case("https://example.com/app-3.2.1-rc1.tar.gz", "3.2.1-rc1")]
    #[case("https://example.com/tool_10.0.2_beta.zip", "10.0.2_beta")]
    #[case("https://example.com/releases/2.0/app.zip", "2.0")]
    #[case("https://example.com/app-1.14.zip", "1.14")]
    fn extract_versions_uses_first_capture(#[case] url: &str, #[case] expected: &str) {
        let extraction = extract_versions([url], &default_regex());

        assert_eq!(extraction.versions[url].as_str(), expected);
        assert!(extraction.unmatched.is_empty());
    }

    #[test]
    fn extract_versions_keeps_unmatched_urls_with_sentinel() {
        let url = "https://example.com/latest/app.zip";
        let extraction = extract_versions([url], &default_regex());

        assert_eq!(extraction.versions[url], VersionString::unknown());
        assert_eq!(extraction.unmatched, vec![url.to_string()]);
    }

    #[test]
    fn extract_versions_with_custom_regex() {
        let regex = compile_version_regex(Some(r"/v([0-9]+)/")).unwrap();
        let extraction = extract_versions(["https://example.com/v12/app.zip"], &regex);

        assert_eq!(
            extraction.versions["https://example.com/v12/app.zip"].as_str(),
            "12"
        );
    }

    #[test]
    fn extract_versions_overwrites_duplicate_urls_in_place() {
        let extraction = extract_versions(
            ["https://a/x-1.0.zip", "https://a/y-2.0.zip", "https://a/x-1.0.zip"],
            &default_regex(),
        );

        assert_eq!(extraction.versions.len(), 2);
        assert_eq!(
            extraction.versions.keys().collect::<Vec<_>>(),
            vec!["https://a/x-1.0.zip", "https://a/y-2.0.zip"]
        );
    }

    #[test]
    fn sort_by_version_descending_keeps_ties_in_discovery_order() {
        let extraction = extract_versions(
            [
                "https://a/app-1.9.0.zip",
                "https://a/app-1.10.0.tar.gz",
                "https://a/app-1.10.0.zip",
                "https://a/readme.txt",
            ],
            &default_regex(),
        );

        let sorted = sort_by_version(extraction.versions, true);

        assert_eq!(
            sorted.keys().collect::<Vec<_>>(),
            vec![
                "https://a/app-1.10.0.tar.gz",
                "https://a/app-1.10.0.zip",
                "https://a/app-1.9.0.zip",
                "https://a/readme.txt",
            ]
        );
    }

    #[test]
    fn ascending_reversed_equals_descending_for_distinct_versions() {
        let extraction = extract_versions(
            ["https://a/2.0.1/x", "https://a/2.0/x", "https://a/10.1/x", "https://a/3.2.1-rc1/x"],
            &default_regex(),
        );

        let mut ascending: Vec<String> = sort_by_version(extraction.versions.clone(), false)
            .into_keys()
            .collect();
        ascending.reverse();
        let descending: Vec<String> = sort_by_version(extraction.versions, true)
            .into_keys()
            .collect();

        assert_eq!(ascending, descending);
    }

    #[test]
    fn order_urls_without_sorting_keeps_discovery_order() {
        let extraction = extract_versions(["https://a/1.0/x", "https://a/2.0/x"], &default_regex());

        assert_eq!(
            order_urls(&extraction.versions, false),
            vec!["https://a/1.0/x".to_string(), "https://a/2.0/x".to_string()]
        );
        assert_eq!(
            order_urls(&extraction.versions, true),
            vec!["https://a/2.0/x".to_string(), "https://a/1.0/x".to_string()]
        );
    }
}
