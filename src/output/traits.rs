use std::io;

use crate::digest::algorithm::DigestAlgorithm;
use crate::navigation::navigator::PackageInfo;
use crate::version::extract::VersionInfo;

/// Receives hashes and failures as they are computed
pub trait Output {
    /// Reports the hash of URL `index` of `total` (1-based).
    ///
    /// `max_url_length` is the longest URL of the run, for column alignment.
    fn display_hash(
        &mut self,
        url: &str,
        hash: &str,
        max_url_length: usize,
        index: usize,
        total: usize,
        algorithm: DigestAlgorithm,
    ) -> io::Result<()>;

    /// Reports that URL `index` of `total` could not be digested.
    fn display_failure(
        &mut self,
        url: &str,
        message: &str,
        max_url_length: usize,
        index: usize,
        total: usize,
    ) -> io::Result<()>;

    /// Called once after the last URL, with the version reported for each hashed URL.
    fn finish(&mut self, package: Option<&PackageInfo>, versions: &VersionInfo) -> io::Result<()>;
}
