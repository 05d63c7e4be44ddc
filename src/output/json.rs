use std::io::{self, Write};

use serde::Serialize;

use crate::digest::algorithm::DigestAlgorithm;
use crate::navigation::navigator::PackageInfo;
use crate::output::traits::Output;
use crate::version::extract::VersionInfo;
use crate::version::string::VersionString;

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    package: Option<&'a PackageInfo>,
    digest: DigestAlgorithm,
    files: Vec<FileEntry>,
    failures: Vec<FailureEntry>,
}

#[derive(Debug, Serialize)]
struct FileEntry {
    url: String,
    version: Option<VersionString>,
    hash: String,
}

#[derive(Debug, Serialize)]
struct FailureEntry {
    url: String,
    error: String,
}

/// Collects hashes and failures and writes one pretty-printed JSON manifest at the end
pub struct JsonOutput<W: Write> {
    writer: W,
    digest: DigestAlgorithm,
    hashes: Vec<(String, String)>,
    failures: Vec<FailureEntry>,
}

impl<W: Write> JsonOutput<W> {
    pub const NAME: &'static str = "json";

    pub fn new(writer: W, digest: DigestAlgorithm) -> Self {
        Self {
            writer,
            digest,
            hashes: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Output for JsonOutput<W> {
    fn display_hash(
        &mut self,
        url: &str,
        hash: &str,
        _max_url_length: usize,
        _index: usize,
        _total: usize,
        _algorithm: DigestAlgorithm,
    ) -> io::Result<()> {
        self.hashes.push((url.to_string(), hash.to_string()));
        Ok(())
    }

    fn display_failure(
        &mut self,
        url: &str,
        message: &str,
        _max_url_length: usize,
        _index: usize,
        _total: usize,
    ) -> io::Result<()> {
        self.failures.push(FailureEntry {
            url: url.to_string(),
            error: message.to_string(),
        });
        Ok(())
    }

    fn finish(&mut self, package: Option<&PackageInfo>, versions: &VersionInfo) -> io::Result<()> {
        let files = std::mem::take(&mut self.hashes)
            .into_iter()
            .map(|(url, hash)| FileEntry {
                version: versions.get(&url).cloned().flatten(),
                url,
                hash,
            })
            .collect();

        let manifest = Manifest {
            package,
            digest: self.digest,
            files,
            failures: std::mem::take(&mut self.failures),
        };

        serde_json::to_writer_pretty(&mut self.writer, &manifest)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
