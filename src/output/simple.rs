use std::io::{self, Write};

use crate::digest::algorithm::DigestAlgorithm;
use crate::navigation::navigator::PackageInfo;
use crate::output::traits::Output;
use crate::version::extract::VersionInfo;

/// One aligned line per hash
pub struct SimpleOutput<W: Write> {
    writer: W,
}

impl<W: Write> SimpleOutput<W> {
    pub const NAME: &'static str = "simple";

    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// `sum [3]   https://example.com/a.zip   <text>`
fn format_line(index: usize, url: &str, max_url_length: usize, text: &str) -> String {
    let index = format!("[{index}]");
    format!("sum {index:<5} {url:<max_url_length$} {text}")
}

impl<W: Write> Output for SimpleOutput<W> {
    fn display_hash(
        &mut self,
        url: &str,
        hash: &str,
        max_url_length: usize,
        index: usize,
        _total: usize,
        _algorithm: DigestAlgorithm,
    ) -> io::Result<()> {
        writeln!(self.writer, "{}", format_line(index, url, max_url_length, hash))?;
        self.writer.flush()
    }

    fn display_failure(
        &mut self,
        url: &str,
        message: &str,
        max_url_length: usize,
        index: usize,
        _total: usize,
    ) -> io::Result<()> {
        writeln!(self.writer, "{}", format_line(index, url, max_url_length, message))?;
        self.writer.flush()
    }

    fn finish(&mut self, _package: Option<&PackageInfo>, _versions: &VersionInfo) -> io::Result<()> {
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
