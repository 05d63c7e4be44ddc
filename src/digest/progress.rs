use indicatif::{ProgressBar, ProgressStyle};

const TRANSFER_TEMPLATE: &str =
    "Reading {prefix} {total_bytes} {percent:>3}%|{bar:24}| [remaining time: {eta}]";

/// Byte progress of one download, drawn on stderr
///
/// Hidden unless enabled; the bar is cleared when dropped.
pub struct TransferProgress {
    bar: ProgressBar,
}

impl TransferProgress {
    pub fn new(label: &str, total: u64, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(total)
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::with_template(TRANSFER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ ");
        bar.set_style(style);
        bar.set_prefix(label.to_string());

        Self { bar }
    }

    pub fn advance(&self, bytes: usize) {
        self.bar.inc(bytes as u64);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Drop for TransferProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_progress_still_counts_bytes() {
        let progress = TransferProgress::new("  1/1  ", 10_000, false);
        progress.advance(4096);
        progress.advance(4096);
        progress.advance(1808);

        assert_eq!(progress.position(), 10_000);
    }
}
