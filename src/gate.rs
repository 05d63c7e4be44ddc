//! Interactive confirmation with a countdown
//!
//! The harvest loop and the startup notice only see [`ConsentGate`]; the
//! terminal implementation reads single key presses in raw mode.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(test)]
use mockall::automock;
use tracing::warn;

/// Shown before a run started with `--yes`
pub const YES_NOTICE: &str = "
        --------------------------**NOTE**--------------------------

            You have used the --yes facility all licenses will
            now be displayed and then accepted **automatically**

            press y or space bar to continue

            press any other key to exit...

        ------------------------------------------------------------
";

/// Asked to abort after a failed download when failing early
pub const ABORT_PROMPT: &str =
    "download failed, abort? [y or space to exit, any other key continues]";

const TICK: Duration = Duration::from_millis(100);

#[cfg_attr(test, automock)]
pub trait ConsentGate {
    /// Shows `prompt` and waits up to `timeout` for a key.
    ///
    /// Returns `true` for an affirmative key or when the time runs out, `false`
    /// for any other key.
    fn confirm(&mut self, prompt: &str, timeout: Duration) -> bool;
}

/// `y`, `Y` and space count as yes
pub fn is_affirmative(key: char) -> bool {
    matches!(key, ' ' | 'y' | 'Y')
}

/// Confirms everything without asking
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoAccept;

impl ConsentGate for AutoAccept {
    fn confirm(&mut self, _prompt: &str, _timeout: Duration) -> bool {
        true
    }
}

/// Reads a single key press from the controlling terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalGate;

struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl TerminalGate {
    fn wait_for_key(timeout: Duration) -> io::Result<Option<bool>> {
        let _raw = RawMode::enable()?;

        let countdown = ProgressBar::new(timeout.as_millis() as u64);
        if let Ok(style) = ProgressStyle::with_template("        {msg}{bar:45}") {
            countdown.set_style(style);
        }

        let started = Instant::now();
        let answer = loop {
            let elapsed = started.elapsed();
            if elapsed >= timeout {
                break None;
            }
            let remaining = timeout - elapsed;
            countdown.set_position(elapsed.as_millis() as u64);
            countdown.set_message(format!("{}s remaining ", remaining.as_secs() + 1));

            if !event::poll(TICK.min(remaining))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                break Some(matches!(key.code, KeyCode::Char(c) if is_affirmative(c)));
            }
        };

        countdown.finish_and_clear();
        Ok(answer)
    }
}

impl ConsentGate for TerminalGate {
    fn confirm(&mut self, prompt: &str, timeout: Duration) -> bool {
        let mut stderr = io::stderr();
        let _ = writeln!(stderr, "{prompt}");

        match Self::wait_for_key(timeout) {
            Ok(Some(answer)) => answer,
            Ok(None) => true,
            Err(e) => {
                warn!("cannot read from the terminal ({}), continuing", e);
                true
            }
        }
    }
}
