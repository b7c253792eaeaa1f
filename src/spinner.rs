//! Background status ticker for work done outside a selection session.
//!
//! One thread animates a single-line spinner until stopped. Stopping (or
//! dropping) sets the flag, joins the thread and clears the line, so the
//! ticker never outlives its caller or leaves residue on screen. Never
//! run one concurrently with an active [`crate::select::GridSelect`]
//! session, which owns the terminal exclusively.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::ansi::visible_len;

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const TICK: Duration = Duration::from_millis(100);

/// A single-line spinner running on its own thread.
#[derive(Debug)]
pub struct Spinner {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start animating `label` followed by a spinner glyph.
    #[must_use]
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut out = io::stdout();
            let mut i = 0usize;
            while !flag.load(Ordering::Relaxed) {
                let frame = FRAMES[i % FRAMES.len()];
                let _ = write!(out, "\r{label} {frame}");
                let _ = out.flush();
                thread::sleep(TICK);
                i += 1;
            }
            // Final clearing write before the thread exits.
            let blank = " ".repeat(visible_len(&label) + 2);
            let _ = write!(out, "\r{blank}\r");
            let _ = out.flush();
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop the ticker, join its thread and clear the line.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.halt();
    }
}

/// Run `work` with a spinner ticking; the spinner is stopped and cleared
/// before the result is returned, on success or unwind.
pub fn with_spinner<T>(label: &str, work: impl FnOnce() -> T) -> T {
    let spinner = Spinner::start(label);
    let result = work();
    spinner.stop();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_joins_thread() {
        let spinner = Spinner::start("working");
        thread::sleep(Duration::from_millis(20));
        spinner.stop();
    }

    #[test]
    fn test_drop_is_best_effort_stop() {
        let spinner = Spinner::start("working");
        drop(spinner);
    }

    #[test]
    fn test_with_spinner_returns_result() {
        let value = with_spinner("computing", || 2 + 2);
        assert_eq!(value, 4);
    }
}
