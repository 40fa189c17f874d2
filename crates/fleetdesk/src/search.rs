//! Debounced search input
//!
//! Keystrokes go into a [`SearchInput`]; [`DebouncedSearch::next`] yields a
//! term only once input has been quiet for the debounce delay, so a burst of
//! typing triggers one list call with the last term.
//!
//! ```rust
//! use fleetdesk::search::{DEFAULT_DEBOUNCE, debounced};
//!
//! # async fn example() {
//! let (input, mut search) = debounced(DEFAULT_DEBOUNCE);
//! input.set("vol");
//! input.set("volvo");
//! drop(input);
//! assert_eq!(search.next().await.as_deref(), Some("volvo"));
//! # }
//! ```

use std::time::Duration;
use tokio::sync::mpsc;

/// Quiet period before a search term is emitted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Create a connected input/output pair debounced by `delay`.
pub fn debounced(delay: Duration) -> (SearchInput, DebouncedSearch) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SearchInput { tx }, DebouncedSearch { rx, delay })
}

/// Sending side of a debounced search. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SearchInput {
    tx: mpsc::UnboundedSender<String>,
}

impl SearchInput {
    /// Record the current search term.
    ///
    /// Returns `false` if the receiving side is gone.
    pub fn set(&self, term: impl Into<String>) -> bool {
        self.tx.send(term.into()).is_ok()
    }
}

/// Receiving side of a debounced search.
#[derive(Debug)]
pub struct DebouncedSearch {
    rx: mpsc::UnboundedReceiver<String>,
    delay: Duration,
}

impl DebouncedSearch {
    /// Quiet period this search waits for.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait for the next settled term.
    ///
    /// Every new term restarts the delay. When all inputs are dropped a
    /// pending term is emitted right away, after which `None` is returned.
    pub async fn next(&mut self) -> Option<String> {
        let mut pending = self.rx.recv().await?;
        loop {
            tokio::select! {
                received = self.rx.recv() => match received {
                    Some(term) => pending = term,
                    None => return Some(pending),
                },
                () = tokio::time::sleep(self.delay) => return Some(pending),
            }
        }
    }
}
