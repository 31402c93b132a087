// er301-rs/er301/src/reader/cancel.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag. The engine looks at it between exchanges, never in
/// the middle of one.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the engine to stop
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once [`CancelToken::cancel`] was called and not reset
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag so the next cycle runs
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
