//! Cooperative cancellation for long-running sampling.
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag polled by every chain between iterations.
///
/// Clones share the same flag, so a token handed to the sampler can be
/// cancelled from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that clones observe cancellation of the original.
    //
    // Given
    // -----
    // - A fresh token and a clone.
    //
    // Expect
    // ------
    // - Neither is cancelled initially; both are after `cancel()`.
    fn clones_share_the_cancellation_flag() {
        // Arrange
        let token = CancellationToken::new();
        let observer = token.clone();

        // Act
        assert!(!observer.is_cancelled());
        token.cancel();

        // Assert
        assert!(token.is_cancelled());
        assert!(observer.is_cancelled());
    }
}
