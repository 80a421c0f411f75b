//! # Abort Module
//!
//! Cooperative cancellation shared by every unit of work in a run.
//!
//! Work checks [`AbortToken::is_aborted`] before it starts anything with side
//! effects (listing a directory, spawning git, opening a file for writing) and
//! turns into a no-op once the token is set. Work that has already started
//! writing a file is allowed to finish.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable handle on a single abort flag.
#[derive(Debug, Clone, Default)]
pub struct AbortToken {
  aborted: Arc<AtomicBool>,
}

impl AbortToken {
  pub fn new() -> Self {
    Self::default()
  }

  /// Requests every holder of this token to stop starting new work.
  pub fn abort(&self) {
    self.aborted.store(true, Ordering::SeqCst);
  }

  pub fn is_aborted(&self) -> bool {
    self.aborted.load(Ordering::SeqCst)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clones_share_the_flag() {
    let token = AbortToken::new();
    let clone = token.clone();
    assert!(!clone.is_aborted());

    token.abort();
    assert!(clone.is_aborted());
  }
}
