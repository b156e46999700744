//! Owner tokens used to tie cursors to the container that produced them.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one container instance.
///
/// Tokens are never reused within a process. A container keeps its token
/// when moved and receives a fresh one when cloned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct OwnerId(u64);

impl OwnerId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_tokens_are_distinct() {
        let first = OwnerId::fresh();
        let second = OwnerId::fresh();
        assert_ne!(first, second);
        assert_eq!(first, first);
    }
}
