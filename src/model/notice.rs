//! Transient user-facing notices (e.g. "select some text first")

use std::time::{Duration, Instant};

/// A notice that auto-expires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientNotice {
    pub text: String,
    pub expires_at: Instant,
}

impl TransientNotice {
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self::starting_at(text, duration, Instant::now())
    }

    pub fn starting_at(text: impl Into<String>, duration: Duration, now: Instant) -> Self {
        Self {
            text: text.into(),
            expires_at: now + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
