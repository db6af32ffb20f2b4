//! Item identifiers
//!
//! Ids are wall-clock milliseconds at creation, bumped when needed so every
//! id handed out is strictly greater than the previous one.

use std::sync::atomic::{AtomicI64, Ordering};

use super::error::{DomainError, DomainResult};

/// Identifier of an [`Item`](super::Item)
pub type ItemId = i64;

/// Mints timestamp-derived, strictly increasing ids
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose ids all sort after `floor`
    ///
    /// Used after hydrating a list so a skewed clock can't reuse a stored id.
    pub fn starting_after(floor: ItemId) -> Self {
        Self {
            last: AtomicI64::new(floor),
        }
    }

    /// Next id based on the current time
    pub fn next_id(&self) -> DomainResult<ItemId> {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Next id given a clock reading in milliseconds
    ///
    /// Fails once the last id handed out is `ItemId::MAX`.
    pub fn next_at(&self, now_millis: i64) -> DomainResult<ItemId> {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let bumped = last
                .checked_add(1)
                .ok_or_else(|| DomainError::Internal("item ids exhausted".to_string()))?;
            let candidate = now_millis.max(bumped);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return Ok(candidate),
                Err(actual) => last = actual,
            }
        }
    }
}
