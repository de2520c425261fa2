//! Auto-id generation
//!
//! Nodes rendered without an explicit `id` draw one from an [`IdSource`] the
//! first time an id is needed. The default source is a single process-wide
//! counter; tests inject a [`LocalIds`] to get deterministic values.

use std::sync::atomic::{AtomicU64, Ordering};

static PROCESS_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Hands out unique sequence numbers.
pub trait IdSource: Send + Sync {
	/// Next number; never repeats for the lifetime of the source.
	fn next_id(&self) -> u64;
}

/// Draws from the process-wide counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIds;

impl IdSource for ProcessIds {
	fn next_id(&self) -> u64 {
		PROCESS_COUNTER.fetch_add(1, Ordering::Relaxed)
	}
}

/// A counter owned by one renderer.
///
/// # Examples
///
/// ```
/// use markwright_element::{IdSource, LocalIds};
///
/// let ids = LocalIds::starting_at(10);
/// assert_eq!(ids.next_id(), 10);
/// assert_eq!(ids.next_id(), 11);
/// ```
#[derive(Debug)]
pub struct LocalIds {
	counter: AtomicU64,
}

impl LocalIds {
	pub fn new() -> Self {
		Self::starting_at(1)
	}

	pub fn starting_at(start: u64) -> Self {
		Self {
			counter: AtomicU64::new(start),
		}
	}
}

impl Default for LocalIds {
	fn default() -> Self {
		Self::new()
	}
}

impl IdSource for LocalIds {
	fn next_id(&self) -> u64 {
		self.counter.fetch_add(1, Ordering::Relaxed)
	}
}
