//! Minimum inter-call spacing shared by every outbound request.
//!
//! The upstream allows 2 requests per second and 1200 per hour. A fixed 550 ms spacing between
//! call starts keeps the client under the per-second cap; the hourly cap is not enforced, so
//! sustained high-volume callers can still exceed it.

// crates.io
use tokio::time::{self, Instant};
// self
use crate::{_prelude::*, obs};

/// Serializes outbound calls so that no two start less than `min_interval` apart.
#[derive(Debug)]
pub struct RateGate {
	min_interval: StdDuration,
	last_call: AsyncMutex<Option<Instant>>,
}
impl RateGate {
	/// Spacing that keeps the client under two requests per second.
	pub const DEFAULT_MIN_INTERVAL: StdDuration = StdDuration::from_millis(550);

	/// Creates a gate that has never let a call through.
	pub fn new(min_interval: StdDuration) -> Self {
		Self { min_interval, last_call: AsyncMutex::new(None) }
	}

	/// Configured spacing between call starts.
	pub fn min_interval(&self) -> StdDuration {
		self.min_interval
	}

	/// Remaining wait before a call may start at `now`, given the previous call start.
	pub fn delay_at(&self, last_call: Option<Instant>, now: Instant) -> StdDuration {
		match last_call {
			Some(last) => self.min_interval.saturating_sub(now.saturating_duration_since(last)),
			None => StdDuration::ZERO,
		}
	}

	/// Waits out the remainder of the interval, then records the call start.
	///
	/// The gate lock is held across the sleep so concurrent callers queue behind each other.
	/// Returns how long the caller was suspended.
	pub async fn throttle(&self) -> StdDuration {
		let mut last_call = self.last_call.lock().await;
		let wait = self.delay_at(*last_call, Instant::now());

		if !wait.is_zero() {
			time::sleep(wait).await;
		}

		obs::record_gate_wait(wait);

		*last_call = Some(Instant::now());

		wait
	}
}
impl Default for RateGate {
	fn default() -> Self {
		Self::new(Self::DEFAULT_MIN_INTERVAL)
	}
}
