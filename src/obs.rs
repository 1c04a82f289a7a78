//! Optional observability hooks for outbound calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `api42.call` with the `call` (token/get/post) and
//!   `stage` (call site) fields, plus `debug` events for rate gate waits and `info` events for
//!   token refreshes.
//! - Enable `metrics` to increment the `api42_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`, and the `api42_gate_wait_seconds`
//!   histogram for every pass through the rate gate.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Kinds of outbound calls issued by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Client-credentials exchange at the token endpoint.
	Token,
	/// Collection or resource read.
	Get,
	/// Mutation call.
	Post,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Token => "token",
			CallKind::Get => "get",
			CallKind::Post => "post",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
