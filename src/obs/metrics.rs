// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallOutcome, trace_gate_wait},
};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"api42_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records a pass through the rate gate.
pub fn record_gate_wait(waited: StdDuration) {
	trace_gate_wait(waited);

	#[cfg(feature = "metrics")]
	{
		metrics::histogram!("api42_gate_wait_seconds").record(waited.as_secs_f64());
	}
}
