// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("api42.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event describing how long the rate gate held a call.
pub fn trace_gate_wait(waited: StdDuration) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(waited_ms = waited.as_millis() as u64, "rate gate passed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = waited;
	}
}

/// Emits an `info` event after a new token has been stored.
pub fn trace_token_refresh(expires_at: i64) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(expires_at, "access token refreshed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = expires_at;
	}
}

/// Emits a `debug` event for every page fetched by the accumulation loop.
pub fn trace_page(page: u32, items: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(page, items, "page fetched");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (page, items);
	}
}
