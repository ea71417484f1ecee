//! Operation interception around the one-shot pick/input calls.
//!
//! Start, success, and failure of `show`/`input` can be observed through
//! [`OperationInterceptor`], with per-operation durations. The bridge
//! ships a no-op sink and a [`tracing`]-backed one; richer consumers
//! (telemetry, replay) live outside this crate.

use std::time::Instant;

use serde_json::Value;
use tracing::debug;

use crate::error::Error;

/// Opaque token for one intercepted operation; handed back on completion.
#[derive(Debug, Clone, Copy)]
pub struct OperationSpan {
	started: Option<Instant>,
}

impl OperationSpan {
	/// Span for a disabled sink; finish/fail become no-ops.
	pub fn disabled() -> Self {
		Self { started: None }
	}

	pub fn started() -> Self {
		Self {
			started: Some(Instant::now()),
		}
	}
}

/// Sink observing the one-shot operations of the bridge.
pub trait OperationInterceptor: Send + Sync {
	/// Called when an operation starts. The returned span is handed back
	/// to [`finish`](Self::finish) or [`fail`](Self::fail).
	fn operation(&self, name: &'static str, params: Value) -> OperationSpan;

	fn finish(&self, name: &'static str, span: OperationSpan, result: &Value);

	fn fail(&self, name: &'static str, span: OperationSpan, error: &Error);
}

/// Discards everything; used when interception is disabled.
pub struct NoopInterceptor;

impl OperationInterceptor for NoopInterceptor {
	fn operation(&self, _name: &'static str, _params: Value) -> OperationSpan {
		OperationSpan::disabled()
	}

	fn finish(&self, _name: &'static str, _span: OperationSpan, _result: &Value) {}

	fn fail(&self, _name: &'static str, _span: OperationSpan, _error: &Error) {}
}

/// Emits intercepted operations as `tracing` debug events under the
/// `qi::intercept` target.
pub struct TracingInterceptor;

impl OperationInterceptor for TracingInterceptor {
	fn operation(&self, name: &'static str, params: Value) -> OperationSpan {
		debug!(target: "qi::intercept", operation = name, params = %params, "operation start");
		OperationSpan::started()
	}

	fn finish(&self, name: &'static str, span: OperationSpan, result: &Value) {
		let Some(started) = span.started else {
			return;
		};
		debug!(
			target: "qi::intercept",
			operation = name,
			duration_ms = started.elapsed().as_millis() as u64,
			result = %result,
			"operation success"
		);
	}

	fn fail(&self, name: &'static str, span: OperationSpan, error: &Error) {
		let Some(started) = span.started else {
			return;
		};
		debug!(
			target: "qi::intercept",
			operation = name,
			duration_ms = started.elapsed().as_millis() as u64,
			%error,
			"operation error"
		);
	}
}
