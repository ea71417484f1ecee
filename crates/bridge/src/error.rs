use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the bridge.
///
/// Protocol-level inconsistencies (stale handles, messages for unknown or
/// disposed sessions, kind mismatches) are deliberately *not* represented
/// here: they are tolerated as benign races and dropped with a debug log.
#[derive(Debug, Error)]
pub enum Error {
	/// The bridge has been torn down; no further sessions or calls.
	#[error("bridge disposed")]
	BridgeDisposed,

	/// The requester rejected a pending items request.
	#[error("items request rejected: {0}")]
	ItemsRejected(String),

	/// The pending items slot was replaced or dropped before settling.
	#[error("items channel closed")]
	ItemsChannelClosed,

	/// The validation round trip to the requester failed.
	#[error("input validation failed: {0}")]
	Validation(String),

	/// Failure inside the widget engine.
	#[error("widget engine failure: {0}")]
	Engine(String),
}

impl Error {
	/// Check whether this error came from the engine side of the seam.
	pub fn is_engine(&self) -> bool {
		matches!(self, Error::Engine(_))
	}
}
