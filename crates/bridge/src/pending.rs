//! Pending "materialize items" request slots.
//!
//! A `show` call cannot render until the requester supplies the item
//! list, which may itself take a cross-boundary round trip. Each call
//! registers a resolver slot keyed by session id; `supply_items` /
//! `supply_error` settle and clear it. At most one slot exists per id,
//! and settling an absent slot is a no-op rather than an error.

use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use qi_protocol::{SessionId, TransferEntry};

use crate::error::{Error, Result};

type ItemsSender = oneshot::Sender<Result<Vec<TransferEntry>>>;

/// Receiving half of a pending items request.
pub(crate) type ItemsReceiver = oneshot::Receiver<Result<Vec<TransferEntry>>>;

#[derive(Default)]
pub(crate) struct PendingPicks {
	slots: Mutex<HashMap<SessionId, ItemsSender>>,
}

impl PendingPicks {
	/// Registers a slot for `session` and returns its receiving half.
	///
	/// A slot already present for the id is replaced; the superseded
	/// call settles with [`Error::ItemsChannelClosed`].
	pub fn request_items(&self, session: SessionId) -> ItemsReceiver {
		let (tx, rx) = oneshot::channel();
		if self.slots.lock().insert(session, tx).is_some() {
			debug!(session, "Replaced pending items slot");
		}
		rx
	}

	/// Resolves the slot for `session` and clears it; no-op without one.
	pub fn supply_items(&self, session: SessionId, items: Vec<TransferEntry>) {
		if let Some(tx) = self.slots.lock().remove(&session) {
			// The receiver may have gone away (cancelled pick); a late
			// settle is a no-op.
			let _ = tx.send(Ok(items));
		}
	}

	/// Rejects the slot for `session` and clears it; no-op without one.
	pub fn supply_error(&self, session: SessionId, message: String) {
		if let Some(tx) = self.slots.lock().remove(&session) {
			let _ = tx.send(Err(Error::ItemsRejected(message)));
		}
	}

	/// Rejects every outstanding slot; used at bridge teardown so no
	/// caller is left hanging.
	pub fn reject_all(&self) -> usize {
		let drained: Vec<_> = {
			let mut slots = self.slots.lock();
			slots.drain().collect()
		};
		let count = drained.len();
		for (_, tx) in drained {
			let _ = tx.send(Err(Error::BridgeDisposed));
		}
		count
	}
}
