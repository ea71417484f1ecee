//! The outward seam toward the requester.

use async_trait::async_trait;
use tokio::sync::mpsc;

use qi_protocol::{BridgeEvent, ButtonHandle, ItemHandle, SessionId};

use crate::error::Result;

/// Requester-side counterpart of the bridge.
///
/// Interaction notifications are fire-and-forget: implementations must
/// enqueue rather than block, since they are invoked from the event
/// forwarding path. [`validate_input`](Self::validate_input) is the one
/// round trip back to the requester, used when an input call asks for
/// validation of the typed value.
#[async_trait]
pub trait RequesterProxy: Send + Sync {
	/// An item gained focus during a `show` call.
	fn on_item_focused(&self, item: ItemHandle);

	fn on_accept(&self, session: SessionId);

	fn on_button_triggered(&self, session: SessionId, button: ButtonHandle);

	fn on_value_changed(&self, session: SessionId, value: String);

	fn on_hidden(&self, session: SessionId);

	fn on_active_changed(&self, session: SessionId, items: Vec<ItemHandle>);

	fn on_selection_changed(&self, session: SessionId, items: Vec<ItemHandle>);

	fn on_item_button_triggered(
		&self,
		session: SessionId,
		item: ItemHandle,
		button: ButtonHandle,
	);

	/// Validates a typed value. Resolves with a user-facing message
	/// blocking acceptance, or `None` when the value is valid.
	async fn validate_input(&self, value: String) -> Result<Option<String>> {
		let _ = value;
		Ok(None)
	}
}

/// Proxy emitting wire [`BridgeEvent`]s into an unbounded channel.
///
/// A dropped receiver means the requester detached; further events are
/// discarded rather than treated as failures.
pub struct ChannelRequesterProxy {
	tx: mpsc::UnboundedSender<BridgeEvent>,
}

impl ChannelRequesterProxy {
	pub fn new() -> (Self, mpsc::UnboundedReceiver<BridgeEvent>) {
		let (tx, rx) = mpsc::unbounded_channel();
		(Self { tx }, rx)
	}

	fn emit(&self, event: BridgeEvent) {
		let _ = self.tx.send(event);
	}
}

#[async_trait]
impl RequesterProxy for ChannelRequesterProxy {
	fn on_item_focused(&self, item: ItemHandle) {
		self.emit(BridgeEvent::ItemFocused { item });
	}

	fn on_accept(&self, session: SessionId) {
		self.emit(BridgeEvent::Accepted { session });
	}

	fn on_button_triggered(&self, session: SessionId, button: ButtonHandle) {
		self.emit(BridgeEvent::ButtonTriggered { session, button });
	}

	fn on_value_changed(&self, session: SessionId, value: String) {
		self.emit(BridgeEvent::ValueChanged { session, value });
	}

	fn on_hidden(&self, session: SessionId) {
		self.emit(BridgeEvent::Hidden { session });
	}

	fn on_active_changed(&self, session: SessionId, items: Vec<ItemHandle>) {
		self.emit(BridgeEvent::ActiveChanged { session, items });
	}

	fn on_selection_changed(&self, session: SessionId, items: Vec<ItemHandle>) {
		self.emit(BridgeEvent::SelectionChanged { session, items });
	}

	fn on_item_button_triggered(
		&self,
		session: SessionId,
		item: ItemHandle,
		button: ButtonHandle,
	) {
		self.emit(BridgeEvent::ItemButtonTriggered {
			session,
			item,
			button,
		});
	}
}
