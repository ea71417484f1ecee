//! Message surface between the requester side and the bridge.
//!
//! Requests flow requester → bridge, events flow bridge → requester; the
//! cancellation signal for in-flight `Show`/`Input` calls travels out of
//! band and is not part of the wire shape.
//!
//! # Main Types
//!
//! - [`BridgeRequest`] - Operations the requester invokes on the bridge
//! - [`BridgeEvent`] - Interaction events forwarded back to the requester

use serde::{Deserialize, Serialize};

use crate::items::TransferEntry;
use crate::options::{InputOptions, PickOptions};
use crate::update::SessionUpdate;
use crate::{ButtonHandle, ItemHandle, SessionId};

/// Operation invoked by the requester on the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeRequest {
	/// Open a pick whose items arrive later via [`SetItems`](Self::SetItems).
	/// Settles with the selected handle(s), or nothing on cancel.
	Show {
		session: SessionId,
		options: PickOptions,
	},
	/// Fulfill the pending items request of a `Show` call.
	SetItems {
		session: SessionId,
		items: Vec<TransferEntry>,
	},
	/// Reject the pending items request of a `Show` call.
	SetError {
		session: SessionId,
		message: String,
	},
	/// Open an input box. Settles with the entered string, or nothing on
	/// cancel. `validate` routes typed values back for validation.
	Input {
		options: InputOptions,
		validate: bool,
	},
	/// Lazily create the session and apply a partial update.
	CreateOrUpdate {
		update: SessionUpdate,
	},
	/// Dispose the session's widget and subscriptions and forget it.
	Dispose {
		session: SessionId,
	},
}

/// Interaction event forwarded from the bridge to the requester.
///
/// Each event is tagged with the originating session id; item and button
/// references are translated back to their transport handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeEvent {
	/// An item gained focus during a `Show` call.
	ItemFocused {
		item: ItemHandle,
	},
	/// The user accepted the widget's current value or selection.
	Accepted {
		session: SessionId,
	},
	/// A widget-level button was triggered.
	ButtonTriggered {
		session: SessionId,
		button: ButtonHandle,
	},
	/// The typed value changed.
	ValueChanged {
		session: SessionId,
		value: String,
	},
	/// The widget was hidden.
	Hidden {
		session: SessionId,
	},
	/// The active (focused) items of a pick list changed.
	ActiveChanged {
		session: SessionId,
		items: Vec<ItemHandle>,
	},
	/// The selection of a pick list changed.
	SelectionChanged {
		session: SessionId,
		items: Vec<ItemHandle>,
	},
	/// A per-item button was triggered on a pick list.
	ItemButtonTriggered {
		session: SessionId,
		item: ItemHandle,
		button: ButtonHandle,
	},
}
