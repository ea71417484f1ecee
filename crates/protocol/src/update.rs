//! Partial session updates and their lowering into ordered operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::items::{TransferButton, TransferEntry};
use crate::{ItemHandle, SessionId, WidgetKind};

/// Fire-and-forget update message for one session.
///
/// Every field except `id` and `kind` is optional; an absent field means
/// "no change". Field names not modeled here (title, placeholder, busy,
/// value, ...) are collected into `scalars` and written through to the
/// widget unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionUpdate {
	/// Session id, assigned by the requester. Immutable.
	pub id: SessionId,
	/// Widget kind; consulted only when the session does not exist yet.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<WidgetKind>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub visible: Option<bool>,
	/// Full replacement item list; rebuilds the session's registry.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub items: Option<Vec<TransferEntry>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub active_items: Option<Vec<ItemHandle>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub selected_items: Option<Vec<ItemHandle>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub buttons: Option<Vec<TransferButton>>,
	/// Opaque scalar properties passed through to the widget.
	#[serde(flatten)]
	pub scalars: serde_json::Map<String, Value>,
}

/// One operation of an update batch, in application order.
#[derive(Debug, Clone)]
pub enum UpdateOp {
	SetItems(Vec<TransferEntry>),
	SetActiveItems(Vec<ItemHandle>),
	SetSelectedItems(Vec<ItemHandle>),
	SetButtons(Vec<TransferButton>),
	SetScalar { name: String, value: Value },
	SetVisible(bool),
}

impl SessionUpdate {
	fn has_kind(&self, kind: WidgetKind) -> bool {
		self.kind == Some(kind)
	}

	/// Returns `true` when this update can only apply to a pick list.
	pub fn is_pick(&self) -> bool {
		self.has_kind(WidgetKind::QuickPick)
	}

	/// Lowers the update into operations in application order.
	///
	/// `items` always precedes `active_items`/`selected_items`: handle
	/// resolution depends on the freshly rebuilt registry, whatever order
	/// the fields arrived in on the wire. `visible` lands last so a show
	/// happens after the content it is meant to display.
	pub fn into_ops(self) -> Vec<UpdateOp> {
		let mut ops = Vec::new();
		if let Some(items) = self.items {
			ops.push(UpdateOp::SetItems(items));
		}
		if let Some(handles) = self.active_items {
			ops.push(UpdateOp::SetActiveItems(handles));
		}
		if let Some(handles) = self.selected_items {
			ops.push(UpdateOp::SetSelectedItems(handles));
		}
		if let Some(buttons) = self.buttons {
			ops.push(UpdateOp::SetButtons(buttons));
		}
		for (name, value) in self.scalars {
			ops.push(UpdateOp::SetScalar { name, value });
		}
		if let Some(visible) = self.visible {
			ops.push(UpdateOp::SetVisible(visible));
		}
		ops
	}
}
