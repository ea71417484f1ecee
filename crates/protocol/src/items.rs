//! Item, separator, and button payloads for pick lists.

use serde::{Deserialize, Serialize};

use crate::uri::UriComponents;
use crate::{ButtonHandle, ItemHandle};

/// One entry of a full item-list update: a pickable item or a visual
/// separator. Separators carry no handle and are not addressable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferEntry {
	/// Pickable item, addressed by its handle.
	Item(TransferItem),
	/// Visual separator between item groups.
	Separator(TransferSeparator),
}

impl TransferEntry {
	/// Returns the item handle, or `None` for separators.
	pub fn handle(&self) -> Option<ItemHandle> {
		match self {
			Self::Item(item) => Some(item.handle),
			Self::Separator(_) => None,
		}
	}
}

/// A pickable item as it crosses the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferItem {
	/// Handle scoped to the session's current item list.
	pub handle: ItemHandle,
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub detail: Option<String>,
	/// Pre-selected in a multi-pick list.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub picked: Option<bool>,
	/// Always visible regardless of the filter text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub always_show: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon_path: Option<IconPath>,
	/// Per-item buttons; their icon paths are revived before rendering.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub buttons: Vec<TransferButton>,
}

/// A separator row. Only its optional label is rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferSeparator {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

/// A widget or item button. Handle [`BACK_BUTTON_HANDLE`] is reserved for
/// the engine's shared back button and carries no icon of its own.
///
/// [`BACK_BUTTON_HANDLE`]: crate::BACK_BUTTON_HANDLE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferButton {
	pub handle: ButtonHandle,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tooltip: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon_path: Option<IconPath>,
}

/// Transport-safe icon descriptor with a dark variant and an optional
/// light variant. Both must be revived before the engine consumes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconPath {
	pub dark: UriComponents,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub light: Option<UriComponents>,
}
