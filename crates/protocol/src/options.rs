//! Options for the one-shot pick and input calls.

use serde::{Deserialize, Serialize};

/// Options for a `show` (pick) call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickOptions {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub place_holder: Option<String>,
	/// Match the filter text against item descriptions too.
	#[serde(default)]
	pub match_on_description: bool,
	/// Match the filter text against item details too.
	#[serde(default)]
	pub match_on_detail: bool,
	/// Keep the widget open when focus moves elsewhere.
	#[serde(default)]
	pub ignore_focus_lost: bool,
	/// Allow selecting multiple items; changes the result shape.
	#[serde(default)]
	pub can_pick_many: bool,
}

/// Options for an `input` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputOptions {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Pre-filled value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	/// Start and end of the pre-selected range within `value`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value_selection: Option<(usize, usize)>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub prompt: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub place_holder: Option<String>,
	/// Mask the typed value.
	#[serde(default)]
	pub password: bool,
	/// Keep the widget open when focus moves elsewhere.
	#[serde(default)]
	pub ignore_focus_lost: bool,
}
