//! The widget-engine seam.
//!
//! The engine owns rendering, focus, and layout; the bridge only ever
//! talks to it through these traits. Widgets expose their interaction
//! events as a [`broadcast`] stream the bridge subscribes to once per
//! session; the one-shot [`pick`](WidgetEngine::pick) and
//! [`input`](WidgetEngine::input) calls suspend until the user settles
//! them or the cancellation token fires.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde_json::Value;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use url::Url;

use qi_protocol::{
	ButtonHandle, InputOptions, ItemHandle, PickOptions, TransferEntry, TransferItem, WidgetKind,
};

use crate::error::Result;

/// Future materializing the item list of a pick call.
///
/// The engine awaits it before rendering; the requester may take
/// arbitrarily long to compute the list on its side of the boundary.
pub type ItemsFuture = BoxFuture<'static, Result<Vec<TransferEntry>>>;

/// Fire-and-forget sink receiving item focus changes during a pick call.
pub type FocusSink = Arc<dyn Fn(ItemHandle) + Send + Sync>;

/// Validation callback for input boxes. Resolves with a user-facing
/// message blocking acceptance, or `None` when the value is valid.
pub type Validator =
	Arc<dyn Fn(String) -> BoxFuture<'static, Result<Option<String>>> + Send + Sync>;

/// Icon after URI revival, usable by the engine.
#[derive(Debug, Clone)]
pub struct ResolvedIcon {
	pub dark: Url,
	pub light: Option<Url>,
}

/// Button after icon revival.
///
/// The engine's back button is a shared singleton: handle
/// [`BACK_BUTTON_HANDLE`](qi_protocol::BACK_BUTTON_HANDLE) always
/// resolves to the same [`Arc`] regardless of session.
#[derive(Debug, Clone)]
pub struct ResolvedButton {
	pub handle: ButtonHandle,
	pub tooltip: Option<String>,
	pub icon: Option<ResolvedIcon>,
}

/// Item after icon revival, shared between the session's registry, the
/// widget, and outgoing events.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
	pub handle: ItemHandle,
	pub label: String,
	pub description: Option<String>,
	pub detail: Option<String>,
	pub picked: bool,
	pub always_show: bool,
	pub icon: Option<ResolvedIcon>,
	pub buttons: Vec<Arc<ResolvedButton>>,
}

/// Entry of a resolved item list as handed to a pick widget.
#[derive(Debug, Clone)]
pub enum ResolvedEntry {
	Item(Arc<ResolvedItem>),
	Separator { label: Option<String> },
}

impl ResolvedEntry {
	/// Returns the resolved item, or `None` for separators.
	pub fn as_item(&self) -> Option<&Arc<ResolvedItem>> {
		match self {
			Self::Item(item) => Some(item),
			Self::Separator { .. } => None,
		}
	}
}

/// One state change applied to a live widget.
#[derive(Debug, Clone)]
pub enum WidgetChange {
	Visible(bool),
	/// Full replacement of the item list.
	Items(Vec<ResolvedEntry>),
	ActiveItems(Vec<Arc<ResolvedItem>>),
	SelectedItems(Vec<Arc<ResolvedItem>>),
	Buttons(Vec<Arc<ResolvedButton>>),
	/// Opaque scalar property (title, placeholder, busy, value, ...).
	Scalar { name: String, value: Value },
}

/// Interaction event emitted by a live widget.
///
/// Active/selection/item-button events are only emitted by pick widgets.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
	Accepted,
	ButtonTriggered(Arc<ResolvedButton>),
	ValueChanged(String),
	Hidden,
	ActiveChanged(Vec<Arc<ResolvedItem>>),
	SelectionChanged(Vec<Arc<ResolvedItem>>),
	ItemButtonTriggered {
		item: Arc<ResolvedItem>,
		button: Arc<ResolvedButton>,
	},
}

/// A live widget owned by exactly one session.
pub trait QuickWidget: Send + Sync {
	fn kind(&self) -> WidgetKind;

	/// Applies one state change.
	fn apply(&self, change: WidgetChange) -> Result<()>;

	/// Subscribes to the widget's interaction events.
	fn events(&self) -> broadcast::Receiver<WidgetEvent>;

	/// Releases engine-side resources. Idempotent; a disposed widget
	/// emits no further events.
	fn dispose(&self);
}

/// The UI-owning widget engine.
#[async_trait]
pub trait WidgetEngine: Send + Sync {
	/// Creates a live widget of the given kind.
	fn create_widget(&self, kind: WidgetKind) -> Arc<dyn QuickWidget>;

	/// The shared back button singleton.
	fn back_button(&self) -> Arc<ResolvedButton>;

	/// Shows a pick list over `items` and resolves with the selection,
	/// or `None` on dismissal or cancellation. Focus changes are
	/// reported through `focus` while the pick is open.
	///
	/// # Errors
	///
	/// A rejected `items` future propagates as an error of this call.
	async fn pick(
		&self,
		items: ItemsFuture,
		options: PickOptions,
		focus: FocusSink,
		cancel: CancellationToken,
	) -> Result<Option<Vec<TransferItem>>>;

	/// Shows an input box and resolves with the entered value, or `None`
	/// on dismissal or cancellation.
	async fn input(
		&self,
		options: InputOptions,
		validator: Option<Validator>,
		cancel: CancellationToken,
	) -> Result<Option<String>>;
}
