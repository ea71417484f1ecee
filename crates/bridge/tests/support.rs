//! In-memory widget engine and helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use qi::protocol::{
	BACK_BUTTON_HANDLE, BridgeEvent, InputOptions, ItemHandle, PickOptions, SessionId,
	SessionUpdate, TransferEntry, TransferItem, WidgetKind,
};
use qi::{
	Error, FocusSink, ItemsFuture, QuickWidget, ResolvedButton, ResolvedEntry, ResolvedItem,
	Result, Validator, WidgetChange, WidgetEngine, WidgetEvent,
};

pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
		)
		.with_test_writer()
		.try_init();
}

/// How the engine settles a pick call once the items future resolves.
#[derive(Debug, Clone)]
pub enum PickBehavior {
	/// Select the items at these indices (separators excluded).
	SelectIndices(Vec<usize>),
	/// Dismiss without selecting.
	Dismiss,
	/// Report focus on the first item, then select it.
	FocusFirstThenSelect,
}

/// How the engine settles an input call.
#[derive(Debug, Clone)]
pub enum InputBehavior {
	Submit(String),
	Dismiss,
	/// Run the value through the validator; submit when it passes,
	/// dismiss when blocked.
	ValidateThenSubmit(String),
}

/// Scriptable in-memory engine recording every widget it creates.
pub struct FakeEngine {
	back: Arc<ResolvedButton>,
	widgets: Mutex<Vec<Arc<FakeWidget>>>,
	pick_behavior: Mutex<PickBehavior>,
	input_behavior: Mutex<InputBehavior>,
}

impl FakeEngine {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			back: Arc::new(ResolvedButton {
				handle: BACK_BUTTON_HANDLE,
				tooltip: Some("Back".to_string()),
				icon: None,
			}),
			widgets: Mutex::new(Vec::new()),
			pick_behavior: Mutex::new(PickBehavior::Dismiss),
			input_behavior: Mutex::new(InputBehavior::Dismiss),
		})
	}

	pub fn set_pick_behavior(&self, behavior: PickBehavior) {
		*self.pick_behavior.lock() = behavior;
	}

	pub fn set_input_behavior(&self, behavior: InputBehavior) {
		*self.input_behavior.lock() = behavior;
	}

	/// The `index`-th widget created by this engine, in creation order.
	pub fn widget(&self, index: usize) -> Arc<FakeWidget> {
		Arc::clone(&self.widgets.lock()[index])
	}

	pub fn widget_count(&self) -> usize {
		self.widgets.lock().len()
	}
}

#[async_trait]
impl WidgetEngine for FakeEngine {
	fn create_widget(&self, kind: WidgetKind) -> Arc<dyn QuickWidget> {
		let widget = Arc::new(FakeWidget::new(kind));
		self.widgets.lock().push(Arc::clone(&widget));
		widget
	}

	fn back_button(&self) -> Arc<ResolvedButton> {
		Arc::clone(&self.back)
	}

	async fn pick(
		&self,
		items: ItemsFuture,
		_options: PickOptions,
		focus: FocusSink,
		cancel: CancellationToken,
	) -> Result<Option<Vec<TransferItem>>> {
		let entries = tokio::select! {
			_ = cancel.cancelled() => return Ok(None),
			entries = items => entries?,
		};
		let picks: Vec<TransferItem> = entries
			.into_iter()
			.filter_map(|entry| match entry {
				TransferEntry::Item(item) => Some(item),
				TransferEntry::Separator(_) => None,
			})
			.collect();

		let behavior = self.pick_behavior.lock().clone();
		match behavior {
			PickBehavior::Dismiss => Ok(None),
			PickBehavior::SelectIndices(indices) => Ok(Some(
				indices
					.into_iter()
					.filter_map(|index| picks.get(index).cloned())
					.collect(),
			)),
			PickBehavior::FocusFirstThenSelect => match picks.first() {
				Some(first) => {
					focus(first.handle);
					Ok(Some(vec![first.clone()]))
				}
				None => Ok(None),
			},
		}
	}

	async fn input(
		&self,
		_options: InputOptions,
		validator: Option<Validator>,
		cancel: CancellationToken,
	) -> Result<Option<String>> {
		if cancel.is_cancelled() {
			return Ok(None);
		}
		let behavior = self.input_behavior.lock().clone();
		match behavior {
			InputBehavior::Dismiss => Ok(None),
			InputBehavior::Submit(value) => Ok(Some(value)),
			InputBehavior::ValidateThenSubmit(value) => match validator {
				Some(validate) => match validate(value.clone()).await? {
					None => Ok(Some(value)),
					Some(_message) => Ok(None),
				},
				None => Ok(Some(value)),
			},
		}
	}
}

/// State a fake widget has accumulated through [`WidgetChange`]s.
#[derive(Default)]
pub struct WidgetState {
	pub visible: Option<bool>,
	pub items: Vec<ResolvedEntry>,
	pub active: Vec<Arc<ResolvedItem>>,
	pub selected: Vec<Arc<ResolvedItem>>,
	pub buttons: Vec<Arc<ResolvedButton>>,
	pub scalars: serde_json::Map<String, serde_json::Value>,
}

pub struct FakeWidget {
	kind: WidgetKind,
	pub state: Mutex<WidgetState>,
	events: broadcast::Sender<WidgetEvent>,
	disposals: AtomicUsize,
	fail_next_apply: AtomicBool,
}

impl FakeWidget {
	fn new(kind: WidgetKind) -> Self {
		let (events, _) = broadcast::channel(16);
		Self {
			kind,
			state: Mutex::new(WidgetState::default()),
			events,
			disposals: AtomicUsize::new(0),
			fail_next_apply: AtomicBool::new(false),
		}
	}

	pub fn emit(&self, event: WidgetEvent) {
		let _ = self.events.send(event);
	}

	pub fn disposals(&self) -> usize {
		self.disposals.load(Ordering::SeqCst)
	}

	pub fn fail_next_apply(&self) {
		self.fail_next_apply.store(true, Ordering::SeqCst);
	}

	pub fn item_handles(&self) -> Vec<ItemHandle> {
		self.state
			.lock()
			.items
			.iter()
			.filter_map(|entry| entry.as_item().map(|item| item.handle))
			.collect()
	}

	pub fn active_handles(&self) -> Vec<ItemHandle> {
		self.state.lock().active.iter().map(|item| item.handle).collect()
	}

	pub fn selected_handles(&self) -> Vec<ItemHandle> {
		self.state
			.lock()
			.selected
			.iter()
			.map(|item| item.handle)
			.collect()
	}

	/// The resolved item at `index` of the current item list.
	pub fn resolved_item(&self, index: usize) -> Arc<ResolvedItem> {
		self.state.lock().items[index]
			.as_item()
			.expect("entry is a separator")
			.clone()
	}
}

impl QuickWidget for FakeWidget {
	fn kind(&self) -> WidgetKind {
		self.kind
	}

	fn apply(&self, change: WidgetChange) -> Result<()> {
		if self.fail_next_apply.swap(false, Ordering::SeqCst) {
			return Err(Error::Engine("apply failed".to_string()));
		}
		let mut state = self.state.lock();
		match change {
			WidgetChange::Visible(visible) => state.visible = Some(visible),
			WidgetChange::Items(items) => state.items = items,
			WidgetChange::ActiveItems(items) => state.active = items,
			WidgetChange::SelectedItems(items) => state.selected = items,
			WidgetChange::Buttons(buttons) => state.buttons = buttons,
			WidgetChange::Scalar { name, value } => {
				state.scalars.insert(name, value);
			}
		}
		Ok(())
	}

	fn events(&self) -> broadcast::Receiver<WidgetEvent> {
		self.events.subscribe()
	}

	fn dispose(&self) {
		self.disposals.fetch_add(1, Ordering::SeqCst);
	}
}

/// Bridge over a fake engine with a channel-backed requester proxy.
pub fn new_bridge(
	engine: &Arc<FakeEngine>,
) -> (
	Arc<qi::QuickInputBridge>,
	mpsc::UnboundedReceiver<BridgeEvent>,
) {
	let (proxy, rx) = qi::ChannelRequesterProxy::new();
	let bridge = Arc::new(qi::QuickInputBridge::new(
		Arc::clone(engine) as Arc<dyn WidgetEngine>,
		Arc::new(proxy),
	));
	(bridge, rx)
}

pub fn item(handle: ItemHandle, label: &str) -> TransferEntry {
	TransferEntry::Item(TransferItem {
		handle,
		label: label.to_string(),
		description: None,
		detail: None,
		picked: None,
		always_show: None,
		icon_path: None,
		buttons: Vec::new(),
	})
}

/// Update creating (or addressing) a pick-list session.
pub fn pick_update(id: SessionId) -> SessionUpdate {
	SessionUpdate {
		id,
		kind: Some(WidgetKind::QuickPick),
		..SessionUpdate::default()
	}
}

/// Update creating (or addressing) an input-box session.
pub fn input_update(id: SessionId) -> SessionUpdate {
	SessionUpdate {
		id,
		kind: Some(WidgetKind::InputBox),
		..SessionUpdate::default()
	}
}

/// Receives the next forwarded event, failing the test after a timeout.
pub async fn recv_event(rx: &mut mpsc::UnboundedReceiver<BridgeEvent>) -> BridgeEvent {
	tokio::time::timeout(Duration::from_secs(2), rx.recv())
		.await
		.expect("timed out waiting for bridge event")
		.expect("event channel closed")
}

/// Asserts that no event arrives within a short window.
pub async fn assert_no_event(rx: &mut mpsc::UnboundedReceiver<BridgeEvent>) {
	let result = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
	assert!(result.is_err(), "unexpected event: {:?}", result);
}
