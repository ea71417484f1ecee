//! The bridge itself: session table, lifecycle, and the requester-facing
//! operation surface.

use std::sync::Arc;

use futures_util::FutureExt;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use qi_protocol::{
	InputOptions, ItemHandle, PickOptions, SessionId, SessionUpdate, TransferEntry, WidgetKind,
};

use crate::dispatch;
use crate::engine::{FocusSink, Validator, WidgetEngine, WidgetEvent};
use crate::error::{Error, Result};
use crate::intercept::{NoopInterceptor, OperationInterceptor, TracingInterceptor};
use crate::pending::PendingPicks;
use crate::proxy::RequesterProxy;
use crate::session::{DisposalScope, ItemRegistry, Session, SessionTable, Subscription};

/// Resolved configuration consumed by the bridge. Storage and change
/// notification stay on the host side of the seam.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
	/// Emit operation interception logs for the one-shot calls.
	pub interception: bool,
}

/// Selection result of a [`show`](QuickInputBridge::show) call, shaped
/// by `can_pick_many`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum PickedHandles {
	One(ItemHandle),
	Many(Vec<ItemHandle>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
	Active,
	Disposing,
	Disposed,
}

/// Mediates between a remote requester and the local widget engine.
///
/// Sessions are created lazily on the first update referencing an unseen
/// id and destroyed exactly once, by an explicit
/// [`dispose_session`](Self::dispose_session) or by
/// [`dispose`](Self::dispose), which tears the whole bridge down.
///
/// All session-table and registry mutation is serialized behind one
/// exclusive section per bridge instance. Session creation spawns the
/// event forwarding task, so [`create_or_update`](Self::create_or_update)
/// must run within a Tokio runtime.
pub struct QuickInputBridge {
	engine: Arc<dyn WidgetEngine>,
	proxy: Arc<dyn RequesterProxy>,
	interceptor: Arc<dyn OperationInterceptor>,
	sessions: Mutex<SessionTable>,
	pending: PendingPicks,
	state: Mutex<Lifecycle>,
}

impl QuickInputBridge {
	pub fn new(engine: Arc<dyn WidgetEngine>, proxy: Arc<dyn RequesterProxy>) -> Self {
		Self::with_config(engine, proxy, BridgeConfig::default())
	}

	pub fn with_config(
		engine: Arc<dyn WidgetEngine>,
		proxy: Arc<dyn RequesterProxy>,
		config: BridgeConfig,
	) -> Self {
		let interceptor: Arc<dyn OperationInterceptor> = if config.interception {
			Arc::new(TracingInterceptor)
		} else {
			Arc::new(NoopInterceptor)
		};
		Self {
			engine,
			proxy,
			interceptor,
			sessions: Mutex::new(SessionTable::default()),
			pending: PendingPicks::default(),
			state: Mutex::new(Lifecycle::Active),
		}
	}

	/// Replaces the interception sink; used by hosts wiring their own
	/// consumer instead of the `tracing`-backed default.
	pub fn with_interceptor(mut self, interceptor: Arc<dyn OperationInterceptor>) -> Self {
		self.interceptor = interceptor;
		self
	}

	/// Number of live sessions.
	pub fn session_count(&self) -> usize {
		self.sessions.lock().len()
	}

	/// Shows a pick list whose items arrive asynchronously via
	/// [`supply_items`](Self::supply_items). The call stays pending until
	/// the items request settles and the user picks or dismisses, or
	/// `cancel` fires.
	///
	/// # Errors
	///
	/// [`Error::ItemsRejected`] when the requester supplies an error
	/// instead of items; [`Error::Engine`] for failures on the engine
	/// side; [`Error::BridgeDisposed`] after teardown.
	pub async fn show(
		&self,
		session: SessionId,
		options: PickOptions,
		cancel: CancellationToken,
	) -> Result<Option<PickedHandles>> {
		self.ensure_active()?;
		let span = self.interceptor.operation(
			"show",
			json!({
				"session": session,
				"options": serde_json::to_value(&options).unwrap_or(Value::Null),
			}),
		);

		let rx = self.pending.request_items(session);
		let items = async move {
			match rx.await {
				Ok(result) => result,
				Err(_) => Err(Error::ItemsChannelClosed),
			}
		}
		.boxed();

		let proxy = Arc::clone(&self.proxy);
		let focus: FocusSink = Arc::new(move |handle| proxy.on_item_focused(handle));
		let can_pick_many = options.can_pick_many;

		match self.engine.pick(items, options, focus, cancel).await {
			Ok(selection) => {
				let picked = selection.and_then(|items| {
					let handles: Vec<ItemHandle> =
						items.iter().map(|item| item.handle).collect();
					if can_pick_many {
						Some(PickedHandles::Many(handles))
					} else {
						handles.first().copied().map(PickedHandles::One)
					}
				});
				self.interceptor.finish(
					"show",
					span,
					&serde_json::to_value(&picked).unwrap_or(Value::Null),
				);
				Ok(picked)
			}
			Err(error) => {
				self.interceptor.fail("show", span, &error);
				Err(error)
			}
		}
	}

	/// Fulfills the pending items request for `session`; no-op without
	/// one.
	pub fn supply_items(&self, session: SessionId, items: Vec<TransferEntry>) {
		self.pending.supply_items(session, items);
	}

	/// Rejects the pending items request for `session`; no-op without
	/// one. The error reaches the in-flight `show` call, never the log.
	pub fn supply_error(&self, session: SessionId, message: String) {
		self.pending.supply_error(session, message);
	}

	/// Shows an input box. With `validate`, every typed value makes a
	/// validation round trip to the requester before acceptance.
	///
	/// # Errors
	///
	/// [`Error::Engine`] for failures on the engine side;
	/// [`Error::BridgeDisposed`] after teardown.
	pub async fn input(
		&self,
		options: InputOptions,
		validate: bool,
		cancel: CancellationToken,
	) -> Result<Option<String>> {
		self.ensure_active()?;
		let span = self.interceptor.operation(
			"input",
			json!({
				"options": serde_json::to_value(&options).unwrap_or(Value::Null),
				"validate": validate,
			}),
		);

		let validator: Option<Validator> = if validate {
			let proxy = Arc::clone(&self.proxy);
			Some(Arc::new(move |value: String| {
				let proxy = Arc::clone(&proxy);
				async move { proxy.validate_input(value).await }.boxed()
			}))
		} else {
			None
		};

		match self.engine.input(options, validator, cancel).await {
			Ok(entered) => {
				self.interceptor.finish(
					"input",
					span,
					&serde_json::to_value(&entered).unwrap_or(Value::Null),
				);
				Ok(entered)
			}
			Err(error) => {
				self.interceptor.fail("input", span, &error);
				Err(error)
			}
		}
	}

	/// Lazily creates the session and applies a partial update.
	///
	/// Updates for a given id are applied in call order. Protocol
	/// inconsistencies — an unseen id without a kind, a kind
	/// contradicting the session's, any message after teardown — are
	/// dropped silently.
	///
	/// # Errors
	///
	/// Only engine failures while applying the update surface as
	/// [`Error::Engine`]; the session stays usable for a retry.
	pub fn create_or_update(&self, update: SessionUpdate) -> Result<()> {
		if *self.state.lock() != Lifecycle::Active {
			debug!(session = update.id, "Ignoring update after teardown");
			return Ok(());
		}

		let id = update.id;
		let kind = update.kind;
		let mut sessions = self.sessions.lock();

		if let Some(existing) = sessions.kind_of(id) {
			if kind.is_some() && kind != Some(existing) {
				debug!(session = id, "Dropped update with mismatched widget kind");
				return Ok(());
			}
		} else {
			let Some(kind) = kind else {
				debug!(session = id, "Dropped update for unknown session without a kind");
				return Ok(());
			};
			let session = self.create_session(id, kind);
			sessions.get_or_create(id, || session);
		}

		let ops = update.into_ops();
		if let Some(session) = sessions.get_mut(id) {
			dispatch::apply_ops(self.engine.as_ref(), session, ops)?;
		}
		Ok(())
	}

	/// Disposes the session's subscriptions and widget and forgets it.
	/// Unknown ids are a no-op; a later update re-creates the session
	/// from scratch with an empty registry.
	pub fn dispose_session(&self, session: SessionId) {
		if self.sessions.lock().remove(session) {
			debug!(session, "Disposed session");
		}
	}

	/// Tears the bridge down: disposes every live session, rejects every
	/// pending items request, and refuses further work. Entered once;
	/// repeated calls are no-ops.
	pub fn dispose(&self) {
		{
			let mut state = self.state.lock();
			if *state != Lifecycle::Active {
				return;
			}
			*state = Lifecycle::Disposing;
		}

		let disposed = self.sessions.lock().dispose_all();
		let rejected = self.pending.reject_all();
		*self.state.lock() = Lifecycle::Disposed;
		debug!(
			sessions = disposed,
			pending = rejected,
			"Bridge disposed"
		);
	}

	fn ensure_active(&self) -> Result<()> {
		if *self.state.lock() == Lifecycle::Active {
			Ok(())
		} else {
			Err(Error::BridgeDisposed)
		}
	}

	fn create_session(&self, id: SessionId, kind: WidgetKind) -> Session {
		let widget = self.engine.create_widget(kind);
		let mut scope = DisposalScope::new(Arc::clone(&widget));
		scope.add(self.spawn_forwarder(id, widget.events()));
		debug!(session = id, ?kind, "Created session");
		Session {
			kind,
			widget,
			registry: ItemRegistry::default(),
			scope,
		}
	}

	/// Spawns the per-session task translating widget events into
	/// requester notifications. The returned subscription cancels it.
	fn spawn_forwarder(
		&self,
		session: SessionId,
		mut events: broadcast::Receiver<WidgetEvent>,
	) -> Subscription {
		let proxy = Arc::clone(&self.proxy);
		let (cancel_tx, mut cancel_rx) = tokio::sync::oneshot::channel::<()>();

		tokio::spawn(async move {
			loop {
				tokio::select! {
					biased;
					_ = &mut cancel_rx => break,
					event = events.recv() => match event {
						Ok(event) => forward_event(proxy.as_ref(), session, event),
						Err(broadcast::error::RecvError::Lagged(n)) => {
							warn!(session, dropped = n, "Widget event receiver lagged");
						}
						Err(broadcast::error::RecvError::Closed) => break,
					},
				}
			}
		});

		Subscription::new(move || {
			let _ = cancel_tx.send(());
		})
	}
}

/// Translates one widget event into the requester notification carrying
/// transport handles instead of item references.
fn forward_event(proxy: &dyn RequesterProxy, session: SessionId, event: WidgetEvent) {
	match event {
		WidgetEvent::Accepted => proxy.on_accept(session),
		WidgetEvent::ButtonTriggered(button) => {
			proxy.on_button_triggered(session, button.handle);
		}
		WidgetEvent::ValueChanged(value) => proxy.on_value_changed(session, value),
		WidgetEvent::Hidden => proxy.on_hidden(session),
		WidgetEvent::ActiveChanged(items) => {
			proxy.on_active_changed(session, handles_of(&items));
		}
		WidgetEvent::SelectionChanged(items) => {
			proxy.on_selection_changed(session, handles_of(&items));
		}
		WidgetEvent::ItemButtonTriggered { item, button } => {
			proxy.on_item_button_triggered(session, item.handle, button.handle);
		}
	}
}

fn handles_of(items: &[Arc<crate::engine::ResolvedItem>]) -> Vec<ItemHandle> {
	items.iter().map(|item| item.handle).collect()
}
