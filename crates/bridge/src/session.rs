//! Per-session state: item registry, disposal scope, and the session table.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use qi_protocol::{ItemHandle, SessionId, WidgetKind};

use crate::engine::{QuickWidget, ResolvedItem};

/// Arena-style mapping from item handle to resolved payload.
///
/// Rebuilt wholesale on every full item-list update rather than diffed;
/// it only ever contains the handles of the most recently applied list.
#[derive(Default)]
pub(crate) struct ItemRegistry {
	items: IndexMap<ItemHandle, Arc<ResolvedItem>>,
}

impl ItemRegistry {
	/// Discards the previous mapping and inserts every item by handle.
	pub fn rebuild<I>(&mut self, items: I)
	where
		I: IntoIterator<Item = Arc<ResolvedItem>>,
	{
		self.items.clear();
		for item in items {
			self.items.insert(item.handle, item);
		}
	}

	/// Resolves handles against the current mapping, silently dropping
	/// any that are not present (a stale update racing an items rebuild).
	pub fn resolve(&self, handles: &[ItemHandle]) -> Vec<Arc<ResolvedItem>> {
		let resolved: Vec<_> = handles
			.iter()
			.filter_map(|handle| self.items.get(handle).cloned())
			.collect();
		if resolved.len() < handles.len() {
			debug!(
				dropped = handles.len() - resolved.len(),
				"Dropped item handles absent from the registry"
			);
		}
		resolved
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[cfg(test)]
	pub fn contains(&self, handle: ItemHandle) -> bool {
		self.items.contains_key(&handle)
	}
}

/// RAII handle releasing one event subscription when dropped.
pub(crate) struct Subscription {
	release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
	pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
		Self {
			release: Some(Box::new(release)),
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

/// Resource group owning a session's widget and its event subscriptions.
///
/// Released together, exactly once: subscriptions first, so a disposed
/// widget can never emit events into a dead session, then the widget.
pub(crate) struct DisposalScope {
	widget: Arc<dyn QuickWidget>,
	subscriptions: Vec<Subscription>,
	disposed: bool,
}

impl DisposalScope {
	pub fn new(widget: Arc<dyn QuickWidget>) -> Self {
		Self {
			widget,
			subscriptions: Vec::new(),
			disposed: false,
		}
	}

	pub fn add(&mut self, subscription: Subscription) {
		self.subscriptions.push(subscription);
	}

	pub fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		self.disposed = true;
		self.subscriptions.clear();
		self.widget.dispose();
	}
}

impl Drop for DisposalScope {
	fn drop(&mut self) {
		self.dispose();
	}
}

/// One live pick-list or input-box interaction.
pub(crate) struct Session {
	pub kind: WidgetKind,
	pub widget: Arc<dyn QuickWidget>,
	pub registry: ItemRegistry,
	pub scope: DisposalScope,
}

/// Sessions by id: created lazily on first update, removed on dispose.
///
/// A session is present here iff its widget has been created and not yet
/// disposed.
#[derive(Default)]
pub(crate) struct SessionTable {
	sessions: IndexMap<SessionId, Session>,
}

impl SessionTable {
	/// Returns the session for `id`, creating it via `create` on first
	/// reference. The kind is fixed at creation; `create` is not
	/// consulted for ids that already exist.
	pub fn get_or_create(
		&mut self,
		id: SessionId,
		create: impl FnOnce() -> Session,
	) -> &mut Session {
		self.sessions.entry(id).or_insert_with(create)
	}

	pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
		self.sessions.get_mut(&id)
	}

	pub fn kind_of(&self, id: SessionId) -> Option<WidgetKind> {
		self.sessions.get(&id).map(|session| session.kind)
	}

	/// Disposes the session's scope and deletes the entry. Removing an
	/// unknown id is a no-op.
	pub fn remove(&mut self, id: SessionId) -> bool {
		match self.sessions.shift_remove(&id) {
			Some(mut session) => {
				session.scope.dispose();
				true
			}
			None => false,
		}
	}

	/// Removes and disposes every session; used at bridge teardown.
	pub fn dispose_all(&mut self) -> usize {
		let count = self.sessions.len();
		for (_, mut session) in self.sessions.drain(..) {
			session.scope.dispose();
		}
		count
	}

	pub fn len(&self) -> usize {
		self.sessions.len()
	}
}
