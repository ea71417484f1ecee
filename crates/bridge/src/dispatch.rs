//! Applies lowered update operations to a session.
//!
//! This is where transfer payloads become engine-consumable values:
//! icon-path URIs are revived, the reserved back-button handle is mapped
//! to the engine's shared singleton, and item handles are resolved
//! through the session's registry. Handles that no longer resolve are
//! dropped silently — a stale update racing an items rebuild is a benign
//! protocol race, not an error.

use std::sync::Arc;

use tracing::debug;

use qi_protocol::{
	BACK_BUTTON_HANDLE, IconPath, TransferButton, TransferEntry, TransferItem, UpdateOp,
};

use crate::engine::{
	ResolvedButton, ResolvedEntry, ResolvedIcon, ResolvedItem, WidgetChange, WidgetEngine,
};
use crate::error::Result;
use crate::session::Session;

/// Applies one update batch to a session, in batch order.
///
/// The batch is already ordered by
/// [`SessionUpdate::into_ops`](qi_protocol::SessionUpdate::into_ops):
/// an items rebuild always lands before the handle fields that depend
/// on it.
pub(crate) fn apply_ops(
	engine: &dyn WidgetEngine,
	session: &mut Session,
	ops: Vec<UpdateOp>,
) -> Result<()> {
	for op in ops {
		apply_op(engine, session, op)?;
	}
	Ok(())
}

fn apply_op(engine: &dyn WidgetEngine, session: &mut Session, op: UpdateOp) -> Result<()> {
	match op {
		UpdateOp::SetItems(entries) => {
			let resolved = resolve_entries(entries);
			session
				.registry
				.rebuild(resolved.iter().filter_map(|entry| entry.as_item().cloned()));
			debug!(items = session.registry.len(), "Rebuilt item registry");
			session.widget.apply(WidgetChange::Items(resolved))
		}
		UpdateOp::SetActiveItems(handles) => {
			let items = session.registry.resolve(&handles);
			session.widget.apply(WidgetChange::ActiveItems(items))
		}
		UpdateOp::SetSelectedItems(handles) => {
			let items = session.registry.resolve(&handles);
			session.widget.apply(WidgetChange::SelectedItems(items))
		}
		UpdateOp::SetButtons(buttons) => {
			let buttons = buttons
				.into_iter()
				.map(|button| resolve_widget_button(engine, button))
				.collect();
			session.widget.apply(WidgetChange::Buttons(buttons))
		}
		UpdateOp::SetScalar { name, value } => {
			session.widget.apply(WidgetChange::Scalar { name, value })
		}
		UpdateOp::SetVisible(visible) => session.widget.apply(WidgetChange::Visible(visible)),
	}
}

/// Resolves a full item-list update. Separators survive for display but
/// are not addressable.
pub(crate) fn resolve_entries(entries: Vec<TransferEntry>) -> Vec<ResolvedEntry> {
	entries
		.into_iter()
		.map(|entry| match entry {
			TransferEntry::Item(item) => ResolvedEntry::Item(resolve_item(item)),
			TransferEntry::Separator(separator) => ResolvedEntry::Separator {
				label: separator.label,
			},
		})
		.collect()
}

fn resolve_item(item: TransferItem) -> Arc<ResolvedItem> {
	let TransferItem {
		handle,
		label,
		description,
		detail,
		picked,
		always_show,
		icon_path,
		buttons,
	} = item;
	Arc::new(ResolvedItem {
		handle,
		label,
		description,
		detail,
		picked: picked.unwrap_or(false),
		always_show: always_show.unwrap_or(false),
		icon: icon_path.and_then(revive_icon),
		buttons: buttons.into_iter().map(resolve_button).collect(),
	})
}

/// Resolves a widget-level button: the reserved sentinel maps to the
/// engine's shared back button, everything else has its icon revived.
fn resolve_widget_button(engine: &dyn WidgetEngine, button: TransferButton) -> Arc<ResolvedButton> {
	if button.handle == BACK_BUTTON_HANDLE {
		return engine.back_button();
	}
	resolve_button(button)
}

fn resolve_button(button: TransferButton) -> Arc<ResolvedButton> {
	Arc::new(ResolvedButton {
		handle: button.handle,
		tooltip: button.tooltip,
		icon: button.icon_path.and_then(revive_icon),
	})
}

/// Revives both icon variants. An unrevivable URI drops the icon rather
/// than failing the whole update.
fn revive_icon(icon: IconPath) -> Option<ResolvedIcon> {
	let dark = match icon.dark.revive() {
		Ok(url) => url,
		Err(error) => {
			debug!(%error, "Dropped icon with unrevivable dark URI");
			return None;
		}
	};
	let light = icon.light.and_then(|components| match components.revive() {
		Ok(url) => Some(url),
		Err(error) => {
			debug!(%error, "Dropped unrevivable light icon URI");
			None
		}
	});
	Some(ResolvedIcon { dark, light })
}
