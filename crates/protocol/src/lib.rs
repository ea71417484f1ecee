//! Wire types shared between the requester side and the quick input bridge.
//!
//! Everything crossing the boundary is addressed by small numeric handles
//! rather than object references: sessions by [`SessionId`], items and
//! buttons by [`ItemHandle`]/[`ButtonHandle`] scoped to one session's
//! current item list. Payload types ([`TransferItem`], [`TransferButton`])
//! carry transport-safe icon descriptors that the bridge revives into
//! [`url::Url`] resources before the widget engine sees them.
//!
//! # Main Types
//!
//! - [`SessionUpdate`] - Partial update message, lowered to [`UpdateOp`]s
//! - [`TransferEntry`] - Item-or-separator payload of a full item list
//! - [`BridgeRequest`] / [`BridgeEvent`] - Request and event message surface
//! - [`UriComponents`] - Transport-safe URI descriptor with revival

mod items;
mod messages;
mod options;
mod update;
mod uri;

pub use items::{IconPath, TransferButton, TransferEntry, TransferItem, TransferSeparator};
pub use messages::{BridgeEvent, BridgeRequest};
pub use options::{InputOptions, PickOptions};
pub use update::{SessionUpdate, UpdateOp};
pub use uri::UriComponents;

use serde::{Deserialize, Serialize};

/// Identifies one pick/input session; assigned by the requester and opaque
/// to the bridge.
pub type SessionId = u64;

/// Identifies an item within one session's current item list. Meaningless
/// outside that session, and invalidated by every full item-list update.
pub type ItemHandle = i64;

/// Identifies a button on a widget or item.
pub type ButtonHandle = i64;

/// Reserved button handle resolving to the engine's shared back button.
pub const BACK_BUTTON_HANDLE: ButtonHandle = -1;

/// Which widget a session drives. Fixed at session creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
	/// Filterable pick list.
	QuickPick,
	/// Single-line text input.
	InputBox,
}
