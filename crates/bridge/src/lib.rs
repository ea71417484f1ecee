//! Session bridge between an out-of-process requester and the single
//! UI-owning quick input engine.
//!
//! The requester describes desired UI state through fire-and-forget
//! [`SessionUpdate`](protocol::SessionUpdate) messages and one-shot
//! pick/input calls; the bridge owns the live widgets, their event
//! subscriptions, and the per-session handle registries, and forwards
//! user interaction back across the boundary. It tolerates out-of-order
//! and repeated updates, never leaks widget resources, and multiplexes
//! any number of concurrent sessions identified only by a numeric id.
//!
//! # Main Types
//!
//! - [`QuickInputBridge`] - The bridge: session table, lifecycle, and
//!   the requester-facing operation surface
//! - [`WidgetEngine`] / [`QuickWidget`] - The engine seam (consumed)
//! - [`RequesterProxy`] - The requester seam (produced events)
//! - [`OperationInterceptor`] - Observation hook around one-shot calls

mod bridge;
mod dispatch;
mod engine;
mod error;
mod intercept;
mod pending;
mod proxy;
mod session;

pub use bridge::{BridgeConfig, PickedHandles, QuickInputBridge};
pub use engine::{
	FocusSink, ItemsFuture, QuickWidget, ResolvedButton, ResolvedEntry, ResolvedIcon,
	ResolvedItem, Validator, WidgetChange, WidgetEngine, WidgetEvent,
};
pub use error::{Error, Result};
pub use intercept::{NoopInterceptor, OperationInterceptor, OperationSpan, TracingInterceptor};
pub use proxy::{ChannelRequesterProxy, RequesterProxy};

pub use qi_protocol as protocol;
