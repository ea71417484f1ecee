//! Transport-safe URI descriptors and their revival into usable resources.

use serde::{Deserialize, Serialize};
use url::Url;

/// Decomposed URI as it crosses the boundary.
///
/// Object references cannot cross the wire, so icon locations travel as
/// their components and are revived into a [`Url`] on the bridge side
/// before the widget engine consumes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriComponents {
	pub scheme: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub authority: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub path: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub query: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub fragment: String,
}

impl UriComponents {
	/// Creates a descriptor for a plain `file` path.
	pub fn file(path: impl Into<String>) -> Self {
		Self {
			scheme: "file".to_string(),
			authority: String::new(),
			path: path.into(),
			query: String::new(),
			fragment: String::new(),
		}
	}

	/// Revives the descriptor into a usable resource reference.
	///
	/// # Errors
	///
	/// Returns [`url::ParseError`] if the components do not assemble into
	/// a valid URI.
	pub fn revive(&self) -> Result<Url, url::ParseError> {
		Url::parse(&self.to_uri_string())
	}

	fn to_uri_string(&self) -> String {
		let mut out = String::with_capacity(
			self.scheme.len() + self.authority.len() + self.path.len() + 8,
		);
		out.push_str(&self.scheme);
		out.push(':');
		// Schemes like `untitled:` carry an opaque path with no authority
		// part; everything else gets the `//authority` form.
		if !self.authority.is_empty() || self.path.starts_with('/') {
			out.push_str("//");
			out.push_str(&self.authority);
		}
		out.push_str(&self.path);
		if !self.query.is_empty() {
			out.push('?');
			out.push_str(&self.query);
		}
		if !self.fragment.is_empty() {
			out.push('#');
			out.push_str(&self.fragment);
		}
		out
	}
}
