//! `data-*` attribute storage

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Ordered map of `data-<key>` entries.
///
/// A node's dataset is the single backing store for its `data-*`
/// attributes: writing `data-x` through the attribute API lands here, and
/// reading it back reads from here, so both views always agree.
/// `null` entries stay queryable but are not serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
	entries: IndexMap<String, Value>,
}

impl Dataset {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.entries.insert(key.into(), value.into());
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.entries.shift_remove(key)
	}

	/// Replace every entry with the contents of a JSON object.
	pub fn replace(&mut self, entries: Map<String, Value>) {
		self.entries = entries.into_iter().collect();
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
