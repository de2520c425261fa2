//! Attribute storage and pseudo-attribute keys.
//!
//! Names starting with [`PSEUDO_PREFIX`] carry engine configuration rather
//! than markup. They are stored alongside real attributes so they can be
//! queried with the same accessors, but they are never serialized.

use indexmap::IndexMap;
use serde_json::Value;

/// Sentinel that marks a pseudo-attribute name.
pub const PSEUDO_PREFIX: char = '#';

/// Reserved pseudo-attribute names.
pub mod keys {
	/// Replaces the node's children.
	pub const CHILDREN: &str = "#children";
	/// Replaces the node's dataset from a JSON object.
	pub const DATASET: &str = "#dataset";
	/// Replaces the node's raw inner content.
	pub const CONTENT: &str = "#content";
	/// Ordering key among siblings.
	pub const WEIGHT: &str = "#weight";
	/// Form group membership.
	pub const GROUP: &str = "#group";
	pub const LABEL: &str = "#label";
	/// One of `above`, `before`, `after`.
	pub const LABEL_POSITION: &str = "#label-position";
	pub const REQUIRED: &str = "#required";
	pub const HELP: &str = "#help";
	pub const DESCRIPTION: &str = "#description";
	pub const LEGEND: &str = "#legend";
	/// Ordered option map for groups and selects.
	pub const OPTIONS: &str = "#options";
	pub const OPTIONS_DISABLED: &str = "#options-disabled";
	/// Lazy default for `checked` on checkboxes.
	pub const DEFAULT: &str = "#default";
	/// File inputs: show the current value with a download link.
	pub const REMINDER: &str = "#reminder";
	/// File inputs: download link target, defaults to the value.
	pub const DOWNLOAD: &str = "#download";
	/// File inputs: `true` for the configured upload limit, or a byte count.
	pub const LIMIT: &str = "#limit";
	/// Password inputs: render a `-confirm` twin.
	pub const VERIFY: &str = "#verify";
	/// Validator options object.
	pub const VALIDATE: &str = "#validate";
	/// Validation message key.
	pub const ERROR: &str = "#error";

	/// Slots consumed by the decorator.
	pub const DECORATION: &[&str] = &[
		LABEL,
		LABEL_POSITION,
		REQUIRED,
		HELP,
		DESCRIPTION,
		LEGEND,
	];
}

/// Whether `name` is a pseudo-attribute.
pub fn is_pseudo(name: &str) -> bool {
	name.starts_with(PSEUDO_PREFIX)
}

/// Ordered map of attribute name to value.
///
/// # Examples
///
/// ```
/// use markwright_element::AttributeStore;
/// use serde_json::json;
///
/// let mut store = AttributeStore::new();
/// store.insert("type", json!("text"));
/// store.insert("#weight", json!(3));
///
/// assert_eq!(store.get("type"), Some(&json!("text")));
/// assert_eq!(store.real().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
	values: IndexMap<String, Value>,
}

impl AttributeStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	/// Insert or overwrite, keeping the original position of an existing name.
	pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
		self.values.insert(name.into(), value)
	}

	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.values.shift_remove(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Attributes that may reach the markup (pseudo names excluded).
	pub fn real(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.iter().filter(|(name, _)| !is_pseudo(name))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_overwrite_keeps_position() {
		let mut store = AttributeStore::new();
		store.insert("a", json!(1));
		store.insert("b", json!(2));
		store.insert("a", json!(3));

		let names: Vec<_> = store.iter().map(|(k, _)| k).collect();
		assert_eq!(names, ["a", "b"]);
		assert_eq!(store.get("a"), Some(&json!(3)));
	}

	#[rstest]
	fn test_remove_preserves_order() {
		let mut store = AttributeStore::new();
		store.insert("a", json!(1));
		store.insert("b", json!(2));
		store.insert("c", json!(3));
		store.remove("a");

		let names: Vec<_> = store.iter().map(|(k, _)| k).collect();
		assert_eq!(names, ["b", "c"]);
	}

	#[rstest]
	#[case("#children", true)]
	#[case("#anything", true)]
	#[case("id", false)]
	#[case("data-x", false)]
	fn test_is_pseudo(#[case] name: &str, #[case] expected: bool) {
		assert_eq!(is_pseudo(name), expected);
	}
}
