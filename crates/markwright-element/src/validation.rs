//! Pluggable value validation

use crate::attributes::keys;
use crate::kind::Kind;
use crate::node::Node;
use serde_json::{Map, Value};

/// Validates a submitted value for a node.
pub trait Validator: Send + Sync {
	fn validate(&self, node: &Node, value: &Value, options: &Map<String, Value>) -> bool;
}

/// The default validator: every value is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl Validator for AlwaysValid {
	fn validate(&self, _node: &Node, _value: &Value, _options: &Map<String, Value>) -> bool {
		true
	}
}

impl<F> Validator for F
where
	F: Fn(&Node, &Value, &Map<String, Value>) -> bool + Send + Sync,
{
	fn validate(&self, node: &Node, value: &Value, options: &Map<String, Value>) -> bool {
		self(node, value, options)
	}
}

/// Number of selected entries in a submitted group value.
pub fn selected_count(value: &Value) -> usize {
	match value {
		Value::Null => 0,
		Value::Array(items) => items.len(),
		Value::Object(entries) => entries.len(),
		_ => 1,
	}
}

impl Node {
	/// Validate a submitted value against this node.
	///
	/// Checkbox groups whose `#validate` options carry `max-checked` reject
	/// values selecting more entries than that; the node's validator (if any)
	/// decides the rest.
	///
	/// # Examples
	///
	/// ```
	/// use markwright_element::{Kind, Node};
	/// use serde_json::json;
	///
	/// let group = Node::of_kind(Kind::CheckboxGroup)
	/// 	.attr("#validate", json!({"max-checked": 2}));
	///
	/// assert!(group.validate(&json!(["a", "b"])));
	/// assert!(!group.validate(&json!(["a", "b", "c"])));
	/// ```
	pub fn validate(&self, value: &Value) -> bool {
		let empty = Map::new();
		let options = self
			.get(keys::VALIDATE)
			.and_then(Value::as_object)
			.unwrap_or(&empty);

		if self.kind() == Kind::CheckboxGroup {
			if let Some(max) = options.get("max-checked").and_then(Value::as_u64) {
				if selected_count(value) as u64 > max {
					return false;
				}
			}
		}

		match self.validator() {
			Some(validator) => validator.validate(self, value, options),
			None => true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::sync::Arc;

	#[rstest]
	fn test_without_validator_everything_passes() {
		assert!(Node::of_kind(Kind::Text).validate(&json!("anything")));
	}

	#[rstest]
	fn test_closure_validator_receives_options() {
		let mut node = Node::of_kind(Kind::Text).attr("#validate", json!({"min": 3}));
		node.set_validator(Arc::new(
			|_: &Node, value: &Value, options: &Map<String, Value>| {
				let min = options.get("min").and_then(Value::as_u64).unwrap_or(0) as usize;
				value.as_str().is_some_and(|s| s.len() >= min)
			},
		));

		assert!(node.validate(&json!("abcd")));
		assert!(!node.validate(&json!("ab")));
	}

	#[rstest]
	fn test_max_checked_only_applies_to_checkbox_groups() {
		let select = Node::new("select").attr("#validate", json!({"max-checked": 1}));
		assert!(select.validate(&json!(["a", "b"])));
	}

	#[rstest]
	#[case(json!(null), 0)]
	#[case(json!("a"), 1)]
	#[case(json!(["a", "b"]), 2)]
	#[case(json!({"a": true}), 1)]
	fn test_selected_count(#[case] value: Value, #[case] expected: usize) {
		assert_eq!(selected_count(&value), expected);
	}
}
