//! Form group definitions

use markwright_element::{Node, keys};
use serde_json::{Map, Value};

/// How a form group's container is declared.
#[derive(Debug, Clone)]
pub enum GroupDefinition {
	/// A ready container node.
	Node(Node),
	/// Attributes of a `div` container.
	///
	/// The legacy keys `title`, `description` and `weight` map onto
	/// `#legend`, `#description` and `#weight`.
	Attributes(Map<String, Value>),
}

impl Default for GroupDefinition {
	fn default() -> Self {
		GroupDefinition::Attributes(Map::new())
	}
}

impl From<Node> for GroupDefinition {
	fn from(node: Node) -> Self {
		GroupDefinition::Node(node)
	}
}

impl From<Map<String, Value>> for GroupDefinition {
	fn from(attributes: Map<String, Value>) -> Self {
		GroupDefinition::Attributes(attributes)
	}
}

impl From<Value> for GroupDefinition {
	/// Objects become attribute maps; any other value an empty group.
	fn from(value: Value) -> Self {
		match value {
			Value::Object(attributes) => GroupDefinition::Attributes(attributes),
			_ => GroupDefinition::default(),
		}
	}
}

impl GroupDefinition {
	/// Build the container node for the group `id`.
	///
	/// # Examples
	///
	/// ```
	/// use markwright_forms::GroupDefinition;
	/// use serde_json::json;
	///
	/// let container = GroupDefinition::from(json!({"title": "Billing", "weight": 2}))
	/// 	.resolve("Billing address");
	///
	/// assert_eq!(container.tag(), "div");
	/// assert!(container.has_class("group--billing-address"));
	/// assert_eq!(container.get("#legend"), Some(&json!("Billing")));
	/// ```
	pub fn resolve(&self, id: &str) -> Node {
		let mut node = match self {
			GroupDefinition::Node(node) => node.clone(),
			GroupDefinition::Attributes(attributes) => {
				let mut node = Node::new("div");
				for (key, value) in attributes {
					node.set(legacy_key(key), value.clone());
				}
				node
			}
		};
		if let Some(class) = group_class(id) {
			node.add_class(&class);
		}
		node
	}
}

fn legacy_key(key: &str) -> &str {
	match key {
		"title" => keys::LEGEND,
		"description" => keys::DESCRIPTION,
		"weight" => keys::WEIGHT,
		other => other,
	}
}

/// CSS class marking a group container, `None` for empty or numeric ids.
///
/// The id is lowercased and every run of other characters than ASCII letters
/// and digits becomes one `-`.
pub fn group_class(id: &str) -> Option<String> {
	let id = id.trim();
	if id.is_empty() || id.parse::<f64>().is_ok_and(f64::is_finite) {
		return None;
	}
	let mut normalized = String::with_capacity(id.len());
	for c in id.chars() {
		if c.is_ascii_alphanumeric() {
			normalized.push(c.to_ascii_lowercase());
		} else if !normalized.is_empty() && !normalized.ends_with('-') {
			normalized.push('-');
		}
	}
	let normalized = normalized.trim_end_matches('-');
	if normalized.is_empty() {
		return None;
	}
	Some(format!("group--{normalized}"))
}
