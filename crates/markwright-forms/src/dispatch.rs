//! Group dispatch
//!
//! Fields are distributed over the form's groups by their `#group`
//! pseudo-attribute (default `primary`). Groups are ordered by their own
//! weight, fields keep their weighted order inside each group.

use crate::error::{FormError, FormResult};
use crate::group::GroupDefinition;
use indexmap::IndexMap;
use markwright_element::{
	Child, Children, DEFAULT_GROUP, Node, keys, order_by_weight, order_children,
};

/// Resolve the group containers and fill them with `children`.
///
/// Returns `(group id, container)` pairs in group order. Every group is
/// returned, including those that received no children. A `primary` group
/// is added when `groups` lacks one.
///
/// # Errors
///
/// [`FormError::UnknownGroup`] when a child names an undefined group, and
/// element errors from ordering children or groups.
pub fn dispatch(
	children: &Children,
	groups: &IndexMap<String, GroupDefinition>,
) -> FormResult<Vec<(String, Node)>> {
	let mut buckets: Vec<(String, Node)> = groups
		.iter()
		.map(|(id, definition)| (id.clone(), definition.resolve(id)))
		.collect();
	if !groups.contains_key(DEFAULT_GROUP) {
		buckets.insert(
			0,
			(
				DEFAULT_GROUP.to_string(),
				GroupDefinition::default().resolve(DEFAULT_GROUP),
			),
		);
	}

	for entry in order_children(children)? {
		if entry.child.is_blank() {
			continue;
		}
		let group = match &entry.child {
			Child::Node(node) => node.group().into_owned(),
			Child::Raw(_) => DEFAULT_GROUP.to_string(),
		};
		let Some((_, bucket)) = buckets.iter_mut().find(|(id, _)| *id == group) else {
			let child = entry
				.name
				.clone()
				.unwrap_or_else(|| anonymous_label(&entry.child));
			return Err(FormError::UnknownGroup { child, group });
		};

		// Weights were already applied; the bucket keeps dispatch order.
		let child = match &entry.child {
			Child::Node(node) => {
				let mut node = node.as_ref().clone();
				node.remove(keys::WEIGHT);
				Child::from(node)
			}
			raw => raw.clone(),
		};
		match &entry.name {
			Some(name) => bucket.insert_child(name.as_str(), child),
			None => bucket.push_child(child),
		};
	}

	let order = order_by_weight(&buckets, |(id, _)| Some(id.as_str()), |(_, node)| node.weight())?;
	let mut slots: Vec<Option<(String, Node)>> = buckets.into_iter().map(Some).collect();
	let sorted: Vec<(String, Node)> = order
		.into_iter()
		.filter_map(|index| slots[index].take())
		.collect();

	tracing::debug!(
		groups = sorted.len(),
		filled = sorted.iter().filter(|(_, node)| !node.children().is_empty()).count(),
		"dispatched form fields"
	);
	Ok(sorted)
}

/// Name used in errors for anonymous children.
fn anonymous_label(child: &Child) -> String {
	match child {
		Child::Node(node) => format!("<{}>", node.tag()),
		Child::Raw(_) => "<raw>".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn groups(ids: &[(&str, serde_json::Value)]) -> IndexMap<String, GroupDefinition> {
		ids.iter()
			.map(|(id, definition)| (id.to_string(), GroupDefinition::from(definition.clone())))
			.collect()
	}

	fn child_names(node: &Node) -> Vec<&str> {
		node.children()
			.iter()
			.filter_map(|entry| entry.name.as_deref())
			.collect()
	}

	#[rstest]
	fn test_children_land_in_their_groups() {
		let children: Children = [
			("a", Node::new("input").attr("#group", "primary")),
			("b", Node::new("input").attr("#group", "secondary")),
			("c", Node::new("input")),
		]
		.into_iter()
		.collect();

		let buckets = dispatch(
			&children,
			&groups(&[("primary", json!({})), ("secondary", json!({}))]),
		)
		.unwrap();

		assert_eq!(buckets.len(), 2);
		assert_eq!(buckets[0].0, "primary");
		assert_eq!(child_names(&buckets[0].1), ["a", "c"]);
		assert_eq!(child_names(&buckets[1].1), ["b"]);
	}

	#[rstest]
	fn test_groups_sort_by_weight() {
		let children: Children = [("x", Node::new("input").attr("#group", "late"))]
			.into_iter()
			.collect();
		let buckets = dispatch(
			&children,
			&groups(&[
				("late", json!({"weight": 10})),
				("primary", json!({})),
				("early", json!({"weight": -5})),
			]),
		)
		.unwrap();

		let ids: Vec<_> = buckets.iter().map(|(id, _)| id.as_str()).collect();
		assert_eq!(ids, ["early", "primary", "late"]);
		assert!(buckets[0].1.children().is_empty());
	}

	#[rstest]
	fn test_weights_do_not_reorder_inside_groups() {
		let children: Children = [
			("second", Node::new("input").attr("#weight", 2)),
			("first", Node::new("input").attr("#weight", 1)),
		]
		.into_iter()
		.collect();
		let buckets = dispatch(&children, &IndexMap::new()).unwrap();

		assert_eq!(child_names(&buckets[0].1), ["first", "second"]);
		let first = buckets[0].1.children().get("first").and_then(|c| c.as_node()).unwrap();
		assert!(first.get("#weight").is_none());
	}

	#[rstest]
	fn test_blank_children_are_skipped() {
		let mut children = Children::new();
		children.push("   ");
		children.push("<hr />");
		let buckets = dispatch(&children, &IndexMap::new()).unwrap();

		assert_eq!(buckets[0].1.children().len(), 1);
	}

	#[rstest]
	fn test_unknown_group_is_an_error() {
		let children: Children = [("stray", Node::new("input").attr("#group", "nowhere"))]
			.into_iter()
			.collect();
		let error = dispatch(&children, &IndexMap::new()).unwrap_err();

		assert!(matches!(
			error,
			FormError::UnknownGroup { ref child, ref group } if child == "stray" && group == "nowhere"
		));
	}
}
