//! Weighted child ordering
//!
//! Children are ordered by their weight. Numeric weights sort ascending and
//! keep insertion order among equals. Symbolic weights place a child
//! relative to the numeric sequence:
//!
//! - `top` prepends, `bottom` appends
//! - `before:<name>` / `after:<name>` insert next to a named sibling
//!
//! Relative children are placed in insertion order. One whose target has not
//! been placed yet is retried after the others, so a child may target a
//! sibling that is itself relatively placed. A target that never appears is
//! an [`ElementError::TargetNotFound`].

use crate::error::{ElementError, ElementResult};
use crate::node::{ChildEntry, Children};
use serde_json::Value;

/// Ordering key of a child.
#[derive(Debug, Clone, PartialEq)]
pub enum Weight {
	Numeric(f64),
	Top,
	Bottom,
	Before(String),
	After(String),
}

impl Weight {
	/// Parse a `#weight` value; absent or unrecognized values weigh `0`.
	///
	/// # Examples
	///
	/// ```
	/// use markwright_element::Weight;
	/// use serde_json::json;
	///
	/// assert_eq!(Weight::parse(Some(&json!(5))), Weight::Numeric(5.0));
	/// assert_eq!(Weight::parse(Some(&json!("-2.5"))), Weight::Numeric(-2.5));
	/// assert_eq!(Weight::parse(Some(&json!("after:name"))), Weight::After("name".into()));
	/// assert_eq!(Weight::parse(None), Weight::Numeric(0.0));
	/// ```
	pub fn parse(value: Option<&Value>) -> Self {
		match value {
			Some(Value::Number(n)) => Weight::Numeric(n.as_f64().unwrap_or(0.0)),
			Some(Value::String(s)) => Self::parse_str(s),
			_ => Weight::Numeric(0.0),
		}
	}

	fn parse_str(token: &str) -> Self {
		let token = token.trim();
		match token {
			"top" => return Weight::Top,
			"bottom" => return Weight::Bottom,
			_ => {}
		}
		if let Some(target) = token.strip_prefix("before:") {
			return Weight::Before(target.to_string());
		}
		if let Some(target) = token.strip_prefix("after:") {
			return Weight::After(target.to_string());
		}
		match token.parse::<f64>() {
			Ok(weight) if weight.is_finite() => Weight::Numeric(weight),
			_ => {
				tracing::debug!(token, "unrecognized weight, using 0");
				Weight::Numeric(0.0)
			}
		}
	}

	pub fn is_relative(&self) -> bool {
		!matches!(self, Weight::Numeric(_))
	}
}

enum Placement {
	Top,
	Bottom,
	Before(String),
	After(String),
}

/// Render order of a node's children.
pub fn order_children(children: &Children) -> ElementResult<Vec<&ChildEntry>> {
	let entries = children.entries();
	let order = order_by_weight(
		entries,
		|entry| entry.name.as_deref(),
		|entry| entry.child.weight(),
	)?;
	Ok(order.into_iter().map(|index| &entries[index]).collect())
}

/// Indices of `items` in weight order.
///
/// Shared by child ordering and form group sorting.
pub fn order_by_weight<T>(
	items: &[T],
	name_of: impl Fn(&T) -> Option<&str>,
	weight_of: impl Fn(&T) -> Weight,
) -> ElementResult<Vec<usize>> {
	let mut numeric: Vec<(usize, f64)> = Vec::with_capacity(items.len());
	let mut relative: Vec<(usize, Placement)> = Vec::new();
	for (index, item) in items.iter().enumerate() {
		let placement = match weight_of(item) {
			Weight::Numeric(weight) => {
				numeric.push((index, weight));
				continue;
			}
			Weight::Top => Placement::Top,
			Weight::Bottom => Placement::Bottom,
			Weight::Before(target) => Placement::Before(target),
			Weight::After(target) => Placement::After(target),
		};
		relative.push((index, placement));
	}

	// A single bucket without relative placements is already in order.
	let single_bucket = numeric.windows(2).all(|pair| pair[0].1 == pair[1].1);
	if relative.is_empty() && single_bucket {
		return Ok((0..items.len()).collect());
	}

	// `sort_by` is stable, so ties keep insertion order.
	numeric.sort_by(|a, b| a.1.total_cmp(&b.1));
	let mut sequence: Vec<usize> = numeric.into_iter().map(|(index, _)| index).collect();

	let position_of = |sequence: &[usize], target: &str| {
		sequence
			.iter()
			.position(|&index| name_of(&items[index]) == Some(target))
	};

	let mut pending = relative;
	while !pending.is_empty() {
		let before = pending.len();
		let mut deferred = Vec::new();
		for (index, placement) in pending {
			match &placement {
				Placement::Top => sequence.insert(0, index),
				Placement::Bottom => sequence.push(index),
				Placement::Before(target) => match position_of(&sequence, target) {
					Some(at) => sequence.insert(at, index),
					None => deferred.push((index, placement)),
				},
				Placement::After(target) => match position_of(&sequence, target) {
					Some(at) => sequence.insert(at + 1, index),
					None => deferred.push((index, placement)),
				},
			}
		}
		if deferred.len() == before {
			let (index, placement) = &deferred[0];
			let target = match placement {
				Placement::Before(target) | Placement::After(target) => target.clone(),
				Placement::Top | Placement::Bottom => String::new(),
			};
			let child = name_of(&items[*index])
				.map(str::to_owned)
				.unwrap_or_else(|| format!("#{index}"));
			return Err(ElementError::TargetNotFound { child, target });
		}
		pending = deferred;
	}

	Ok(sequence)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::Node;
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	fn names(children: &Children) -> Vec<String> {
		order_children(children)
			.unwrap()
			.into_iter()
			.map(|entry| entry.name.clone().unwrap_or_default())
			.collect()
	}

	fn weighted(weight: Value) -> Node {
		Node::new("span").attr("#weight", weight)
	}

	#[rstest]
	fn test_mixed_numeric_and_relative() {
		let children: Children = [
			("two", weighted(json!(2))),
			("one", weighted(json!(0))),
			("zero", weighted(json!("top"))),
			("three", weighted(json!("before:four"))),
			("four", weighted(json!("bottom"))),
		]
		.into_iter()
		.collect();

		assert_eq!(names(&children), ["zero", "one", "two", "three", "four"]);
	}

	#[rstest]
	fn test_equal_weights_keep_insertion_order() {
		let children: Children = [
			("b", weighted(json!(1))),
			("a", weighted(json!(1))),
			("z", weighted(json!(0))),
			("c", weighted(json!(1))),
		]
		.into_iter()
		.collect();

		assert_eq!(names(&children), ["z", "b", "a", "c"]);
	}

	#[rstest]
	fn test_single_bucket_keeps_insertion_order() {
		let mut node = Node::new("div");
		node.insert_child("b", Node::new("span"));
		node.push_child("raw");
		node.insert_child("a", weighted(json!("0")));

		assert_eq!(names(node.children()), ["b", "", "a"]);
	}

	#[rstest]
	fn test_raw_children_weigh_zero() {
		let mut node = Node::new("div");
		node.insert_child("late", weighted(json!(5)));
		node.insert_child("raw", "text");
		node.insert_child("early", weighted(json!(-1)));

		assert_eq!(names(node.children()), ["early", "raw", "late"]);
	}

	#[rstest]
	fn test_after_target() {
		let children: Children = [
			("a", weighted(json!(0))),
			("b", weighted(json!(1))),
			("c", weighted(json!("after:a"))),
		]
		.into_iter()
		.collect();

		assert_eq!(names(&children), ["a", "c", "b"]);
	}

	#[rstest]
	fn test_successive_tops_prepend() {
		let children: Children = [
			("a", weighted(json!(0))),
			("t1", weighted(json!("top"))),
			("t2", weighted(json!("top"))),
		]
		.into_iter()
		.collect();

		assert_eq!(names(&children), ["t2", "t1", "a"]);
	}

	#[rstest]
	fn test_target_placed_later_is_resolved_on_retry() {
		let children: Children = [
			("a", weighted(json!("after:b"))),
			("b", weighted(json!("bottom"))),
			("c", weighted(json!(0))),
		]
		.into_iter()
		.collect();

		assert_eq!(names(&children), ["c", "b", "a"]);
	}

	#[rstest]
	fn test_missing_target_is_an_error() {
		let children: Children = [
			("a", weighted(json!(0))),
			("b", weighted(json!("before:ghost"))),
		]
		.into_iter()
		.collect();

		let error = order_children(&children).unwrap_err();
		assert!(matches!(
			error,
			ElementError::TargetNotFound { ref child, ref target } if child == "b" && target == "ghost"
		));
	}

	#[rstest]
	fn test_mutual_targets_are_an_error() {
		let children: Children = [
			("a", weighted(json!("before:b"))),
			("b", weighted(json!("after:a"))),
		]
		.into_iter()
		.collect();

		assert!(order_children(&children).is_err());
	}

	#[rstest]
	#[case(json!("top"), Weight::Top)]
	#[case(json!(" bottom "), Weight::Bottom)]
	#[case(json!("before:x"), Weight::Before("x".into()))]
	#[case(json!(1.5), Weight::Numeric(1.5))]
	#[case(json!("nonsense"), Weight::Numeric(0.0))]
	#[case(json!(true), Weight::Numeric(0.0))]
	fn test_weight_parse(#[case] value: Value, #[case] expected: Weight) {
		assert_eq!(Weight::parse(Some(&value)), expected);
	}

	proptest! {
		#[test]
		fn prop_numeric_order_is_sorted_and_stable(weights in prop::collection::vec(-3i64..3, 0..24)) {
			let children: Children = weights
				.iter()
				.enumerate()
				.map(|(i, w)| (format!("c{i}"), weighted(json!(w))))
				.collect();

			let order: Vec<usize> = order_children(&children)
				.unwrap()
				.into_iter()
				.map(|entry| entry.name.as_deref().unwrap()[1..].parse().unwrap())
				.collect();

			let mut expected: Vec<usize> = (0..weights.len()).collect();
			expected.sort_by_key(|&i| weights[i]);
			prop_assert_eq!(order, expected);
		}
	}
}
