//! CSS class composition

use indexmap::IndexSet;
use std::fmt;

/// The set of CSS classes on a node.
///
/// Classes come from two sources: the explicit `class` attribute and
/// programmatic [`ClassSet::add`] calls. Assigning the attribute replaces
/// only the explicit list, so programmatic classes survive re-assignment.
/// Explicit tokens iterate first.
///
/// # Examples
///
/// ```
/// use markwright_element::ClassSet;
///
/// let mut classes = ClassSet::new();
/// classes.set_explicit("a b");
/// classes.add("c");
/// classes.set_explicit("d");
///
/// assert_eq!(classes.to_string(), "d c");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
	explicit: IndexSet<String>,
	added: IndexSet<String>,
}

impl ClassSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the explicit tokens with those parsed from a `class` value.
	pub fn set_explicit(&mut self, attribute: &str) {
		self.explicit = attribute.split_whitespace().map(str::to_owned).collect();
	}

	/// Add one or more whitespace-separated classes programmatically.
	pub fn add(&mut self, classes: &str) {
		for token in classes.split_whitespace() {
			self.added.insert(token.to_owned());
		}
	}

	/// Remove a class from both sources.
	pub fn remove(&mut self, class: &str) {
		self.explicit.shift_remove(class);
		self.added.shift_remove(class);
	}

	pub fn contains(&self, class: &str) -> bool {
		self.explicit.contains(class) || self.added.contains(class)
	}

	/// Composed classes, explicit first, without duplicates.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.explicit.iter().map(String::as_str).chain(
			self.added
				.iter()
				.filter(|token| !self.explicit.contains(*token))
				.map(String::as_str),
		)
	}

	pub fn is_empty(&self) -> bool {
		self.explicit.is_empty() && self.added.is_empty()
	}

	pub fn len(&self) -> usize {
		self.iter().count()
	}
}

impl fmt::Display for ClassSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, token) in self.iter().enumerate() {
			if i > 0 {
				f.write_str(" ")?;
			}
			f.write_str(token)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_explicit_tokens_are_deduplicated() {
		let mut classes = ClassSet::new();
		classes.set_explicit("a  b a");
		assert_eq!(classes.to_string(), "a b");
	}

	#[rstest]
	fn test_explicit_wins_placement_over_added() {
		let mut classes = ClassSet::new();
		classes.add("b");
		classes.set_explicit("a b");
		assert_eq!(classes.to_string(), "a b");
		assert_eq!(classes.len(), 2);
	}

	#[rstest]
	fn test_added_survives_explicit_reset() {
		let mut classes = ClassSet::new();
		classes.set_explicit("a b");
		classes.add("c");
		classes.set_explicit("d");
		assert_eq!(classes.iter().collect::<Vec<_>>(), ["d", "c"]);
	}

	#[rstest]
	fn test_remove_drops_from_both_sources() {
		let mut classes = ClassSet::new();
		classes.set_explicit("a");
		classes.add("a b");
		classes.remove("a");
		assert!(!classes.contains("a"));
		assert_eq!(classes.to_string(), "b");
	}

	#[rstest]
	fn test_empty() {
		let mut classes = ClassSet::new();
		assert!(classes.is_empty());
		classes.set_explicit("   ");
		assert!(classes.is_empty());
		assert_eq!(classes.to_string(), "");
	}
}
