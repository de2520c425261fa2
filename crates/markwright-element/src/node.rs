//! The element tree

use crate::attributes::{AttributeStore, keys};
use crate::classes::ClassSet;
use crate::dataset::Dataset;
use crate::error::ContentError;
use crate::ids::IdSource;
use crate::kind::Kind;
use crate::ordering::Weight;
use crate::validation::Validator;
use crate::value::value_text;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

/// Group a node belongs to when it declares none.
pub const DEFAULT_GROUP: &str = "primary";

/// Computes a node's inner content at render time.
pub type ContentSource = Arc<dyn Fn(&Node) -> Result<String, ContentError> + Send + Sync>;

/// A child of a node: another node or raw markup passed through verbatim.
#[derive(Debug, Clone)]
pub enum Child {
	Node(Box<Node>),
	Raw(String),
}

impl Child {
	/// Ordering key; raw children always weigh `0`.
	pub fn weight(&self) -> Weight {
		match self {
			Child::Node(node) => node.weight(),
			Child::Raw(_) => Weight::Numeric(0.0),
		}
	}

	pub fn as_node(&self) -> Option<&Node> {
		match self {
			Child::Node(node) => Some(node),
			Child::Raw(_) => None,
		}
	}

	/// Raw children that are empty, or nothing at all.
	pub fn is_blank(&self) -> bool {
		matches!(self, Child::Raw(raw) if raw.trim().is_empty())
	}
}

impl From<Node> for Child {
	fn from(node: Node) -> Self {
		Child::Node(Box::new(node))
	}
}

impl From<&str> for Child {
	fn from(raw: &str) -> Self {
		Child::Raw(raw.to_string())
	}
}

impl From<String> for Child {
	fn from(raw: String) -> Self {
		Child::Raw(raw)
	}
}

/// A child together with its optional name.
#[derive(Debug, Clone)]
pub struct ChildEntry {
	pub name: Option<String>,
	pub child: Child,
}

/// Ordered children; named entries behave like map keys.
///
/// # Examples
///
/// ```
/// use markwright_element::{Children, Node};
///
/// let mut children = Children::new();
/// children.insert("first", Node::new("span"));
/// children.push("<br />");
/// children.insert("first", Node::new("em"));
///
/// assert_eq!(children.len(), 2);
/// assert_eq!(children.get("first").and_then(|c| c.as_node()).map(|n| n.tag()), Some("em"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Children {
	entries: Vec<ChildEntry>,
}

impl Children {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an anonymous child.
	pub fn push(&mut self, child: impl Into<Child>) {
		self.entries.push(ChildEntry {
			name: None,
			child: child.into(),
		});
	}

	/// Insert a named child, replacing an existing one in place.
	pub fn insert(&mut self, name: impl Into<String>, child: impl Into<Child>) {
		let name = name.into();
		let child = child.into();
		match self.position(&name) {
			Some(index) => self.entries[index].child = child,
			None => self.entries.push(ChildEntry {
				name: Some(name),
				child,
			}),
		}
	}

	pub fn get(&self, name: &str) -> Option<&Child> {
		self.position(name).map(|index| &self.entries[index].child)
	}

	pub fn get_mut(&mut self, name: &str) -> Option<&mut Child> {
		self.position(name)
			.map(move |index| &mut self.entries[index].child)
	}

	pub fn remove(&mut self, name: &str) -> Option<Child> {
		self.position(name)
			.map(|index| self.entries.remove(index).child)
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn entries(&self) -> &[ChildEntry] {
		&self.entries
	}

	pub fn iter(&self) -> impl Iterator<Item = &ChildEntry> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn position(&self, name: &str) -> Option<usize> {
		self.entries
			.iter()
			.position(|entry| entry.name.as_deref() == Some(name))
	}
}

impl<N, C> FromIterator<(N, C)> for Children
where
	N: Into<String>,
	C: Into<Child>,
{
	fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
		let mut children = Children::new();
		for (name, child) in iter {
			children.insert(name, child);
		}
		children
	}
}

/// Right-hand side of an attribute assignment.
///
/// Plain values cover every attribute; [`Assignment::Children`] exists for
/// the `#children` pseudo-attribute, which cannot be expressed as a value.
#[derive(Debug, Clone)]
pub enum Assignment {
	Value(Value),
	Children(Children),
}

impl From<Value> for Assignment {
	fn from(value: Value) -> Self {
		Assignment::Value(value)
	}
}

impl From<Children> for Assignment {
	fn from(children: Children) -> Self {
		Assignment::Children(children)
	}
}

macro_rules! assignment_from_value {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Assignment {
				fn from(value: $ty) -> Self {
					Assignment::Value(Value::from(value))
				}
			}
		)*
	};
}

assignment_from_value!(&str, String, bool, i32, i64, u32, u64, f64);

/// A markup element.
///
/// Attributes, classes, dataset, children and inner content are all mutable
/// until the node is handed to a [`Renderer`](crate::Renderer), which only
/// ever borrows it.
///
/// # Examples
///
/// ```
/// use markwright_element::{Node, Renderer};
///
/// let node = Node::new("p")
/// 	.attr("class", "lead")
/// 	.attr("#content", "Hello");
///
/// let html = Renderer::new().render(&node).unwrap();
/// assert_eq!(html, r#"<p class="lead">Hello</p>"#);
/// ```
#[derive(Clone)]
pub struct Node {
	tag: String,
	kind: Kind,
	attributes: AttributeStore,
	classes: ClassSet,
	dataset: Dataset,
	children: Children,
	content: Option<String>,
	content_source: Option<ContentSource>,
	validator: Option<Arc<dyn Validator>>,
	render_class: Option<String>,
	auto_id: OnceLock<String>,
}

impl Node {
	/// Create a node for a tag; `select` and `textarea` get their kinds.
	pub fn new(tag: impl Into<String>) -> Self {
		let tag = tag.into();
		let kind = Kind::from_tag(&tag);
		Self::build(tag, kind)
	}

	/// Create a node of a special kind with its forced tag and type.
	///
	/// # Examples
	///
	/// ```
	/// use markwright_element::{Kind, Node};
	/// use serde_json::json;
	///
	/// let radio = Node::of_kind(Kind::Radio);
	/// assert_eq!(radio.tag(), "input");
	/// assert_eq!(radio.get("type"), Some(&json!("radio")));
	/// ```
	pub fn of_kind(kind: Kind) -> Self {
		let tag = kind.tag().unwrap_or("div");
		let mut node = Self::build(tag.to_string(), kind);
		if let Some(input_type) = kind.input_type() {
			node.attributes.insert("type", Value::from(input_type));
		}
		if let Some(class) = kind.group_class() {
			node.add_class(class);
		}
		node
	}

	/// Create a node and apply an initial attribute bag in order.
	pub fn with_attrs<K, A>(tag: impl Into<String>, bag: impl IntoIterator<Item = (K, A)>) -> Self
	where
		K: AsRef<str>,
		A: Into<Assignment>,
	{
		let mut node = Self::new(tag);
		node.set_all(bag);
		node
	}

	/// Like [`Node::with_attrs`] for a special kind.
	pub fn of_kind_with<K, A>(kind: Kind, bag: impl IntoIterator<Item = (K, A)>) -> Self
	where
		K: AsRef<str>,
		A: Into<Assignment>,
	{
		let mut node = Self::of_kind(kind);
		node.set_all(bag);
		node
	}

	fn build(tag: String, kind: Kind) -> Self {
		Self {
			tag,
			kind,
			attributes: AttributeStore::new(),
			classes: ClassSet::new(),
			dataset: Dataset::new(),
			children: Children::new(),
			content: None,
			content_source: None,
			validator: None,
			render_class: None,
			auto_id: OnceLock::new(),
		}
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn kind(&self) -> Kind {
		self.kind
	}

	/// Builder form of [`Node::set`].
	pub fn attr(mut self, name: &str, value: impl Into<Assignment>) -> Self {
		self.set(name, value);
		self
	}

	/// Assign an attribute or pseudo-attribute.
	///
	/// Pseudo-attributes with side effects:
	/// - `#children` replaces the children
	/// - `#dataset` replaces the dataset (JSON object, `null` clears)
	/// - `#content` replaces the inner content (`null` clears)
	///
	/// `class` recomputes the explicit class list and `data-<key>` writes the
	/// dataset entry `<key>`. Everything else is stored as-is.
	pub fn set(&mut self, name: &str, value: impl Into<Assignment>) -> &mut Self {
		self.assign(name, value.into());
		self
	}

	/// Apply every pair in order; later pairs override earlier ones.
	pub fn set_all<K, A>(&mut self, bag: impl IntoIterator<Item = (K, A)>) -> &mut Self
	where
		K: AsRef<str>,
		A: Into<Assignment>,
	{
		for (name, value) in bag {
			self.assign(name.as_ref(), value.into());
		}
		self
	}

	fn assign(&mut self, name: &str, assignment: Assignment) {
		let value = match assignment {
			Assignment::Children(children) => {
				if name == keys::CHILDREN {
					self.children = children;
				} else {
					tracing::debug!(name, "ignoring children assigned to a non-children attribute");
				}
				return;
			}
			Assignment::Value(value) => value,
		};

		match name {
			keys::CHILDREN => {
				self.children = Children::new();
				match value {
					Value::Null => {}
					Value::Array(items) => {
						for item in items {
							if let Some(text) = value_text(&item) {
								self.children.push(text.into_owned());
							}
						}
					}
					other => {
						if let Some(text) = value_text(&other) {
							self.children.push(text.into_owned());
						}
					}
				}
			}
			keys::DATASET => match value {
				Value::Object(entries) => self.dataset.replace(entries),
				Value::Null => self.dataset.clear(),
				other => tracing::debug!(value = %other, "ignoring non-object dataset"),
			},
			keys::CONTENT => {
				self.content = value_text(&value).map(Cow::into_owned);
			}
			"class" => {
				let explicit = value_text(&value).unwrap_or_default();
				self.classes.set_explicit(&explicit);
				self.sync_class_attribute();
			}
			_ => {
				if let Some(key) = name.strip_prefix("data-") {
					self.dataset.set(key, value);
				} else {
					self.attributes.insert(name, value);
				}
			}
		}
	}

	/// Stored value of an attribute or pseudo-attribute.
	///
	/// `data-<key>` reads the dataset, `#content` is not stored and reads as
	/// unset; use [`Node::content`] instead.
	pub fn get(&self, name: &str) -> Option<&Value> {
		match name.strip_prefix("data-") {
			Some(key) => self.dataset.get(key),
			None => self.attributes.get(name),
		}
	}

	/// Stored value or `default` when unset.
	pub fn get_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
		self.get(name).unwrap_or(default)
	}

	/// Stored value as text, `None` when unset or `null`.
	pub fn get_text(&self, name: &str) -> Option<Cow<'_, str>> {
		self.get(name).and_then(value_text)
	}

	pub fn remove(&mut self, name: &str) -> Option<Value> {
		match name {
			"class" => {
				let previous = self.attributes.remove("class");
				self.classes.set_explicit("");
				self.sync_class_attribute();
				previous
			}
			_ => match name.strip_prefix("data-") {
				Some(key) => self.dataset.remove(key),
				None => self.attributes.remove(name),
			},
		}
	}

	pub fn attributes(&self) -> &AttributeStore {
		&self.attributes
	}

	pub fn add_class(&mut self, classes: &str) -> &mut Self {
		self.classes.add(classes);
		self.sync_class_attribute();
		self
	}

	pub fn remove_class(&mut self, class: &str) -> &mut Self {
		self.classes.remove(class);
		self.sync_class_attribute();
		self
	}

	pub fn has_class(&self, class: &str) -> bool {
		self.classes.contains(class)
	}

	pub fn classes(&self) -> &ClassSet {
		&self.classes
	}

	/// Keep `get("class")` equal to the composed class list.
	fn sync_class_attribute(&mut self) {
		if self.classes.is_empty() {
			self.attributes.remove("class");
		} else {
			self.attributes
				.insert("class", Value::String(self.classes.to_string()));
		}
	}

	pub fn dataset(&self) -> &Dataset {
		&self.dataset
	}

	pub fn dataset_mut(&mut self) -> &mut Dataset {
		&mut self.dataset
	}

	pub fn children(&self) -> &Children {
		&self.children
	}

	pub fn children_mut(&mut self) -> &mut Children {
		&mut self.children
	}

	/// Append an anonymous child.
	pub fn push_child(&mut self, child: impl Into<Child>) -> &mut Self {
		self.children.push(child);
		self
	}

	/// Insert or replace a named child.
	pub fn insert_child(&mut self, name: impl Into<String>, child: impl Into<Child>) -> &mut Self {
		self.children.insert(name, child);
		self
	}

	/// Builder form of [`Node::insert_child`].
	pub fn child(mut self, name: impl Into<String>, child: impl Into<Child>) -> Self {
		self.children.insert(name, child);
		self
	}

	pub fn content(&self) -> Option<&str> {
		self.content.as_deref()
	}

	pub fn set_content(&mut self, content: Option<String>) -> &mut Self {
		self.content = content;
		self
	}

	/// Compute the inner content lazily at render time.
	pub fn set_content_source<F>(&mut self, source: F) -> &mut Self
	where
		F: Fn(&Node) -> Result<String, ContentError> + Send + Sync + 'static,
	{
		self.content_source = Some(Arc::new(source));
		self
	}

	pub fn content_source(&self) -> Option<&ContentSource> {
		self.content_source.as_ref()
	}

	/// Ordering key among siblings, from `#weight`.
	pub fn weight(&self) -> Weight {
		Weight::parse(self.get(keys::WEIGHT))
	}

	/// Form group membership, from `#group`.
	pub fn group(&self) -> Cow<'_, str> {
		self.get_text(keys::GROUP)
			.filter(|group| !group.is_empty())
			.unwrap_or(Cow::Borrowed(DEFAULT_GROUP))
	}

	/// Explicit `id`, if any.
	pub fn explicit_id(&self) -> Option<Cow<'_, str>> {
		self.get_text("id").filter(|id| !id.is_empty())
	}

	/// Explicit `id`, or a generated one that sticks to this node.
	///
	/// The first call without an explicit id draws from `source`; later calls
	/// return the same value.
	pub fn id_with(&self, source: &dyn IdSource, prefix: &str) -> String {
		match self.explicit_id() {
			Some(id) => id.into_owned(),
			None => self
				.auto_id
				.get_or_init(|| format!("{prefix}{}", source.next_id()))
				.clone(),
		}
	}

	/// Class name used for asset registration.
	pub fn render_class(&self) -> &str {
		self.render_class.as_deref().unwrap_or(self.kind.name())
	}

	pub fn set_render_class(&mut self, class: impl Into<String>) -> &mut Self {
		self.render_class = Some(class.into());
		self
	}

	pub fn validator(&self) -> Option<&Arc<dyn Validator>> {
		self.validator.as_ref()
	}

	pub fn set_validator(&mut self, validator: Arc<dyn Validator>) -> &mut Self {
		self.validator = Some(validator);
		self
	}
}

impl std::fmt::Debug for Node {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Node")
			.field("tag", &self.tag)
			.field("kind", &self.kind)
			.field("attributes", &self.attributes)
			.field("classes", &self.classes)
			.field("dataset", &self.dataset)
			.field("children", &self.children)
			.field("content", &self.content)
			.field("has_content_source", &self.content_source.is_some())
			.field("has_validator", &self.validator.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ids::LocalIds;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_plain_set_and_get() {
		let mut node = Node::new("div");
		node.set("title", "hello");
		assert_eq!(node.get("title"), Some(&json!("hello")));
		assert_eq!(node.get_or("missing", &json!("fallback")), &json!("fallback"));
	}

	#[rstest]
	fn test_bag_later_pairs_override() {
		let node = Node::with_attrs("div", [("title", "a"), ("title", "b")]);
		assert_eq!(node.get("title"), Some(&json!("b")));
	}

	#[rstest]
	fn test_content_pseudo_attribute() {
		let mut node = Node::with_attrs("p", [("#content", "x")]);
		assert_eq!(node.content(), Some("x"));
		assert!(node.get("#content").is_none());
		node.set("#content", Value::Null);
		assert_eq!(node.content(), None);
	}

	#[rstest]
	fn test_children_pseudo_attribute() {
		let children: Children = [("a", Node::new("span"))].into_iter().collect();
		let mut node = Node::new("div").attr("#children", children);
		assert_eq!(node.children().len(), 1);

		node.set("#children", json!(["<b>x</b>", "y"]));
		assert_eq!(node.children().len(), 2);
		assert!(matches!(node.children().entries()[0].child, Child::Raw(ref s) if s == "<b>x</b>"));
	}

	#[rstest]
	fn test_dataset_pseudo_attribute() {
		let mut node = Node::new("div").attr("#dataset", json!({"a": 1, "b": "two"}));
		assert_eq!(node.get("data-a"), Some(&json!(1)));
		node.set("#dataset", Value::Null);
		assert!(node.dataset().is_empty());
	}

	#[rstest]
	fn test_dataset_mirrors_attributes() {
		let mut node = Node::new("div");
		node.dataset_mut().set("x", "y");
		assert_eq!(node.get("data-x"), Some(&json!("y")));

		node.set("data-x", "z");
		assert_eq!(node.dataset().get("x"), Some(&json!("z")));

		node.set("data-x", Value::Null);
		assert_eq!(node.get("data-x"), Some(&Value::Null));
		assert_eq!(node.dataset().get("x"), Some(&Value::Null));
	}

	#[rstest]
	fn test_class_attribute_recomposes() {
		let mut node = Node::new("div");
		node.set("class", "a b");
		node.add_class("c");
		node.set("class", "d");
		assert_eq!(node.classes().iter().collect::<Vec<_>>(), ["d", "c"]);
		assert_eq!(node.get("class"), Some(&json!("d c")));
	}

	#[rstest]
	fn test_remove_class_attribute_keeps_added() {
		let mut node = Node::new("div").attr("class", "a");
		node.add_class("b");
		node.remove("class");
		assert_eq!(node.get("class"), Some(&json!("b")));
	}

	#[rstest]
	fn test_of_kind_forces_tag_and_type() {
		let node = Node::of_kind(Kind::Password);
		assert_eq!(node.tag(), "input");
		assert_eq!(node.get("type"), Some(&json!("password")));

		let group = Node::of_kind(Kind::CheckboxGroup);
		assert_eq!(group.tag(), "div");
		assert!(group.has_class("checkbox-group"));
	}

	#[rstest]
	fn test_new_promotes_select_and_textarea() {
		assert_eq!(Node::new("select").kind(), Kind::Select);
		assert_eq!(Node::new("textarea").kind(), Kind::Textarea);
		assert_eq!(Node::new("input").kind(), Kind::Plain);
	}

	#[rstest]
	fn test_named_children_replace_in_place() {
		let mut node = Node::new("div");
		node.insert_child("a", "1");
		node.insert_child("b", "2");
		node.insert_child("a", "3");
		let names: Vec<_> = node
			.children()
			.iter()
			.map(|entry| entry.name.as_deref())
			.collect();
		assert_eq!(names, [Some("a"), Some("b")]);
		assert!(matches!(node.children().get("a"), Some(Child::Raw(s)) if s == "3"));
	}

	#[rstest]
	fn test_auto_id_first_access_wins() {
		let ids = LocalIds::starting_at(7);
		let node = Node::new("input");
		assert_eq!(node.id_with(&ids, "mw-"), "mw-7");
		assert_eq!(node.id_with(&ids, "mw-"), "mw-7");

		let explicit = Node::new("input").attr("id", "email");
		assert_eq!(explicit.id_with(&ids, "mw-"), "email");
		assert_eq!(ids.next_id(), 8);
	}

	#[rstest]
	fn test_group_defaults_to_primary() {
		assert_eq!(Node::new("input").group(), "primary");
		assert_eq!(Node::new("input").attr("#group", "extra").group(), "extra");
	}

	#[rstest]
	fn test_render_class_defaults_to_kind_name() {
		let mut node = Node::of_kind(Kind::File);
		assert_eq!(node.render_class(), "file");
		node.set_render_class("avatar-upload");
		assert_eq!(node.render_class(), "avatar-upload");
	}
}
