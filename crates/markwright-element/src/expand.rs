//! Kind-specific expansion before rendering.
//!
//! Each [`Kind`] has an [`Expander`] that derives a transient view of the
//! node: options become child inputs, textarea values become content,
//! password values are dropped and so on. The source node is only ever
//! borrowed, so nothing a render does is visible on it afterwards.

use crate::attributes::keys;
use crate::ids::IdSource;
use crate::kind::Kind;
use crate::node::{Children, Node};
use crate::settings::RenderSettings;
use crate::value::{escape_html, is_truthy, value_text};
use markwright_i18n::{TranslateOptions, Translator};
use serde_json::Value;
use std::borrow::Cow;

/// Collaborators available while expanding.
pub(crate) struct ExpandContext<'a> {
	pub settings: &'a RenderSettings,
	pub translator: &'a dyn Translator,
	pub ids: &'a dyn IdSource,
}

impl ExpandContext<'_> {
	fn label_text(&self, key: &str, args: &[(&str, &str)]) -> String {
		self.translator.translate(
			key,
			args,
			&TranslateOptions::scoped(self.settings.label_scope.as_str()),
		)
	}

	fn id_of(&self, node: &Node) -> String {
		node.id_with(self.ids, &self.settings.id_prefix)
	}
}

/// Result of expanding a node.
pub(crate) struct Expanded<'n> {
	pub view: Cow<'n, Node>,
	/// The view is a transient wrapper around the real control.
	pub wrapped: bool,
}

impl<'n> Expanded<'n> {
	fn plain(view: Cow<'n, Node>) -> Self {
		Self {
			view,
			wrapped: false,
		}
	}
}

/// Expand-before-render strategy of one kind.
pub(crate) trait Expander: Sync {
	fn expand<'n>(
		&self,
		node: &'n Node,
		view: Cow<'n, Node>,
		cx: &ExpandContext<'_>,
	) -> Expanded<'n>;
}

struct Unchanged;
struct CheckboxExpander;
struct GroupExpander;
struct SelectExpander;
struct TextareaExpander;
struct PasswordExpander;
struct FileExpander;

fn expander_for(kind: Kind) -> &'static dyn Expander {
	match kind {
		Kind::Plain | Kind::Radio | Kind::Submit | Kind::Text | Kind::Hidden => &Unchanged,
		Kind::Checkbox => &CheckboxExpander,
		Kind::CheckboxGroup | Kind::RadioGroup => &GroupExpander,
		Kind::Select => &SelectExpander,
		Kind::Textarea => &TextareaExpander,
		Kind::Password => &PasswordExpander,
		Kind::File => &FileExpander,
	}
}

/// Derive the render view of `node`.
pub(crate) fn expand<'n>(node: &'n Node, cx: &ExpandContext<'_>) -> Expanded<'n> {
	let mut view = Cow::Borrowed(node);
	if let Some(input_type) = node.kind().input_type() {
		if node.get("type").and_then(Value::as_str) != Some(input_type) {
			view.to_mut().set("type", input_type);
		}
	}
	expander_for(node.kind()).expand(node, view, cx)
}

/// Whether expanding `node` wraps it around a control that takes its id.
pub(crate) fn wraps_control(node: &Node) -> bool {
	match node.kind() {
		Kind::Password => node.get(keys::VERIFY).is_some_and(is_truthy),
		Kind::File => {
			let has_value = node.get_text("value").is_some_and(|value| !value.is_empty());
			(node.get(keys::REMINDER).is_some_and(is_truthy) && has_value)
				|| node.get(keys::LIMIT).is_some_and(is_truthy)
		}
		_ => false,
	}
}

impl Expander for Unchanged {
	fn expand<'n>(
		&self,
		_node: &'n Node,
		view: Cow<'n, Node>,
		_cx: &ExpandContext<'_>,
	) -> Expanded<'n> {
		Expanded::plain(view)
	}
}

impl Expander for CheckboxExpander {
	fn expand<'n>(
		&self,
		node: &'n Node,
		mut view: Cow<'n, Node>,
		_cx: &ExpandContext<'_>,
	) -> Expanded<'n> {
		let defaulted = node.get(keys::DEFAULT).is_some_and(is_truthy);
		if defaulted && node.get("checked").is_none() {
			view.to_mut().set("checked", true);
		}
		Expanded::plain(view)
	}
}

impl Expander for GroupExpander {
	fn expand<'n>(
		&self,
		node: &'n Node,
		mut view: Cow<'n, Node>,
		_cx: &ExpandContext<'_>,
	) -> Expanded<'n> {
		let Some(member) = node.kind().member() else {
			return Expanded::plain(view);
		};
		let name = node.get_text("name").map(|name| match member {
			Kind::Checkbox if !name.ends_with("[]") => format!("{name}[]"),
			_ => name.into_owned(),
		});
		let value = node.get("value");
		let disabled = node.get(keys::OPTIONS_DISABLED);
		let group_disabled = node.get("disabled").is_some_and(is_truthy);

		let mut children = Children::new();
		for (key, label) in options(node) {
			let checked = match member {
				Kind::Radio => equals(value, &key),
				_ => contains(value, &key),
			};
			let mut input = Node::of_kind(member);
			if let Some(name) = &name {
				input.set("name", name.as_str());
			}
			input
				.set("value", key.as_str())
				.set("checked", checked)
				.set("disabled", group_disabled || contains(disabled, &key));
			if let Some(text) = value_text(&label) {
				input
					.set(keys::LABEL, text.into_owned())
					.set(keys::LABEL_POSITION, "after");
			}
			children.insert(key, input);
		}
		tracing::debug!(kind = %node.kind(), options = children.len(), "expanded option group");

		let view_mut = view.to_mut();
		view_mut.remove("value");
		view_mut.remove("name");
		view_mut.remove("disabled");
		*view_mut.children_mut() = children;
		view_mut.set_content(None);
		Expanded::plain(view)
	}
}

impl Expander for SelectExpander {
	fn expand<'n>(
		&self,
		node: &'n Node,
		mut view: Cow<'n, Node>,
		_cx: &ExpandContext<'_>,
	) -> Expanded<'n> {
		let value = node.get("value");
		let disabled = node.get(keys::OPTIONS_DISABLED);

		let mut children = Children::new();
		for (key, label) in options(node) {
			match label {
				Value::Object(nested) => {
					let mut group = Node::new("optgroup").attr("label", key.as_str());
					for (nested_key, nested_label) in nested {
						let option = option_node(&nested_key, &nested_label, value, disabled);
						group.insert_child(nested_key, option);
					}
					children.insert(key, group);
				}
				label => {
					let option = option_node(&key, &label, value, disabled);
					children.insert(key, option);
				}
			}
		}

		let view_mut = view.to_mut();
		view_mut.remove("value");
		*view_mut.children_mut() = children;
		Expanded::plain(view)
	}
}

fn option_node(key: &str, label: &Value, value: Option<&Value>, disabled: Option<&Value>) -> Node {
	let text = match value_text(label) {
		Some(text) if is_truthy(label) => escape_html(&text).into_owned(),
		_ => "&nbsp;".to_string(),
	};
	let mut option = Node::new("option");
	option
		.set("value", key)
		.set("selected", contains(value, key))
		.set("disabled", contains(disabled, key))
		.set_content(Some(text));
	option
}

impl Expander for TextareaExpander {
	fn expand<'n>(
		&self,
		node: &'n Node,
		mut view: Cow<'n, Node>,
		_cx: &ExpandContext<'_>,
	) -> Expanded<'n> {
		// Without a value, explicit content stays.
		let Some(text) = node.get_text("value") else {
			return Expanded::plain(view);
		};
		let text = escape_html(&text).into_owned();
		let view_mut = view.to_mut();
		view_mut.remove("value");
		view_mut.children_mut().clear();
		view_mut.set_content(Some(text));
		Expanded::plain(view)
	}
}

impl Expander for PasswordExpander {
	fn expand<'n>(
		&self,
		node: &'n Node,
		mut view: Cow<'n, Node>,
		cx: &ExpandContext<'_>,
	) -> Expanded<'n> {
		// Stored passwords are never echoed back.
		if node.get("value").is_some() {
			view.to_mut().remove("value");
		}

		let Some(verify) = node.get(keys::VERIFY).filter(|v| is_truthy(v)) else {
			return Expanded::plain(view);
		};

		let id = cx.id_of(node);
		let mut primary = view.into_owned();
		primary.set("id", id.as_str());
		primary.remove(keys::VERIFY);
		let mut wrapper = detach(&mut primary, "password-verify");

		let mut confirm = primary.clone();
		confirm.set("id", format!("{id}-confirm"));
		if let Some(name) = node.get_text("name") {
			confirm.set("name", format!("{name}-confirm"));
		}
		if let Value::String(label) = verify {
			confirm.set(keys::LABEL, label.as_str());
		}

		wrapper.insert_child("password", primary);
		wrapper.insert_child("confirm", confirm);
		Expanded {
			view: Cow::Owned(wrapper),
			wrapped: true,
		}
	}
}

impl Expander for FileExpander {
	fn expand<'n>(
		&self,
		node: &'n Node,
		mut view: Cow<'n, Node>,
		cx: &ExpandContext<'_>,
	) -> Expanded<'n> {
		let current = node
			.get_text("value")
			.filter(|value| !value.is_empty())
			.map(Cow::into_owned);
		if current.is_some() {
			view.to_mut().remove("value");
		}

		let reminder = node.get(keys::REMINDER).is_some_and(is_truthy) && current.is_some();
		let limit = node.get(keys::LIMIT).filter(|v| is_truthy(v)).map(|limit| {
			limit
				.as_u64()
				.or_else(|| limit.as_str().and_then(|text| text.trim().parse().ok()))
				.unwrap_or(cx.settings.upload_limit)
		});
		if !reminder && limit.is_none() {
			return Expanded::plain(view);
		}

		let id = cx.id_of(node);
		let mut input = view.into_owned();
		input.set("id", id.as_str());
		for key in [keys::REMINDER, keys::DOWNLOAD, keys::LIMIT] {
			input.remove(key);
		}
		let mut wrapper = detach(&mut input, "file-input");

		if let (true, Some(current)) = (reminder, current) {
			let mut field = Node::of_kind(Kind::Text);
			field
				.set("id", format!("{id}-current"))
				.set("value", current.as_str())
				.set("disabled", true)
				.add_class("file-reminder");

			let href = node
				.get_text(keys::DOWNLOAD)
				.map(Cow::into_owned)
				.unwrap_or(current);
			let mut link = Node::new("a");
			link.set("href", href)
				.set("download", true)
				.add_class("file-download")
				.set_content(Some(escape_html(&cx.label_text("Download", &[])).into_owned()));

			wrapper.insert_child("current", field);
			wrapper.insert_child("download", link);
		}

		wrapper.insert_child("input", input);

		if let Some(bytes) = limit {
			let size = human_size(bytes);
			let text = cx.label_text("Maximum upload size: %(size)s", &[("size", &size)]);
			let mut note = Node::new("small");
			note.add_class("file-limit")
				.set_content(Some(escape_html(&text).into_owned()));
			wrapper.insert_child("limit", note);
		}

		Expanded {
			view: Cow::Owned(wrapper),
			wrapped: true,
		}
	}
}

/// Move decoration and placement pseudo-attributes off `control` onto a new
/// `span` wrapper.
fn detach(control: &mut Node, class: &str) -> Node {
	let mut wrapper = Node::new("span");
	wrapper.add_class(class);
	for key in keys::DECORATION {
		if let Some(value) = control.remove(key) {
			wrapper.set(key, value);
		}
	}
	control.remove(keys::WEIGHT);
	control.remove(keys::GROUP);
	wrapper
}

/// Ordered `(key, label)` pairs from `#options`.
///
/// Objects map keys to labels; arrays use each entry as key and label.
fn options(node: &Node) -> Vec<(String, Value)> {
	match node.get(keys::OPTIONS) {
		Some(Value::Object(entries)) => entries
			.iter()
			.map(|(key, label)| (key.clone(), label.clone()))
			.collect(),
		Some(Value::Array(items)) => items
			.iter()
			.filter_map(|item| value_text(item).map(|key| (key.into_owned(), item.clone())))
			.collect(),
		_ => Vec::new(),
	}
}

/// String equality against a single value.
fn equals(value: Option<&Value>, key: &str) -> bool {
	value.and_then(value_text).as_deref() == Some(key)
}

/// Membership of `key` in a value set: array entries, object keys or a
/// single value compared as text.
fn contains(value: Option<&Value>, key: &str) -> bool {
	match value {
		None | Some(Value::Null) => false,
		Some(Value::Array(items)) => items
			.iter()
			.any(|item| value_text(item).as_deref() == Some(key)),
		Some(Value::Object(entries)) => entries.contains_key(key),
		Some(single) => equals(Some(single), key),
	}
}

/// Human readable byte size with 1024-based units.
///
/// # Examples
///
/// ```
/// use markwright_element::human_size;
///
/// assert_eq!(human_size(2 * 1024 * 1024), "2 MB");
/// assert_eq!(human_size(1536), "1.5 KB");
/// assert_eq!(human_size(512), "512 B");
/// ```
pub fn human_size(bytes: u64) -> String {
	const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
	let tenths = |size: f64| (size * 10.0).round() / 10.0;
	let mut size = bytes as f64;
	let mut unit = 0;
	// Compare the rounded figure so 1023.99 KB reads as 1 MB.
	while tenths(size) >= 1024.0 && unit < UNITS.len() - 1 {
		size /= 1024.0;
		unit += 1;
	}
	let size = tenths(size);
	if size.fract() == 0.0 {
		format!("{} {}", size as u64, UNITS[unit])
	} else {
		format!("{:.1} {}", size, UNITS[unit])
	}
}
