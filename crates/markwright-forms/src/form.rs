//! Forms rendered in groups

use crate::dispatch::dispatch;
use crate::error::FormResult;
use crate::group::GroupDefinition;
use indexmap::IndexMap;
use markwright_element::{
	DEFAULT_GROUP, Kind, Node, RenderSettings, Renderer, TranslateOptions, Translator, is_truthy,
	keys, order_children,
};
use serde_json::{Map, Value};

/// Message used when a field declares no `#error` of its own.
pub const DEFAULT_ERROR: &str = "This value is not valid.";

/// Message used when a password and its confirmation differ.
pub const PASSWORD_MISMATCH: &str = "The passwords do not match.";

/// A `form` element whose fields are rendered in groups.
///
/// # Examples
///
/// ```
/// use markwright_element::{Kind, LocalIds, Node, Renderer};
/// use markwright_forms::Form;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let mut form = Form::new();
/// form.node_mut().set("action", "/signup");
/// form.add_group("extra", json!({"title": "Extra"}));
/// form.add_field("email", Node::of_kind(Kind::Text).attr("name", "email"));
/// form.add_field("bio", Node::new("textarea").attr("name", "bio").attr("#group", "extra"));
///
/// let renderer = Renderer::new().with_ids(Arc::new(LocalIds::new()));
/// assert_eq!(
/// 	form.render(&renderer).unwrap(),
/// 	concat!(
/// 		r#"<form action="/signup">"#,
/// 		r#"<div class="group--primary"><input type="text" name="email" /></div>"#,
/// 		r#"<fieldset><legend>Extra</legend>"#,
/// 		r#"<div class="group--extra"><textarea name="bio"></textarea></div>"#,
/// 		"</fieldset></form>",
/// 	)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Form {
	node: Node,
	groups: IndexMap<String, GroupDefinition>,
}

impl Form {
	/// An empty `form` with only the `primary` group.
	pub fn new() -> Self {
		Self::with_node(Node::new("form"))
	}

	/// Use `node` as the form element; its children become the fields.
	pub fn with_node(node: Node) -> Self {
		let mut groups = IndexMap::new();
		groups.insert(DEFAULT_GROUP.to_string(), GroupDefinition::default());
		Self { node, groups }
	}

	pub fn node(&self) -> &Node {
		&self.node
	}

	pub fn node_mut(&mut self) -> &mut Node {
		&mut self.node
	}

	/// Add or replace a field.
	pub fn add_field(&mut self, name: impl Into<String>, field: Node) -> &mut Self {
		self.node.insert_child(name, field);
		self
	}

	pub fn field(&self, name: &str) -> Option<&Node> {
		self.node.children().get(name).and_then(|child| child.as_node())
	}

	/// Define or redefine a group.
	pub fn add_group(
		&mut self,
		id: impl Into<String>,
		definition: impl Into<GroupDefinition>,
	) -> &mut Self {
		self.groups.insert(id.into(), definition.into());
		self
	}

	pub fn groups(&self) -> &IndexMap<String, GroupDefinition> {
		&self.groups
	}

	/// Group containers filled with the form's fields, in group order.
	pub fn dispatch(&self) -> FormResult<Vec<(String, Node)>> {
		dispatch(self.node.children(), &self.groups)
	}

	/// Render the groups inside the form element.
	///
	/// Groups without fields render as nothing. Generated ids are pinned on
	/// the form's own fields first, so rendering twice gives the same markup.
	pub fn render(&self, renderer: &Renderer) -> FormResult<String> {
		renderer.reserve_ids(&self.node)?;
		let mut content = String::new();
		for (_, container) in self.dispatch()? {
			if container.children().is_empty() {
				continue;
			}
			content.push_str(&renderer.render(&container)?);
		}

		let mut form = self.node.clone();
		form.children_mut().clear();
		form.set_content(Some(content));
		Ok(renderer.render(&form)?)
	}

	/// Validate submitted data against every field.
	///
	/// Returns the failed fields in render order, mapped to their message
	/// translated in the validation scope. Fields are looked up in `data` by
	/// their `name` attribute (without a trailing `[]`), or by their child
	/// name when they have none.
	pub fn validate(
		&self,
		data: &Map<String, Value>,
		translator: &dyn Translator,
		settings: &RenderSettings,
	) -> FormResult<IndexMap<String, String>> {
		let options = TranslateOptions::scoped(settings.validation_scope.as_str());
		let mut errors = IndexMap::new();

		for entry in order_children(self.node.children())? {
			let Some(field) = entry.child.as_node() else {
				continue;
			};
			let Some(name) = field_name(field, entry.name.as_deref()) else {
				continue;
			};
			let value = data.get(&name).unwrap_or(&Value::Null);

			let message = if !field.validate(value) {
				let key = field
					.get_text(keys::ERROR)
					.filter(|key| !key.is_empty())
					.unwrap_or(DEFAULT_ERROR.into());
				Some(translator.translate(&key, &[], &options))
			} else if is_unconfirmed_password(field, &name, value, data) {
				Some(translator.translate(PASSWORD_MISMATCH, &[], &options))
			} else {
				None
			};

			if let Some(message) = message {
				tracing::debug!(field = %name, %message, "field failed validation");
				errors.insert(name, message);
			}
		}
		Ok(errors)
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}

fn field_name(field: &Node, child_name: Option<&str>) -> Option<String> {
	match field.get_text("name") {
		Some(name) => Some(name.trim_end_matches("[]").to_string()),
		None => child_name.map(str::to_owned),
	}
}

fn is_unconfirmed_password(
	field: &Node,
	name: &str,
	value: &Value,
	data: &Map<String, Value>,
) -> bool {
	if field.kind() != Kind::Password || !field.get(keys::VERIFY).is_some_and(is_truthy) {
		return false;
	}
	let confirmation = data
		.get(&format!("{name}-confirm"))
		.unwrap_or(&Value::Null);
	value != confirmation
}
