//! Markup serialization
//!
//! [`Renderer`] turns a [`Node`] into a markup string:
//!
//! 1. register the node's assets (once per rendering class)
//! 2. expand kind-specific state into a transient view
//! 3. render ordered children, or the content source, or the inner content
//! 4. write the opening tag with classes, attributes and dataset
//! 5. close the tag (or self-close) and decorate the result
//!
//! Content sources may suppress a node entirely with [`ContentError::Empty`];
//! any other failure is rendered inline as the node's content.

use crate::assets::AssetRegistry;
use crate::decorate::{Decorator, needs_label_target};
use crate::error::{ContentError, ElementError, ElementResult};
use crate::expand::{ExpandContext, Expanded, expand, wraps_control};
use crate::ids::{IdSource, ProcessIds};
use crate::node::{Child, Node};
use crate::ordering::order_children;
use crate::settings::RenderSettings;
use crate::value::{escape_html, push_attribute, push_data_attribute};
use markwright_i18n::{PassThrough, Translator};
use serde_json::Value;
use std::sync::Arc;

/// Tags that may carry a `value` attribute.
const VALUE_TAGS: &[&str] = &["input", "button", "option", "textarea"];

/// Tags that may carry `name` and `disabled`.
const FORM_CONTROL_TAGS: &[&str] = &[
	"button", "fieldset", "form", "input", "keygen", "object", "optgroup", "option", "output",
	"select", "textarea",
];

/// Result of rendering one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
	Rendered(String),
	/// The node's content source asked for nothing to be rendered.
	Suppressed,
}

impl RenderOutcome {
	/// The rendered markup; suppressed nodes yield the empty string.
	pub fn into_string(self) -> String {
		match self {
			RenderOutcome::Rendered(markup) => markup,
			RenderOutcome::Suppressed => String::new(),
		}
	}

	pub fn is_suppressed(&self) -> bool {
		matches!(self, RenderOutcome::Suppressed)
	}
}

/// Inner part of an element.
enum Inner {
	Markup(String),
	SelfClosing,
	Suppressed,
}

/// Renders nodes with a fixed set of collaborators.
///
/// # Examples
///
/// ```
/// use markwright_element::{Kind, LocalIds, Node, Renderer};
/// use std::sync::Arc;
///
/// let renderer = Renderer::new().with_ids(Arc::new(LocalIds::new()));
/// let field = Node::of_kind(Kind::Text)
/// 	.attr("name", "email")
/// 	.attr("#label", "Email")
/// 	.attr("#label-position", "above");
///
/// assert_eq!(
/// 	renderer.render(&field).unwrap(),
/// 	r#"<label for="mw-1">Email</label><input type="text" name="email" id="mw-1" />"#
/// );
/// ```
#[derive(Clone)]
pub struct Renderer {
	translator: Arc<dyn Translator>,
	ids: Arc<dyn IdSource>,
	assets: Option<Arc<AssetRegistry>>,
	settings: RenderSettings,
	scope: Option<String>,
}

impl Renderer {
	/// A renderer with the pass-through translator, process-wide ids, no
	/// asset registry and default settings.
	pub fn new() -> Self {
		Self {
			translator: Arc::new(PassThrough),
			ids: Arc::new(ProcessIds),
			assets: None,
			settings: RenderSettings::default(),
			scope: None,
		}
	}

	pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
		self.translator = translator;
		self
	}

	pub fn with_ids(mut self, ids: Arc<dyn IdSource>) -> Self {
		self.ids = ids;
		self
	}

	pub fn with_assets(mut self, assets: Arc<AssetRegistry>) -> Self {
		self.assets = Some(assets);
		self
	}

	pub fn with_settings(mut self, settings: RenderSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Ambient translation scope for decoration texts.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());
		self
	}

	pub fn settings(&self) -> &RenderSettings {
		&self.settings
	}

	pub fn translator(&self) -> &dyn Translator {
		self.translator.as_ref()
	}

	pub fn ids(&self) -> &dyn IdSource {
		self.ids.as_ref()
	}

	/// Render a node, mapping suppression to the empty string.
	pub fn render(&self, node: &Node) -> ElementResult<String> {
		self.render_node(node).map(RenderOutcome::into_string)
	}

	/// Render a node.
	///
	/// Fails only on configuration errors: an unresolvable relative weight or
	/// a tree deeper than [`RenderSettings::max_depth`].
	pub fn render_node(&self, node: &Node) -> ElementResult<RenderOutcome> {
		self.render_at(node, 0)
	}

	/// Draw every generated id `node` and its descendants will need.
	///
	/// Copies made afterwards carry the ids along, so rendering a copy gives
	/// the same markup as rendering `node`. Nodes without a label target or a
	/// wrapped control are left alone.
	///
	/// # Examples
	///
	/// ```
	/// use markwright_element::{LocalIds, Node, Renderer};
	/// use std::sync::Arc;
	///
	/// let renderer = Renderer::new().with_ids(Arc::new(LocalIds::new()));
	/// let field = Node::new("input")
	/// 	.attr("#label", "Name")
	/// 	.attr("#label-position", "above");
	/// renderer.reserve_ids(&field).unwrap();
	///
	/// let copy = field.clone();
	/// assert_eq!(renderer.render(&copy).unwrap(), renderer.render(&field).unwrap());
	/// ```
	pub fn reserve_ids(&self, node: &Node) -> ElementResult<()> {
		self.reserve_ids_at(node, 0)
	}

	fn reserve_ids_at(&self, node: &Node, depth: usize) -> ElementResult<()> {
		if depth > self.settings.max_depth {
			return Err(ElementError::DepthExceeded {
				limit: self.settings.max_depth,
			});
		}
		if needs_label_target(node, &self.settings) || wraps_control(node) {
			node.id_with(self.ids.as_ref(), &self.settings.id_prefix);
		}
		for entry in order_children(node.children())? {
			if let Child::Node(child) = &entry.child {
				self.reserve_ids_at(child, depth + 1)?;
			}
		}
		Ok(())
	}

	fn render_at(&self, node: &Node, depth: usize) -> ElementResult<RenderOutcome> {
		if depth > self.settings.max_depth {
			return Err(ElementError::DepthExceeded {
				limit: self.settings.max_depth,
			});
		}

		if let Some(assets) = &self.assets {
			assets.register(node.render_class());
		}

		let label_for = needs_label_target(node, &self.settings)
			.then(|| node.id_with(self.ids.as_ref(), &self.settings.id_prefix));

		let cx = ExpandContext {
			settings: &self.settings,
			translator: self.translator.as_ref(),
			ids: self.ids.as_ref(),
		};
		let Expanded { mut view, wrapped } = expand(node, &cx);
		if let (Some(id), false) = (&label_for, wrapped) {
			if view.explicit_id().is_none() {
				view.to_mut().set("id", id.as_str());
			}
		}

		let inner = match self.inner(&view, depth)? {
			Inner::Suppressed => return Ok(RenderOutcome::Suppressed),
			inner => inner,
		};

		let mut markup = self.open_tag(&view);
		match inner {
			Inner::Markup(content) => {
				markup.push('>');
				markup.push_str(&content);
				markup.push_str("</");
				markup.push_str(view.tag());
				markup.push('>');
			}
			Inner::SelfClosing | Inner::Suppressed => markup.push_str(" />"),
		}

		let decorator = Decorator {
			settings: &self.settings,
			translator: self.translator.as_ref(),
			scope: self.scope.as_deref(),
		};
		Ok(RenderOutcome::Rendered(decorator.decorate(
			&view,
			markup,
			label_for.as_deref(),
		)))
	}

	fn inner(&self, view: &Node, depth: usize) -> ElementResult<Inner> {
		if !view.children().is_empty() {
			let mut markup = String::new();
			for entry in order_children(view.children())? {
				match &entry.child {
					Child::Raw(raw) => markup.push_str(raw),
					Child::Node(child) => {
						if let RenderOutcome::Rendered(rendered) = self.render_at(child, depth + 1)? {
							markup.push_str(&rendered);
						}
					}
				}
			}
			return Ok(Inner::Markup(markup));
		}

		if let Some(source) = view.content_source() {
			return Ok(match source(view) {
				Ok(content) => Inner::Markup(content),
				Err(ContentError::Empty) => Inner::Suppressed,
				Err(ContentError::Failed(message)) => {
					tracing::warn!(tag = view.tag(), %message, "content failed, rendering the failure inline");
					Inner::Markup(escape_html(&message).into_owned())
				}
			});
		}

		Ok(match view.content() {
			Some(content) => Inner::Markup(content.to_string()),
			None => Inner::SelfClosing,
		})
	}

	fn open_tag(&self, view: &Node) -> String {
		let tag = view.tag();
		let mut out = String::with_capacity(64);
		out.push('<');
		out.push_str(tag);

		if !view.classes().is_empty() {
			push_attribute(&mut out, "class", &Value::String(view.classes().to_string()));
		}

		let form_control = FORM_CONTROL_TAGS.contains(&tag);
		for (name, value) in view.attributes().real() {
			let allowed = match name {
				"class" => false,
				"value" => VALUE_TAGS.contains(&tag),
				"name" | "disabled" => form_control,
				_ => true,
			};
			if allowed {
				push_attribute(&mut out, name, value);
			}
		}

		for (key, value) in view.dataset().iter() {
			push_data_attribute(&mut out, key, value);
		}
		out
	}
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Renderer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Renderer")
			.field("settings", &self.settings)
			.field("scope", &self.scope)
			.field("assets", &self.assets)
			.finish()
	}
}
