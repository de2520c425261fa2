//! Post-render decoration
//!
//! Rendered markup is wrapped, in this order, with the node's label, inline
//! help, description and legend. Each step only looks at its own
//! pseudo-attribute, so any combination may be present.

use crate::attributes::keys;
use crate::node::Node;
use crate::settings::{LabelPosition, RenderSettings};
use crate::value::{escape_html, is_truthy};
use markwright_i18n::{TranslateOptions, Translator};

pub(crate) struct Decorator<'a> {
	pub settings: &'a RenderSettings,
	pub translator: &'a dyn Translator,
	/// Ambient scope for texts without the scope sentinel.
	pub scope: Option<&'a str>,
}

impl Decorator<'_> {
	/// Resolve a decoration text through the translator, escaped.
	///
	/// A leading scope sentinel selects the label scope; anything else is
	/// looked up in the ambient scope.
	pub fn text(&self, raw: &str) -> String {
		let translated = match raw.strip_prefix(self.settings.scope_sentinel) {
			Some(key) => self.translator.translate(
				key,
				&[],
				&TranslateOptions::scoped(self.settings.label_scope.as_str()),
			),
			None => {
				let options = TranslateOptions {
					scope: self.scope.map(str::to_owned),
				};
				self.translator.translate(raw, &[], &options)
			}
		};
		escape_html(&translated).into_owned()
	}

	fn slot(&self, node: &Node, key: &str) -> Option<String> {
		node.get_text(key)
			.filter(|text| !text.is_empty())
			.map(|text| self.text(&text))
	}

	/// Wrap `markup` with every decoration `node` declares.
	///
	/// `label_for` is the id an `above` label points at.
	pub fn decorate(&self, node: &Node, markup: String, label_for: Option<&str>) -> String {
		let mut out = markup;

		if let Some(label) = self.slot(node, keys::LABEL) {
			let class = if node.get(keys::REQUIRED).is_some_and(is_truthy) {
				r#" class="required""#
			} else {
				""
			};
			out = match label_position(node, self.settings) {
				LabelPosition::Above => {
					let target = label_for
						.map(|id| format!(r#" for="{}""#, escape_html(id)))
						.unwrap_or_default();
					format!("<label{target}{class}>{label}</label>{out}")
				}
				LabelPosition::Before => format!("<label{class}>{label} {out}</label>"),
				LabelPosition::After => format!("<label{class}>{out} {label}</label>"),
			};
		}

		if let Some(help) = self.slot(node, keys::HELP) {
			out.push_str(r#"<span class="help-inline">"#);
			out.push_str(&help);
			out.push_str("</span>");
		}

		if let Some(description) = self.slot(node, keys::DESCRIPTION) {
			out.push_str(r#"<div class="description">"#);
			out.push_str(&description);
			out.push_str("</div>");
		}

		if let Some(legend) = self.slot(node, keys::LEGEND) {
			out = format!("<fieldset><legend>{legend}</legend>{out}</fieldset>");
		}

		out
	}
}

/// Effective label layout of a node.
pub(crate) fn label_position(node: &Node, settings: &RenderSettings) -> LabelPosition {
	node.get_text(keys::LABEL_POSITION)
		.and_then(|position| LabelPosition::parse(&position))
		.unwrap_or(settings.default_label_position)
}

/// Whether decorating `node` needs an id for a `for=` target.
pub(crate) fn needs_label_target(node: &Node, settings: &RenderSettings) -> bool {
	node.get_text(keys::LABEL).is_some_and(|label| !label.is_empty())
		&& label_position(node, settings) == LabelPosition::Above
}

#[cfg(test)]
mod tests {
	use super::*;
	use markwright_i18n::{MessageCatalog, PassThrough};
	use rstest::rstest;

	fn decorate(node: &Node, markup: &str) -> String {
		let settings = RenderSettings::default();
		let decorator = Decorator {
			settings: &settings,
			translator: &PassThrough,
			scope: None,
		};
		decorator.decorate(node, markup.to_string(), Some("mw-1"))
	}

	#[rstest]
	#[case("above", r#"<label for="mw-1">Name</label><input />"#)]
	#[case("before", "<label>Name <input /></label>")]
	#[case("after", "<label><input /> Name</label>")]
	#[case("sideways", "<label><input /> Name</label>")]
	fn test_label_layouts(#[case] position: &str, #[case] expected: &str) {
		let node = Node::new("input")
			.attr("#label", "Name")
			.attr("#label-position", position);
		assert_eq!(decorate(&node, "<input />"), expected);
	}

	#[rstest]
	fn test_required_marks_label_only() {
		let node = Node::new("input")
			.attr("#label", "Name")
			.attr("#required", true);
		assert_eq!(
			decorate(&node, "<input />"),
			r#"<label class="required"><input /> Name</label>"#
		);
	}

	#[rstest]
	fn test_fixed_order() {
		let node = Node::new("input")
			.attr("#legend", "Account")
			.attr("#description", "Long text")
			.attr("#help", "Short")
			.attr("#label", "Name");
		assert_eq!(
			decorate(&node, "<input />"),
			concat!(
				"<fieldset><legend>Account</legend>",
				"<label><input /> Name</label>",
				r#"<span class="help-inline">Short</span>"#,
				r#"<div class="description">Long text</div>"#,
				"</fieldset>",
			)
		);
	}

	#[rstest]
	fn test_texts_are_escaped() {
		let node = Node::new("input").attr("#help", "a < b");
		assert_eq!(
			decorate(&node, ""),
			r#"<span class="help-inline">a &lt; b</span>"#
		);
	}

	#[rstest]
	fn test_sentinel_selects_label_scope() {
		let mut catalog = MessageCatalog::new("fr");
		catalog.add("Name", "Nom ambiant");
		catalog.add_scoped("element.label", "Name", "Nom");
		let settings = RenderSettings::default();
		let decorator = Decorator {
			settings: &settings,
			translator: &catalog,
			scope: Some("profile"),
		};

		assert_eq!(decorator.text("~Name"), "Nom");
		assert_eq!(decorator.text("Name"), "Nom ambiant");
	}

	#[rstest]
	fn test_undecorated_markup_is_untouched() {
		assert_eq!(decorate(&Node::new("p"), "<p>x</p>"), "<p>x</p>");
	}
}
