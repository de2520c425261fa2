//! # Markwright
//!
//! Markup element trees rendered to HTML strings.
//!
//! Build a tree of [`Node`]s, attach attributes, classes, dataset entries and
//! children, then hand it to a [`Renderer`]. Rendering never mutates the
//! tree: kind-specific expansion (option groups, selects, textareas, file and
//! password inputs) happens on a transient view.
//!
//! ## Feature Flags
//!
//! - `forms` - grouped form rendering and validation ([`forms`])
//! - `i18n` - the translation catalog crate ([`i18n`])
//! - `full` (default) - everything above
//!
//! The element engine itself is always available.
//!
//! ## Quick Example
//!
//! ```
//! use markwright::prelude::*;
//! use serde_json::json;
//!
//! let mut field = Node::of_kind(Kind::Select)
//! 	.attr("name", "lang")
//! 	.attr("value", "en")
//! 	.attr("#options", json!({"en": "English", "fr": "Français"}))
//! 	.attr("#help", "Used for emails");
//! field.add_class("wide");
//!
//! let html = Renderer::new().render(&field).unwrap();
//! assert_eq!(
//! 	html,
//! 	concat!(
//! 		r#"<select class="wide" name="lang">"#,
//! 		r#"<option value="en" selected="selected">English</option>"#,
//! 		r#"<option value="fr">Français</option>"#,
//! 		"</select>",
//! 		r#"<span class="help-inline">Used for emails</span>"#,
//! 	)
//! );
//! ```

pub mod element;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "i18n")]
pub mod i18n;

pub use markwright_element::{
	Child, Children, ContentError, ElementError, ElementResult, Kind, Node, RenderOutcome,
	RenderSettings, Renderer,
};

#[cfg(feature = "forms")]
pub use markwright_forms::{Form, FormError, FormResult};

/// Commonly used types.
pub mod prelude {
	pub use markwright_element::{
		Child, Children, ContentError, Kind, LabelPosition, Node, RenderOutcome, RenderSettings,
		Renderer, Translator, Weight,
	};

	#[cfg(feature = "forms")]
	pub use markwright_forms::{Form, GroupDefinition};
}
