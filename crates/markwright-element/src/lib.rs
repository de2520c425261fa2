//! Markwright Element - markup tree and rendering engine
//!
//! A [`Node`] models one markup element: tag, attributes, composed class
//! list, dataset, children and inner content. A [`Renderer`] serializes it.
//!
//! ## Features
//!
//! - **Attribute precedence**: explicit `class` values keep their place while
//!   programmatically added classes survive re-assignment
//! - **Dataset mirroring**: `data-*` attributes and the dataset are one store
//! - **Weighted ordering**: numeric weights plus `top`, `bottom`,
//!   `before:<name>` and `after:<name>` placements
//! - **Form-control kinds**: groups, selects, textareas, file and password
//!   inputs expand into their full markup at render time
//! - **Decoration**: label, inline help, description and legend wrapping
//!
//! ## Architecture
//!
//! - [`node`]: the element tree and attribute assignment
//! - [`ordering`]: weighted child ordering
//! - [`render`]: serialization, with the expansion and decoration steps
//! - [`assets`]: per-class asset registration
//! - [`ids`]: auto-id sources
//! - [`settings`]: renderer configuration
//!
//! ## Example
//!
//! ```
//! use markwright_element::{Kind, Node, Renderer};
//! use serde_json::json;
//!
//! let size = Node::of_kind(Kind::RadioGroup)
//! 	.attr("name", "size")
//! 	.attr("value", "m")
//! 	.attr("#options", json!({"s": "Small", "m": "Medium"}));
//!
//! let html = Renderer::new().render(&size).unwrap();
//! assert_eq!(
//! 	html,
//! 	concat!(
//! 		r#"<div class="radio-group">"#,
//! 		r#"<label><input type="radio" name="size" value="s" /> Small</label>"#,
//! 		r#"<label><input type="radio" name="size" value="m" checked="checked" /> Medium</label>"#,
//! 		"</div>",
//! 	)
//! );
//! ```

pub mod assets;
pub mod attributes;
pub mod classes;
pub mod dataset;
mod decorate;
pub mod error;
mod expand;
pub mod ids;
pub mod kind;
pub mod node;
pub mod ordering;
pub mod render;
pub mod settings;
pub mod validation;
pub mod value;

pub use assets::{Asset, AssetKind, AssetRegistry, AssetSink};
pub use attributes::{AttributeStore, PSEUDO_PREFIX, is_pseudo, keys};
pub use classes::ClassSet;
pub use dataset::Dataset;
pub use error::{ContentError, ElementError, ElementResult};
pub use expand::human_size;
pub use ids::{IdSource, LocalIds, ProcessIds};
pub use kind::Kind;
pub use node::{Assignment, Child, ChildEntry, Children, ContentSource, DEFAULT_GROUP, Node};
pub use ordering::{Weight, order_by_weight, order_children};
pub use render::{RenderOutcome, Renderer};
pub use settings::{LabelPosition, RenderSettings};
pub use validation::{AlwaysValid, Validator, selected_count};
pub use value::{escape_html, is_truthy, value_text};

pub use markwright_i18n::{MessageCatalog, PassThrough, TranslateOptions, Translator};
