//! Renderer settings

use crate::error::{ElementError, ElementResult};
use serde::Deserialize;

/// Layout of a label relative to the decorated markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
	/// Label element first, markup after it, both unwrapped.
	Above,
	/// Label text, then the markup, inside one label element.
	Before,
	/// Markup, then the label text, inside one label element.
	#[default]
	After,
}

impl LabelPosition {
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"above" => Some(Self::Above),
			"before" => Some(Self::Before),
			"after" => Some(Self::After),
			_ => None,
		}
	}
}

/// Settings shared by every render call of a [`Renderer`](crate::Renderer).
///
/// # Examples
///
/// ```
/// use markwright_element::{LabelPosition, RenderSettings};
///
/// let settings = RenderSettings::from_toml_str(r#"
/// upload_limit = 1048576
/// default_label_position = "above"
/// "#).unwrap();
///
/// assert_eq!(settings.upload_limit, 1_048_576);
/// assert_eq!(settings.default_label_position, LabelPosition::Above);
/// assert_eq!(settings.label_scope, "element.label");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
	/// Upload limit in bytes used by file inputs with `#limit = true`.
	pub upload_limit: u64,
	/// Scope used for texts that start with the scope sentinel.
	pub label_scope: String,
	/// Scope used for validation messages.
	pub validation_scope: String,
	/// Leading character that selects `label_scope`.
	pub scope_sentinel: char,
	/// Prefix of generated ids.
	pub id_prefix: String,
	pub default_label_position: LabelPosition,
	/// Maximum nesting depth accepted by the renderer.
	pub max_depth: usize,
}

impl Default for RenderSettings {
	fn default() -> Self {
		Self {
			upload_limit: 2 * 1024 * 1024,
			label_scope: "element.label".to_string(),
			validation_scope: "validation".to_string(),
			scope_sentinel: '~',
			id_prefix: "mw-".to_string(),
			default_label_position: LabelPosition::After,
			max_depth: 64,
		}
	}
}

impl RenderSettings {
	/// Parse settings from TOML; missing keys keep their defaults.
	pub fn from_toml_str(source: &str) -> ElementResult<Self> {
		toml::from_str(source).map_err(|e| ElementError::InvalidSettings(e.to_string()))
	}
}
