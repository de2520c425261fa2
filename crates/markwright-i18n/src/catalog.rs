//! Message catalog keyed by scope

use crate::translator::{TranslateOptions, Translator, interpolate};
use std::collections::HashMap;

/// A message catalog containing translations for a specific locale
///
/// Scoped entries are consulted first; a miss falls back to the unscoped
/// table and finally to the key itself.
///
/// # Example
/// ```
/// use markwright_i18n::{MessageCatalog, TranslateOptions, Translator};
///
/// let mut catalog = MessageCatalog::new("de");
/// catalog.add("Save", "Speichern");
/// catalog.add_scoped("validation", "This value is not valid.", "Dieser Wert ist ungültig.");
///
/// assert_eq!(catalog.get("Save"), Some(&"Speichern".to_string()));
/// assert_eq!(
/// 	catalog.translate("Save", &[], &TranslateOptions::scoped("element.label")),
/// 	"Speichern"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
	locale: String,
	messages: HashMap<String, String>,
	scoped: HashMap<(String, String), String>,
}

impl MessageCatalog {
	/// Create a new message catalog for the given locale
	pub fn new(locale: &str) -> Self {
		Self {
			locale: locale.to_string(),
			messages: HashMap::new(),
			scoped: HashMap::new(),
		}
	}

	/// Get the locale for this catalog
	pub fn locale(&self) -> &str {
		&self.locale
	}

	/// Add an unscoped translation
	pub fn add(&mut self, message: impl Into<String>, translation: impl Into<String>) {
		self.messages.insert(message.into(), translation.into());
	}

	/// Add a translation that only applies within `scope`
	pub fn add_scoped(
		&mut self,
		scope: impl Into<String>,
		message: impl Into<String>,
		translation: impl Into<String>,
	) {
		self.scoped
			.insert((scope.into(), message.into()), translation.into());
	}

	/// Get an unscoped translation
	pub fn get(&self, message: &str) -> Option<&String> {
		self.messages.get(message)
	}

	/// Get a scoped translation
	pub fn get_scoped(&self, scope: &str, message: &str) -> Option<&String> {
		self.scoped.get(&(scope.to_string(), message.to_string()))
	}

	/// Number of entries across all scopes
	pub fn len(&self) -> usize {
		self.messages.len() + self.scoped.len()
	}

	/// Whether the catalog has no entries
	pub fn is_empty(&self) -> bool {
		self.messages.is_empty() && self.scoped.is_empty()
	}
}

impl Translator for MessageCatalog {
	fn translate(&self, key: &str, args: &[(&str, &str)], options: &TranslateOptions) -> String {
		let found = options
			.scope
			.as_deref()
			.and_then(|scope| self.get_scoped(scope, key))
			.or_else(|| self.get(key));
		match found {
			Some(message) => interpolate(message, args),
			None => {
				tracing::trace!(locale = %self.locale, key, "no translation found");
				interpolate(key, args)
			}
		}
	}
}
