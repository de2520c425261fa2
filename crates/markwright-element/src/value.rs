//! Helpers for attribute values.
//!
//! Attribute and dataset values are plain [`serde_json::Value`]s. This module
//! holds the conversions the engine applies when comparing or serializing
//! them.

use serde_json::Value;
use std::borrow::Cow;

/// Escapes HTML special characters in a string.
///
/// This function replaces the following characters:
/// - `&` → `&amp;`
/// - `<` → `&lt;`
/// - `>` → `&gt;`
/// - `"` → `&quot;`
/// - `'` → `&#x27;`
///
/// Returns a borrowed reference if no escaping is needed,
/// or an owned string if any characters were escaped.
pub fn escape_html(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// Whether a value counts as set for flag-style pseudo-attributes.
///
/// `null`, `false`, `0`, `""`, `"0"` and empty collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !s.is_empty() && s != "0",
		Value::Array(a) => !a.is_empty(),
		Value::Object(o) => !o.is_empty(),
	}
}

/// Text form of a value used for equality tests against option keys.
///
/// Returns `None` for `null`.
pub fn value_text(value: &Value) -> Option<Cow<'_, str>> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(Cow::Borrowed(s.as_str())),
		Value::Bool(true) => Some(Cow::Borrowed("1")),
		Value::Bool(false) => Some(Cow::Borrowed("")),
		Value::Number(n) => Some(Cow::Owned(n.to_string())),
		other => Some(Cow::Owned(other.to_string())),
	}
}

/// Append ` name="value"` for an attribute, or nothing when suppressed.
///
/// `true` serializes as `name="name"`, numbers are written as-is and every
/// other value is escaped (collections after JSON encoding).
pub(crate) fn push_attribute(out: &mut String, name: &str, value: &Value) {
	let text: Cow<'_, str> = match value {
		Value::Null | Value::Bool(false) => return,
		Value::Bool(true) => escape_html(name),
		Value::Number(n) => Cow::Owned(n.to_string()),
		Value::String(s) => escape_html(s),
		collection => Cow::Owned(escape_html(&collection.to_string()).into_owned()),
	};
	out.push(' ');
	out.push_str(name);
	out.push_str("=\"");
	out.push_str(&text);
	out.push('"');
}

/// Like [`push_attribute`] but for dataset entries, where booleans keep their
/// literal `true`/`false` text for client-side readers.
pub(crate) fn push_data_attribute(out: &mut String, key: &str, value: &Value) {
	let name = format!("data-{key}");
	match value {
		Value::Null => {}
		Value::Bool(b) => push_attribute(out, &name, &Value::String(b.to_string())),
		other => push_attribute(out, &name, other),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_escape_html_no_special_chars() {
		assert_eq!(escape_html("Hello World"), Cow::Borrowed("Hello World"));
	}

	#[rstest]
	fn test_escape_html_quotes_and_brackets() {
		assert_eq!(
			escape_html("<a href=\"x\">'y' & z</a>"),
			"&lt;a href=&quot;x&quot;&gt;&#x27;y&#x27; &amp; z&lt;/a&gt;"
		);
	}

	#[rstest]
	#[case(json!(null), false)]
	#[case(json!(false), false)]
	#[case(json!(0), false)]
	#[case(json!(""), false)]
	#[case(json!("0"), false)]
	#[case(json!([]), false)]
	#[case(json!(true), true)]
	#[case(json!(3), true)]
	#[case(json!("yes"), true)]
	#[case(json!(["a"]), true)]
	fn test_is_truthy(#[case] value: Value, #[case] expected: bool) {
		assert_eq!(is_truthy(&value), expected);
	}

	#[rstest]
	#[case(json!(null), None)]
	#[case(json!("a"), Some("a"))]
	#[case(json!(5), Some("5"))]
	#[case(json!(true), Some("1"))]
	fn test_value_text(#[case] value: Value, #[case] expected: Option<&str>) {
		assert_eq!(value_text(&value).as_deref(), expected);
	}

	#[rstest]
	#[case("disabled", json!(true), " disabled=\"disabled\"")]
	#[case("disabled", json!(false), "")]
	#[case("title", json!(null), "")]
	#[case("size", json!(10), " size=\"10\"")]
	#[case("title", json!("a \"b\""), " title=\"a &quot;b&quot;\"")]
	#[case("data", json!({"a": 1}), " data=\"{&quot;a&quot;:1}\"")]
	fn test_push_attribute(#[case] name: &str, #[case] value: Value, #[case] expected: &str) {
		let mut out = String::new();
		push_attribute(&mut out, name, &value);
		assert_eq!(out, expected);
	}

	#[rstest]
	fn test_push_data_attribute_booleans_are_literal() {
		let mut out = String::new();
		push_data_attribute(&mut out, "open", &json!(false));
		push_data_attribute(&mut out, "gone", &json!(null));
		assert_eq!(out, " data-open=\"false\"");
	}
}
