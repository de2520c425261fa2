//! Node kinds

use std::fmt;

/// Selects the expansion strategy applied to a node before rendering.
///
/// Every kind other than [`Kind::Plain`] forces its tag, and input-like
/// kinds also force the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
	/// Any ordinary tag.
	#[default]
	Plain,
	Checkbox,
	CheckboxGroup,
	Radio,
	RadioGroup,
	Submit,
	Text,
	Hidden,
	Password,
	File,
	Select,
	Textarea,
}

impl Kind {
	/// Kind implied by a plain tag name.
	///
	/// # Examples
	///
	/// ```
	/// use markwright_element::Kind;
	///
	/// assert_eq!(Kind::from_tag("select"), Kind::Select);
	/// assert_eq!(Kind::from_tag("div"), Kind::Plain);
	/// ```
	pub fn from_tag(tag: &str) -> Self {
		match tag {
			"select" => Kind::Select,
			"textarea" => Kind::Textarea,
			_ => Kind::Plain,
		}
	}

	/// The forced tag, `None` for [`Kind::Plain`].
	pub fn tag(self) -> Option<&'static str> {
		match self {
			Kind::Plain => None,
			Kind::CheckboxGroup | Kind::RadioGroup => Some("div"),
			Kind::Select => Some("select"),
			Kind::Textarea => Some("textarea"),
			_ => Some("input"),
		}
	}

	/// The forced `type` attribute of input-like kinds.
	pub fn input_type(self) -> Option<&'static str> {
		match self {
			Kind::Checkbox => Some("checkbox"),
			Kind::Radio => Some("radio"),
			Kind::Submit => Some("submit"),
			Kind::Text => Some("text"),
			Kind::Hidden => Some("hidden"),
			Kind::Password => Some("password"),
			Kind::File => Some("file"),
			_ => None,
		}
	}

	/// Marker class added to group containers.
	pub fn group_class(self) -> Option<&'static str> {
		match self {
			Kind::CheckboxGroup => Some("checkbox-group"),
			Kind::RadioGroup => Some("radio-group"),
			_ => None,
		}
	}

	/// Member kind synthesized for each option of a group.
	pub fn member(self) -> Option<Kind> {
		match self {
			Kind::CheckboxGroup => Some(Kind::Checkbox),
			Kind::RadioGroup => Some(Kind::Radio),
			_ => None,
		}
	}

	/// Stable name used as the default rendering class.
	pub fn name(self) -> &'static str {
		match self {
			Kind::Plain => "element",
			Kind::Checkbox => "checkbox",
			Kind::CheckboxGroup => "checkbox-group",
			Kind::Radio => "radio",
			Kind::RadioGroup => "radio-group",
			Kind::Submit => "submit",
			Kind::Text => "text",
			Kind::Hidden => "hidden",
			Kind::Password => "password",
			Kind::File => "file",
			Kind::Select => "select",
			Kind::Textarea => "textarea",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Kind::Radio, Some("input"), Some("radio"))]
	#[case(Kind::Password, Some("input"), Some("password"))]
	#[case(Kind::RadioGroup, Some("div"), None)]
	#[case(Kind::Select, Some("select"), None)]
	#[case(Kind::Textarea, Some("textarea"), None)]
	#[case(Kind::Plain, None, None)]
	fn test_forced_tag_and_type(
		#[case] kind: Kind,
		#[case] tag: Option<&str>,
		#[case] input_type: Option<&str>,
	) {
		assert_eq!(kind.tag(), tag);
		assert_eq!(kind.input_type(), input_type);
	}

	#[rstest]
	fn test_group_members() {
		assert_eq!(Kind::CheckboxGroup.member(), Some(Kind::Checkbox));
		assert_eq!(Kind::RadioGroup.member(), Some(Kind::Radio));
		assert_eq!(Kind::Text.member(), None);
	}
}
