//! The translator contract

/// Options passed along with every translation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
	/// Message scope, e.g. `element.label` or `validation`.
	///
	/// `None` means the ambient scope of the caller.
	pub scope: Option<String>,
}

impl TranslateOptions {
	/// Options for the ambient scope.
	pub fn ambient() -> Self {
		Self::default()
	}

	/// Options for a named scope.
	pub fn scoped(scope: impl Into<String>) -> Self {
		Self {
			scope: Some(scope.into()),
		}
	}
}

/// Resolves message keys into display text.
///
/// `args` are substituted into `%(name)s` placeholders of the resolved
/// message, so implementations should call [`interpolate`] on whatever they
/// find (or on the key itself when nothing matches).
pub trait Translator: Send + Sync {
	/// Translate `key` with the given interpolation arguments.
	fn translate(&self, key: &str, args: &[(&str, &str)], options: &TranslateOptions) -> String;
}

/// Translator that returns every key untranslated.
///
/// # Examples
///
/// ```
/// use markwright_i18n::{PassThrough, TranslateOptions, Translator};
///
/// let text = PassThrough.translate(
/// 	"Maximum upload size: %(size)s",
/// 	&[("size", "2 MB")],
/// 	&TranslateOptions::ambient(),
/// );
/// assert_eq!(text, "Maximum upload size: 2 MB");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Translator for PassThrough {
	fn translate(&self, key: &str, args: &[(&str, &str)], _options: &TranslateOptions) -> String {
		interpolate(key, args)
	}
}

/// Replace `%(name)s` placeholders in `message` with the matching argument.
///
/// Placeholders without a matching argument are left untouched.
pub fn interpolate(message: &str, args: &[(&str, &str)]) -> String {
	if args.is_empty() || !message.contains("%(") {
		return message.to_string();
	}
	let mut result = message.to_string();
	for (name, value) in args {
		result = result.replace(&format!("%({name})s"), value);
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Hello", &[], "Hello")]
	#[case("Hello %(name)s", &[("name", "Ada")], "Hello Ada")]
	#[case("%(a)s and %(b)s", &[("a", "x"), ("b", "y")], "x and y")]
	#[case("Missing %(other)s", &[("name", "Ada")], "Missing %(other)s")]
	fn test_interpolate(#[case] message: &str, #[case] args: &[(&str, &str)], #[case] expected: &str) {
		assert_eq!(interpolate(message, args), expected);
	}

	#[rstest]
	fn test_pass_through_ignores_scope() {
		let text = PassThrough.translate("Name", &[], &TranslateOptions::scoped("element.label"));
		assert_eq!(text, "Name");
	}
}
