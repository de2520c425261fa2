//! Error types for forms

use markwright_element::ElementError;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	/// A field names a group the form does not define.
	#[error("Field '{child}' belongs to unknown group '{group}'")]
	UnknownGroup { child: String, group: String },
	#[error(transparent)]
	Element(#[from] ElementError),
}

pub type FormResult<T> = Result<T, FormError>;
