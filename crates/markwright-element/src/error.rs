//! Error types for the element engine

/// Configuration errors abort rendering entirely.
#[derive(Debug, thiserror::Error)]
pub enum ElementError {
	/// A `before:`/`after:` weight names a sibling that never appears.
	#[error("Child '{child}' is positioned relative to '{target}', which does not exist")]
	TargetNotFound { child: String, target: String },
	/// The tree is nested deeper than the configured limit.
	#[error("Render depth exceeded the limit of {limit}")]
	DepthExceeded { limit: usize },
	/// Settings could not be parsed.
	#[error("Invalid render settings: {0}")]
	InvalidSettings(String),
}

pub type ElementResult<T> = Result<T, ElementError>;

/// Outcome signalled by a node's content source.
///
/// Neither variant aborts rendering: `Empty` suppresses the node, `Failed`
/// is rendered inline as the node's content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
	/// The node intentionally renders nothing at all.
	#[error("content intentionally empty")]
	Empty,
	/// Content could not be computed.
	#[error("{0}")]
	Failed(String),
}

impl ContentError {
	/// Build a failure from any displayable error.
	pub fn failed(error: impl std::fmt::Display) -> Self {
		Self::Failed(error.to_string())
	}
}
