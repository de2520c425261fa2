//! Asset registration
//!
//! Rendering classes may declare stylesheets and scripts. The registry
//! forwards a class's assets to the [`AssetSink`] the first time any node of
//! that class renders, and never again for the same class.

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Receives asset registrations.
pub trait AssetSink: Send + Sync {
	fn add_css(&self, path: &str, weight: i32);
	fn add_js(&self, path: &str, weight: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
	Css,
	Js,
}

/// One stylesheet or script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
	pub kind: AssetKind,
	pub path: String,
	pub weight: i32,
}

/// Per-class asset declarations plus the set of classes already registered.
///
/// # Examples
///
/// ```
/// use markwright_element::{AssetRegistry, AssetSink};
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Default)]
/// struct Collected(Mutex<Vec<String>>);
///
/// impl AssetSink for Collected {
/// 	fn add_css(&self, path: &str, _weight: i32) {
/// 		self.0.lock().unwrap().push(path.to_string());
/// 	}
/// 	fn add_js(&self, path: &str, _weight: i32) {
/// 		self.0.lock().unwrap().push(path.to_string());
/// 	}
/// }
///
/// let sink = Arc::new(Collected::default());
/// let registry = AssetRegistry::new(sink.clone()).css("file", "css/file.css", 0);
///
/// registry.register("file");
/// registry.register("file");
/// assert_eq!(*sink.0.lock().unwrap(), ["css/file.css"]);
/// ```
pub struct AssetRegistry {
	sink: Arc<dyn AssetSink>,
	manifest: IndexMap<String, Vec<Asset>>,
	registered: Mutex<HashSet<String>>,
}

impl AssetRegistry {
	pub fn new(sink: Arc<dyn AssetSink>) -> Self {
		Self {
			sink,
			manifest: IndexMap::new(),
			registered: Mutex::new(HashSet::new()),
		}
	}

	/// Declare an asset for a rendering class.
	pub fn declare(mut self, class: impl Into<String>, asset: Asset) -> Self {
		self.manifest.entry(class.into()).or_default().push(asset);
		self
	}

	pub fn css(self, class: impl Into<String>, path: impl Into<String>, weight: i32) -> Self {
		self.declare(
			class,
			Asset {
				kind: AssetKind::Css,
				path: path.into(),
				weight,
			},
		)
	}

	pub fn js(self, class: impl Into<String>, path: impl Into<String>, weight: i32) -> Self {
		self.declare(
			class,
			Asset {
				kind: AssetKind::Js,
				path: path.into(),
				weight,
			},
		)
	}

	/// Forward the assets of `class` unless that already happened.
	///
	/// Returns `true` when this call performed the registration.
	pub fn register(&self, class: &str) -> bool {
		if !self.registered.lock().insert(class.to_string()) {
			return false;
		}
		let Some(assets) = self.manifest.get(class) else {
			return true;
		};
		tracing::debug!(class, count = assets.len(), "registering assets");
		for asset in assets {
			match asset.kind {
				AssetKind::Css => self.sink.add_css(&asset.path, asset.weight),
				AssetKind::Js => self.sink.add_js(&asset.path, asset.weight),
			}
		}
		true
	}

	/// Whether `class` has been registered already.
	pub fn is_registered(&self, class: &str) -> bool {
		self.registered.lock().contains(class)
	}
}

impl std::fmt::Debug for AssetRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AssetRegistry")
			.field("manifest", &self.manifest)
			.field("registered", &*self.registered.lock())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Default)]
	struct Recorder(Mutex<Vec<(AssetKind, String, i32)>>);

	impl AssetSink for Recorder {
		fn add_css(&self, path: &str, weight: i32) {
			self.0.lock().push((AssetKind::Css, path.to_string(), weight));
		}
		fn add_js(&self, path: &str, weight: i32) {
			self.0.lock().push((AssetKind::Js, path.to_string(), weight));
		}
	}

	#[rstest]
	fn test_register_once_per_class() {
		let sink = Arc::new(Recorder::default());
		let registry = AssetRegistry::new(sink.clone())
			.css("select", "select.css", 1)
			.js("select", "select.js", 2);

		assert!(registry.register("select"));
		assert!(!registry.register("select"));
		assert_eq!(
			*sink.0.lock(),
			[
				(AssetKind::Css, "select.css".to_string(), 1),
				(AssetKind::Js, "select.js".to_string(), 2),
			]
		);
	}

	#[rstest]
	fn test_undeclared_class_is_still_memoized() {
		let sink = Arc::new(Recorder::default());
		let registry = AssetRegistry::new(sink.clone());

		assert!(registry.register("element"));
		assert!(registry.is_registered("element"));
		assert!(sink.0.lock().is_empty());
	}
}
