//! Translation lookup for markwright
//!
//! The rendering engine never owns translation tables. It resolves every
//! label, help text, description, legend and validation message through the
//! [`Translator`] trait defined here, passing a scope that tells the
//! translator which family of messages the key belongs to.
//!
//! Two implementations are provided:
//!
//! - [`PassThrough`] returns the key itself (after argument interpolation)
//! - [`MessageCatalog`] looks keys up per scope with an unscoped fallback
//!
//! ## Example
//!
//! ```
//! use markwright_i18n::{MessageCatalog, TranslateOptions, Translator};
//!
//! let mut catalog = MessageCatalog::new("fr");
//! catalog.add_scoped("element.label", "Name", "Nom");
//!
//! let options = TranslateOptions::scoped("element.label");
//! assert_eq!(catalog.translate("Name", &[], &options), "Nom");
//! ```

pub mod catalog;
pub mod translator;

pub use catalog::MessageCatalog;
pub use translator::{PassThrough, TranslateOptions, Translator, interpolate};
