//! Markwright Forms - grouped form rendering and validation
//!
//! A [`Form`] is a `form` element whose fields are distributed over named
//! groups before rendering. Each group has a container (a `div` by default)
//! that can carry its own legend, description and weight; fields join a
//! group through their `#group` pseudo-attribute and fall back to
//! `primary`.
//!
//! Validation runs every field's validator against submitted data and
//! reports translated messages per field.

pub mod dispatch;
pub mod error;
pub mod form;
pub mod group;

pub use dispatch::dispatch;
pub use error::{FormError, FormResult};
pub use form::{DEFAULT_ERROR, Form, PASSWORD_MISMATCH};
pub use group::{GroupDefinition, group_class};
