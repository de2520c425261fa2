//! Forms rendered in groups.
//!
//! # Examples
//!
//! ```
//! use markwright::forms::Form;
//!
//! let form = Form::new();
//! assert!(form.groups().contains_key("primary"));
//! ```

pub use markwright_forms::*;
