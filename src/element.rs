//! Element tree, ordering and rendering.
//!
//! # Examples
//!
//! ```
//! use markwright::element::{Node, Renderer};
//!
//! let hr = Node::new("hr");
//! assert_eq!(Renderer::new().render(&hr).unwrap(), "<hr />");
//! ```

pub use markwright_element::*;
