//! Translation catalogs.

pub use markwright_i18n::*;
