//! Component reference model.
//!
//! A `$ref` of the form `#/components/{category}/{name}` targets one of the eight
//! reusable component sections. This module parses such pointers into a typed
//! [`ComponentRef`] and provides the [`ResolvedComponents`] accumulator used by the
//! resolver.

mod category;
mod reference;
mod resolved;

pub use category::{ComponentCategory, UnknownCategoryError};
pub use reference::ComponentRef;
pub use resolved::ResolvedComponents;
