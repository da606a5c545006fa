//! Utility functions for rule implementations.

pub mod paths;

#[doc(inline)]
pub use paths::{parent_name, relative_display};
