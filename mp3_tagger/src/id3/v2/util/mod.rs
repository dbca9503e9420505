//! Utilities for working with ID3v2 tags

pub(crate) mod mappings;
pub mod synchsafe;
