//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! See:
//!
//! * [`Id3v2Tag`]
//! * [`Frame`]

pub(crate) mod frame;
pub(crate) mod header;
pub(crate) mod read;
pub(crate) mod tag;
pub mod util;
pub(crate) mod write;

// Exports

pub use header::{Id3v2Header, Id3v2TagFlags, Id3v2Version};

pub use tag::Id3v2Tag;

pub use frame::content::FrameContent;
pub use frame::{Frame, FrameFlags, FrameId};
