//! ID3 specific items
//!
//! A file may hold an ID3v2 tag at its start, an ID3v1 tag in its last 128 bytes, or both.
//! Check the other modules for important notes and/or warnings.

pub mod v1;
pub mod v2;

use crate::error::Result;
use v1::constants::ID3V1_TAG_MARKER;
use v2::header::Id3v2Header;
use v2::Id3v2Version;

use std::fmt::{Display, Formatter};

/// The kind of tag, without regard for its exact version
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagType {
	/// An ID3v1 (or ID3v1.1) tag
	Id3v1,
	/// An ID3v2.2, ID3v2.3 or ID3v2.4 tag
	Id3v2,
}

/// The exact version of a tag found in a file
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Id3Version {
	/// ID3v1, including ID3v1.1
	V1,
	/// One of the ID3v2 revisions
	V2(Id3v2Version),
}

impl Id3Version {
	/// The [`TagType`] this version belongs to
	pub fn tag_type(self) -> TagType {
		match self {
			Id3Version::V1 => TagType::Id3v1,
			Id3Version::V2(_) => TagType::Id3v2,
		}
	}
}

impl Display for Id3Version {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Id3Version::V1 => write!(f, "ID3v1"),
			Id3Version::V2(Id3v2Version::V2) => write!(f, "ID3v2.2"),
			Id3Version::V2(Id3v2Version::V3) => write!(f, "ID3v2.3"),
			Id3Version::V2(Id3v2Version::V4) => write!(f, "ID3v2.4"),
		}
	}
}

pub(crate) struct ID3FindResults<Header, Content>(pub Option<Header>, pub Content);

/// Locate an ID3v1 tag in the last 128 bytes of `data`
///
/// The header is the offset of the tag.
pub(crate) fn find_id3v1(data: &[u8]) -> ID3FindResults<usize, Option<&[u8; 128]>> {
	log::debug!("Searching for an ID3v1 tag");

	// Data is too small to contain an ID3v1 tag
	let Some(offset) = data.len().checked_sub(128) else {
		return ID3FindResults(None, None);
	};

	let Ok(tag) = <&[u8; 128]>::try_from(&data[offset..]) else {
		return ID3FindResults(None, None);
	};

	// No ID3v1 tag found
	if tag[..3] != ID3V1_TAG_MARKER {
		return ID3FindResults(None, None);
	}

	log::debug!("Found an ID3v1 tag at offset: {offset}");
	ID3FindResults(Some(offset), Some(tag))
}

/// Locate an ID3v2 tag at the start of `data`
///
/// The content is the tag body, everything between the header and the footer (or the end of
/// the tag).
///
/// # Errors
///
/// * The header is invalid, see [`Id3v2Header::parse`]
/// * `data` ends before the declared end of the tag
pub(crate) fn find_id3v2(data: &[u8]) -> Result<ID3FindResults<Id3v2Header, Option<&[u8]>>> {
	log::debug!("Searching for an ID3v2 tag");

	if !data.starts_with(b"ID3") {
		return Ok(ID3FindResults(None, None));
	}

	let header = Id3v2Header::parse(data)?;
	log::debug!("Found an ID3v2 tag, {} bytes", header.full_tag_size());

	let body_end = Id3v2Header::SIZE as usize + header.size as usize;
	let Some(body) = data.get(Id3v2Header::SIZE as usize..body_end) else {
		crate::macros::err!(OutOfBounds);
	};

	if header.flags.footer && data.len() < body_end + Id3v2Header::SIZE as usize {
		crate::macros::err!(OutOfBounds);
	}

	Ok(ID3FindResults(Some(header), Some(body)))
}
