use super::frame::read::read_frames;
use super::header::{Id3v2Header, Id3v2Version};
use super::tag::Id3v2Tag;
use super::util::synchsafe::remove_unsynchronisation;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::id3v2_err;
use crate::util::cursor::ByteCursor;

use std::borrow::Cow;

/// Parse the body of an ID3v2 tag
///
/// `body` is everything between the header and the footer (or the end of the tag), see
/// [`find_id3v2`](crate::id3::find_id3v2).
///
/// Returns the tag, and the number of padding bytes that followed the frames.
pub(crate) fn parse_id3v2(
	body: &[u8],
	header: Id3v2Header,
	parse_mode: ParsingMode,
) -> Result<(Id3v2Tag, usize)> {
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	// In ID3v2.4, unsynchronisation is handled per frame
	let body = if header.flags.unsynchronisation && header.version != Id3v2Version::V4 {
		Cow::Owned(remove_unsynchronisation(body))
	} else {
		Cow::Borrowed(body)
	};

	let mut cursor = ByteCursor::new(&body);
	if header.flags.extended_header {
		skip_extended_header(&mut cursor, header.version)?;
	}

	let (frames, padding) = read_frames(
		cursor.rest(),
		header.version,
		parse_mode,
		header.flags.unsynchronisation,
	)?;

	log::debug!("Read {} frames, {padding} bytes of padding", frames.len());

	let tag = Id3v2Tag::from_parts(header.version, header.revision, header.flags, frames);
	Ok((tag, padding))
}

// The extended header holds nothing we make use of (CRC, restrictions), and is never written back
fn skip_extended_header(cursor: &mut ByteCursor<'_>, version: Id3v2Version) -> Result<()> {
	let to_skip = match version {
		// The size excludes the size field itself
		Id3v2Version::V3 => {
			let Ok(size) = cursor.read_be_u32() else {
				id3v2_err!(@BAIL BadExtendedHeaderSize);
			};

			if size < 6 {
				id3v2_err!(@BAIL BadExtendedHeaderSize);
			}

			size as usize
		},
		// The size includes the size field, and is synchsafe
		Id3v2Version::V4 => {
			let Ok(size) = cursor.read_synchsafe_u32() else {
				id3v2_err!(@BAIL BadExtendedHeaderSize);
			};

			if size < 6 {
				id3v2_err!(@BAIL BadExtendedHeaderSize);
			}

			size as usize - 4
		},
		// Not possible, the flag is never set for ID3v2.2
		Id3v2Version::V2 => return Ok(()),
	};

	log::warn!("Skipping extended header ({to_skip} bytes), it won't be written back");

	if cursor.skip(to_skip).is_err() {
		id3v2_err!(@BAIL BadExtendedHeaderSize);
	}

	Ok(())
}
