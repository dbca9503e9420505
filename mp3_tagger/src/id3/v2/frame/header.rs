use super::{FrameFlags, FrameId};
use crate::config::ParsingMode;
use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::macros::id3v2_err;
use crate::util::cursor::{ByteCursor, ByteWriter};
use crate::util::text::latin1_decode;

/// The largest frame size that can be described by an ID3v2.4 frame header (28 bits)
const MAX_SYNCHSAFE_SIZE: usize = 0x0FFF_FFFF;
/// The largest frame size that can be described by an ID3v2.2 frame header (24 bits)
const MAX_V2_SIZE: usize = 0xFF_FFFF;

pub(crate) struct FrameHeader {
	pub(crate) id: FrameId,
	pub(crate) size: u32,
	pub(crate) flags: FrameFlags,
}

impl FrameHeader {
	/// The size of a frame header in `version`
	pub(crate) fn len(version: Id3v2Version) -> usize {
		match version {
			Id3v2Version::V2 => 6,
			Id3v2Version::V3 | Id3v2Version::V4 => 10,
		}
	}
}

/// Read a frame header
///
/// Returns `None` if there isn't enough data left for a header, or if padding was reached.
pub(crate) fn parse_header(
	cursor: &mut ByteCursor<'_>,
	version: Id3v2Version,
	parse_mode: ParsingMode,
) -> Result<Option<FrameHeader>> {
	if cursor.remaining() < FrameHeader::len(version) {
		return Ok(None);
	}

	// Assume we just started reading padding
	if cursor.rest()[0] == 0 {
		return Ok(None);
	}

	let (id_bytes, size, flags) = match version {
		Id3v2Version::V2 => {
			let id = cursor.read_fixed(3)?;
			let size = cursor.read_be_u24()?;

			// V2 doesn't store flags
			(id, size, FrameFlags::default())
		},
		Id3v2Version::V3 | Id3v2Version::V4 => {
			let mut id = cursor.read_fixed(4)?;

			// For some reason, some apps make v3/v4 tags with v2 frame IDs.
			// The actual frame header is v3/v4 though
			if id[3] == 0 {
				log::warn!("Found a v2 frame ID in a {version:?} tag");
				id = &id[..3];
			}

			let size = match version {
				Id3v2Version::V4 => cursor.read_synchsafe_u32()?,
				_ => cursor.read_be_u32()?,
			};

			let flags = cursor.read_be_u16()?;
			let flags = match version {
				Id3v2Version::V4 => FrameFlags::parse_id3v24(flags),
				_ => FrameFlags::parse_id3v23(flags),
			};

			(id, size, flags)
		},
	};

	let id = if FrameId::is_valid(id_bytes) {
		FrameId::new_unchecked(latin1_decode(id_bytes))
	} else if parse_mode == ParsingMode::Relaxed {
		log::warn!("Accepting an invalid frame ID: {id_bytes:x?}");
		FrameId::new_unchecked(latin1_decode(id_bytes))
	} else {
		id3v2_err!(@BAIL BadFrameId(id_bytes.to_vec()));
	};

	Ok(Some(FrameHeader { id, size, flags }))
}

/// Write a frame header for a frame with `size` bytes of content
///
/// Three character IDs in ID3v2.3/ID3v2.4 tags are padded with a null byte.
///
/// # Errors
///
/// * `size` can't be described in `version`
/// * `id` is too long for an ID3v2.2 tag, or isn't 3 or 4 bytes long
pub(crate) fn write_header(
	writer: &mut ByteWriter,
	id: &FrameId,
	size: usize,
	flags: FrameFlags,
	version: Id3v2Version,
) -> Result<()> {
	let max_size = match version {
		Id3v2Version::V2 => MAX_V2_SIZE,
		Id3v2Version::V3 => u32::MAX as usize,
		Id3v2Version::V4 => MAX_SYNCHSAFE_SIZE,
	};

	if size > max_size {
		return Err(id3v2_err!(FrameTooLarge {
			id: id.to_string(),
			size,
		}));
	}

	let id_bytes = id.as_str().as_bytes();
	match version {
		Id3v2Version::V2 => {
			if id_bytes.len() != 3 {
				id3v2_err!(@BAIL BadFrameId(id_bytes.to_vec()));
			}

			writer.write_fixed(id_bytes);
			writer.write_be_u24(size as u32)?;
		},
		Id3v2Version::V3 | Id3v2Version::V4 => {
			if !matches!(id_bytes.len(), 3 | 4) {
				id3v2_err!(@BAIL BadFrameId(id_bytes.to_vec()));
			}

			writer.write_fixed(id_bytes);
			if id_bytes.len() == 3 {
				writer.write_u8(0);
			}

			if version == Id3v2Version::V4 {
				writer.write_synchsafe_u32(size as u32)?;
				writer.write_be_u16(flags.as_id3v24_bytes())?;
			} else {
				writer.write_be_u32(size as u32)?;
				writer.write_be_u16(flags.as_id3v23_bytes())?;
			}
		},
	}

	Ok(())
}
