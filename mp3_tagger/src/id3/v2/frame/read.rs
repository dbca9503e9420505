use super::Frame;
use super::header::parse_header;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::id3::v2::util::synchsafe::remove_unsynchronisation;
use crate::macros::{id3v2_err, parse_mode_choice};
use crate::util::alloc::VecFallibleCapacity;
use crate::util::cursor::ByteCursor;

pub(crate) enum ParsedFrame {
	Next(Frame),
	Eof,
}

impl ParsedFrame {
	/// Read the next frame
	///
	/// `tag_unsynchronisation` is the tag level unsynchronisation flag of an ID3v2.4 tag, which
	/// applies to every frame.
	///
	/// Returns [`ParsedFrame::Eof`] once padding (or the end of the data) is reached.
	pub(crate) fn read(
		cursor: &mut ByteCursor<'_>,
		version: Id3v2Version,
		parse_mode: ParsingMode,
		tag_unsynchronisation: bool,
	) -> Result<Self> {
		let Some(header) = parse_header(cursor, version, parse_mode)? else {
			// Stop reading
			return Ok(Self::Eof);
		};

		let size = header.size as usize;
		if size > cursor.remaining() {
			log::debug!(
				"Frame `{}` claims {size} bytes, only {} remain",
				header.id,
				cursor.remaining()
			);
			id3v2_err!(@BAIL BadFrameLength);
		}

		let data = cursor.read_fixed(size)?;

		let mut frame = Frame {
			id: header.id,
			flags: header.flags,
			data: Vec::new(),
		};

		// Compressed and encrypted frames are kept exactly as they are. Anything covered by
		// the flags (encryption method, group identifier, data length indicator) stays in the data.
		if frame.is_opaque() {
			log::debug!("Frame `{}` is compressed or encrypted, preserving as-is", frame.id);
			frame.data = Vec::try_with_capacity_stable(size)?;
			frame.data.extend_from_slice(data);
			return Ok(Self::Next(frame));
		}

		let mut content = ByteCursor::new(data);

		// Get the group identifier
		if let Some(group) = frame.flags.grouping_identity.as_mut() {
			log::trace!("Reading group identifier");

			let Ok(byte) = content.read_u8() else {
				id3v2_err!(@BAIL BadFrameLength);
			};

			*group = byte;
		}

		// The data length indicator is recalculated on write
		if frame.flags.data_length_indicator {
			log::trace!("Skipping data length indicator");

			if content.skip(4).is_err() {
				id3v2_err!(@BAIL BadFrameLength);
			}
		}

		if version == Id3v2Version::V4 && tag_unsynchronisation {
			frame.flags.unsynchronisation = true;
		}

		frame.data = if frame.flags.unsynchronisation {
			remove_unsynchronisation(content.rest())
		} else {
			let mut data = Vec::try_with_capacity_stable(content.remaining())?;
			data.extend_from_slice(content.rest());
			data
		};

		Ok(Self::Next(frame))
	}
}

/// Read every frame in `data`
///
/// Returns the frames, and the number of bytes that weren't occupied by frames (padding).
///
/// With [`ParsingMode::Strict`], any invalid frame is an error. Otherwise, reading stops at the first
/// invalid frame, and the rest of the data is treated as padding.
pub(crate) fn read_frames(
	data: &[u8],
	version: Id3v2Version,
	parse_mode: ParsingMode,
	tag_unsynchronisation: bool,
) -> Result<(Vec<Frame>, usize)> {
	let mut cursor = ByteCursor::new(data);
	let mut frames = Vec::new();

	loop {
		let start = cursor.position();
		match ParsedFrame::read(&mut cursor, version, parse_mode, tag_unsynchronisation) {
			Ok(ParsedFrame::Next(frame)) => frames.push(frame),
			Ok(ParsedFrame::Eof) => {
				cursor.seek(start)?;
				break;
			},
			Err(err) => parse_mode_choice!(
				parse_mode,
				STRICT: return Err(err),
				DEFAULT: {
					log::warn!(
						"Failed to read frame, treating the rest of the tag as padding: {err}"
					);
					cursor.seek(start)?;
					break;
				}
			),
		}
	}

	Ok((frames, cursor.remaining()))
}
