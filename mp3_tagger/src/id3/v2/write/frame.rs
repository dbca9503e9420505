use crate::error::Result;
use crate::id3::v2::frame::header::write_header;
use crate::id3::v2::util::synchsafe::{SynchsafeInteger, apply_unsynchronisation};
use crate::id3::v2::{Frame, Id3v2Version};
use crate::util::cursor::ByteWriter;

/// Write every frame in `frames`
///
/// `tag_unsynchronisation` is the tag level unsynchronisation flag of an ID3v2.4 tag, which
/// forces unsynchronisation on every frame.
pub(super) fn create_items<'a>(
	writer: &mut ByteWriter,
	frames: impl IntoIterator<Item = &'a Frame>,
	version: Id3v2Version,
	tag_unsynchronisation: bool,
) -> Result<()> {
	for frame in frames {
		write_frame(writer, frame, version, tag_unsynchronisation)?;
	}

	Ok(())
}

/// Write a single frame, including its header
///
/// # Errors
///
/// * The frame can't be described by a frame header in `version`, see
///   [`Id3v2ErrorKind::FrameTooLarge`](crate::error::Id3v2ErrorKind::FrameTooLarge)
pub(crate) fn write_frame(
	writer: &mut ByteWriter,
	frame: &Frame,
	version: Id3v2Version,
	tag_unsynchronisation: bool,
) -> Result<()> {
	// Opaque frames are written exactly as they were read
	if frame.is_opaque() {
		log::trace!("Writing opaque frame `{}`", frame.id());

		write_header(writer, frame.id(), frame.data.len(), frame.flags, version)?;
		writer.write_fixed(&frame.data);
		return Ok(());
	}

	let mut flags = frame.flags;
	let mut extras = Vec::new();

	// ID3v2.2 has no frame flags at all
	if version == Id3v2Version::V2 {
		flags = Default::default();
	}

	if let Some(group) = flags.grouping_identity {
		extras.push(group);
	}

	let data = match version {
		Id3v2Version::V4 => {
			flags.unsynchronisation |= tag_unsynchronisation;

			if flags.data_length_indicator {
				let len = u32::try_from(frame.data.len()).unwrap_or(u32::MAX);
				extras.extend(len.synch()?.to_be_bytes());
			}

			if flags.unsynchronisation {
				apply_unsynchronisation(&frame.data)
			} else {
				frame.data.clone()
			}
		},
		// Unsynchronisation and data length indicators are only per frame in ID3v2.4
		_ => {
			flags.unsynchronisation = false;
			flags.data_length_indicator = false;
			frame.data.clone()
		},
	};

	write_header(writer, frame.id(), extras.len() + data.len(), flags, version)?;
	writer.write_fixed(&extras);
	writer.write_fixed(&data);

	Ok(())
}
