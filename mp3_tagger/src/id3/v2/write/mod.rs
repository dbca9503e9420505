mod frame;

pub(crate) use frame::write_frame;

use super::header::{Id3v2Header, Id3v2Version};
use super::tag::Id3v2Tag;
use super::util::synchsafe::apply_unsynchronisation;
use crate::error::Result;
use crate::macros::{err, try_vec};
use crate::util::cursor::ByteWriter;

/// The largest tag body that can be described by the header (28 bits)
const MAX_TAG_SIZE: usize = 0x0FFF_FFFF;

impl Id3v2Tag {
	/// Encode the tag, followed by `padding` null bytes
	///
	/// Tags with a footer (ID3v2.4 only) can't have padding, `padding` is ignored for them.
	///
	/// NOTE: The extended header is never written.
	///
	/// # Errors
	///
	/// * A frame is too large for the tag's version, see
	///   [`Id3v2ErrorKind::FrameTooLarge`](crate::error::Id3v2ErrorKind::FrameTooLarge)
	/// * The tag is too large to be described by the header
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v2::{Id3v2Header, Id3v2Tag, Id3v2Version};
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// let tag = Id3v2Tag::new(Id3v2Version::V3);
	///
	/// let bytes = tag.encode(100)?;
	/// assert_eq!(bytes.len(), 110);
	/// assert_eq!(Id3v2Header::parse(&bytes)?.size, 100);
	/// # Ok(()) }
	/// ```
	pub fn encode(&self, padding: usize) -> Result<Vec<u8>> {
		let frames = self.encode_frames()?;
		self.assemble(&frames, padding)
	}

	/// Encode the frames, with unsynchronisation applied
	pub(crate) fn encode_frames(&self) -> Result<Vec<u8>> {
		let version = self.version();
		let tag_unsynchronisation = self.flags().unsynchronisation;

		let mut writer = ByteWriter::new();
		frame::create_items(
			&mut writer,
			self.iter(),
			version,
			version == Id3v2Version::V4 && tag_unsynchronisation,
		)?;

		let frames = writer.into_inner();
		if tag_unsynchronisation && version != Id3v2Version::V4 {
			log::trace!("Unsynchronising the tag body");
			return Ok(apply_unsynchronisation(&frames));
		}

		Ok(frames)
	}

	/// Wrap already encoded frames in a header, padding and footer
	pub(crate) fn assemble(&self, frames: &[u8], padding: usize) -> Result<Vec<u8>> {
		let version = self.version();

		let mut flags = *self.flags();
		flags.extended_header = false;
		flags.footer &= version == Id3v2Version::V4;

		// https://mutagen-specs.readthedocs.io/en/latest/id3/id3v2.4.0-structure.html#padding:
		//
		// "[A tag] MUST NOT have any padding when a tag footer is added to the tag"
		let padding = if flags.footer { 0 } else { padding };

		let size = frames.len() + padding;
		if size > MAX_TAG_SIZE {
			log::error!("The tag is too large to be written ({size} bytes)");
			err!(TooMuchData);
		}

		let header = Id3v2Header {
			version,
			revision: self.revision(),
			flags,
			size: size as u32,
		};

		log::debug!(
			"Encoding {version:?} tag, {} bytes of frames, {padding} bytes of padding",
			frames.len()
		);

		let mut tag = Vec::new();
		tag.try_reserve(header.full_tag_size() as usize)?;
		tag.extend(header.encode()?);
		tag.extend_from_slice(frames);
		tag.extend(try_vec![0; padding]);

		if flags.footer {
			tag.extend(header.encode_footer()?);
		}

		Ok(tag)
	}
}
