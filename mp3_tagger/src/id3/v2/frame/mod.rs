pub(crate) mod content;
pub(crate) mod header;
pub(crate) mod read;

use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::macros::id3v2_err;
use content::FrameContent;

use std::fmt::{Display, Formatter};

/// An `ID3v2` frame ID
///
/// ID3v2.2 IDs are 3 characters, ID3v2.3 and ID3v2.4 IDs are 4 characters.
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub struct FrameId(String);

impl FrameId {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// # Errors
	///
	/// * `id` contains invalid characters (must be 'A'..='Z' and '0'..='9')
	/// * `id` is an invalid length (must be 3 or 4)
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v2::FrameId;
	///
	/// assert!(FrameId::new("TPE1").is_ok());
	/// assert!(FrameId::new("TP1").is_ok());
	/// assert!(FrameId::new("tpe1").is_err());
	/// assert!(FrameId::new("TPE12").is_err());
	/// ```
	pub fn new(id: &str) -> Result<Self> {
		if !Self::is_valid(id.as_bytes()) {
			return Err(id3v2_err!(BadFrameId(id.as_bytes().to_vec())));
		}

		Ok(Self(id.to_owned()))
	}

	/// Skips validation, for IDs read with [`ParsingMode::Relaxed`](crate::config::ParsingMode::Relaxed)
	pub(crate) fn new_unchecked(id: String) -> Self {
		Self(id)
	}

	pub(crate) fn is_valid(id: &[u8]) -> bool {
		matches!(id.len(), 3 | 4)
			&& id
				.iter()
				.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
	}

	/// Get the ID as a `&str`
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// An ID3v2 frame
///
/// The frame data is stored in its decoded form: any unsynchronisation, group identifier or
/// data length indicator has been stripped. Frames that are compressed or encrypted
/// (see [`Frame::is_opaque`]) are stored exactly as they were read instead, and are written back
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
	pub(crate) id: FrameId,
	/// The frame's flags
	pub flags: FrameFlags,
	pub(crate) data: Vec<u8>,
}

impl Frame {
	/// Create a new frame from its content
	///
	/// # Errors
	///
	/// * The content can't be encoded, see [`FrameContent::as_bytes`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v2::{Frame, FrameContent, FrameId, Id3v2Version};
	/// use mp3_tagger::text::TextEncoding;
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// let content = FrameContent::Text {
	/// 	encoding: TextEncoding::Latin1,
	/// 	values: vec![String::from("Prowler")],
	/// };
	///
	/// let frame = Frame::new(FrameId::new("TIT2")?, &content, Id3v2Version::V4)?;
	/// assert_eq!(frame.data(), b"\0Prowler");
	/// # Ok(()) }
	/// ```
	pub fn new(id: FrameId, content: &FrameContent, version: Id3v2Version) -> Result<Self> {
		Ok(Self {
			id,
			flags: FrameFlags::default(),
			data: content.as_bytes(version)?,
		})
	}

	/// The frame ID
	pub fn id(&self) -> &FrameId {
		&self.id
	}

	/// The frame data
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Whether the frame data is compressed or encrypted
	///
	/// These frames can't be interpreted, their data is preserved as-is.
	pub fn is_opaque(&self) -> bool {
		self.flags.compression || self.flags.encryption.is_some()
	}

	/// Decode the frame data
	///
	/// Returns `None` for [opaque](Frame::is_opaque) frames.
	///
	/// # Errors
	///
	/// * The data is too short for the frame type, see [`FrameContent::parse`]
	pub fn content(&self) -> Result<Option<FrameContent>> {
		if self.is_opaque() {
			return Ok(None);
		}

		FrameContent::parse(self.id.as_str(), &self.data).map(Some)
	}

	/// Replace the frame data, keeping the ID and flags
	///
	/// # Errors
	///
	/// * The content can't be encoded, see [`FrameContent::as_bytes`]
	pub fn set_content(&mut self, content: &FrameContent, version: Id3v2Version) -> Result<()> {
		self.data = content.as_bytes(version)?;

		// The group identifier of an opaque frame was never extracted, it went with the old data
		if self.is_opaque() {
			self.flags.grouping_identity = None;
			self.flags.compression = false;
			self.flags.encryption = None;
		}

		Ok(())
	}
}

/// Various flags to describe the content of an item
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The group identifier the frame belongs to
	///
	/// All frames with the same group identifier byte belong to the same group.
	pub grouping_identity: Option<u8>,
	/// Frame is zlib compressed
	///
	/// Compressed frames are kept as-is, see [`Frame::is_opaque`].
	pub compression: bool,
	/// Frame encryption method symbol
	///
	/// NOTE: Since the encryption method is unknown, nothing can be done with these frames
	/// other than preserving them, see [`Frame::is_opaque`].
	pub encryption: Option<u8>,
	/// Frame is unsynchronised (ID3v2.4 only)
	///
	/// In short, this makes all "0xFF X (X >= 0xE0)" combinations into "0xFF 0x00 X" to avoid confusion
	/// with the MPEG frame header, which is often identified by its "frame sync" (11 set bits).
	///
	/// In ID3v2.2 and ID3v2.3, unsynchronisation can only be applied to the entire tag, see
	/// [`Id3v2TagFlags::unsynchronisation`](crate::id3::v2::Id3v2TagFlags::unsynchronisation).
	pub unsynchronisation: bool,
	/// Frame has a data length indicator (ID3v2.4 only)
	///
	/// The data length indicator is the size of the frame if the flags were all zeroed out.
	/// It is recalculated when the frame is written.
	pub data_length_indicator: bool,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: (flags & 0x0040 == 0x0040).then_some(0),
			compression: flags & 0x0008 == 0x0008,
			encryption: (flags & 0x0004 == 0x0004).then_some(0),
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	pub fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: (flags & 0x0020 == 0x0020).then_some(0),
			compression: flags & 0x0080 == 0x0080,
			encryption: (flags & 0x0040 == 0x0040).then_some(0),
			unsynchronisation: false,
			data_length_indicator: false,
		}
	}

	/// Get the ID3v2.4 byte representation of the flags
	pub fn as_id3v24_bytes(&self) -> u16 {
		let mut flags = 0;

		if *self == FrameFlags::default() {
			return flags;
		}

		if self.tag_alter_preservation {
			flags |= 0x4000
		}

		if self.file_alter_preservation {
			flags |= 0x2000
		}

		if self.read_only {
			flags |= 0x1000
		}

		if self.grouping_identity.is_some() {
			flags |= 0x0040
		}

		if self.compression {
			flags |= 0x0008
		}

		if self.encryption.is_some() {
			flags |= 0x0004
		}

		if self.unsynchronisation {
			flags |= 0x0002
		}

		if self.data_length_indicator {
			flags |= 0x0001
		}

		flags
	}

	/// Get the ID3v2.3 byte representation of the flags
	pub fn as_id3v23_bytes(&self) -> u16 {
		let mut flags = 0;

		if *self == FrameFlags::default() {
			return flags;
		}

		if self.tag_alter_preservation {
			flags |= 0x8000
		}

		if self.file_alter_preservation {
			flags |= 0x4000
		}

		if self.read_only {
			flags |= 0x2000
		}

		if self.grouping_identity.is_some() {
			flags |= 0x0020
		}

		if self.compression {
			flags |= 0x0080
		}

		if self.encryption.is_some() {
			flags |= 0x0040
		}

		flags
	}
}
