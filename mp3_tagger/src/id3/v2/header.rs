use crate::error::Result;
use crate::macros::{err, id3v2_err};
use crate::util::cursor::{ByteCursor, ByteWriter};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// The major version byte, as stored in the tag header
	pub fn major(self) -> u8 {
		match self {
			Id3v2Version::V2 => 2,
			Id3v2Version::V3 => 3,
			Id3v2Version::V4 => 4,
		}
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised. See [`FrameFlags::unsynchronisation`](crate::id3::v2::FrameFlags::unsynchronisation)
	///
	/// In ID3v2.2 and ID3v2.3, this applies to the tag body as a whole. In ID3v2.4, it means
	/// every frame carries its own unsynchronisation flag.
	pub unsynchronisation: bool,
	/// Whether an extended header follows the header (ID3v2.3 and ID3v2.4 only)
	///
	/// The extended header is skipped when reading, and never written.
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage (ID3v2.3 and ID3v2.4 only)
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4 only)
	///
	/// A tag with a footer has no padding.
	pub footer: bool,
}

impl Id3v2TagFlags {
	/// Get the byte representation of the flags for `version`
	///
	/// Flags that don't exist in `version` are dropped.
	pub fn as_byte(&self, version: Id3v2Version) -> u8 {
		let mut byte = 0;

		if self.unsynchronisation {
			byte |= 0x80;
		}

		if version == Id3v2Version::V2 {
			return byte;
		}

		if self.extended_header {
			byte |= 0x40;
		}

		if self.experimental {
			byte |= 0x20;
		}

		if self.footer && version == Id3v2Version::V4 {
			byte |= 0x10;
		}

		byte
	}
}

/// The 10 byte header at the start of every ID3v2 tag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Header {
	/// The tag version
	pub version: Id3v2Version,
	/// The minor revision of the version (the `0` of ID3v2.4.0)
	pub revision: u8,
	/// The tag flags
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
}

impl Id3v2Header {
	/// The size of a header or footer
	pub const SIZE: u32 = 10;

	/// Parse a header from the start of `bytes`
	///
	/// # Errors
	///
	/// * `bytes` doesn't start with `"ID3"`
	/// * The major version isn't 2, 3 or 4
	/// * The tag is a compressed ID3v2.2 tag
	/// * The size isn't a valid synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v2::{Id3v2Header, Id3v2Version};
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// let header = Id3v2Header::parse(&[b'I', b'D', b'3', 3, 0, 0, 0, 0, 0x02, 0x01])?;
	/// assert_eq!(header.version, Id3v2Version::V3);
	/// assert_eq!(header.size, 257);
	/// # Ok(()) }
	/// ```
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		log::debug!("Parsing ID3v2 header");

		let mut cursor = ByteCursor::new(bytes);
		if cursor.read_fixed(3)? != b"ID3" {
			err!(FakeTag);
		}

		// Version is stored as [major, minor]. The minor revision is kept so it can be written back.
		let [major, minor] = cursor.read_array::<2>()?;
		let version = match major {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			_ => id3v2_err!(@BAIL BadId3v2Version(major, minor)),
		};

		let flags = cursor.read_u8()?;

		// Compression was a flag only used in ID3v2.2 (bit 2).
		// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
		// The ID3v2.2 specification recommends just ignoring the tag in this case.
		if version == Id3v2Version::V2 && flags & 0x40 == 0x40 {
			id3v2_err!(@BAIL V2Compression);
		}

		let has_v3_flags = version != Id3v2Version::V2;
		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: has_v3_flags && flags & 0x40 == 0x40,
			experimental: has_v3_flags && flags & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
		};

		let size = cursor.read_synchsafe_u32()?;

		Ok(Id3v2Header {
			version,
			revision: minor,
			flags: flags_parsed,
			size,
		})
	}

	/// Encode the header
	///
	/// # Errors
	///
	/// * `size` doesn't fit in a synchsafe integer (>= 2^28)
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v2::{Id3v2Header, Id3v2TagFlags, Id3v2Version};
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// let header = Id3v2Header {
	/// 	version: Id3v2Version::V4,
	/// 	revision: 0,
	/// 	flags: Id3v2TagFlags::default(),
	/// 	size: 257,
	/// };
	///
	/// let bytes = header.encode()?;
	/// assert_eq!(bytes, [b'I', b'D', b'3', 4, 0, 0, 0, 0, 0x02, 0x01]);
	/// assert_eq!(Id3v2Header::parse(&bytes)?, header);
	/// # Ok(()) }
	/// ```
	pub fn encode(&self) -> Result<[u8; 10]> {
		self.encode_with_marker(b"ID3")
	}

	/// Encode the footer, which mirrors the header with a `"3DI"` marker
	pub(crate) fn encode_footer(&self) -> Result<[u8; 10]> {
		self.encode_with_marker(b"3DI")
	}

	fn encode_with_marker(&self, marker: &[u8; 3]) -> Result<[u8; 10]> {
		let mut writer = ByteWriter::new();
		writer.write_fixed(marker);
		writer.write_u8(self.version.major());
		writer.write_u8(self.revision);
		writer.write_u8(self.flags.as_byte(self.version));
		writer.write_synchsafe_u32(self.size)?;

		let mut header = [0; 10];
		header.copy_from_slice(&writer.into_inner());
		Ok(header)
	}

	/// The total size of the tag, including the header and footer
	pub fn full_tag_size(&self) -> u32 {
		self.size + Self::SIZE + if self.flags.footer { Self::SIZE } else { 0 }
	}
}
