use super::frame::Frame;
use super::header::{Id3v2TagFlags, Id3v2Version};

/// An `ID3v2` tag
///
/// ## Frame order
///
/// Frames are kept in the order they were read. Replacing a frame keeps its position, new frames
/// are appended.
///
/// ## Versions
///
/// A tag is always written in the version it was read as. Frames are not converted between
/// versions, so a tag may hold ID3v2.2 IDs (`TT2`) alongside ID3v2.3/ID3v2.4 IDs. These are written
/// with a null byte filling out the fourth character.
///
/// ## Unsupported frames
///
/// Compressed and encrypted frames can't be interpreted, but are preserved.
/// See [`Frame::is_opaque`].
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Id3v2Tag {
	version: Id3v2Version,
	revision: u8,
	flags: Id3v2TagFlags,
	pub(crate) frames: Vec<Frame>,
}

impl Id3v2Tag {
	/// Create a new empty `Id3v2Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v2::{Id3v2Tag, Id3v2Version};
	///
	/// let tag = Id3v2Tag::new(Id3v2Version::V4);
	/// assert!(tag.is_empty());
	/// ```
	pub fn new(version: Id3v2Version) -> Self {
		Self {
			version,
			revision: 0,
			flags: Id3v2TagFlags::default(),
			frames: Vec::new(),
		}
	}

	pub(crate) fn from_parts(
		version: Id3v2Version,
		revision: u8,
		flags: Id3v2TagFlags,
		frames: Vec<Frame>,
	) -> Self {
		Self {
			version,
			revision,
			flags,
			frames,
		}
	}

	/// The version the tag was read as, and will be written as
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// The minor revision the tag was read as
	///
	/// This is written back unchanged. New tags use revision `0`.
	pub fn revision(&self) -> u8 {
		self.revision
	}

	/// Returns the [`Id3v2TagFlags`]
	pub fn flags(&self) -> &Id3v2TagFlags {
		&self.flags
	}

	/// Set the tag's flags
	pub fn set_flags(&mut self, flags: Id3v2TagFlags) {
		self.flags = flags;
	}

	/// Gets the first frame with the ID `id`
	pub fn get(&self, id: &str) -> Option<&Frame> {
		self.frames.iter().find(|f| f.id().as_str() == id)
	}

	/// Gets the first frame, in file order, with any of the IDs in `ids`
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v2::{Frame, FrameContent, FrameId, Id3v2Tag, Id3v2Version};
	/// use mp3_tagger::text::TextEncoding;
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// let mut tag = Id3v2Tag::new(Id3v2Version::V3);
	///
	/// let content = FrameContent::Text {
	/// 	encoding: TextEncoding::Latin1,
	/// 	values: vec![String::from("2001")],
	/// };
	/// tag.insert(Frame::new(FrameId::new("TORY")?, &content, Id3v2Version::V3)?);
	///
	/// let frame = tag.get_any(&["TYER", "TORY"]);
	/// assert_eq!(frame.map(|f| f.id().as_str()), Some("TORY"));
	/// # Ok(()) }
	/// ```
	pub fn get_any(&self, ids: &[&str]) -> Option<&Frame> {
		self.frames
			.iter()
			.find(|f| ids.contains(&f.id().as_str()))
	}

	/// Gets the first frame, in file order, with any of the IDs in `ids` that isn't opaque
	///
	/// See [`Frame::is_opaque`].
	pub fn get_readable(&self, ids: &[&str]) -> Option<&Frame> {
		self.frames
			.iter()
			.find(|f| !f.is_opaque() && ids.contains(&f.id().as_str()))
	}

	/// Inserts a [`Frame`]
	///
	/// This will replace the first frame with the same ID, keeping its position. Otherwise the frame
	/// is appended.
	///
	/// Returns the replaced frame, if any.
	pub fn insert(&mut self, frame: Frame) -> Option<Frame> {
		match self.frames.iter_mut().find(|f| f.id() == frame.id()) {
			Some(existing) => Some(std::mem::replace(existing, frame)),
			None => {
				self.frames.push(frame);
				None
			},
		}
	}

	/// Removes every frame with any of the IDs in `ids`
	///
	/// Returns the removed frames.
	pub fn remove(&mut self, ids: &[&str]) -> Vec<Frame> {
		let mut removed = Vec::new();
		let mut kept = Vec::with_capacity(self.frames.len());

		for frame in self.frames.drain(..) {
			if ids.contains(&frame.id().as_str()) {
				removed.push(frame);
			} else {
				kept.push(frame);
			}
		}

		self.frames = kept;
		removed
	}

	/// Returns an iterator over the frames, in file order
	pub fn iter(&self) -> impl Iterator<Item = &Frame> {
		self.frames.iter()
	}

	/// The number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

impl<'a> IntoIterator for &'a Id3v2Tag {
	type Item = &'a Frame;
	type IntoIter = std::slice::Iter<'a, Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.iter()
	}
}
