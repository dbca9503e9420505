use crate::id3::v2::Id3v2Version;

/// Options to control how mp3_tagger writes to a file
///
/// This is best used as an application global config that gets set once.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: u32,
	pub(crate) minimum_padding: u32,
	pub(crate) lossy_text_encoding: bool,
	pub(crate) new_tag_version: Id3v2Version,
}

impl WriteOptions {
	/// Default preferred padding size in bytes
	pub const DEFAULT_PREFERRED_PADDING: u32 = 1024;
	/// Default minimum padding size in bytes
	pub const DEFAULT_MINIMUM_PADDING: u32 = 10;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: Self::DEFAULT_PREFERRED_PADDING,
			minimum_padding: Self::DEFAULT_MINIMUM_PADDING,
			lossy_text_encoding: false,
			new_tag_version: Id3v2Version::V4,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// This is the amount of padding written after an ID3v2 tag whenever the tag can't be
	/// rewritten in place, and the audio has to be moved anyway.
	///
	/// NOTES:
	///
	/// * Tags with a footer never carry padding
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::WriteOptions;
	///
	/// // I really don't want my files rewritten, so I'll double the padding size!
	/// let options = WriteOptions::new().preferred_padding(2048);
	///
	/// // ...Or I don't want padding under any circumstances!
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		self.preferred_padding = preferred_padding;
		self
	}

	/// Set the minimum padding size in bytes
	///
	/// An existing ID3v2 tag is only overwritten in place if the new tag, plus this many bytes,
	/// fits in the space the old tag occupied. Otherwise, the audio is moved.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::WriteOptions;
	///
	/// // Reuse the existing space whenever possible
	/// let options = WriteOptions::new().minimum_padding(0);
	/// ```
	pub fn minimum_padding(mut self, minimum_padding: u32) -> Self {
		self.minimum_padding = minimum_padding;
		self
	}

	/// Whether to replace characters that can't be encoded
	///
	/// ID3v1 tags can only hold Latin-1 text. By default, writing a field with any other characters
	/// will fail. With this enabled, such characters are replaced with `?` instead.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::WriteOptions;
	///
	/// let options = WriteOptions::new().lossy_text_encoding(true);
	/// ```
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}

	/// The version to use when an ID3v2 tag is created from nothing
	///
	/// Existing tags are always written back in the version they were read as.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::WriteOptions;
	/// use mp3_tagger::id3::v2::Id3v2Version;
	///
	/// let options = WriteOptions::new().new_tag_version(Id3v2Version::V3);
	/// ```
	pub fn new_tag_version(mut self, new_tag_version: Id3v2Version) -> Self {
		self.new_tag_version = new_tag_version;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: 1024,
	/// 	minimum_padding: 10,
	/// 	lossy_text_encoding: false,
	/// 	new_tag_version: Id3v2Version::V4,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
