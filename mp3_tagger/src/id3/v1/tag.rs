use crate::id3::v1::constants::genre_name;

macro_rules! impl_accessor {
	($($name:ident,)+) => {
		paste::paste! {
			$(
				#[doc = "Returns the " $name ", if one exists"]
				pub fn $name(&self) -> Option<&str> {
					self.$name.as_deref()
				}

				#[doc = "Sets the " $name]
				pub fn [<set_ $name>](&mut self, value: String) {
					self.$name = Some(value)
				}

				#[doc = "Removes the " $name]
				pub fn [<remove_ $name>](&mut self) {
					self.$name = None
				}
			)+
		}
	}
}

/// An ID3v1 tag
///
/// ID3v1 is a severely limited format, with each field being incredibly small in size.
/// All fields have been commented with their maximum sizes and any other additional
/// restrictions.
///
/// Attempting to write a field greater than the maximum size will **not** error, it will just
/// be shrunk.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	/// Track title, 30 bytes max
	pub title: Option<String>,
	/// Track artist, 30 bytes max
	pub artist: Option<String>,
	/// Album title, 30 bytes max
	pub album: Option<String>,
	/// Release year, 4 bytes max
	pub year: Option<String>,
	/// A short comment
	///
	/// A V1 tag may have been read, which limits this field to 30 bytes.
	/// A V1.1 tag, however, only has 28 bytes available.
	///
	/// The 30 byte layout is only written when there is no track number.
	pub comment: Option<String>,
	/// The track number, 1 byte max
	///
	/// The track number **cannot** be 0, as a null byte in its place is what marks a V1 tag
	/// with a full 30 byte comment.
	pub track_number: Option<u8>,
	/// The track's genre, 1 byte max
	///
	/// ID3v1 has a predefined set of genres, see [`GENRES`](crate::id3::v1::GENRES).
	/// This byte should be an index to a genre.
	pub genre: Option<u8>,
}

impl Id3v1Tag {
	impl_accessor!(title, artist, album, year, comment,);

	/// Create a new empty `Id3v1Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v1::Id3v1Tag;
	///
	/// let id3v1_tag = Id3v1Tag::new();
	/// assert!(id3v1_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether every field is absent
	pub fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.artist.is_none()
			&& self.album.is_none()
			&& self.year.is_none()
			&& self.comment.is_none()
			&& self.track_number.is_none()
			&& self.genre.is_none()
	}

	/// The name of the genre, if a genre byte is present
	///
	/// Bytes outside of [`GENRES`](crate::id3::v1::GENRES) produce
	/// [`UNKNOWN_GENRE`](crate::id3::v1::UNKNOWN_GENRE).
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v1::{Id3v1Tag, UNKNOWN_GENRE};
	///
	/// let mut tag = Id3v1Tag::new();
	/// assert_eq!(tag.genre_name(), None);
	///
	/// tag.genre = Some(17);
	/// assert_eq!(tag.genre_name(), Some("Rock"));
	///
	/// tag.genre = Some(230);
	/// assert_eq!(tag.genre_name(), Some(UNKNOWN_GENRE));
	/// ```
	pub fn genre_name(&self) -> Option<&'static str> {
		self.genre.map(genre_name)
	}
}
