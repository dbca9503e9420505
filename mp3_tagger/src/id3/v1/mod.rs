//! ID3v1 items
//!
//! # ID3v1 notes
//!
//! See also: [`Id3v1Tag`]
//!
//! ## Genres
//!
//! ID3v1 stores the genre in a single byte, which is an index into [`GENRES`].
//! Indices outside of the list decode to [`UNKNOWN_GENRE`], while `0xFF` marks an absent genre.
//!
//! ## Track Numbers
//!
//! ID3v1.1 steals the last two bytes of the comment for a track number. A track is only present
//! if the 29th comment byte is `0x00` and the 30th isn't.

pub(crate) mod constants;
pub(crate) mod read;
pub(crate) mod tag;
pub(crate) mod write;

pub use constants::{GENRES, UNKNOWN_GENRE, genre_index, genre_name};
pub use tag::Id3v1Tag;

/// Whether the last 128 bytes of `data` hold an ID3v1 tag
///
/// # Examples
///
/// ```rust
/// use mp3_tagger::id3::v1;
///
/// let mut data = vec![0xFF; 64];
/// assert!(!v1::detect(&data));
///
/// let mut tag = [0; 128];
/// tag[..3].copy_from_slice(b"TAG");
/// data.extend_from_slice(&tag);
/// assert!(v1::detect(&data));
/// ```
pub fn detect(data: &[u8]) -> bool {
	super::find_id3v1(data).0.is_some()
}
