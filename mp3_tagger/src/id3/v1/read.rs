use super::constants::{ID3V1_TAG_MARKER, NO_GENRE};
use super::tag::Id3v1Tag;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::err;
use crate::util::text::latin1_decode;

impl Id3v1Tag {
	/// Decode the 128 bytes of an ID3v1 tag
	///
	/// # Errors
	///
	/// * The data doesn't start with `"TAG"`
	/// * [`ParsingMode::Strict`] and the year contains anything other than ASCII digits
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::ParsingMode;
	/// use mp3_tagger::id3::v1::Id3v1Tag;
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// let mut data = [0; 128];
	/// data[..3].copy_from_slice(b"TAG");
	/// data[3..10].copy_from_slice(b"Prowler");
	/// data[127] = 0xFF;
	///
	/// let tag = Id3v1Tag::parse(&data, ParsingMode::BestAttempt)?;
	/// assert_eq!(tag.title(), Some("Prowler"));
	/// assert_eq!(tag.genre, None);
	/// # Ok(()) }
	/// ```
	pub fn parse(data: &[u8; 128], parse_mode: ParsingMode) -> Result<Self> {
		let mut tag = Self::new();

		if data[..3] != ID3V1_TAG_MARKER {
			err!(FakeTag);
		}

		let data = &data[3..];

		tag.title = decode_text(&data[..30]);
		tag.artist = decode_text(&data[30..60]);
		tag.album = decode_text(&data[60..90]);

		tag.year = decode_text(&data[90..94]);
		if let Some(year) = &tag.year {
			if !year.bytes().all(|b| b.is_ascii_digit()) {
				if parse_mode == ParsingMode::Strict {
					err!(TextDecode(
						"ID3v1 year field contains non-ASCII digit characters"
					));
				}

				log::warn!("ID3v1 year field contains non-ASCII digit characters");
			}
		}

		// Determine the range of the comment (30 bytes for ID3v1 and 28 for ID3v1.1)
		// We check for the null terminator 28 bytes in, and for a non-zero track number after it.
		let range = if data[122] == 0 && data[123] != 0 {
			tag.track_number = Some(data[123]);

			94_usize..122
		} else {
			94..124
		};

		tag.comment = decode_text(&data[range]);

		if data[124] != NO_GENRE {
			tag.genre = Some(data[124]);
		}

		Ok(tag)
	}
}

fn decode_text(data: &[u8]) -> Option<String> {
	let mut first_null_pos = data.len();
	if let Some(null_pos) = data.iter().position(|&b| b == 0) {
		if null_pos == 0 {
			return None;
		}

		if data[null_pos..].iter().any(|b| *b != b'\0') {
			log::warn!("ID3v1 text field contains trailing junk, skipping");
		}

		first_null_pos = null_pos;
	}

	Some(latin1_decode(&data[..first_null_pos]))
}
