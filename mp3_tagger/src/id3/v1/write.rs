use super::constants::{ID3V1_TAG_MARKER, NO_GENRE};
use super::tag::Id3v1Tag;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::util::text::latin1_encode;

impl Id3v1Tag {
	/// Encode the tag into its 128 byte form
	///
	/// Text fields are truncated to their maximum sizes. The comment is only cut to 28 bytes
	/// when a track number is present.
	///
	/// # Errors
	///
	/// * A field contains characters outside of Latin-1, and [`WriteOptions::lossy_text_encoding`]
	///   isn't set
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::WriteOptions;
	/// use mp3_tagger::id3::v1::Id3v1Tag;
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// let mut tag = Id3v1Tag::new();
	/// tag.set_artist(String::from("Iron Maiden"));
	///
	/// let encoded = tag.encode(WriteOptions::default())?;
	/// assert_eq!(&encoded[..3], b"TAG");
	/// assert_eq!(&encoded[33..44], b"Iron Maiden");
	/// # Ok(()) }
	/// ```
	pub fn encode(&self, write_options: WriteOptions) -> Result<[u8; 128]> {
		fn write_string(
			dest: &mut [u8],
			value: Option<&str>,
			write_options: WriteOptions,
		) -> Result<()> {
			let Some(value) = value else {
				return Ok(());
			};

			for (slot, b) in dest
				.iter_mut()
				.zip(latin1_encode(value, write_options.lossy_text_encoding))
			{
				*slot = b?;
			}

			Ok(())
		}

		let mut tag = [0; 128];

		tag[..3].copy_from_slice(&ID3V1_TAG_MARKER);
		write_string(&mut tag[3..33], self.title(), write_options)?;
		write_string(&mut tag[33..63], self.artist(), write_options)?;
		write_string(&mut tag[63..93], self.album(), write_options)?;
		write_string(&mut tag[93..97], self.year(), write_options)?;

		match self.track_number {
			Some(track_number) if track_number != 0 => {
				write_string(&mut tag[97..125], self.comment(), write_options)?;
				tag[126] = track_number;
			},
			_ => write_string(&mut tag[97..127], self.comment(), write_options)?,
		}

		tag[127] = self.genre.unwrap_or(NO_GENRE);

		Ok(tag)
	}
}

#[cfg(test)]
mod tests {
	use crate::config::{ParsingMode, WriteOptions};
	use crate::error::ErrorKind;
	use crate::id3::v1::Id3v1Tag;

	fn full_tag() -> Id3v1Tag {
		Id3v1Tag {
			title: Some(String::from("Prowler")),
			artist: Some(String::from("Iron Maiden")),
			album: Some(String::from("Iron Maiden")),
			year: Some(String::from("1980")),
			comment: Some(String::from("Comment")),
			track_number: Some(1),
			genre: Some(9),
		}
	}

	#[test_log::test]
	fn encode_then_parse() {
		let tag = full_tag();
		let encoded = tag.encode(WriteOptions::default()).unwrap();
		assert_eq!(
			Id3v1Tag::parse(&encoded, ParsingMode::Strict).unwrap(),
			tag
		);

		let mut no_track = full_tag();
		no_track.track_number = None;
		no_track.comment = Some("c".repeat(30));
		let encoded = no_track.encode(WriteOptions::default()).unwrap();
		assert_eq!(&encoded[97..127], "c".repeat(30).as_bytes());
		assert_eq!(
			Id3v1Tag::parse(&encoded, ParsingMode::Strict).unwrap(),
			no_track
		);
	}

	#[test_log::test]
	fn fields_are_truncated() {
		let mut tag = Id3v1Tag::new();
		tag.set_title("t".repeat(40));
		tag.set_comment("c".repeat(40));
		tag.track_number = Some(3);

		let encoded = tag.encode(WriteOptions::default()).unwrap();
		let parsed = Id3v1Tag::parse(&encoded, ParsingMode::Strict).unwrap();
		assert_eq!(parsed.title(), Some("t".repeat(30).as_str()));
		assert_eq!(parsed.comment(), Some("c".repeat(28).as_str()));
		assert_eq!(parsed.track_number, Some(3));
	}

	#[test_log::test]
	fn empty_tag_has_no_genre() {
		let encoded = Id3v1Tag::new().encode(WriteOptions::default()).unwrap();
		assert_eq!(&encoded[..3], b"TAG");
		assert!(encoded[3..127].iter().all(|b| *b == 0));
		assert_eq!(encoded[127], 0xFF);

		assert!(
			Id3v1Tag::parse(&encoded, ParsingMode::Strict)
				.unwrap()
				.is_empty()
		);
	}

	#[test_log::test]
	fn non_latin1_text() {
		let mut tag = Id3v1Tag::new();
		tag.set_artist(String::from("\u{4e00}\u{4e01}"));

		let err = tag.encode(WriteOptions::default()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::TextEncode(_)));

		let encoded = tag
			.encode(WriteOptions::default().lossy_text_encoding(true))
			.unwrap();
		assert_eq!(&encoded[33..36], b"??\0");
	}
}
