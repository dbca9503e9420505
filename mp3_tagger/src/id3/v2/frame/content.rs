use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::macros::id3v2_err;
use crate::id3::v2::util::mappings::{is_comment, is_text, is_user_url};
use crate::util::cursor::ByteCursor;
use crate::util::text::{TextEncoding, latin1_decode, split_at_terminator};

/// The decoded content of a frame
///
/// Only the frames that can back a [`Field`](crate::field::Field) are interpreted, everything
/// else is [`FrameContent::Binary`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameContent {
	/// A text information frame (`T*`, except `TXXX`)
	///
	/// ID3v2.4 allows multiple null separated values.
	Text {
		/// The encoding of the values
		encoding: TextEncoding,
		/// The values, in order
		values: Vec<String>,
	},
	/// A comment frame (`COMM`)
	Comment {
		/// The encoding of the description and comment text
		encoding: TextEncoding,
		/// ISO-639-2 language code (3 bytes)
		language: [u8; 3],
		/// Content description
		description: String,
		/// The comment text
		text: String,
	},
	/// A user defined URL frame (`WXXX`)
	UserUrl {
		/// The encoding of the description
		encoding: TextEncoding,
		/// Content description
		description: String,
		/// The URL, always Latin-1
		url: String,
	},
	/// Anything else
	Binary(Vec<u8>),
}

impl FrameContent {
	/// Interpret the data of the frame `id`
	///
	/// NOTE: This expects the frame header, and anything covered by the frame flags, to have
	///       already been removed.
	///
	/// Unknown text encodings are treated as Latin-1.
	///
	/// # Errors
	///
	/// * The data is too short to hold a comment's language
	pub fn parse(id: &str, data: &[u8]) -> Result<Self> {
		if !(is_text(id) || is_comment(id) || is_user_url(id)) {
			return Ok(Self::Binary(data.to_vec()));
		}

		let mut cursor = ByteCursor::new(data);
		let Ok(encoding_byte) = cursor.read_u8() else {
			// An empty frame, there is nothing to decode
			return Ok(Self::Text {
				encoding: TextEncoding::Latin1,
				values: Vec::new(),
			});
		};

		let encoding = match TextEncoding::from_u8(encoding_byte) {
			Some(encoding) => encoding,
			None => {
				log::warn!(
					"Frame `{id}` has an invalid text encoding ({encoding_byte}), treating it as Latin-1"
				);
				TextEncoding::Latin1
			},
		};

		if is_comment(id) {
			let language = cursor.read_array::<3>()?;
			let description = cursor.read_cstring(encoding);
			let text = encoding.decode_lossy(cursor.rest());

			return Ok(Self::Comment {
				encoding,
				language,
				description,
				text,
			});
		}

		if is_user_url(id) {
			let description = cursor.read_cstring(encoding);
			let mut url = latin1_decode(cursor.rest());
			url.truncate(url.trim_end_matches('\0').len());

			return Ok(Self::UserUrl {
				encoding,
				description,
				url,
			});
		}

		Ok(Self::Text {
			encoding,
			values: split_values(cursor.rest(), encoding),
		})
	}

	/// The encoding used for the text of the frame, if any
	pub fn encoding(&self) -> Option<TextEncoding> {
		match self {
			Self::Text { encoding, .. }
			| Self::Comment { encoding, .. }
			| Self::UserUrl { encoding, .. } => Some(*encoding),
			Self::Binary(_) => None,
		}
	}

	/// Convert the content to its byte representation for `version`
	///
	/// NOTE: This does not include a frame header
	///
	/// [`TextEncoding::UTF8`] and [`TextEncoding::UTF16BE`] only exist in ID3v2.4, and are written as
	/// [`TextEncoding::UTF16`] in older versions.
	///
	/// # Errors
	///
	/// * The text can't be represented in the chosen encoding
	/// * The URL of a [`FrameContent::UserUrl`] can't be represented in Latin-1
	/// * The language of a [`FrameContent::Comment`] contains non-alphabetic characters
	pub fn as_bytes(&self, version: Id3v2Version) -> Result<Vec<u8>> {
		match self {
			Self::Text { encoding, values } => {
				let encoding = encoding_for_version(*encoding, version);

				let mut bytes = vec![encoding as u8];
				for (index, value) in values.iter().enumerate() {
					if index > 0 {
						bytes.extend_from_slice(encoding.terminator());
					}

					bytes.extend(encoding.encode(value, false, false)?);
				}

				Ok(bytes)
			},
			Self::Comment {
				encoding,
				language,
				description,
				text,
			} => {
				if language.iter().any(|c| !c.is_ascii_alphabetic()) {
					id3v2_err!(@BAIL InvalidLanguage(*language));
				}

				let encoding = encoding_for_version(*encoding, version);

				let mut bytes = vec![encoding as u8];
				bytes.extend_from_slice(language);
				bytes.extend(encoding.encode(description, true, false)?);
				bytes.extend(encoding.encode(text, false, false)?);

				Ok(bytes)
			},
			Self::UserUrl {
				encoding,
				description,
				url,
			} => {
				let encoding = encoding_for_version(*encoding, version);

				let mut bytes = vec![encoding as u8];
				bytes.extend(encoding.encode(description, true, false)?);
				bytes.extend(TextEncoding::Latin1.encode(url, false, false)?);

				Ok(bytes)
			},
			Self::Binary(data) => Ok(data.clone()),
		}
	}
}

/// The encoding that will actually be written for `encoding` in `version`
pub(crate) fn encoding_for_version(encoding: TextEncoding, version: Id3v2Version) -> TextEncoding {
	match (encoding, version) {
		(TextEncoding::UTF8 | TextEncoding::UTF16BE, Id3v2Version::V2 | Id3v2Version::V3) => {
			log::debug!("{encoding:?} is only supported in ID3v2.4, using UTF-16");
			TextEncoding::UTF16
		},
		_ => encoding,
	}
}

fn split_values(mut bytes: &[u8], encoding: TextEncoding) -> Vec<String> {
	let mut values = Vec::new();

	while !bytes.is_empty() {
		let (text, consumed) = split_at_terminator(bytes, encoding);
		values.push(encoding.decode_lossy(text));
		bytes = &bytes[consumed..];
	}

	// Trailing terminators are padding, not empty values
	while values.len() > 1 && values.last().is_some_and(String::is_empty) {
		values.pop();
	}

	values
}
