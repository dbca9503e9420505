//! Text encodings used by ID3v2 frames

use crate::error::{ErrorKind, Result, TaggerError};
use crate::macros::err;

/// Errors that can occur while encoding text
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TextEncodingError {
	encoding: TextEncoding,
	valid_up_to: usize,
}

impl TextEncodingError {
	/// The target text encoding
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// The character index in the provided string up to which the encoding was valid
	pub fn valid_up_to(&self) -> usize {
		self.valid_up_to
	}
}

impl core::fmt::Display for TextEncodingError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(
			f,
			"invalid {} sequence from index {}",
			self.encoding.name(),
			self.valid_up_to
		)
	}
}

impl core::error::Error for TextEncodingError {}

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::text::TextEncoding;
	///
	/// assert_eq!(TextEncoding::from_u8(3), Some(TextEncoding::UTF8));
	/// assert_eq!(TextEncoding::from_u8(4), None);
	/// ```
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	fn name(self) -> &'static str {
		match self {
			TextEncoding::Latin1 => "Latin-1",
			TextEncoding::UTF16 => "UTF-16",
			TextEncoding::UTF16BE => "UTF-16 BE",
			TextEncoding::UTF8 => "UTF-8",
		}
	}

	/// The string terminator for this encoding
	///
	/// Single-byte encodings use a single `0x00`, UTF-16 variants use `0x00 0x00`.
	pub fn terminator(self) -> &'static [u8] {
		match self {
			TextEncoding::Latin1 | TextEncoding::UTF8 => &[0],
			TextEncoding::UTF16 | TextEncoding::UTF16BE => &[0, 0],
		}
	}

	/// Whether every character of `text` can be represented in this encoding
	pub fn can_encode(self, text: &str) -> bool {
		match self {
			TextEncoding::Latin1 => Self::verify_latin1(text),
			_ => true,
		}
	}

	pub(crate) fn verify_latin1(text: &str) -> bool {
		text.chars().all(|c| c as u32 <= 255)
	}

	/// Encode `text`
	///
	/// [`TextEncoding::UTF16`] is written little endian, with a byte order mark.
	///
	/// # Errors
	///
	/// * `text` contains characters that can't be represented in Latin-1, and `lossy` is not set
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::text::TextEncoding;
	///
	/// # fn main() -> Result<(), mp3_tagger::text::TextEncodingError> {
	/// let encoded = TextEncoding::UTF16.encode("hi", false, false)?;
	/// assert_eq!(encoded, [0xFF, 0xFE, b'h', 0, b'i', 0]);
	///
	/// assert!(TextEncoding::Latin1.encode("\u{4e00}", false, false).is_err());
	/// # Ok(()) }
	/// ```
	pub fn encode(
		self,
		text: &str,
		terminated: bool,
		lossy: bool,
	) -> std::result::Result<Vec<u8>, TextEncodingError> {
		let mut out = match self {
			TextEncoding::Latin1 => {
				latin1_encode(text, lossy).collect::<std::result::Result<Vec<u8>, _>>()?
			},
			TextEncoding::UTF16 => utf16_encode(text, u16::to_le_bytes, true),
			TextEncoding::UTF16BE => utf16_encode(text, u16::to_be_bytes, false),
			TextEncoding::UTF8 => text.as_bytes().to_vec(),
		};

		if terminated {
			out.extend_from_slice(self.terminator());
		}

		Ok(out)
	}

	/// Decode `bytes`, which should not include a terminator
	///
	/// Trailing null characters are trimmed.
	///
	/// # Errors
	///
	/// * `bytes` is not a valid sequence in this encoding
	///
	/// See [`TextEncoding::decode_lossy`] for a fallible-free alternative.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::text::TextEncoding;
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// let text = TextEncoding::UTF16BE.decode(&[0, b'h', 0, b'i'])?;
	/// assert_eq!(text, "hi");
	/// # Ok(()) }
	/// ```
	pub fn decode(self, bytes: &[u8]) -> Result<String> {
		if bytes.is_empty() {
			return Ok(String::new());
		}

		let mut text = match self {
			TextEncoding::Latin1 => latin1_decode(bytes),
			TextEncoding::UTF16 => {
				if bytes.len() < 2 {
					err!(TextDecode("UTF-16 string has an invalid length (< 2)"));
				}

				match bytes {
					[0xFE, 0xFF, rest @ ..] => utf16_decode_bytes(rest, u16::from_be_bytes)?,
					[0xFF, 0xFE, rest @ ..] => utf16_decode_bytes(rest, u16::from_le_bytes)?,
					_ => err!(TextDecode("UTF-16 string has an invalid byte order mark")),
				}
			},
			TextEncoding::UTF16BE => utf16_decode_bytes(bytes, u16::from_be_bytes)?,
			TextEncoding::UTF8 => String::from_utf8(bytes.to_vec())
				.map_err(|_| TaggerError::new(ErrorKind::TextDecode("Expected a UTF-8 string")))?,
		};

		trim_end_nulls(&mut text);
		Ok(text)
	}

	/// Decode `bytes`, falling back to Latin-1 if they are invalid in this encoding
	///
	/// Latin-1 maps every byte to a character, so no input is ever dropped.
	pub fn decode_lossy(self, bytes: &[u8]) -> String {
		match self.decode(bytes) {
			Ok(text) => text,
			Err(e) => {
				log::warn!("{e}, falling back to Latin-1");
				let mut text = latin1_decode(bytes);
				trim_end_nulls(&mut text);
				text
			},
		}
	}
}

/// Split `bytes` at the first terminator for `encoding`
///
/// UTF-16 terminators are only matched on code unit boundaries. Returns the text bytes and the
/// number of bytes consumed, including the terminator. If no terminator is found, the entire
/// input is taken as text.
pub(crate) fn split_at_terminator(bytes: &[u8], encoding: TextEncoding) -> (&[u8], usize) {
	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => match bytes.iter().position(|b| *b == 0) {
			Some(pos) => (&bytes[..pos], pos + 1),
			None => (bytes, bytes.len()),
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => {
			match bytes.chunks_exact(2).position(|unit| unit == [0, 0]) {
				Some(pos) => (&bytes[..pos * 2], pos * 2 + 2),
				None => (bytes, bytes.len()),
			}
		},
	}
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	bytes.iter().map(|c| char::from(*c)).collect::<String>()
}

pub(crate) fn latin1_encode(
	s: &str,
	lossy: bool,
) -> impl Iterator<Item = std::result::Result<u8, TextEncodingError>> {
	s.chars().enumerate().map(move |(index, c)| {
		if (c as u32) <= 255 {
			Ok(c as u8)
		} else if lossy {
			Ok(b'?')
		} else {
			Err(TextEncodingError {
				encoding: TextEncoding::Latin1,
				valid_up_to: index,
			})
		}
	})
}

fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.len() % 2 != 0 {
		err!(TextDecode("UTF-16 string has an odd length"));
	}

	let units: Vec<u16> = bytes
		.chunks_exact(2)
		.map(|c| endianness([c[0], c[1]]))
		.collect();

	String::from_utf16(&units)
		.map_err(|_| TaggerError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))
}

fn utf16_encode(text: &str, endianness: fn(u16) -> [u8; 2], bom: bool) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	encoded
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}
