//! Contains the errors that can arise within mp3_tagger
//!
//! The primary error is [`TaggerError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::field::Field;
use crate::id3::TagType;
pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, TaggerError>`
pub type Result<T> = std::result::Result<T, TaggerError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Tag data related errors
	/// Attempted to read past the end of the available bytes
	OutOfBounds,
	/// A size field is malformed
	///
	/// This occurs when a synchsafe integer has its most significant bit set in any of its bytes,
	/// or when a declared size can't fit within the bounds of the data that contains it.
	MalformedSize,
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Arises when a tag is expected, but its marker isn't found
	FakeTag,

	// Text related errors
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(TextEncodingError),

	// Field related errors
	/// Arises when parsing an unknown field name
	UnknownField(String),
	/// Arises when a field is written to a tag that has no place for it
	UnsupportedField {
		/// The field being written
		field: Field,
		/// The tag that can't hold it
		tag: TagType,
	},
	/// Arises when a field value can't be represented in the target tag
	BadFieldValue {
		/// The field being written
		field: Field,
		/// Why the value was rejected
		reason: &'static str,
	},

	/// Errors that arise while reading/writing ID3v2 tags
	Id3v2(Id3v2Error),

	// Conversions for external errors
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
	/// This should **never** be encountered
	Infallible(std::convert::Infallible),
}

/// The types of errors that can occur while interacting with ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// Arises when an invalid ID3v2 version is found
	BadId3v2Version(u8, u8),
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
	/// As such, it is recommended to ignore the tag entirely.
	V2Compression,
	/// Arises when an extended header has an invalid size
	BadExtendedHeaderSize,

	// Frame
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	/// or if the ID is too short/long.
	BadFrameId(Vec<u8>),
	/// Arises when a frame doesn't have enough data
	BadFrameLength,
	/// Arises when a comment's language is not made of 3 ASCII letters
	InvalidLanguage([u8; 3]),

	// Writing
	/// Arises when a frame's content can't be described by the size field of the tag's version
	FrameTooLarge {
		/// The frame ID
		id: String,
		/// The size of the encoded frame content
		size: usize,
	},
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			// Header
			Self::BadId3v2Version(major, minor) => write!(
				f,
				"Found an invalid version (v{major}.{minor}), expected any major revision in: (2, \
				 3, 4)"
			),
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},

			// Frame
			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			Self::InvalidLanguage(language) => write!(
				f,
				"Invalid frame language found: {language:?} (expected 3 ascii characters)"
			),

			// Writing
			Self::FrameTooLarge { id, size } => write!(
				f,
				"Frame `{id}` is too large to be written ({size} bytes)"
			),
		}
	}
}

/// An error that arises while interacting with an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// Errors that could occur within mp3_tagger
pub struct TaggerError {
	pub(crate) kind: ErrorKind,
}

impl TaggerError {
	/// Create a `TaggerError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::error::{ErrorKind, TaggerError};
	///
	/// let out_of_bounds = TaggerError::new(ErrorKind::OutOfBounds);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::error::{ErrorKind, TaggerError};
	///
	/// let malformed = TaggerError::new(ErrorKind::MalformedSize);
	/// if let ErrorKind::MalformedSize = malformed.kind() {
	/// 	println!("Bad size!");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for TaggerError {}

impl Debug for TaggerError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for TaggerError {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<TextEncodingError> for TaggerError {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for TaggerError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<TryReserveError> for TaggerError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for TaggerError {
	fn from(input: std::convert::Infallible) -> Self {
		Self {
			kind: ErrorKind::Infallible(input),
		}
	}
}

impl Display for TaggerError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			ErrorKind::OutOfBounds => write!(f, "Attempted to read past the end of the tag data"),
			ErrorKind::MalformedSize => write!(f, "Encountered a malformed size field"),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::FakeTag => write!(f, "Reading: Expected a tag, found invalid data"),

			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(ref err) => write!(f, "Text encoding: {err}"),

			ErrorKind::UnknownField(ref name) => write!(f, "Unknown field name `{name}`"),
			ErrorKind::UnsupportedField { field, tag } => {
				write!(f, "Field `{field}` can't be written to {tag:?} tags")
			},
			ErrorKind::BadFieldValue { field, reason } => {
				write!(f, "Invalid value for field `{field}`: {reason}")
			},

			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),

			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),
			ErrorKind::Infallible(_) => write!(f, "A expected condition was not upheld"),
		}
	}
}
