//! Canonical, version independent field names and values

use crate::error::{ErrorKind, TaggerError};

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

macro_rules! fields {
	($($(#[$meta:meta])* $variant:ident => $name:literal),+ $(,)?) => {
		/// A canonical field name
		///
		/// Each field maps to a fixed set of frames in ID3v2, and to a fixed position in ID3v1
		/// if the format has room for it.
		#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum Field {
			$($(#[$meta])* $variant),+
		}

		impl Field {
			/// Every field, in declaration order
			pub const ALL: &'static [Field] = &[$(Field::$variant),+];

			/// The canonical name of the field
			///
			/// # Examples
			///
			/// ```rust
			/// use mp3_tagger::field::Field;
			///
			/// assert_eq!(Field::Song.as_str(), "song");
			/// ```
			pub fn as_str(self) -> &'static str {
				match self {
					$(Field::$variant => $name),+
				}
			}
		}

		impl FromStr for Field {
			type Err = TaggerError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($name => Ok(Field::$variant),)+
					_ => Err(TaggerError::new(ErrorKind::UnknownField(s.to_owned()))),
				}
			}
		}
	};
}

fields! {
	/// The performing artist (`TPE1`)
	Artist => "artist",
	/// The band or orchestra (`TPE2`)
	Band => "band",
	/// The album title (`TALB`)
	Album => "album",
	/// The song title (`TIT2`)
	Song => "song",
	/// The track number (`TRCK`)
	Track => "track",
	/// A comment (`COMM`)
	Comment => "comment",
	/// The recording year (`TYER`/`TDRC`)
	Year => "year",
	/// The genre (`TCON`)
	Genre => "genre",
	/// The composer (`TCOM`)
	Composer => "composer",
	/// The copyright message (`TCOP`)
	Copyright => "copyright",
	/// A user defined URL (`WXXX`)
	Url => "url",
	/// The publisher (`TPUB`)
	Publisher => "publisher",
}

impl Display for Field {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The value of a field
///
/// Track numbers decode to [`FieldValue::Number`] when they can be parsed, everything else is text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
	/// A text value
	Text(String),
	/// A numeric value
	Number(u32),
}

impl FieldValue {
	/// The value as text, formatting numbers as needed
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::field::FieldValue;
	///
	/// assert_eq!(FieldValue::Number(3).as_text(), "3");
	/// assert_eq!(FieldValue::from("Prowler").as_text(), "Prowler");
	/// ```
	pub fn as_text(&self) -> Cow<'_, str> {
		match self {
			FieldValue::Text(text) => Cow::Borrowed(text),
			FieldValue::Number(number) => Cow::Owned(number.to_string()),
		}
	}

	/// The value as a number, parsing text as needed
	pub fn as_number(&self) -> Option<u32> {
		match self {
			FieldValue::Text(text) => text.trim().parse().ok(),
			FieldValue::Number(number) => Some(*number),
		}
	}
}

impl Display for FieldValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FieldValue::Text(text) => f.write_str(text),
			FieldValue::Number(number) => write!(f, "{number}"),
		}
	}
}

impl From<String> for FieldValue {
	fn from(input: String) -> Self {
		FieldValue::Text(input)
	}
}

impl From<&str> for FieldValue {
	fn from(input: &str) -> Self {
		FieldValue::Text(input.to_owned())
	}
}

impl From<u32> for FieldValue {
	fn from(input: u32) -> Self {
		FieldValue::Number(input)
	}
}

/// A set of fields and their values
pub type FieldMap = BTreeMap<Field, FieldValue>;

/// The decoded contents of every tag in a file
///
/// A tag that isn't present in the file is `None`. Within a tag, fields that aren't present are
/// simply missing from the map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSnapshot {
	/// The fields of the ID3v1 tag
	pub id3v1: Option<FieldMap>,
	/// The fields of the ID3v2 tag
	pub id3v2: Option<FieldMap>,
}
