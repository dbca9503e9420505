//! Translation between canonical fields and the ID3v1/ID3v2 models

use crate::config::WriteOptions;
use crate::error::{ErrorKind, Result, TaggerError};
use crate::field::{Field, FieldMap, FieldValue};
use crate::id3::TagType;
use crate::id3::v1::{GENRES, Id3v1Tag, genre_index, genre_name};
use crate::id3::v2::frame::content::encoding_for_version;
use crate::id3::v2::util::mappings::frame_ids;
use crate::id3::v2::write::write_frame;
use crate::id3::v2::{Frame, FrameContent, FrameId, Id3v2Tag, Id3v2Version};
use crate::util::cursor::ByteWriter;
use crate::util::text::{TextEncoding, latin1_decode};

/// A change to a field, waiting to be saved
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingEdit {
	/// Replace the value
	Set(FieldValue),
	/// Remove the field entirely
	Delete,
}

/// The language used for newly created comment frames
const DEFAULT_COMMENT_LANGUAGE: [u8; 3] = *b"eng";

// -- Decoding --

pub(crate) fn v1_field(tag: &Id3v1Tag, field: Field) -> Option<FieldValue> {
	let text = |value: Option<&str>| value.map(|v| FieldValue::Text(v.to_owned()));

	match field {
		Field::Song => text(tag.title()),
		Field::Artist => text(tag.artist()),
		Field::Album => text(tag.album()),
		Field::Year => text(tag.year()),
		Field::Comment => text(tag.comment()),
		Field::Track => tag.track_number.map(|n| FieldValue::Number(u32::from(n))),
		Field::Genre => tag.genre_name().map(|g| FieldValue::Text(g.to_owned())),
		_ => None,
	}
}

pub(crate) fn v2_field(tag: &Id3v2Tag, field: Field) -> Option<FieldValue> {
	let frame = tag.get_readable(frame_ids(tag.version(), field))?;

	let content = match frame.content() {
		Ok(content) => content?,
		Err(e) => {
			log::warn!("Unable to decode frame `{}`: {e}", frame.id());
			return None;
		},
	};

	match content {
		FrameContent::Text { values, .. } => {
			let value = values.into_iter().next().unwrap_or_default();
			Some(match field {
				Field::Track => track_value(value),
				Field::Genre => FieldValue::Text(resolve_genre(value)),
				_ => FieldValue::Text(value),
			})
		},
		FrameContent::Comment { text, .. } => Some(FieldValue::Text(text)),
		FrameContent::UserUrl { url, .. } => Some(FieldValue::Text(url)),
		FrameContent::Binary(_) => None,
	}
}

pub(crate) fn v1_fields(tag: &Id3v1Tag) -> FieldMap {
	Field::ALL
		.iter()
		.filter_map(|field| v1_field(tag, *field).map(|value| (*field, value)))
		.collect()
}

pub(crate) fn v2_fields(tag: &Id3v2Tag) -> FieldMap {
	Field::ALL
		.iter()
		.filter_map(|field| v2_field(tag, *field).map(|value| (*field, value)))
		.collect()
}

// "3/12" is track 3 of 12
fn track_value(value: String) -> FieldValue {
	match parse_track(&value) {
		Some(number) => FieldValue::Number(number),
		None => FieldValue::Text(value),
	}
}

fn parse_track(value: &str) -> Option<u32> {
	value.split('/').next()?.trim().parse().ok()
}

/// Resolve ID3v1 genre references
///
/// Handles "(17)", "17" and "(17)Rock". Anything else is free text, and returned as-is.
fn resolve_genre(value: String) -> String {
	if let Some(rest) = value.strip_prefix('(') {
		if let Some((index, refinement)) = rest.split_once(')') {
			if !refinement.is_empty() {
				return refinement.to_owned();
			}

			if let Ok(index) = index.parse::<u8>() {
				return genre_name(index).to_owned();
			}
		}

		return value;
	}

	match value.parse::<u8>() {
		Ok(index) => genre_name(index).to_owned(),
		Err(_) => value,
	}
}

// -- Encoding --

/// Apply `edit` to an ID3v1 tag
///
/// # Errors
///
/// * `field` has no place in ID3v1
/// * The value can't be represented, see [`ErrorKind::BadFieldValue`]
pub(crate) fn apply_v1(
	tag: &mut Id3v1Tag,
	field: Field,
	edit: &PendingEdit,
	write_options: WriteOptions,
) -> Result<()> {
	let value = match edit {
		PendingEdit::Set(value) => value,
		PendingEdit::Delete => {
			match field {
				Field::Song => tag.remove_title(),
				Field::Artist => tag.remove_artist(),
				Field::Album => tag.remove_album(),
				Field::Year => tag.remove_year(),
				Field::Comment => tag.remove_comment(),
				Field::Track => tag.track_number = None,
				Field::Genre => tag.genre = None,
				// Nothing to remove
				_ => {},
			}

			return Ok(());
		},
	};

	match field {
		Field::Song => tag.set_title(v1_text(value, write_options)?),
		Field::Artist => tag.set_artist(v1_text(value, write_options)?),
		Field::Album => tag.set_album(v1_text(value, write_options)?),
		Field::Year => tag.set_year(v1_text(value, write_options)?),
		Field::Comment => tag.set_comment(v1_text(value, write_options)?),
		Field::Track => tag.track_number = Some(v1_track(value)?),
		Field::Genre => tag.genre = Some(v1_genre(value)?),
		_ => {
			return Err(TaggerError::new(ErrorKind::UnsupportedField {
				field,
				tag: TagType::Id3v1,
			}));
		},
	}

	Ok(())
}

fn v1_text(value: &FieldValue, write_options: WriteOptions) -> Result<String> {
	let text = value.as_text();

	// Verify the text now, rather than failing the entire tag on save
	TextEncoding::Latin1.encode(&text, false, write_options.lossy_text_encoding)?;
	Ok(text.into_owned())
}

fn v1_track(value: &FieldValue) -> Result<u8> {
	let number = match value {
		FieldValue::Number(number) => Some(*number),
		FieldValue::Text(text) => parse_track(text),
	};

	match number.and_then(|n| u8::try_from(n).ok()) {
		Some(track) if track != 0 => Ok(track),
		_ => Err(TaggerError::new(ErrorKind::BadFieldValue {
			field: Field::Track,
			reason: "ID3v1 track numbers must be within 1..=255",
		})),
	}
}

fn v1_genre(value: &FieldValue) -> Result<u8> {
	let index = match value {
		FieldValue::Number(number) => u8::try_from(*number).ok(),
		FieldValue::Text(text) => {
			let text = text.trim();
			let reference = text
				.strip_prefix('(')
				.and_then(|rest| rest.strip_suffix(')'))
				.unwrap_or(text);

			reference
				.parse::<u8>()
				.ok()
				.or_else(|| genre_index(text))
		},
	};

	match index {
		Some(index) if usize::from(index) < GENRES.len() => Ok(index),
		_ => Err(TaggerError::new(ErrorKind::BadFieldValue {
			field: Field::Genre,
			reason: "not an ID3v1 genre",
		})),
	}
}

/// Apply `edit` to an ID3v2 tag
///
/// An existing frame for the field is updated in place, keeping its ID, flags, and position.
/// Otherwise, a new frame is appended. Deleting removes every frame for the field.
///
/// # Errors
///
/// * The value can't be encoded
/// * The resulting frame is too large for the tag's version
///
/// The tag is left untouched on error.
pub(crate) fn apply_v2(
	tag: &mut Id3v2Tag,
	field: Field,
	edit: &PendingEdit,
	write_options: WriteOptions,
) -> Result<()> {
	let version = tag.version();
	let ids = frame_ids(version, field);

	let value = match edit {
		PendingEdit::Set(value) => value,
		PendingEdit::Delete => {
			let removed = tag.remove(ids);
			log::trace!("Removed {} frame(s) for `{field}`", removed.len());
			return Ok(());
		},
	};

	// Prefer a frame we can read, but an opaque frame is replaced all the same
	let existing = tag
		.frames
		.iter()
		.position(|f| !f.is_opaque() && ids.contains(&f.id().as_str()))
		.or_else(|| {
			tag.frames
				.iter()
				.position(|f| ids.contains(&f.id().as_str()))
		});

	let existing_content = existing
		.and_then(|index| tag.frames[index].content().ok())
		.flatten();

	let content = build_content(field, value, existing_content, version, write_options)?;

	let frame = match existing {
		Some(index) => {
			let mut frame = tag.frames[index].clone();
			frame.set_content(&content, version)?;
			frame
		},
		None => Frame::new(FrameId::new(ids[0])?, &content, version)?,
	};

	// Make sure the frame can actually be written before committing to it
	write_frame(&mut ByteWriter::new(), &frame, version, false)?;

	match existing {
		Some(index) => tag.frames[index] = frame,
		None => {
			log::trace!("Creating frame `{}` for `{field}`", frame.id());
			tag.frames.push(frame);
		},
	}

	Ok(())
}

fn build_content(
	field: Field,
	value: &FieldValue,
	existing: Option<FrameContent>,
	version: Id3v2Version,
	write_options: WriteOptions,
) -> Result<FrameContent> {
	let existing_encoding = existing.as_ref().and_then(FrameContent::encoding);

	match field {
		Field::Comment => {
			let (language, description) = match existing {
				Some(FrameContent::Comment {
					language,
					description,
					..
				}) => (language, description),
				_ => (DEFAULT_COMMENT_LANGUAGE, String::new()),
			};

			let text = value.as_text().into_owned();
			let encoding = choose_encoding(
				existing_encoding,
				&[description.as_str(), text.as_str()],
				version,
			);

			Ok(FrameContent::Comment {
				encoding,
				language,
				description,
				text,
			})
		},
		Field::Url => {
			let (encoding, description) = match existing {
				Some(FrameContent::UserUrl {
					encoding,
					description,
					..
				}) => (encoding, description),
				_ => (TextEncoding::Latin1, String::new()),
			};

			// URLs are always Latin-1
			let url = TextEncoding::Latin1.encode(
				&value.as_text(),
				false,
				write_options.lossy_text_encoding,
			)?;

			Ok(FrameContent::UserUrl {
				encoding,
				description,
				url: latin1_decode(&url),
			})
		},
		_ => {
			// ID3v2.4 dropped the parentheses around genre references
			let text = match (field, value, version) {
				(Field::Genre, FieldValue::Number(index), Id3v2Version::V4) => index.to_string(),
				(Field::Genre, FieldValue::Number(index), _) => format!("({index})"),
				_ => value.as_text().into_owned(),
			};

			let encoding = choose_encoding(existing_encoding, &[text.as_str()], version);
			Ok(FrameContent::Text {
				encoding,
				values: vec![text],
			})
		},
	}
}

/// Keep the frame's current encoding if possible, otherwise use the narrowest encoding available
fn choose_encoding(
	existing: Option<TextEncoding>,
	text: &[&str],
	version: Id3v2Version,
) -> TextEncoding {
	let fits = |encoding: TextEncoding| text.iter().all(|t| encoding.can_encode(t));

	if let Some(encoding) = existing.map(|e| encoding_for_version(e, version)) {
		if fits(encoding) {
			return encoding;
		}
	}

	if fits(TextEncoding::Latin1) {
		return TextEncoding::Latin1;
	}

	match version {
		Id3v2Version::V4 => TextEncoding::UTF8,
		_ => TextEncoding::UTF16,
	}
}
