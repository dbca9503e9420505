//! The field level view of a file's tags
//!
//! A [`TagDocument`] decodes every ID3 tag in a file once, and exposes them through canonical
//! [`Field`]s. Edits are only recorded, nothing is encoded or written until
//! [`TagDocument::save`].
//!
//! # Examples
//!
//! ```rust
//! use mp3_tagger::config::ParseOptions;
//! use mp3_tagger::document::{TagDocument, TargetVersion};
//! use mp3_tagger::field::{Field, FieldValue};
//! use std::io::Cursor;
//!
//! # fn main() -> mp3_tagger::error::Result<()> {
//! // Some audio with no tags at all
//! let file = Cursor::new(vec![0xFF, 0xFB, 0x90, 0x00]);
//! let mut document = TagDocument::read_from(file, ParseOptions::new())?;
//! assert_eq!(document.get(Field::Artist), None);
//!
//! document.set_target_version(TargetVersion::V1);
//! document.set(Field::Artist, "Iron Maiden");
//! document.save()?;
//!
//! let tags = document.tags();
//! assert!(tags.id3v2.is_none());
//! assert_eq!(
//! 	tags.id3v1.unwrap().get(&Field::Artist),
//! 	Some(&FieldValue::from("Iron Maiden"))
//! );
//! # Ok(()) }
//! ```

mod edit;
mod write;

pub use edit::PendingEdit;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{Result, TaggerError};
use crate::field::{Field, FieldValue, TagSnapshot};
use crate::id3::v1::Id3v1Tag;
use crate::id3::v2::read::parse_id3v2;
use crate::id3::v2::Id3v2Tag;
use crate::id3::{ID3FindResults, Id3Version, TagType, find_id3v1, find_id3v2};
use crate::util::io::{FileLike, Length, Truncate};

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek};
use std::path::Path;

/// The tag versions affected by reads and saves
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetVersion {
	/// Nothing is written on save
	///
	/// Reads behave as with [`TargetVersion::Both`].
	None,
	/// Only the ID3v1 tag
	V1,
	/// Only the ID3v2 tag
	V2,
	/// Both tags, with ID3v2 preferred for reads
	#[default]
	Both,
}

impl TargetVersion {
	fn includes_v1(self) -> bool {
		matches!(self, TargetVersion::V1 | TargetVersion::Both)
	}

	fn includes_v2(self) -> bool {
		matches!(self, TargetVersion::V2 | TargetVersion::Both)
	}
}

/// A field that couldn't be written to a tag during [`TagDocument::save`]
///
/// The field remains dirty.
#[derive(Debug)]
pub struct FieldError {
	field: Field,
	tag: TagType,
	error: TaggerError,
}

impl FieldError {
	/// The field that failed
	pub fn field(&self) -> Field {
		self.field
	}

	/// The tag it failed to be written to
	pub fn tag_type(&self) -> TagType {
		self.tag
	}

	/// The reason it failed
	pub fn error(&self) -> &TaggerError {
		&self.error
	}
}

impl Display for FieldError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Failed to write `{}` to the {:?} tag: {}",
			self.field, self.tag, self.error
		)
	}
}

/// Where the ID3v2 tag sits in the file
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Id3v2Region {
	/// The full size of the tag, including the header and footer
	pub(crate) len: usize,
	pub(crate) footer: bool,
	/// The padding after the frames, only known if the tag was read
	pub(crate) padding: usize,
}

/// Everything decoded from the file
///
/// A tag that failed to decode keeps its error, and is never rewritten.
#[derive(Default, Debug)]
pub(crate) struct DecodedTags {
	pub(crate) id3v1: Option<Id3v1Tag>,
	pub(crate) id3v1_offset: Option<usize>,
	pub(crate) id3v1_error: Option<TaggerError>,
	pub(crate) id3v2: Option<Id3v2Tag>,
	pub(crate) id3v2_region: Option<Id3v2Region>,
	pub(crate) id3v2_error: Option<TaggerError>,
}

impl DecodedTags {
	pub(crate) fn decode(data: &[u8], parse_options: ParseOptions) -> Self {
		let mut tags = Self::default();
		let parse_mode = parse_options.parsing_mode;

		// The region is located even when the tag isn't read, so the audio can be found
		match find_id3v2(data) {
			Ok(ID3FindResults(Some(header), Some(body))) => {
				let mut region = Id3v2Region {
					len: header.full_tag_size() as usize,
					footer: header.flags.footer,
					padding: 0,
				};

				if parse_options.read_id3v2 {
					match parse_id3v2(body, header, parse_mode) {
						Ok((tag, padding)) => {
							region.padding = padding;
							tags.id3v2 = Some(tag);
						},
						Err(e) => {
							log::warn!("Failed to read ID3v2 tag: {e}");
							tags.id3v2_error = Some(e);
						},
					}
				}

				tags.id3v2_region = Some(region);
			},
			Ok(_) => log::debug!("No ID3v2 tag found"),
			Err(e) => {
				log::warn!("Failed to read ID3v2 tag: {e}");
				tags.id3v2_error = Some(e);
			},
		}

		let id3v2_end = tags.id3v2_region.map_or(0, |region| region.len);
		if let ID3FindResults(Some(offset), Some(raw)) = find_id3v1(data) {
			if offset < id3v2_end {
				// The "TAG" marker belongs to the ID3v2 tag
				log::debug!("Ignoring ID3v1 marker inside of the ID3v2 tag");
			} else {
				tags.id3v1_offset = Some(offset);

				if parse_options.read_id3v1 {
					match Id3v1Tag::parse(raw, parse_mode) {
						Ok(tag) => tags.id3v1 = Some(tag),
						Err(e) => {
							log::warn!("Failed to read ID3v1 tag: {e}");
							tags.id3v1_error = Some(e);
						},
					}
				}
			}
		}

		tags
	}
}

/// A file's ID3 tags, viewed as canonical fields
///
/// ## Reading
///
/// Reads never change the document. A field that has been edited reads as its pending value.
/// Otherwise, the [`TargetVersion`] decides which tags are consulted:
///
/// * [`TargetVersion::V1`] only reads the ID3v1 tag
/// * [`TargetVersion::V2`] only reads the ID3v2 tag
/// * [`TargetVersion::Both`] and [`TargetVersion::None`] read the ID3v2 tag, falling back to the
///   ID3v1 tag
///
/// When multiple frames could hold a field (`TYER` and `TDRC`, for example), the first in file
/// order wins.
///
/// ## Writing
///
/// Edits are recorded with [`TagDocument::set`] and [`TagDocument::delete`], and applied to every
/// targeted tag by [`TagDocument::save`].
pub struct TagDocument<F> {
	file: F,
	parse_options: ParseOptions,
	write_options: WriteOptions,
	tags: DecodedTags,
	pending: BTreeMap<Field, PendingEdit>,
	target: TargetVersion,
	save_errors: Vec<FieldError>,
}

impl TagDocument<File> {
	/// Open the file at `path` for reading and writing, and decode its tags
	///
	/// # Errors
	///
	/// * The file can't be opened for reading and writing
	/// * The file can't be read
	///
	/// Errors in the tags themselves don't cause this to fail, see [`TagDocument::decode_error`].
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with_options(path, ParseOptions::new())
	}

	/// Same as [`TagDocument::open`], with custom [`ParseOptions`]
	///
	/// # Errors
	///
	/// See [`TagDocument::open`]
	pub fn open_with_options(path: impl AsRef<Path>, parse_options: ParseOptions) -> Result<Self> {
		let path = path.as_ref();
		log::debug!("Opening `{}`", path.display());

		let file = OpenOptions::new().read(true).write(true).open(path)?;
		Self::read_from(file, parse_options)
	}
}

impl<F> TagDocument<F>
where
	F: FileLike,
	TaggerError: From<<F as Truncate>::Error>,
	TaggerError: From<<F as Length>::Error>,
{
	/// Decode the tags of a file-like object
	///
	/// The document takes ownership of `file`, see [`TagDocument::into_inner`].
	///
	/// # Errors
	///
	/// * `file` can't be read
	///
	/// Errors in the tags themselves don't cause this to fail, see [`TagDocument::decode_error`].
	pub fn read_from(mut file: F, parse_options: ParseOptions) -> Result<Self> {
		let data = read_all(&mut file)?;
		let tags = DecodedTags::decode(&data, parse_options);

		Ok(Self {
			file,
			parse_options,
			write_options: WriteOptions::default(),
			tags,
			pending: BTreeMap::new(),
			target: TargetVersion::default(),
			save_errors: Vec::new(),
		})
	}
}

pub(crate) fn read_all<F>(file: &mut F) -> Result<Vec<u8>>
where
	F: Read + Seek,
{
	file.rewind()?;

	let mut data = Vec::new();
	file.read_to_end(&mut data)?;
	Ok(data)
}

impl<F> TagDocument<F> {
	/// Get the value of a field
	///
	/// See [Reading](TagDocument#reading).
	pub fn get(&self, field: Field) -> Option<FieldValue> {
		if let Some(edit) = self.pending.get(&field) {
			return match edit {
				PendingEdit::Set(value) => Some(value.clone()),
				PendingEdit::Delete => None,
			};
		}

		let from_v1 = || {
			self.tags
				.id3v1
				.as_ref()
				.and_then(|tag| edit::v1_field(tag, field))
		};
		let from_v2 = || {
			self.tags
				.id3v2
				.as_ref()
				.and_then(|tag| edit::v2_field(tag, field))
		};

		match self.target {
			TargetVersion::V1 => from_v1(),
			TargetVersion::V2 => from_v2(),
			TargetVersion::Both | TargetVersion::None => from_v2().or_else(from_v1),
		}
	}

	/// Set the value of a field
	///
	/// This only marks the field as dirty, see [`TagDocument::save`].
	pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) {
		log::trace!("Setting `{field}`");
		self.pending.insert(field, PendingEdit::Set(value.into()));
	}

	/// Remove a field from every targeted tag
	///
	/// This only marks the field as dirty, see [`TagDocument::save`].
	pub fn delete(&mut self, field: Field) {
		log::trace!("Deleting `{field}`");
		self.pending.insert(field, PendingEdit::Delete);
	}

	/// Forget any unsaved edit to `field`
	pub fn revert(&mut self, field: Field) -> Option<PendingEdit> {
		self.pending.remove(&field)
	}

	/// Whether `field` has an unsaved edit
	pub fn is_dirty(&self, field: Field) -> bool {
		self.pending.contains_key(&field)
	}

	/// Every field with an unsaved edit
	pub fn dirty_fields(&self) -> impl Iterator<Item = Field> + '_ {
		self.pending.keys().copied()
	}

	/// The decoded fields of each tag, without any pending edits
	///
	/// This ignores the [`TargetVersion`].
	pub fn tags(&self) -> TagSnapshot {
		TagSnapshot {
			id3v1: self.tags.id3v1.as_ref().map(edit::v1_fields),
			id3v2: self.tags.id3v2.as_ref().map(edit::v2_fields),
		}
	}

	/// Select the tags affected by reads and [`TagDocument::save`]
	///
	/// The data of tags that aren't selected is kept.
	pub fn set_target_version(&mut self, target: TargetVersion) {
		self.target = target;
	}

	/// The currently selected [`TargetVersion`]
	pub fn target_version(&self) -> TargetVersion {
		self.target
	}

	/// The versions of the tags present in the file
	pub fn versions(&self) -> Vec<Id3Version> {
		let mut versions = Vec::with_capacity(2);
		if let Some(id3v2) = &self.tags.id3v2 {
			versions.push(Id3Version::V2(id3v2.version()));
		}

		if self.tags.id3v1.is_some() {
			versions.push(Id3Version::V1);
		}

		versions
	}

	/// The ID3v1 tag, as last read or saved
	pub fn id3v1(&self) -> Option<&Id3v1Tag> {
		self.tags.id3v1.as_ref()
	}

	/// The ID3v2 tag, as last read or saved
	pub fn id3v2(&self) -> Option<&Id3v2Tag> {
		self.tags.id3v2.as_ref()
	}

	/// The error that prevented a tag from being decoded
	///
	/// A tag that failed to decode is treated as absent, and is never rewritten.
	pub fn decode_error(&self, tag_type: TagType) -> Option<&TaggerError> {
		match tag_type {
			TagType::Id3v1 => self.tags.id3v1_error.as_ref(),
			TagType::Id3v2 => self.tags.id3v2_error.as_ref(),
		}
	}

	/// The [`ParseOptions`] the document was read with
	pub fn parse_options(&self) -> ParseOptions {
		self.parse_options
	}

	/// The [`WriteOptions`] used by [`TagDocument::save`]
	pub fn write_options(&self) -> WriteOptions {
		self.write_options
	}

	/// Replace the [`WriteOptions`] used by [`TagDocument::save`]
	pub fn set_write_options(&mut self, write_options: WriteOptions) {
		self.write_options = write_options;
	}

	/// The fields that couldn't be written by the last [`TagDocument::save`]
	pub fn save_errors(&self) -> &[FieldError] {
		&self.save_errors
	}

	/// Give up the document, returning the file
	pub fn into_inner(self) -> F {
		self.file
	}
}

impl<F> std::fmt::Debug for TagDocument<F> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TagDocument")
			.field("tags", &self.tags)
			.field("pending", &self.pending)
			.field("target", &self.target)
			.finish_non_exhaustive()
	}
}
