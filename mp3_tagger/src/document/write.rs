use super::edit::{PendingEdit, apply_v1, apply_v2};
use super::{DecodedTags, FieldError, TagDocument, TargetVersion, read_all};
use crate::config::{ParseOptions, WriteOptions};
use crate::error::{ErrorKind, Result, TaggerError};
use crate::field::Field;
use crate::id3::TagType;
use crate::id3::v1::Id3v1Tag;
use crate::id3::v2::{Id3v2Header, Id3v2Tag};
use crate::util::io::{FileLike, Length, Truncate};

use std::collections::BTreeMap;
use std::io::SeekFrom;

const ID3V1_TAG_SIZE: usize = 128;

impl<F> TagDocument<F>
where
	F: FileLike,
	TaggerError: From<<F as Truncate>::Error>,
	TaggerError: From<<F as Length>::Error>,
{
	/// Write every pending edit to the targeted tags
	///
	/// For each targeted tag, edits are applied on top of the tag as it currently exists in the
	/// file, creating the tag if needed. Frames and fields that weren't edited are left untouched.
	///
	/// An ID3v2 tag is rewritten in place when its frames didn't grow, or when the new tag plus
	/// [`WriteOptions::minimum_padding`] fits in the space of the old one. Whatever space is left
	/// over becomes padding. Otherwise the audio is moved, and the new tag gets
	/// [`WriteOptions::preferred_padding`].
	/// The ID3v1 tag always occupies the last 128 bytes of the file.
	///
	/// Fields that can't be written are recorded in [`TagDocument::save_errors`], and stay dirty.
	/// Every other field is saved regardless. Once saved, the document reflects the new contents
	/// of the file.
	///
	/// With [`TargetVersion::None`], nothing is written.
	///
	/// # Errors
	///
	/// * The file can't be read or written
	/// * The ID3v2 tag is too large to be written
	///
	/// The new contents of the file are computed before anything is written. If writing fails,
	/// the original contents are written back, and the document is left as it was before the save.
	pub fn save(&mut self) -> Result<()> {
		self.save_errors.clear();

		if self.target == TargetVersion::None {
			log::debug!("No target version selected, nothing to save");
			return Ok(());
		}

		if self.pending.is_empty() {
			log::debug!("No pending edits, nothing to save");
			return Ok(());
		}

		let data = read_all(&mut self.file)?;
		let current = DecodedTags::decode(&data, self.parse_options);

		let staged = stage_edits(
			&current,
			&self.pending,
			self.target,
			self.parse_options,
			self.write_options,
		);

		let plan = plan_writes(&data, &current, &staged, self.write_options)?;
		plan.commit(&mut self.file, &data)?;

		self.tags = DecodedTags::decode(&plan.contents, self.parse_options);
		for field in &staged.applied {
			self.pending.remove(field);
		}

		for error in &staged.errors {
			log::warn!("{error}");
		}

		self.save_errors = staged.errors;
		Ok(())
	}
}

/// The tags with the pending edits applied
struct StagedTags {
	id3v1: Option<Id3v1Tag>,
	id3v1_changed: bool,
	id3v2: Option<Id3v2Tag>,
	id3v2_changed: bool,
	applied: Vec<Field>,
	errors: Vec<FieldError>,
}

fn stage_edits(
	current: &DecodedTags,
	pending: &BTreeMap<Field, PendingEdit>,
	target: TargetVersion,
	parse_options: ParseOptions,
	write_options: WriteOptions,
) -> StagedTags {
	let mut staged = StagedTags {
		id3v1: current.id3v1.clone(),
		id3v1_changed: false,
		id3v2: current.id3v2.clone(),
		id3v2_changed: false,
		applied: Vec::new(),
		errors: Vec::new(),
	};

	// Tags that weren't read (or couldn't be) can't be rewritten without losing their contents
	let v2_writable = parse_options.read_id3v2 && current.id3v2_error.is_none();
	let v1_writable = parse_options.read_id3v1 && current.id3v1_error.is_none();

	if target.includes_v2() && !v2_writable {
		log::warn!("The existing ID3v2 tag can't be rewritten, its edits will remain pending");
	}

	if target.includes_v1() && !v1_writable {
		log::warn!("The existing ID3v1 tag can't be rewritten, its edits will remain pending");
	}

	for (&field, edit) in pending {
		let mut applied = true;

		if target.includes_v2() {
			if v2_writable {
				match stage_v2(&mut staged.id3v2, field, edit, write_options) {
					Ok(changed) => staged.id3v2_changed |= changed,
					Err(error) => {
						staged.errors.push(FieldError {
							field,
							tag: TagType::Id3v2,
							error,
						});
						applied = false;
					},
				}
			} else {
				applied = false;
			}
		}

		if target.includes_v1() {
			if v1_writable {
				match stage_v1(&mut staged.id3v1, field, edit, write_options) {
					Ok(changed) => staged.id3v1_changed |= changed,
					// ID3v1 simply has no room for most fields, that's only an error if it's
					// the only target
					Err(error)
						if target == TargetVersion::Both
							&& matches!(error.kind(), ErrorKind::UnsupportedField { .. }) =>
					{
						log::debug!("Skipping `{field}` for ID3v1");
					},
					Err(error) => {
						staged.errors.push(FieldError {
							field,
							tag: TagType::Id3v1,
							error,
						});
						applied = false;
					},
				}
			} else {
				applied = false;
			}
		}

		if applied {
			staged.applied.push(field);
		}
	}

	staged
}

/// Returns whether the tag changed
fn stage_v2(
	tag: &mut Option<Id3v2Tag>,
	field: Field,
	edit: &PendingEdit,
	write_options: WriteOptions,
) -> Result<bool> {
	if let Some(tag) = tag {
		apply_v2(tag, field, edit, write_options)?;
		return Ok(true);
	}

	// Deleting from a tag that doesn't exist
	if *edit == PendingEdit::Delete {
		return Ok(false);
	}

	let mut new_tag = Id3v2Tag::new(write_options.new_tag_version);
	apply_v2(&mut new_tag, field, edit, write_options)?;

	log::debug!("Creating a new {:?} tag", new_tag.version());
	*tag = Some(new_tag);
	Ok(true)
}

/// Returns whether the tag changed
fn stage_v1(
	tag: &mut Option<Id3v1Tag>,
	field: Field,
	edit: &PendingEdit,
	write_options: WriteOptions,
) -> Result<bool> {
	if let Some(tag) = tag {
		apply_v1(tag, field, edit, write_options)?;
		return Ok(true);
	}

	if *edit == PendingEdit::Delete {
		return Ok(false);
	}

	let mut new_tag = Id3v1Tag::new();
	apply_v1(&mut new_tag, field, edit, write_options)?;

	log::debug!("Creating a new ID3v1 tag");
	*tag = Some(new_tag);
	Ok(true)
}

/// The new contents of the file, and how to get them there
struct WritePlan {
	contents: Vec<u8>,
	/// Everything after the ID3v2 tag moved, the whole file needs to be written
	rewrite: bool,
	/// Otherwise, the byte ranges of `contents` that changed
	patches: Vec<(usize, usize)>,
}

fn plan_writes(
	data: &[u8],
	current: &DecodedTags,
	staged: &StagedTags,
	write_options: WriteOptions,
) -> Result<WritePlan> {
	let mut plan = WritePlan {
		contents: data.to_vec(),
		rewrite: false,
		patches: Vec::new(),
	};

	if staged.id3v2_changed {
		if let Some(tag) = &staged.id3v2 {
			plan_id3v2(&mut plan, tag, current, write_options)?;
		}
	}

	if staged.id3v1_changed {
		if let Some(tag) = &staged.id3v1 {
			let encoded = tag.encode(write_options)?;

			// An existing ID3v1 tag is always the last 128 bytes, even if the audio moved
			let offset = match current.id3v1_offset {
				Some(_) => plan.contents.len() - ID3V1_TAG_SIZE,
				None => {
					log::debug!("Appending a new ID3v1 tag");
					plan.contents.extend_from_slice(&[0; ID3V1_TAG_SIZE]);
					plan.contents.len() - ID3V1_TAG_SIZE
				},
			};

			plan.contents[offset..offset + ID3V1_TAG_SIZE].copy_from_slice(&encoded);
			plan.patches.push((offset, ID3V1_TAG_SIZE));
		}
	}

	Ok(plan)
}

fn plan_id3v2(
	plan: &mut WritePlan,
	tag: &Id3v2Tag,
	current: &DecodedTags,
	write_options: WriteOptions,
) -> Result<()> {
	const HEADER_SIZE: usize = Id3v2Header::SIZE as usize;

	let frames = tag.encode_frames()?;

	let old_len = current.id3v2_region.map_or(0, |region| region.len);
	let in_place_padding = current.id3v2_region.and_then(|region| {
		if region.footer {
			// No padding to absorb the difference
			return (HEADER_SIZE + frames.len() + HEADER_SIZE == region.len).then_some(0);
		}

		let available = region.len.checked_sub(HEADER_SIZE + frames.len())?;

		// A tag that didn't grow always fits, even if it leaves less than the minimum padding
		let old_frames_len = region.len.saturating_sub(HEADER_SIZE + region.padding);
		let shrinking = frames.len() <= old_frames_len;

		(shrinking || available >= write_options.minimum_padding as usize).then_some(available)
	});

	match in_place_padding {
		Some(padding) => {
			log::debug!("Rewriting the ID3v2 tag in place, {padding} bytes of padding");

			let encoded = tag.assemble(&frames, padding)?;
			debug_assert_eq!(encoded.len(), old_len);

			plan.contents[..old_len].copy_from_slice(&encoded);
			plan.patches.push((0, old_len));
		},
		None => {
			let padding = write_options.preferred_padding as usize;
			log::debug!(
				"The ID3v2 tag doesn't fit in the existing {old_len} bytes, moving the audio"
			);

			let mut contents = tag.assemble(&frames, padding)?;
			contents.extend_from_slice(&plan.contents[old_len..]);

			plan.contents = contents;
			plan.rewrite = true;
			plan.patches.clear();
		},
	}

	Ok(())
}

impl WritePlan {
	/// Write the plan to `file`, restoring `original` if anything goes wrong
	fn commit<F>(&self, file: &mut F, original: &[u8]) -> Result<()>
	where
		F: FileLike,
		TaggerError: From<<F as Truncate>::Error>,
		TaggerError: From<<F as Length>::Error>,
	{
		let Err(err) = self.write_to(file, original.len()) else {
			return Ok(());
		};

		log::error!("Failed to write the new tags, restoring the original file: {err}");
		if let Err(restore_err) = restore(file, original) {
			log::error!("Failed to restore the original file: {restore_err}");
		}

		Err(err)
	}

	fn write_to<F>(&self, file: &mut F, original_len: usize) -> Result<()>
	where
		F: FileLike,
		TaggerError: From<<F as Truncate>::Error>,
		TaggerError: From<<F as Length>::Error>,
	{
		if self.rewrite {
			log::debug!("Rewriting the file, {} bytes", self.contents.len());

			// Nothing is cut off until the new contents are fully written
			file.rewind()?;
			file.write_all(&self.contents)?;
			if self.contents.len() < original_len {
				file.truncate(self.contents.len() as u64)?;
			}
		} else {
			for &(offset, len) in &self.patches {
				log::trace!("Writing {len} bytes at offset {offset}");

				file.seek(SeekFrom::Start(offset as u64))?;
				file.write_all(&self.contents[offset..offset + len])?;
			}
		}

		file.flush()?;
		Ok(())
	}
}

fn restore<F>(file: &mut F, original: &[u8]) -> Result<()>
where
	F: FileLike,
	TaggerError: From<<F as Truncate>::Error>,
	TaggerError: From<<F as Length>::Error>,
{
	file.rewind()?;
	file.write_all(original)?;
	file.truncate(original.len() as u64)?;
	file.flush()?;
	Ok(())
}
