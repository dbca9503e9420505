use crate::util::{self, AUDIO};
use mp3_tagger::config::ParseOptions;
use mp3_tagger::document::{TagDocument, TargetVersion};
use mp3_tagger::error::ErrorKind;
use mp3_tagger::field::{Field, FieldValue, TagSnapshot};
use mp3_tagger::id3::TagType;

use std::io::Write;

#[test_log::test]
fn fresh_file_gets_id3v1_only() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(AUDIO).unwrap();
	file.flush().unwrap();

	let mut document = TagDocument::open(file.path()).unwrap();
	assert_eq!(document.tags(), TagSnapshot::default());
	assert!(document.versions().is_empty());

	document.set(Field::Artist, "Iron Maiden");
	document.set_target_version(TargetVersion::V1);
	document.save().unwrap();
	drop(document);

	let document = TagDocument::open(file.path()).unwrap();
	let tags = document.tags();
	assert!(tags.id3v2.is_none());

	let id3v1 = tags.id3v1.unwrap();
	assert_eq!(id3v1.len(), 1);
	assert_eq!(id3v1.get(&Field::Artist), Some(&FieldValue::from("Iron Maiden")));

	let on_disk = std::fs::read(file.path()).unwrap();
	assert_eq!(on_disk.len(), AUDIO.len() + 128);
	assert!(on_disk.starts_with(AUDIO));
}

#[test_log::test]
fn delete_from_id3v23_with_id3v22_frame_ids() {
	let tag = util::tag(
		3,
		0,
		&[
			util::frame(3, "TT2", 0, &util::text("Prowler")),
			util::frame(3, "TP1", 0, &util::text("Iron Maiden")),
		],
		64,
	);

	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(&tag).unwrap();
	file.write_all(AUDIO).unwrap();
	file.flush().unwrap();

	let mut document = TagDocument::open(file.path()).unwrap();
	assert_eq!(document.get(Field::Song), Some(FieldValue::from("Prowler")));

	document.delete(Field::Song);
	assert_eq!(document.get(Field::Song), None);
	assert!(document.is_dirty(Field::Song));

	document.save().unwrap();
	assert!(document.save_errors().is_empty());
	drop(document);

	let document = TagDocument::open(file.path()).unwrap();
	assert_eq!(document.get(Field::Song), None);
	assert_eq!(
		document.get(Field::Artist),
		Some(FieldValue::from("Iron Maiden"))
	);

	// Shrinking the tag always fits, so the audio stays put
	let on_disk = std::fs::read(file.path()).unwrap();
	assert_eq!(on_disk.len(), tag.len() + AUDIO.len());
	assert!(on_disk.ends_with(AUDIO));
}

#[test_log::test]
fn malformed_id3v2_size_keeps_id3v1() {
	let mut contents = util::tag(4, 0, &[util::frame(4, "TIT2", 0, &util::text("Prowler"))], 0);
	contents[8] = 0x80;
	contents.extend_from_slice(AUDIO);
	contents.extend(util::id3v1("Prowler", "Iron Maiden", "", Some(1), 9));

	let document = util::read_document(&contents);

	let err = document.decode_error(TagType::Id3v2).unwrap();
	assert!(matches!(err.kind(), ErrorKind::MalformedSize));
	assert!(document.decode_error(TagType::Id3v1).is_none());

	let tags = document.tags();
	assert!(tags.id3v2.is_none());

	let id3v1 = tags.id3v1.unwrap();
	assert_eq!(id3v1.get(&Field::Artist), Some(&FieldValue::from("Iron Maiden")));
	assert_eq!(id3v1.get(&Field::Track), Some(&FieldValue::Number(1)));
	assert_eq!(id3v1.get(&Field::Genre), Some(&FieldValue::from("Metal")));
}

#[test_log::test]
fn malformed_id3v2_is_never_rewritten() {
	let mut contents = util::tag(4, 0, &[util::frame(4, "TIT2", 0, &util::text("Prowler"))], 0);
	contents[8] = 0x80;
	contents.extend_from_slice(AUDIO);

	let mut document = util::read_document(&contents);
	document.set_target_version(TargetVersion::V2);
	document.set(Field::Song, "Remember Tomorrow");
	document.save().unwrap();

	assert!(document.is_dirty(Field::Song));
	assert_eq!(util::contents(document), contents);
}

#[test_log::test]
fn unread_tags_are_left_alone() {
	let mut contents = util::tag(3, 0, &[util::frame(3, "TIT2", 0, &util::text("Prowler"))], 16);
	contents.extend_from_slice(AUDIO);

	let document = TagDocument::read_from(
		util::temp_file(&contents),
		ParseOptions::new().read_id3v2(false),
	)
	.unwrap();

	assert!(document.id3v2().is_none());
	assert_eq!(document.get(Field::Song), None);

	// Writing ID3v1 still has to find the end of the file, past the unread tag
	let mut document = document;
	document.set(Field::Song, "Sanctuary");
	document.save().unwrap();

	assert!(document.is_dirty(Field::Song));
	assert_eq!(document.id3v1().unwrap().title(), Some("Sanctuary"));

	let written = util::contents(document);
	assert_eq!(&written[..contents.len()], contents.as_slice());
	assert_eq!(written.len(), contents.len() + 128);
}
