use crate::util::{self, AUDIO};
use mp3_tagger::config::WriteOptions;
use mp3_tagger::document::{FieldError, TargetVersion};
use mp3_tagger::error::ErrorKind;
use mp3_tagger::field::{Field, FieldValue};
use mp3_tagger::id3::{Id3Version, TagType};

fn file_with_id3v1(tag: Vec<u8>) -> Vec<u8> {
	let mut contents = AUDIO.to_vec();
	contents.extend(tag);
	contents
}

#[test_log::test]
fn read_id3v1_1() {
	let contents = file_with_id3v1(util::id3v1("Prowler", "Iron Maiden", "Debut", Some(1), 9));

	let document = util::read_document(&contents);
	assert_eq!(document.versions(), vec![Id3Version::V1]);

	let id3v1 = document.tags().id3v1.unwrap();
	assert_eq!(id3v1.get(&Field::Song), Some(&FieldValue::from("Prowler")));
	assert_eq!(id3v1.get(&Field::Year), Some(&FieldValue::from("1980")));
	assert_eq!(id3v1.get(&Field::Comment), Some(&FieldValue::from("Debut")));
	assert_eq!(id3v1.get(&Field::Track), Some(&FieldValue::Number(1)));
	assert_eq!(id3v1.get(&Field::Genre), Some(&FieldValue::from("Metal")));
	assert_eq!(id3v1.get(&Field::Album), None);
}

#[test_log::test]
fn read_id3v1_0() {
	let comment = "A comment that spans 29 bytes";
	let contents = file_with_id3v1(util::id3v1("Prowler", "", comment, None, 0xFF));

	let id3v1 = util::read_document(&contents).tags().id3v1.unwrap();
	assert_eq!(id3v1.get(&Field::Comment), Some(&FieldValue::from(comment)));
	assert_eq!(id3v1.get(&Field::Track), None);
	assert_eq!(id3v1.get(&Field::Genre), None);
	assert_eq!(id3v1.get(&Field::Artist), None);
}

#[test_log::test]
fn rewritten_in_place() {
	let contents = file_with_id3v1(util::id3v1("Prowler", "Iron Maiden", "", None, 9));

	let mut document = util::read_document(&contents);
	document.set_target_version(TargetVersion::V1);
	document.set(Field::Genre, "Rock");
	document.set(Field::Track, "2/8");
	document.delete(Field::Artist);
	document.save().unwrap();
	assert!(document.save_errors().is_empty());
	assert!(document.id3v2().is_none());

	let written = util::contents(document);
	assert_eq!(written.len(), contents.len());
	assert!(written.starts_with(AUDIO));

	let tag = &written[AUDIO.len()..];
	assert_eq!(&tag[3..10], b"Prowler");
	assert_eq!(&tag[33..63], &[0; 30]);
	assert_eq!(tag[125], 0);
	assert_eq!(tag[126], 2);
	assert_eq!(tag[127], 17);
}

#[test_log::test]
fn falls_back_to_id3v1() {
	let mut contents = util::tag(4, 0, &[util::frame(4, "TIT2", 0, &util::text("Sanctuary"))], 0);
	contents.extend_from_slice(AUDIO);
	contents.extend(util::id3v1("Prowler", "Iron Maiden", "", None, 0xFF));

	let mut document = util::read_document(&contents);
	assert_eq!(document.get(Field::Song), Some(FieldValue::from("Sanctuary")));
	assert_eq!(
		document.get(Field::Artist),
		Some(FieldValue::from("Iron Maiden"))
	);

	document.set_target_version(TargetVersion::V1);
	assert_eq!(document.get(Field::Song), Some(FieldValue::from("Prowler")));

	document.set_target_version(TargetVersion::V2);
	assert_eq!(document.get(Field::Artist), None);
}

#[test_log::test]
fn unrepresentable_values() {
	let contents = file_with_id3v1(util::id3v1("Prowler", "", "", None, 0xFF));

	let mut document = util::read_document(&contents);
	document.set_target_version(TargetVersion::V1);
	document.set(Field::Genre, "Not a genre");
	document.set(Field::Artist, "\u{30A2}\u{30A4}\u{30A2}\u{30F3}");
	document.set(Field::Album, "Iron Maiden");
	document.save().unwrap();

	let errors = document.save_errors();
	assert_eq!(errors.len(), 2);
	assert!(errors.iter().all(|e: &FieldError| e.tag_type() == TagType::Id3v1));
	assert!(errors.iter().any(|e| e.field() == Field::Genre
		&& matches!(e.error().kind(), ErrorKind::BadFieldValue { .. })));

	assert!(document.is_dirty(Field::Genre));
	assert!(document.is_dirty(Field::Artist));
	assert!(!document.is_dirty(Field::Album));
	assert_eq!(document.id3v1().unwrap().album(), Some("Iron Maiden"));

	// Lossy encoding replaces what can't be represented
	document.set_write_options(WriteOptions::new().lossy_text_encoding(true));
	document.revert(Field::Genre);
	document.save().unwrap();

	assert!(document.save_errors().is_empty());
	assert!(!document.is_dirty(Field::Artist));
	assert!(document.id3v1().unwrap().artist().is_some());
}
