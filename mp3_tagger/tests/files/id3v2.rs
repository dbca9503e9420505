use crate::util::{self, AUDIO};
use mp3_tagger::config::{ParseOptions, ParsingMode, WriteOptions};
use mp3_tagger::document::{TagDocument, TargetVersion};
use mp3_tagger::error::{ErrorKind, Id3v2ErrorKind};
use mp3_tagger::field::{Field, FieldValue};
use mp3_tagger::id3::v2::Id3v2Version;
use mp3_tagger::id3::{Id3Version, TagType};

fn comment(version: u8, text: &str) -> Vec<u8> {
	let mut data = vec![0];
	data.extend_from_slice(b"eng");
	data.push(0);
	data.extend_from_slice(text.as_bytes());
	util::frame(version, if version == 2 { "COM" } else { "COMM" }, 0, &data)
}

#[test_log::test]
fn read_every_version() {
	for (major, version, ids) in [
		(2, Id3v2Version::V2, ["TT2", "TP1", "TRK"]),
		(3, Id3v2Version::V3, ["TIT2", "TPE1", "TRCK"]),
		(4, Id3v2Version::V4, ["TIT2", "TPE1", "TRCK"]),
	] {
		let mut contents = util::tag(
			major,
			0,
			&[
				util::frame(major, ids[0], 0, &util::text("Prowler")),
				util::frame(major, ids[1], 0, &util::text("Iron Maiden")),
				util::frame(major, ids[2], 0, &util::text("1/8")),
				comment(major, "Debut"),
			],
			32,
		);
		contents.extend_from_slice(AUDIO);

		let document = util::read_document(&contents);
		assert_eq!(document.versions(), vec![Id3Version::V2(version)]);
		assert!(document.decode_error(TagType::Id3v2).is_none());

		assert_eq!(document.get(Field::Song), Some(FieldValue::from("Prowler")));
		assert_eq!(
			document.get(Field::Artist),
			Some(FieldValue::from("Iron Maiden"))
		);
		assert_eq!(document.get(Field::Track), Some(FieldValue::Number(1)));
		assert_eq!(document.get(Field::Comment), Some(FieldValue::from("Debut")));
		assert_eq!(document.get(Field::Album), None);
		assert_eq!(document.tags().id3v2.unwrap().len(), 4);
	}
}

#[test_log::test]
fn first_year_frame_in_file_order_wins() {
	let mut contents = util::tag(
		4,
		0,
		&[
			util::frame(4, "TYER", 0, &util::text("1980")),
			util::frame(4, "TDRC", 0, &util::text("1981")),
		],
		0,
	);
	contents.extend_from_slice(AUDIO);

	let document = util::read_document(&contents);
	assert_eq!(document.get(Field::Year), Some(FieldValue::from("1980")));
}

#[test_log::test]
fn numeric_genres() {
	for (raw, expected) in [
		("(9)", "Metal"),
		("17", "Rock"),
		("(9)NWOBHM", "NWOBHM"),
		("Speed Metal", "Speed Metal"),
	] {
		let mut contents = util::tag(3, 0, &[util::frame(3, "TCON", 0, &util::text(raw))], 0);
		contents.extend_from_slice(AUDIO);

		let document = util::read_document(&contents);
		assert_eq!(document.get(Field::Genre), Some(FieldValue::from(expected)));
	}
}

#[test_log::test]
fn id3v22_stays_id3v22() {
	let mut contents = util::tag(2, 0, &[util::frame(2, "TT2", 0, &util::text("Prowler"))], 256);
	contents.extend_from_slice(AUDIO);

	let mut document = util::read_document(&contents);
	document.set(Field::Album, "Iron Maiden");
	document.set_target_version(TargetVersion::V2);
	document.save().unwrap();

	let tag = document.id3v2().unwrap();
	assert_eq!(tag.version(), Id3v2Version::V2);
	assert!(tag.get("TT2").is_some());
	assert!(tag.get("TAL").is_some());
	assert_eq!(document.get(Field::Album), Some(FieldValue::from("Iron Maiden")));

	let written = util::contents(document);
	assert_eq!(written.len(), contents.len());
	assert_eq!(written[3], 2);
}

#[test_log::test]
fn new_tag_version() {
	let mut document = util::read_document(AUDIO);
	document.set_write_options(WriteOptions::new().new_tag_version(Id3v2Version::V3));
	document.set_target_version(TargetVersion::V2);
	document.set(Field::Year, "1980");
	document.set(Field::Comment, "Debut");
	document.save().unwrap();

	assert!(document.id3v1().is_none());

	let tag = document.id3v2().unwrap();
	assert_eq!(tag.version(), Id3v2Version::V3);
	assert!(tag.get("TYER").is_some());
	assert!(tag.get("TDRC").is_none());
	assert!(tag.get("COMM").is_some());

	let written = util::contents(document);
	assert_eq!(&written[..4], b"ID3\x03");
	assert!(written.ends_with(AUDIO));

	let reread = util::read_document(&written);
	assert_eq!(reread.get(Field::Year), Some(FieldValue::from("1980")));
	assert_eq!(reread.get(Field::Comment), Some(FieldValue::from("Debut")));
}

#[test_log::test]
fn every_field_round_trips() {
	// (field, value set, value read back)
	let values = [
		(Field::Artist, FieldValue::from("Iron Maiden"), FieldValue::from("Iron Maiden")),
		(Field::Band, FieldValue::from("Iron Maiden"), FieldValue::from("Iron Maiden")),
		(Field::Album, FieldValue::from("Killers"), FieldValue::from("Killers")),
		(Field::Song, FieldValue::from("Prowler"), FieldValue::from("Prowler")),
		(Field::Track, FieldValue::from("3/12"), FieldValue::Number(3)),
		(
			Field::Comment,
			FieldValue::from("Recorded at Battery Studios"),
			FieldValue::from("Recorded at Battery Studios"),
		),
		(Field::Year, FieldValue::from("1981"), FieldValue::from("1981")),
		(Field::Genre, FieldValue::Number(9), FieldValue::from("Metal")),
		(Field::Composer, FieldValue::from("Steve Harris"), FieldValue::from("Steve Harris")),
		(Field::Copyright, FieldValue::from("1981 EMI"), FieldValue::from("1981 EMI")),
		(
			Field::Url,
			FieldValue::from("https://www.ironmaiden.com"),
			FieldValue::from("https://www.ironmaiden.com"),
		),
		(Field::Publisher, FieldValue::from("EMI"), FieldValue::from("EMI")),
	];
	assert_eq!(values.len(), Field::ALL.len());

	for version in [Id3v2Version::V2, Id3v2Version::V3, Id3v2Version::V4] {
		let mut document = util::read_document(AUDIO);
		document.set_write_options(WriteOptions::new().new_tag_version(version));
		document.set_target_version(TargetVersion::V2);
		for (field, value, _) in &values {
			document.set(*field, value.clone());
		}

		document.save().unwrap();
		assert!(document.save_errors().is_empty());
		assert_eq!(document.dirty_fields().count(), 0);

		let reread = util::read_document(&util::contents(document));
		assert_eq!(reread.versions(), [Id3Version::V2(version)]);
		for (field, _, expected) in &values {
			assert_eq!(reread.get(*field).as_ref(), Some(expected), "{field} in {version:?}");
		}
	}
}

#[test_log::test]
fn oversized_frame_only_fails_its_field() {
	let mut contents = util::tag(2, 0, &[util::frame(2, "TT2", 0, &util::text("Prowler"))], 64);
	contents.extend_from_slice(AUDIO);

	let mut document = util::read_document(&contents);
	document.set_target_version(TargetVersion::V2);

	// With the encoding byte, one byte more than an ID3v2.2 frame size can describe
	document.set(Field::Song, "a".repeat(0x00FF_FFFF));
	document.set(Field::Artist, "Iron Maiden");
	document.save().unwrap();

	let errors = document.save_errors();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].field(), Field::Song);
	assert_eq!(errors[0].tag_type(), TagType::Id3v2);
	assert!(matches!(
		errors[0].error().kind(),
		ErrorKind::Id3v2(e) if matches!(e.kind(), Id3v2ErrorKind::FrameTooLarge { .. })
	));
	assert_eq!(document.dirty_fields().collect::<Vec<_>>(), [Field::Song]);

	let written = util::contents(document);
	assert_eq!(written.len(), contents.len());

	let reread = util::read_document(&written);
	assert_eq!(reread.get(Field::Artist), Some(FieldValue::from("Iron Maiden")));
	assert_eq!(reread.get(Field::Song), Some(FieldValue::from("Prowler")));
}

#[test_log::test]
fn frame_unsynchronisation() {
	let title = util::text("A\u{FF}\u{E0}");
	let unsynchronised = util::unsynchronise(&title);
	assert_eq!(unsynchronised.len(), title.len() + 1);

	let mut contents = util::tag(4, 0, &[util::frame(4, "TIT2", 0x0002, &unsynchronised)], 64);
	contents.extend_from_slice(AUDIO);

	let mut document = util::read_document(&contents);
	assert_eq!(document.get(Field::Song), Some(FieldValue::from("A\u{FF}\u{E0}")));

	document.set(Field::Artist, "Iron Maiden");
	document.save().unwrap();

	let written = util::contents(document);
	assert!(util::contains(&written, &unsynchronised));

	let reread = util::read_document(&written);
	assert_eq!(reread.get(Field::Song), Some(FieldValue::from("A\u{FF}\u{E0}")));
	assert!(reread.id3v2().unwrap().get("TIT2").unwrap().flags.unsynchronisation);
}

#[test_log::test]
fn tag_unsynchronisation() {
	let frames = [
		util::frame(3, "TIT2", 0, &util::text("A\u{FF}\u{E0}")),
		util::frame(3, "TPE1", 0, &util::text("Iron Maiden")),
	]
	.concat();
	let body = util::unsynchronise(&frames);
	assert_ne!(body, frames);

	let mut contents = util::tag(3, 0x80, &[body], 32);
	contents.extend_from_slice(AUDIO);

	let mut document = util::read_document(&contents);
	assert!(document.id3v2().unwrap().flags().unsynchronisation);
	assert_eq!(document.get(Field::Song), Some(FieldValue::from("A\u{FF}\u{E0}")));
	assert_eq!(document.get(Field::Artist), Some(FieldValue::from("Iron Maiden")));

	document.set(Field::Album, "Killers");
	document.save().unwrap();

	let written = util::contents(document);
	assert_eq!(written[5] & 0x80, 0x80);
	assert!(!util::contains(&written, &frames[..frames.len() / 2]));

	let reread = util::read_document(&written);
	assert_eq!(reread.get(Field::Song), Some(FieldValue::from("A\u{FF}\u{E0}")));
	assert_eq!(reread.get(Field::Album), Some(FieldValue::from("Killers")));
}

#[test_log::test]
fn opaque_frames_are_preserved() {
	// Compressed, with a data length indicator
	let compressed = util::frame(
		4,
		"TPE1",
		0x0009,
		&[0, 0, 0, 0x0B, 0x78, 0x9C, 0xF3, 0x2C, 0xCA],
	);
	let private = util::frame(4, "PRIV", 0, b"owner\0\x01\x02\x03");

	let mut contents = util::tag(4, 0, &[compressed.clone(), private.clone()], 0);
	contents.extend_from_slice(AUDIO);

	let mut document = util::read_document(&contents);
	assert!(document.id3v2().unwrap().get("TPE1").unwrap().is_opaque());
	assert_eq!(document.get(Field::Artist), None);

	document.set(Field::Song, "Prowler");
	document.save().unwrap();

	let written = util::contents(document);
	assert!(util::contains(&written, &compressed));
	assert!(util::contains(&written, &private));

	// Setting the field replaces the frame we couldn't read
	let mut document = util::read_document(&written);
	document.set(Field::Artist, "Iron Maiden");
	document.save().unwrap();

	let tag = document.id3v2().unwrap();
	let artist = tag.get("TPE1").unwrap();
	assert!(!artist.is_opaque());
	assert!(!artist.flags.compression);
	assert_eq!(document.get(Field::Artist), Some(FieldValue::from("Iron Maiden")));
	assert!(tag.get("PRIV").is_some());
}

#[test_log::test]
fn footer_requires_an_exact_fit() {
	let tag = util::tag(4, 0x10, &[util::frame(4, "TIT2", 0, &util::text("Prowler"))], 0);
	let mut footer = tag[..10].to_vec();
	footer[..3].copy_from_slice(b"3DI");

	let mut contents = tag.clone();
	contents.extend_from_slice(&footer);
	contents.extend_from_slice(AUDIO);

	// Same size, so it fits exactly
	let mut document = util::read_document(&contents);
	assert!(document.id3v2().unwrap().flags().footer);
	document.set(Field::Song, "Phantom");
	document.set_target_version(TargetVersion::V2);
	document.save().unwrap();

	let written = util::contents(document);
	assert_eq!(written.len(), contents.len());
	assert_eq!(&written[tag.len()..tag.len() + 3], b"3DI");
	assert!(written.ends_with(AUDIO));

	// Larger, so the audio has to move. Tags with a footer never get padding.
	let mut document = util::read_document(&written);
	document.set(Field::Song, "Remember Tomorrow");
	document.set_target_version(TargetVersion::V2);
	document.save().unwrap();

	let tag_len = 10 + (10 + 1 + "Remember Tomorrow".len());
	let written = util::contents(document);
	assert_eq!(written.len(), tag_len + 10 + AUDIO.len());
	assert_eq!(&written[tag_len..tag_len + 3], b"3DI");
	assert!(written.ends_with(AUDIO));

	let reread = util::read_document(&written);
	assert_eq!(
		reread.get(Field::Song),
		Some(FieldValue::from("Remember Tomorrow"))
	);
}

#[test_log::test]
fn strict_mode_rejects_bad_frames() {
	let mut contents = util::tag(
		3,
		0,
		&[
			util::frame(3, "TIT2", 0, &util::text("Prowler")),
			util::frame(3, "ti!2", 0, &util::text("Garbage")),
		],
		0,
	);
	contents.extend_from_slice(AUDIO);

	let document = util::read_document(&contents);
	assert!(document.decode_error(TagType::Id3v2).is_none());
	assert_eq!(document.get(Field::Song), Some(FieldValue::from("Prowler")));
	assert_eq!(document.id3v2().unwrap().len(), 1);

	let document = TagDocument::read_from(
		util::temp_file(&contents),
		ParseOptions::new().parsing_mode(ParsingMode::Strict),
	)
	.unwrap();
	assert!(document.decode_error(TagType::Id3v2).is_some());
	assert!(document.id3v2().is_none());
}
