use crate::util::{self, AUDIO};
use mp3_tagger::config::WriteOptions;
use mp3_tagger::document::TargetVersion;
use mp3_tagger::field::{Field, FieldValue};
use mp3_tagger::id3::v2::Id3v2Header;

fn tag_with_padding(padding: usize) -> Vec<u8> {
	let mut contents = util::tag(
		4,
		0,
		&[util::frame(4, "TIT2", 0, &util::text("Prowler"))],
		padding,
	);
	contents.extend_from_slice(AUDIO);
	contents
}

#[test_log::test]
fn padding_absorbs_growth() {
	let contents = tag_with_padding(256);

	let mut document = util::read_document(&contents);
	document.set_target_version(TargetVersion::V2);
	document.set(Field::Song, "Remember Tomorrow");
	document.set(Field::Artist, "Iron Maiden");
	document.save().unwrap();

	let written = util::contents(document);
	assert_eq!(written.len(), contents.len());
	assert!(written.ends_with(AUDIO));

	let header = Id3v2Header::parse(&written).unwrap();
	assert_eq!(header.size as usize, contents.len() - AUDIO.len() - 10);

	let reread = util::read_document(&written);
	assert_eq!(
		reread.get(Field::Song),
		Some(FieldValue::from("Remember Tomorrow"))
	);
	assert_eq!(reread.get(Field::Artist), Some(FieldValue::from("Iron Maiden")));
}

#[test_log::test]
fn padding_absorbs_shrinking() {
	// No padding at all, the leftover space is less than the default minimum
	let contents = tag_with_padding(0);

	let mut document = util::read_document(&contents);
	document.set_target_version(TargetVersion::V2);
	document.set(Field::Song, "Sin");
	document.save().unwrap();

	let written = util::contents(document);
	assert_eq!(written.len(), contents.len());

	// "Prowler" -> "Sin" leaves 4 bytes of padding
	let frames_end = 10 + 10 + 1 + 3;
	assert_eq!(&written[frames_end..frames_end + 4], &[0; 4]);
	assert!(written.ends_with(AUDIO));

	let reread = util::read_document(&written);
	assert_eq!(reread.get(Field::Song), Some(FieldValue::from("Sin")));

	// Growing back would leave less than the minimum padding, so the tag moves
	let mut document = util::read_document(&written);
	document.set_target_version(TargetVersion::V2);
	document.set(Field::Song, "Prowler");
	document.save().unwrap();
	assert!(util::contents(document).len() > contents.len());
}

#[test_log::test]
fn relocation_uses_preferred_padding() {
	let contents = tag_with_padding(0);

	let mut document = util::read_document(&contents);
	document.set_write_options(WriteOptions::new().preferred_padding(100));
	document.set_target_version(TargetVersion::V2);
	document.set(Field::Album, "Iron Maiden");
	document.save().unwrap();

	let written = util::contents(document);
	assert!(written.ends_with(AUDIO));

	let frames_len = (10 + 1 + 7) + (10 + 1 + 11);
	assert_eq!(written.len(), 10 + frames_len + 100 + AUDIO.len());

	let header = Id3v2Header::parse(&written).unwrap();
	assert_eq!(header.size as usize, frames_len + 100);
	assert!(written[10 + frames_len..10 + frames_len + 100].iter().all(|b| *b == 0));
}

#[test_log::test]
fn minimum_padding_forces_relocation() {
	// The new frame fits, but would leave less than the minimum padding
	let contents = tag_with_padding(24);

	let mut document = util::read_document(&contents);
	document.set_write_options(
		WriteOptions::new()
			.minimum_padding(16)
			.preferred_padding(64),
	);
	document.set_target_version(TargetVersion::V2);
	document.set(Field::Track, 3u32);
	document.save().unwrap();

	let frames_len = (10 + 1 + 7) + (10 + 1 + 1);
	let written = util::contents(document);
	assert_eq!(written.len(), 10 + frames_len + 64 + AUDIO.len());
	assert!(written.ends_with(AUDIO));

	// With the default minimum, it fits
	let mut document = util::read_document(&contents);
	document.set_target_version(TargetVersion::V2);
	document.set(Field::Track, 3u32);
	document.save().unwrap();

	assert_eq!(util::contents(document).len(), contents.len());
}

#[test_log::test]
fn id3v1_stays_at_the_end() {
	let mut contents = tag_with_padding(0);
	contents.extend(util::id3v1("Prowler", "", "", None, 0xFF));

	let mut document = util::read_document(&contents);
	document.set_write_options(WriteOptions::new().preferred_padding(0));
	document.set(Field::Artist, "Iron Maiden");
	document.save().unwrap();

	let written = util::contents(document);
	let frames_len = (10 + 1 + 7) + (10 + 1 + 11);
	assert_eq!(written.len(), 10 + frames_len + AUDIO.len() + 128);
	assert_eq!(&written[10 + frames_len..][..AUDIO.len()], AUDIO);

	let id3v1 = &written[written.len() - 128..];
	assert_eq!(&id3v1[..3], b"TAG");
	assert_eq!(&id3v1[33..44], b"Iron Maiden");
}
