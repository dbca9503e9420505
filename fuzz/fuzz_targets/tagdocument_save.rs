#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use mp3_tagger::config::ParseOptions;
use mp3_tagger::document::TagDocument;
use mp3_tagger::field::Field;

fuzz_target!(|data: Vec<u8>| {
	let Ok(mut document) = TagDocument::read_from(Cursor::new(data), ParseOptions::new()) else {
		return;
	};

	document.set(Field::Song, "Prowler");
	document.delete(Field::Artist);
	let _ = document.save();
});
