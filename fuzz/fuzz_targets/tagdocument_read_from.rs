#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use mp3_tagger::config::{ParseOptions, ParsingMode};
use mp3_tagger::document::TagDocument;

fuzz_target!(|data: Vec<u8>| {
	let options = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);
	if let Ok(document) = TagDocument::read_from(Cursor::new(data), options) {
		let _ = document.tags();
	}
});
