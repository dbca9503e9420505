#![no_main]

use libfuzzer_sys::fuzz_target;
use mp3_tagger::config::ParsingMode;
use mp3_tagger::id3::v1::Id3v1Tag;

fuzz_target!(|data: [u8; 128]| {
	let _ = Id3v1Tag::parse(&data, ParsingMode::BestAttempt);
});
