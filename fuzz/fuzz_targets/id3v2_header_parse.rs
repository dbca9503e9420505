#![no_main]

use libfuzzer_sys::fuzz_target;
use mp3_tagger::id3::v2::Id3v2Header;

fuzz_target!(|data: &[u8]| {
	let _ = Id3v2Header::parse(data);
});
