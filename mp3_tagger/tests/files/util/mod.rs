use mp3_tagger::config::ParseOptions;
use mp3_tagger::document::TagDocument;

use std::fs::File;
use std::io::{Read, Seek, Write};

/// A single MPEG frame header, followed by some silence
pub const AUDIO: &[u8] = &[
	0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub fn temp_file(contents: &[u8]) -> File {
	let mut file = tempfile::tempfile().unwrap();
	file.write_all(contents).unwrap();
	file.rewind().unwrap();

	file
}

pub fn read_document(contents: &[u8]) -> TagDocument<File> {
	TagDocument::read_from(temp_file(contents), ParseOptions::new()).unwrap()
}

/// The current contents of the document's file
pub fn contents(document: TagDocument<File>) -> Vec<u8> {
	let mut file = document.into_inner();
	file.rewind().unwrap();

	let mut contents = Vec::new();
	file.read_to_end(&mut contents).unwrap();
	contents
}

pub fn synchsafe(size: usize) -> [u8; 4] {
	let size = u32::try_from(size).unwrap();
	assert!(size < 1 << 28);

	[
		(size >> 21) as u8 & 0x7F,
		(size >> 14) as u8 & 0x7F,
		(size >> 7) as u8 & 0x7F,
		size as u8 & 0x7F,
	]
}

/// A Latin-1 text frame body
pub fn text(value: &str) -> Vec<u8> {
	let mut data = vec![0];
	data.extend(value.chars().map(|c| u8::try_from(u32::from(c)).unwrap()));
	data
}

/// Build a frame for the major `version`
///
/// Three character IDs in ID3v2.3/ID3v2.4 are padded with a null byte.
pub fn frame(version: u8, id: &str, flags: u16, data: &[u8]) -> Vec<u8> {
	let mut frame = Vec::new();
	frame.extend_from_slice(id.as_bytes());

	match version {
		2 => {
			assert_eq!(id.len(), 3);
			frame.extend_from_slice(&(data.len() as u32).to_be_bytes()[1..]);
		},
		3 | 4 => {
			if id.len() == 3 {
				frame.push(0);
			}

			if version == 3 {
				frame.extend_from_slice(&(data.len() as u32).to_be_bytes());
			} else {
				frame.extend_from_slice(&synchsafe(data.len()));
			}

			frame.extend_from_slice(&flags.to_be_bytes());
		},
		_ => unreachable!(),
	}

	frame.extend_from_slice(data);
	frame
}

/// Build a full ID3v2 tag, with `padding` null bytes after the frames
pub fn tag(version: u8, flags: u8, frames: &[Vec<u8>], padding: usize) -> Vec<u8> {
	let body_len = frames.iter().map(Vec::len).sum::<usize>() + padding;

	let mut tag = Vec::new();
	tag.extend_from_slice(b"ID3");
	tag.extend_from_slice(&[version, 0, flags]);
	tag.extend_from_slice(&synchsafe(body_len));
	for frame in frames {
		tag.extend_from_slice(frame);
	}

	tag.resize(tag.len() + padding, 0);
	tag
}

/// Build an ID3v1 tag
///
/// A `track` makes it an ID3v1.1 tag.
pub fn id3v1(title: &str, artist: &str, comment: &str, track: Option<u8>, genre: u8) -> Vec<u8> {
	fn field(tag: &mut Vec<u8>, value: &str, len: usize) {
		assert!(value.len() <= len);
		tag.extend_from_slice(value.as_bytes());
		tag.resize(tag.len() + len - value.len(), 0);
	}

	let mut tag = b"TAG".to_vec();
	field(&mut tag, title, 30);
	field(&mut tag, artist, 30);
	field(&mut tag, "", 30);
	field(&mut tag, "1980", 4);

	match track {
		Some(track) => {
			field(&mut tag, comment, 28);
			tag.push(0);
			tag.push(track);
		},
		None => field(&mut tag, comment, 30),
	}

	tag.push(genre);
	assert_eq!(tag.len(), 128);

	tag
}

/// Apply unsynchronisation to `data`, which shouldn't end in `0xFF`
pub fn unsynchronise(data: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(data.len());
	for (i, byte) in data.iter().enumerate() {
		out.push(*byte);
		if *byte == 0xFF {
			match data.get(i + 1) {
				Some(next) if *next == 0 || *next >= 0xE0 => out.push(0),
				_ => {},
			}
		}
	}

	out
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
	haystack.windows(needle.len()).any(|window| window == needle)
}
