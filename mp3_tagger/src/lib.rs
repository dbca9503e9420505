//! Read and write ID3v1 and ID3v2 tags in MP3 files.
//!
//! # Supported tags
//!
//! * ID3v1 and ID3v1.1, in the last 128 bytes of a file
//! * ID3v2.2, ID3v2.3 and ID3v2.4, at the start of a file
//!
//! A file may have both an ID3v1 and an ID3v2 tag, which are read and written independently.
//!
//! # Examples
//!
//! ## Reading and writing fields
//!
//! ```rust,no_run
//! # fn main() -> mp3_tagger::error::Result<()> {
//! use mp3_tagger::document::TagDocument;
//! use mp3_tagger::field::Field;
//!
//! let mut document = TagDocument::open("test.mp3")?;
//!
//! if let Some(artist) = document.get(Field::Artist) {
//! 	println!("Artist: {artist}");
//! }
//!
//! document.set(Field::Song, "Prowler");
//! document.delete(Field::Comment);
//!
//! // Nothing is written until now
//! document.save()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Choosing which tags to write
//!
//! ```rust,no_run
//! # fn main() -> mp3_tagger::error::Result<()> {
//! use mp3_tagger::document::{TagDocument, TargetVersion};
//! use mp3_tagger::field::Field;
//!
//! let mut document = TagDocument::open("test.mp3")?;
//!
//! // Leave the ID3v2 tag alone
//! document.set_target_version(TargetVersion::V1);
//! document.set(Field::Track, 3u32);
//! document.save()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Working with the tags directly
//!
//! ```rust
//! # fn main() -> mp3_tagger::error::Result<()> {
//! use mp3_tagger::config::WriteOptions;
//! use mp3_tagger::id3::v1::Id3v1Tag;
//!
//! let mut tag = Id3v1Tag::new();
//! tag.set_title(String::from("Prowler"));
//! tag.genre = Some(9);
//!
//! let bytes = tag.encode(WriteOptions::default())?;
//! assert_eq!(&bytes[..3], b"TAG");
//! # Ok(())
//! # }
//! ```
//!
//! # Important format-specific notes
//!
//! Both formats have their own quirks, such as the limited fields of ID3v1.
//! Be sure to read the module documentation of each format to see important notes and warnings.

pub mod config;
pub mod document;
pub mod error;
pub mod field;
pub mod id3;
pub(crate) mod macros;
mod util;

pub use util::io;
pub use util::text;

pub use document::TagDocument;
pub use field::{Field, FieldValue};
