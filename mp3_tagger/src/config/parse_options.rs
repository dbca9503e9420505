/// The parsing strictness mode
///
/// This can be set with [`ParseOptions::parsing_mode`].
///
/// # Examples
///
/// ```rust,no_run
/// use mp3_tagger::config::{ParseOptions, ParsingMode};
/// use mp3_tagger::document::TagDocument;
/// use std::fs::File;
///
/// # fn main() -> mp3_tagger::error::Result<()> {
/// let file = File::open("foo.mp3")?;
///
/// // We only want to read spec-compliant inputs
/// let parse_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// let document = TagDocument::read_from(file, parse_options)?;
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// This mode will eagerly error on any non-spec-compliant input.
	///
	/// ## Examples of behavior
	///
	/// * Unable to parse a frame header - The entire ID3v2 tag is discarded
	/// * Frame ID with invalid characters - The entire ID3v2 tag is discarded
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// This mode will attempt to fill in any holes where possible in otherwise valid, spec-compliant input.
	///
	/// NOTE: A readable input does *not* necessarily make it writeable.
	///
	/// ## Examples of behavior
	///
	/// * Unable to parse a frame header - Frames read up to that point are kept, the rest is treated as padding
	/// * Frame ID with invalid characters - Frames read up to that point are kept, the rest is treated as padding
	#[default]
	BestAttempt,
	/// Least eager to error, may produce invalid/partial output
	///
	/// ## Examples of behavior
	///
	/// * Unable to parse a frame header - Frames read up to that point are kept, the rest is treated as padding
	/// * Frame ID with invalid characters - The frame is kept as-is
	Relaxed,
}

/// Options to control how mp3_tagger parses a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) read_id3v1: bool,
	pub(crate) read_id3v2: bool,
	pub(crate) parsing_mode: ParsingMode,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	read_id3v1: true,
	/// 	read_id3v2: true,
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			read_id3v1: true,
			read_id3v2: true,
			parsing_mode: Self::DEFAULT_PARSING_MODE,
		}
	}

	/// Whether or not to read an ID3v1 tag
	///
	/// A tag that isn't read is treated as absent, and is never rewritten.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::ParseOptions;
	///
	/// // By default, `read_id3v1` is enabled. Here, we don't want to read it.
	/// let parsing_options = ParseOptions::new().read_id3v1(false);
	/// ```
	pub fn read_id3v1(&mut self, read_id3v1: bool) -> Self {
		self.read_id3v1 = read_id3v1;
		*self
	}

	/// Whether or not to read an ID3v2 tag
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::ParseOptions;
	///
	/// // By default, `read_id3v2` is enabled. Here, we don't want to read it.
	/// let parsing_options = ParseOptions::new().read_id3v2(false);
	/// ```
	pub fn read_id3v2(&mut self, read_id3v2: bool) -> Self {
		self.read_id3v2 = read_id3v2;
		*self
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}
}
