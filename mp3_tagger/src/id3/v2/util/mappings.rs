use crate::field::Field;
use crate::id3::v2::Id3v2Version;

// Some taggers write ID3v2.2 IDs into ID3v2.3/ID3v2.4 tags ("TT2\0"), so the
// three character IDs are accepted as a fallback in every version.
macro_rules! frame_mappings {
	($($field:ident => [$($v2:literal),+] [$($v3:literal),+] [$($v4:literal),+];)+) => {
		/// All frame IDs that can hold `field` in `version`
		///
		/// The first ID is the one used when creating a new frame.
		pub(crate) fn frame_ids(version: Id3v2Version, field: Field) -> &'static [&'static str] {
			match (field, version) {
				$(
					(Field::$field, Id3v2Version::V2) => &[$($v2),+],
					(Field::$field, Id3v2Version::V3) => &[$($v3,)+ $($v2),+],
					(Field::$field, Id3v2Version::V4) => &[$($v4,)+ $($v2),+],
				)+
			}
		}
	};
}

frame_mappings! {
	Artist    => ["TP1"] ["TPE1"]                 ["TPE1"];
	Band      => ["TP2"] ["TPE2"]                 ["TPE2"];
	Album     => ["TAL"] ["TALB"]                 ["TALB"];
	Song      => ["TT2"] ["TIT2"]                 ["TIT2"];
	Track     => ["TRK"] ["TRCK"]                 ["TRCK"];
	Comment   => ["COM"] ["COMM"]                 ["COMM"];
	Year      => ["TYE"] ["TYER", "TORY", "TDRC"] ["TDRC", "TYER", "TORY"];
	Genre     => ["TCO"] ["TCON"]                 ["TCON"];
	Composer  => ["TCM"] ["TCOM"]                 ["TCOM"];
	Copyright => ["TCR"] ["TCOP"]                 ["TCOP"];
	Url       => ["WXX"] ["WXXX"]                 ["WXXX"];
	Publisher => ["TPB"] ["TPUB"]                 ["TPUB"];
}

/// Whether `id` is a comment frame in any version
pub(crate) fn is_comment(id: &str) -> bool {
	matches!(id, "COMM" | "COM")
}

/// Whether `id` is a user defined URL frame in any version
pub(crate) fn is_user_url(id: &str) -> bool {
	matches!(id, "WXXX" | "WXX")
}

/// Whether `id` is a text information frame in any version
///
/// The user defined text frames (`TXXX`/`TXX`) have a description, and aren't included.
pub(crate) fn is_text(id: &str) -> bool {
	id.starts_with('T') && !matches!(id, "TXXX" | "TXX")
}
