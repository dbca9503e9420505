//! Utilities for working with unsynchronized ID3v2 content
//!
//! See [`FrameFlags::unsynchronisation`](crate::id3::v2::FrameFlags::unsynchronisation) for an explanation.

use crate::error::Result;

/// Remove unsynchronisation from `content`
///
/// Every `0xFF 0x00` pair is collapsed into `0xFF`.
///
/// # Examples
///
/// ```rust
/// use mp3_tagger::id3::v2::util::synchsafe::remove_unsynchronisation;
///
/// // The content has two `0xFF 0x00` pairs, which will be removed
/// let content = [0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15];
///
/// // All null bytes following `0xFF` have been removed
/// assert_eq!(remove_unsynchronisation(&content), [0xFF, 0x1A, 0xFF, 0x15]);
/// ```
pub fn remove_unsynchronisation(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len());

	let mut encountered_ff = false;
	for &byte in content {
		if encountered_ff {
			encountered_ff = false;

			// Only skip the next byte if this is valid unsynchronization
			// Otherwise just continue as normal
			if byte == 0 {
				continue;
			}
		}

		out.push(byte);
		if byte == 0xFF {
			encountered_ff = true;
		}
	}

	out
}

/// Apply unsynchronisation to `content`
///
/// A `0x00` is inserted after every `0xFF` that is followed by `0x00` or a byte `>= 0xE0`, or that
/// ends the content. This is the exact inverse of [`remove_unsynchronisation`].
///
/// # Examples
///
/// ```rust
/// use mp3_tagger::id3::v2::util::synchsafe::{apply_unsynchronisation, remove_unsynchronisation};
///
/// let content = [0xFF, 0xE0, 0x1A, 0xFF, 0x00, 0xFF];
///
/// let unsynchronised = apply_unsynchronisation(&content);
/// assert_eq!(unsynchronised, [0xFF, 0x00, 0xE0, 0x1A, 0xFF, 0x00, 0x00, 0xFF, 0x00]);
///
/// assert_eq!(remove_unsynchronisation(&unsynchronised), content);
/// ```
pub fn apply_unsynchronisation(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len() + content.len() / 8);

	let mut bytes = content.iter().copied().peekable();
	while let Some(byte) = bytes.next() {
		out.push(byte);

		if byte != 0xFF {
			continue;
		}

		match bytes.peek() {
			Some(next) if *next != 0 && *next < 0xE0 => {},
			_ => out.push(0),
		}
	}

	out
}

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// See [`FrameFlags::unsynchronisation`](crate::id3::v2::FrameFlags::unsynchronisation) for an explanation.
	///
	/// # Errors
	///
	/// `self` doesn't fit in 28 bits
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	///
	/// // Anything larger can't be represented
	/// assert!(0x1000_0000_u32.synch().is_err());
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// See [`FrameFlags::unsynchronisation`](crate::id3::v2::FrameFlags::unsynchronisation) for an explanation.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3_tagger::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> mp3_tagger::error::Result<()> {
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Now, our re-unsynchronized number should match our original
	/// let re_unsynch_number = synch_number.unsynch();
	/// assert_eq!(re_unsynch_number, unsynch_number);
	/// # Ok(()) }
	/// ```
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		// 7 bits are available per byte
		if self > 0x0FFF_FFFF {
			crate::macros::err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x7F_0000) >> 2)
			| ((self & 0x7F00) >> 1)
			| (self & 0x7F)
	}
}

#[cfg(test)]
mod tests {
	use crate::id3::v2::util::synchsafe::{
		SynchsafeInteger, apply_unsynchronisation, remove_unsynchronisation,
	};

	const UNSYNCHRONIZED_CONTENT: &[u8] =
		&[0xFF, 0x00, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00, 0x00];
	const EXPECTED: &[u8] = &[0xFF, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00];

	#[test_log::test]
	fn remove_unsynchronisation_pairs() {
		assert_eq!(remove_unsynchronisation(UNSYNCHRONIZED_CONTENT), EXPECTED);
	}

	#[test_log::test]
	fn remove_unsynchronisation_should_not_replace_unrelated() {
		const ORIGINAL_CONTENT: &[u8] = &[0xFF, 0x1A, 0xFF, 0xC0, 0x10, 0x01];

		assert_eq!(remove_unsynchronisation(ORIGINAL_CONTENT), ORIGINAL_CONTENT);
		assert_eq!(apply_unsynchronisation(ORIGINAL_CONTENT), ORIGINAL_CONTENT);
	}

	#[test_log::test]
	fn apply_unsynchronisation_leaves_no_false_sync() {
		let content = [0xFF, 0xFF, 0xFB, 0x90, 0xFF, 0xE0, 0xFF];
		let unsynchronised = apply_unsynchronisation(&content);

		for pair in unsynchronised.windows(2) {
			assert!(!(pair[0] == 0xFF && pair[1] >= 0xE0), "{unsynchronised:02X?}");
		}

		assert_eq!(unsynchronised.last(), Some(&0));
	}

	#[test_log::test]
	fn unsynchronisation_is_inverse() {
		// Every pair of "interesting" bytes, in every position
		let interesting = [0x00, 0x01, 0x7F, 0xDF, 0xE0, 0xFE, 0xFF];
		for a in interesting {
			for b in interesting {
				for c in interesting {
					let payload = [a, b, 0xFF, c, a, 0xFF];
					assert_eq!(
						remove_unsynchronisation(&apply_unsynchronisation(&payload)),
						payload
					);
				}
			}
		}

		// A pseudo-random payload
		let mut state = 0x2545_F491_u32;
		let payload: Vec<u8> = (0..4096)
			.map(|_| {
				state ^= state << 13;
				state ^= state >> 17;
				state ^= state << 5;
				// Bias towards 0xFF and 0x00
				match state % 4 {
					0 => 0xFF,
					1 => 0x00,
					_ => (state >> 8) as u8,
				}
			})
			.collect();
		assert_eq!(
			remove_unsynchronisation(&apply_unsynchronisation(&payload)),
			payload
		);
	}

	#[test_log::test]
	fn synchsafe_u32_round_trip() {
		assert_eq!(0x0FFF_FFFF_u32.synch().unwrap(), 0x7F7F_7F7F);
		assert_eq!(0x7F7F_7F7F_u32.unsynch(), 0x0FFF_FFFF);

		let mut value = 0_u32;
		while value < 0x1000_0000 {
			assert_eq!(value.synch().unwrap().unsynch(), value);
			value = value * 3 + 1;
		}

		assert_eq!(0x0FFF_FFFF_u32.synch().unwrap().unsynch(), 0x0FFF_FFFF);
		assert!(0x1000_0000_u32.synch().is_err());
		assert!(u32::MAX.synch().is_err());
	}
}
