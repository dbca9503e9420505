//! Bounds-checked reading and writing over in-memory tag data

use crate::error::Result;
use crate::macros::err;
use crate::util::text::{TextEncoding, split_at_terminator};

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

/// A forward/backward reader over a byte slice
///
/// Every read fails with [`ErrorKind::OutOfBounds`](crate::error::ErrorKind::OutOfBounds) if fewer
/// bytes remain than requested. A failed read does not move the cursor.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ByteCursor<'a> {
	data: &'a [u8],
	pos: usize,
}

impl<'a> ByteCursor<'a> {
	pub(crate) fn new(data: &'a [u8]) -> Self {
		Self { data, pos: 0 }
	}

	pub(crate) fn position(&self) -> usize {
		self.pos
	}

	pub(crate) fn remaining(&self) -> usize {
		self.data.len() - self.pos
	}

	/// Everything from the current position to the end, without advancing
	pub(crate) fn rest(&self) -> &'a [u8] {
		&self.data[self.pos..]
	}

	pub(crate) fn seek(&mut self, pos: usize) -> Result<()> {
		if pos > self.data.len() {
			err!(OutOfBounds);
		}

		self.pos = pos;
		Ok(())
	}

	pub(crate) fn skip(&mut self, n: usize) -> Result<()> {
		self.read_fixed(n).map(|_| ())
	}

	pub(crate) fn read_fixed(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			err!(OutOfBounds);
		}

		let bytes = &self.data[self.pos..self.pos + n];
		self.pos += n;
		Ok(bytes)
	}

	pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut array = [0; N];
		array.copy_from_slice(self.read_fixed(N)?);
		Ok(array)
	}

	pub(crate) fn read_u8(&mut self) -> Result<u8> {
		let [byte] = self.read_array::<1>()?;
		Ok(byte)
	}

	pub(crate) fn read_be_u16(&mut self) -> Result<u16> {
		Ok(BigEndian::read_u16(self.read_fixed(2)?))
	}

	pub(crate) fn read_be_u24(&mut self) -> Result<u32> {
		Ok(BigEndian::read_u24(self.read_fixed(3)?))
	}

	pub(crate) fn read_be_u32(&mut self) -> Result<u32> {
		Ok(BigEndian::read_u32(self.read_fixed(4)?))
	}

	/// Read a 4 byte synchsafe integer, with 7 bits of each byte contributing to the value
	///
	/// Fails with [`ErrorKind::MalformedSize`](crate::error::ErrorKind::MalformedSize) if the most
	/// significant bit of any byte is set.
	pub(crate) fn read_synchsafe_u32(&mut self) -> Result<u32> {
		let bytes = self.read_array::<4>()?;
		if bytes.iter().any(|b| b & 0x80 != 0) {
			self.pos -= 4;
			err!(MalformedSize);
		}

		use crate::id3::v2::util::synchsafe::SynchsafeInteger;
		Ok(u32::from_be_bytes(bytes).unsynch())
	}

	/// Read a string up to (and consuming) the terminator for `encoding`
	///
	/// Invalid text falls back to Latin-1, see [`TextEncoding::decode_lossy`].
	/// If no terminator is found, the rest of the data is read.
	pub(crate) fn read_cstring(&mut self, encoding: TextEncoding) -> String {
		let (text, consumed) = split_at_terminator(self.rest(), encoding);
		self.pos += consumed;
		encoding.decode_lossy(text)
	}
}

/// A growable buffer with big endian and synchsafe writers
///
/// This mirrors [`ByteCursor`].
#[derive(Default, Debug)]
pub(crate) struct ByteWriter {
	buf: Vec<u8>,
}

impl ByteWriter {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn write_fixed(&mut self, bytes: &[u8]) {
		self.buf.extend_from_slice(bytes);
	}

	pub(crate) fn write_u8(&mut self, byte: u8) {
		self.buf.push(byte);
	}

	pub(crate) fn write_be_u16(&mut self, value: u16) -> Result<()> {
		self.buf.write_u16::<BigEndian>(value)?;
		Ok(())
	}

	pub(crate) fn write_be_u24(&mut self, value: u32) -> Result<()> {
		if value > 0xFF_FFFF {
			err!(TooMuchData);
		}

		self.buf.write_u24::<BigEndian>(value)?;
		Ok(())
	}

	pub(crate) fn write_be_u32(&mut self, value: u32) -> Result<()> {
		self.buf.write_u32::<BigEndian>(value)?;
		Ok(())
	}

	/// Write a 4 byte synchsafe integer
	///
	/// Fails with [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData) if `value`
	/// doesn't fit in 28 bits.
	pub(crate) fn write_synchsafe_u32(&mut self, value: u32) -> Result<()> {
		use crate::id3::v2::util::synchsafe::SynchsafeInteger;

		self.write_be_u32(value.synch()?)
	}

	pub(crate) fn into_inner(self) -> Vec<u8> {
		self.buf
	}
}
