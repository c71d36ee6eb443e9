//! The length octets.
//!
//! This is a private module. The [`Length`] defined herein is used by the
//! TLV reader and the encode buffer but not publicly exposed.

use std::mem;
use crate::decode::{DecodeError, SliceSource};


/// The number of octets in a `usize`.
const LEN: usize = mem::size_of::<usize>();


//------------ Length --------------------------------------------------------

/// The definite length octets of an encoded value.
///
/// # BER Encoding
///
/// The length can be encoded in one of two basic ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the remaining bits of this first octet provide the definite length
/// directly. Thus, if the first octet is less than 128, it is the length.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow to encode the actual
/// length in big-endian order. If they specify that there are zero more
/// octets, i.e., the value of the first octet is 0x80, the length is
/// indefinite. LDAP extension values never use the indefinite form, so we
/// reject it outright.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Length(usize);

impl Length {
    /// The reserved first octet.
    const RESERVED: u8 = 0xFF;

    /// The first octet of an indefinite length.
    const INDEFINITE: u8 = 0x80;

    /// Creates a length from the number of content octets.
    pub fn new(len: usize) -> Self {
        Length(len)
    }

    /// Returns the number of content octets.
    pub fn to_usize(self) -> usize {
        self.0
    }

    /// Parses the length octets from the beginning of a source.
    ///
    /// Fails with [`DecodeError::InvalidLength`] for the indefinite form,
    /// the reserved first octet 0xFF, and lengths that do not fit into a
    /// `usize`, and with [`DecodeError::TruncatedInput`] if the source ends
    /// within the length octets.
    pub fn take_from(
        source: &mut SliceSource
    ) -> Result<Self, DecodeError> {
        let first = match source.take_u8() {
            Some(octet) => octet,
            None => return xerr!(Err(DecodeError::TruncatedInput)),
        };
        if first & 0x80 == 0 {
            return Ok(Length(first as usize))
        }
        if first == Self::INDEFINITE || first == Self::RESERVED {
            return xerr!(Err(DecodeError::InvalidLength))
        }
        let count = (first & 0x7F) as usize;
        let mut res = 0usize;
        for _ in 0..count {
            let octet = match source.take_u8() {
                Some(octet) => octet,
                None => return xerr!(Err(DecodeError::TruncatedInput)),
            };
            if res.leading_zeros() < 8 {
                // Shifting would lose significant octets.
                return xerr!(Err(DecodeError::InvalidLength))
            }
            res = res << 8 | octet as usize;
        }
        Ok(Length(res))
    }

    /// Returns the number of octets of the encoded form of the length.
    pub fn encoded_len(self) -> usize {
        if self.0 < 0x80 {
            1
        }
        else {
            LEN - self.start_idx() + 1
        }
    }

    /// Returns the encoded octets and how many of them are significant.
    ///
    /// The encoded form occupies the first returned number of octets of the
    /// returned array. Having the caller slice the array keeps this method
    /// allocation free, which matters when splicing headers into the
    /// encode buffer.
    pub fn to_octets(self) -> ([u8; LEN + 1], usize) {
        let mut res = [0u8; LEN + 1];
        if self.0 < 0x80 {
            res[0] = self.0 as u8;
            (res, 1)
        }
        else {
            let idx = self.start_idx();
            let count = LEN - idx;
            res[0] = 0x80 | count as u8;
            res[1..=count].copy_from_slice(&self.0.to_be_bytes()[idx..]);
            (res, count + 1)
        }
    }

    /// Appends the encoded length to the end of `target`.
    pub fn append_encoded(self, target: &mut Vec<u8>) {
        let (octets, count) = self.to_octets();
        target.extend_from_slice(&octets[..count]);
    }

    /// Returns the index of the first non-zero octet of the length value.
    fn start_idx(self) -> usize {
        (self.0.leading_zeros() / 8) as usize
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn take(data: &[u8]) -> Result<usize, DecodeError> {
        Length::take_from(&mut SliceSource::new(data)).map(Length::to_usize)
    }

    #[test]
    fn take_short_form() {
        assert_eq!(take(b"\x00").unwrap(), 0);
        assert_eq!(take(b"\x12").unwrap(), 0x12);
        assert_eq!(take(b"\x7f").unwrap(), 0x7f);
    }

    #[test]
    fn take_long_form() {
        assert_eq!(take(b"\x81\x80").unwrap(), 0x80);
        assert_eq!(take(b"\x81\xf0").unwrap(), 0xf0);
        assert_eq!(take(b"\x82\xf0\x0e").unwrap(), 0xf00e);
        // BER allows leading zero octets in the long form.
        assert_eq!(take(b"\x82\x00\x0e").unwrap(), 0x0e);
    }

    #[test]
    fn take_malformed() {
        assert_eq!(take(b"").unwrap_err(), DecodeError::TruncatedInput);
        assert_eq!(take(b"\x80").unwrap_err(), DecodeError::InvalidLength);
        assert_eq!(take(b"\xff").unwrap_err(), DecodeError::InvalidLength);
        assert_eq!(take(b"\x82\x01").unwrap_err(), DecodeError::TruncatedInput);
        assert_eq!(
            take(
                b"\x89\x01\x00\x00\x00\x00\x00\x00\x00\x00"
            ).unwrap_err(),
            DecodeError::InvalidLength
        );
    }

    #[test]
    fn encode() {
        fn step(len: usize, expected: &[u8]) {
            let mut vec = Vec::new();
            Length::new(len).append_encoded(&mut vec);
            assert_eq!(vec.as_slice(), expected);
            assert_eq!(Length::new(len).encoded_len(), expected.len());
        }

        step(0, b"\x00");
        step(0x12, b"\x12");
        step(0x7f, b"\x7f");
        step(0x80, b"\x81\x80");
        step(0xdead, b"\x82\xde\xad");
        step(0x01_0000, b"\x83\x01\x00\x00");
    }
}
