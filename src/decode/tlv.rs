//! Reading a single tag-length-value triplet.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::fmt;
use crate::length::Length;
use crate::tag::Tag;
use super::error::DecodeError;
use super::source::SliceSource;


//------------ Tlv -----------------------------------------------------------

/// One tag-length-value triplet read from the input.
///
/// The value octets are a borrowed view into the input buffer. For a
/// primitive value they have been consumed from the source and `length`
/// equals `value().len()`. For a constructed value only the identifier and
/// length octets have been consumed – the children follow in the stream and
/// will be read as triplets of their own – but the declared content span is
/// still checked against the remaining input and available through
/// [`value`][Self::value].
#[derive(Clone, Copy)]
pub struct Tlv<'s> {
    /// The tag of the value.
    tag: Tag,

    /// The declared number of content octets.
    length: usize,

    /// The content octets.
    value: &'s [u8],
}

impl<'s> Tlv<'s> {
    /// Reads one triplet from the beginning of a source.
    ///
    /// Fails with [`DecodeError::TruncatedInput`] if the declared length
    /// exceeds the remaining input, and with the respective errors if the
    /// identifier or length octets are malformed.
    pub fn take_from(
        source: &mut SliceSource<'s>
    ) -> Result<Self, DecodeError> {
        let tag = Tag::take_from(source)?;
        let length = Length::take_from(source)?.to_usize();
        let value = if tag.is_constructed() {
            match source.peek_slice(length) {
                Some(value) => value,
                None => return xerr!(Err(DecodeError::TruncatedInput)),
            }
        }
        else {
            match source.take_slice(length) {
                Some(value) => value,
                None => return xerr!(Err(DecodeError::TruncatedInput)),
            }
        };
        Ok(Tlv { tag, length, value })
    }

    /// Returns the tag of the triplet.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns the declared number of content octets.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the content octets.
    pub fn value(&self) -> &'s [u8] {
        self.value
    }

    /// Interprets the content octets as a BER BOOLEAN.
    ///
    /// A BOOLEAN has exactly one content octet; anything else fails with
    /// [`DecodeError::InvalidBoolean`]. BER leaves the choice of the octet
    /// representing `true` to the sender, so any non-zero octet is
    /// accepted. Tightening this to the canonical 0xFF of DER would reject
    /// values legitimately produced by peers.
    pub fn to_bool(&self) -> Result<bool, DecodeError> {
        match self.value {
            [octet] => Ok(*octet != 0),
            _ => xerr!(Err(DecodeError::InvalidBoolean)),
        }
    }

    /// Returns an empty triplet for seeding a fresh container.
    pub(super) fn empty() -> Self {
        Tlv { tag: Tag::NULL, length: 0, value: b"" }
    }
}

impl fmt::Debug for Tlv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tlv({}, {} octets)", self.tag, self.length)
    }
}


//============ Tests =========================================================
