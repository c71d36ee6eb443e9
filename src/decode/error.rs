//! Error Handling.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{error, fmt};
use crate::tag::Tag;


//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding data.
///
/// All variants are terminal for the decode call that produced them: the
/// caller receives either a fully populated value or an error, never a
/// partial result, and there is no way to resume a failed decode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A declared length exceeds the remaining input.
    TruncatedInput,

    /// The length octets themselves are malformed.
    ///
    /// This includes the indefinite form, which is legal BER but never
    /// appears in LDAP extension values, the reserved first octet 0xFF,
    /// and lengths too large for this system.
    InvalidLength,

    /// The identifier octets of a tag are malformed.
    InvalidTag,

    /// The grammar has no transition for the current state and tag.
    UnexpectedTag {
        /// The name of the state the grammar was in.
        state: &'static str,

        /// The tag that was observed.
        tag: Tag,
    },

    /// The input ended at a point where the grammar required more fields.
    UnexpectedEndOfInput,

    /// A BOOLEAN value did not consist of exactly one content octet.
    InvalidBoolean,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::TruncatedInput => {
                f.write_str("value length exceeds remaining input")
            }
            DecodeError::InvalidLength => {
                f.write_str("invalid length octets")
            }
            DecodeError::InvalidTag => {
                f.write_str("invalid identifier octets")
            }
            DecodeError::UnexpectedTag { state, tag } => {
                write!(f, "unexpected tag {} in state {}", tag, state)
            }
            DecodeError::UnexpectedEndOfInput => {
                f.write_str("unexpected end of input")
            }
            DecodeError::InvalidBoolean => {
                f.write_str("invalid BOOLEAN content")
            }
        }
    }
}

impl error::Error for DecodeError { }
