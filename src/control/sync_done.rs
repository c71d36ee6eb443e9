//! The value of the content synchronization done control.
//!
//! The sync done control concludes a content synchronization search as
//! defined in RFC 4533. Its value is a SEQUENCE of two fields that are
//! both allowed to be absent:
//!
//! ```text
//! syncDoneValue ::= SEQUENCE {
//!     cookie          syncCookie OPTIONAL,
//!     refreshDeletes  BOOLEAN DEFAULT FALSE
//! }
//! ```

use std::sync::OnceLock;
use bytes::Bytes;
use crate::decode::{Container, DecodeError, Grammar, States};
use crate::encode::Buffer;
use crate::tag::Tag;


//------------ SyncDoneValue -------------------------------------------------

/// The decoded value of a sync done control.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyncDoneValue {
    /// The opaque synchronization cookie, if the server sent one.
    cookie: Option<Bytes>,

    /// Whether the refresh phase used delete mode.
    refresh_deletes: bool,
}

impl SyncDoneValue {
    /// The object identifier of the sync done control.
    pub const OID: &'static str = "1.3.6.1.4.1.4203.1.9.1.3";

    /// Creates a value from its two fields.
    pub fn new(cookie: Option<Bytes>, refresh_deletes: bool) -> Self {
        SyncDoneValue { cookie, refresh_deletes }
    }

    /// Returns the synchronization cookie if present.
    pub fn cookie(&self) -> Option<&Bytes> {
        self.cookie.as_ref()
    }

    /// Returns whether the refresh phase used delete mode.
    pub fn refresh_deletes(&self) -> bool {
        self.refresh_deletes
    }

    /// Sets the synchronization cookie.
    pub fn set_cookie(&mut self, cookie: Option<Bytes>) {
        self.cookie = cookie;
    }

    /// Sets the refresh deletes flag.
    pub fn set_refresh_deletes(&mut self, refresh_deletes: bool) {
        self.refresh_deletes = refresh_deletes;
    }

    /// Decodes a value from the octets of a control value.
    pub fn decode(input: &[u8]) -> Result<Self, DecodeError> {
        grammar().decode(input)
    }

    /// Appends the encoded value to a buffer.
    ///
    /// Absent and defaulted fields are not written at all, so a value with
    /// no cookie and `refresh_deletes` false encodes as the two octet
    /// empty SEQUENCE.
    pub fn encode(&self, buffer: &mut Buffer) {
        let start = buffer.pos();
        if let Some(cookie) = self.cookie.as_ref() {
            buffer.octet_string(cookie);
        }
        if self.refresh_deletes {
            buffer.boolean(true);
        }
        buffer.wrap_sequence(start);
    }

    /// Returns the encoded value as octets.
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = Buffer::new();
        self.encode(&mut buffer);
        buffer.into_bytes()
    }
}


//------------ SyncDoneStates ------------------------------------------------

/// The states of the sync done value grammar.
#[derive(Clone, Copy, Debug)]
enum SyncDoneStates {
    /// Nothing has been read yet.
    Start,

    /// The outer SEQUENCE header has been read.
    Sequence,

    /// The cookie has been stored.
    Cookie,

    /// The refresh deletes flag has been stored. Final.
    RefreshDeletes,
}

impl States for SyncDoneStates {
    const COUNT: usize = 4;

    fn ordinal(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            SyncDoneStates::Start => "START",
            SyncDoneStates::Sequence => "SYNC_DONE_SEQUENCE",
            SyncDoneStates::Cookie => "COOKIE",
            SyncDoneStates::RefreshDeletes => "REFRESH_DELETES",
        }
    }
}


//------------ The grammar ---------------------------------------------------

/// Returns the shared grammar for sync done values.
fn grammar() -> &'static Grammar<SyncDoneStates, SyncDoneValue> {
    static GRAMMAR: OnceLock<
        Grammar<SyncDoneStates, SyncDoneValue>
    > = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::builder("syncDoneValue", SyncDoneStates::Start)
            .transition(
                SyncDoneStates::Start, Tag::SEQUENCE,
                SyncDoneStates::Sequence, enter_sequence
            )
            .transition(
                SyncDoneStates::Sequence, Tag::OCTET_STRING,
                SyncDoneStates::Cookie, store_cookie
            )
            .transition(
                SyncDoneStates::Sequence, Tag::BOOLEAN,
                SyncDoneStates::RefreshDeletes, store_refresh_deletes
            )
            // The flag may follow the cookie or stand alone, so the same
            // action is reachable from two states.
            .transition(
                SyncDoneStates::Cookie, Tag::BOOLEAN,
                SyncDoneStates::RefreshDeletes, store_refresh_deletes
            )
            .build()
    })
}

/// Enters the outer SEQUENCE.
///
/// Both fields are optional or defaulted, so the empty SEQUENCE is a
/// complete value.
fn enter_sequence(
    container: &mut Container<SyncDoneValue>
) -> Result<(), DecodeError> {
    container.set_end_allowed(true);
    Ok(())
}

/// Stores the cookie field.
fn store_cookie(
    container: &mut Container<SyncDoneValue>
) -> Result<(), DecodeError> {
    let cookie = Bytes::copy_from_slice(container.current().value());
    container.target_mut().cookie = Some(cookie);
    container.set_end_allowed(true);
    Ok(())
}

/// Stores the refresh deletes flag.
fn store_refresh_deletes(
    container: &mut Container<SyncDoneValue>
) -> Result<(), DecodeError> {
    let refresh_deletes = container.current().to_bool()?;
    container.target_mut().refresh_deletes = refresh_deletes;
    container.set_end_allowed(true);
    Ok(())
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_empty_sequence() {
        let value = SyncDoneValue::decode(b"\x30\x00").unwrap();
        assert_eq!(value.cookie(), None);
        assert!(!value.refresh_deletes());
    }

    #[test]
    fn decode_cookie_only() {
        let value = SyncDoneValue::decode(b"\x30\x05\x04\x03abc").unwrap();
        assert_eq!(value.cookie().map(|c| c.as_ref()), Some(b"abc".as_ref()));
        assert!(!value.refresh_deletes());
    }

    #[test]
    fn decode_flag_only() {
        let value = SyncDoneValue::decode(b"\x30\x03\x01\x01\xff").unwrap();
        assert_eq!(value.cookie(), None);
        assert!(value.refresh_deletes());
    }

    #[test]
    fn decode_cookie_and_flag() {
        let value = SyncDoneValue::decode(
            b"\x30\x08\x04\x03abc\x01\x01\xff"
        ).unwrap();
        assert_eq!(value.cookie().map(|c| c.as_ref()), Some(b"abc".as_ref()));
        assert!(value.refresh_deletes());
    }

    #[test]
    fn decode_empty_cookie() {
        let value = SyncDoneValue::decode(b"\x30\x02\x04\x00").unwrap();
        assert_eq!(value.cookie().map(|c| c.as_ref()), Some(b"".as_ref()));
    }

    #[test]
    fn boolean_laxity() {
        // Any non-zero octet is true in BER, only 0x00 is false.
        for (octet, expected) in [(0x01u8, true), (0x00, false), (0x2a, true)] {
            let value = SyncDoneValue::decode(
                &[0x30, 0x03, 0x01, 0x01, octet]
            ).unwrap();
            assert_eq!(value.refresh_deletes(), expected);
        }
        assert_eq!(
            SyncDoneValue::decode(b"\x30\x04\x01\x02\x00\x00"),
            Err(DecodeError::InvalidBoolean)
        );
    }

    #[test]
    fn rejects_unexpected_tag() {
        assert_eq!(
            SyncDoneValue::decode(b"\x30\x03\x02\x01\x00"),
            Err(DecodeError::UnexpectedTag {
                state: "SYNC_DONE_SEQUENCE",
                tag: Tag::INTEGER,
            })
        );
        assert_eq!(
            SyncDoneValue::decode(b"\x04\x00"),
            Err(DecodeError::UnexpectedTag {
                state: "START",
                tag: Tag::OCTET_STRING,
            })
        );
    }

    #[test]
    fn rejects_trailing_field() {
        // Nothing may follow the flag.
        assert_eq!(
            SyncDoneValue::decode(b"\x30\x06\x01\x01\xff\x01\x01\x00"),
            Err(DecodeError::UnexpectedTag {
                state: "REFRESH_DELETES",
                tag: Tag::BOOLEAN,
            })
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            SyncDoneValue::decode(b""),
            Err(DecodeError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn rejects_truncated_cookie() {
        // The cookie declares ten content octets with three remaining.
        assert_eq!(
            SyncDoneValue::decode(b"\x30\x05\x04\x0aabc"),
            Err(DecodeError::TruncatedInput)
        );
        // An outer SEQUENCE declaring more content than the input has.
        assert_eq!(
            SyncDoneValue::decode(b"\x30\x0c\x04\x03abc"),
            Err(DecodeError::TruncatedInput)
        );
    }

    #[test]
    fn encode_minimal() {
        // Absent and defaulted fields are never written.
        let value = SyncDoneValue::default();
        assert_eq!(value.to_bytes().as_ref(), b"\x30\x00");
    }

    #[test]
    fn encode_full() {
        let value = SyncDoneValue::new(
            Some(Bytes::from_static(b"abc")), true
        );
        assert_eq!(
            value.to_bytes().as_ref(),
            b"\x30\x08\x04\x03abc\x01\x01\xff"
        );
    }

    #[test]
    fn round_trip() {
        let values = [
            SyncDoneValue::default(),
            SyncDoneValue::new(None, true),
            SyncDoneValue::new(Some(Bytes::from_static(b"")), false),
            SyncDoneValue::new(Some(Bytes::from_static(b"cookie")), true),
        ];
        for value in values {
            assert_eq!(
                SyncDoneValue::decode(&value.to_bytes()).unwrap(),
                value
            );
        }
    }
}
