//! Handling of BER encoded LDAP extension values.
//!
//! LDAP controls and extended operations carry their payload as an opaque
//! octet string whose content is a BER encoded value private to the
//! extension. This crate provides the machinery to turn those octet strings
//! into typed values and back: a table-driven decoding engine that walks
//! the input one tag-length-value triplet at a time – see the [`decode`]
//! module –, an encode buffer that assembles the wire representation with
//! measured rather than predicted lengths – see the [`encode`] module –,
//! and the concrete value types for the supported extensions in [`control`]
//! and [`extended`]. The [`factory`] module binds each value type to the
//! object identifier the protocol layer dispatches on.

#[macro_use] pub mod debug;

pub use self::control::SyncDoneValue;
pub use self::extended::CertGenerationRequest;
pub use self::tag::Tag;

pub mod decode;
pub mod encode;

pub mod control;
pub mod extended;
pub mod factory;
pub mod tag;

mod length;
