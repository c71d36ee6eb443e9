//! Encoding data in BER.
//!
//! Encoding is done through a [`Buffer`]: values append the TLVs of their
//! fields in wire order and then wrap everything written since a
//! remembered position into an outer constructed value. The length of that
//! outer value is measured from what was actually written, never
//! predicted, so it is exact by construction.
//!
//! A type that can be encoded typically provides a method named `encode`
//! taking a `&mut Buffer` and, for convenience, a `to_bytes` method that
//! runs `encode` against a fresh buffer and returns the finished octets.

pub use self::buffer::Buffer;

mod buffer;
