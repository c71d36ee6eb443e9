//! Binding value codecs to their protocol identifiers.
//!
//! The protocol layer dispatches an incoming control or extended operation
//! on its OID and hands the opaque value octets to whoever registered for
//! it. A [`PduFactory`] is that registration: it names the OID and knows
//! how to decode and encode the value type behind it. The surrounding
//! dispatch machinery itself lives outside this crate.
//!
//! The protocol layer sometimes already holds a typed value and merely
//! needs it in the codec’s presentation. [`Decorated`] is that
//! presentation: a thin wrapper that can additionally remember the octets
//! the value was decoded from. Wrapping is idempotent – decorating an
//! already decorated value is the identity – and involves no decoding.

use bytes::Bytes;
use crate::control::SyncDoneValue;
use crate::decode::DecodeError;
use crate::encode::Buffer;
use crate::extended::CertGenerationRequest;


//------------ Decorated -----------------------------------------------------

/// A value in the codec’s own presentation.
///
/// Wraps a decoded value and optionally the octets it was decoded from.
/// The raw octets are kept so the protocol layer can forward a value it
/// merely routes without paying for a re-encode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decorated<V> {
    /// The typed value.
    value: V,

    /// The octets the value was decoded from, if it was.
    encoded: Option<Bytes>,
}

impl<V> Decorated<V> {
    /// Creates a decorated value without remembered octets.
    pub fn new(value: V) -> Self {
        Decorated { value, encoded: None }
    }

    /// Creates a decorated value remembering the octets it came from.
    pub fn with_encoded(value: V, encoded: Bytes) -> Self {
        Decorated { value, encoded: Some(encoded) }
    }

    /// Returns a reference to the typed value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the typed value.
    ///
    /// Remembered octets are dropped since they may no longer match.
    pub fn value_mut(&mut self) -> &mut V {
        self.encoded = None;
        &mut self.value
    }

    /// Converts the wrapper back into the typed value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns the octets the value was decoded from, if any.
    pub fn encoded(&self) -> Option<&Bytes> {
        self.encoded.as_ref()
    }
}

impl<V> From<V> for Decorated<V> {
    fn from(value: V) -> Self {
        Decorated::new(value)
    }
}


//------------ PduFactory ----------------------------------------------------

/// A codec for one PDU value type, addressed by its OID.
pub trait PduFactory {
    /// The value type this factory decodes and encodes.
    type Value;

    /// Returns the OID the protocol layer dispatches on.
    fn oid(&self) -> &'static str;

    /// Decodes a value from the raw octets of a PDU payload.
    fn decode_value(&self, input: &[u8]) -> Result<Self::Value, DecodeError>;

    /// Appends the encoded value to a buffer.
    fn encode_value(&self, buffer: &mut Buffer, value: &Self::Value);


    //--- Provided methods

    /// Decodes a payload into the codec’s presentation.
    ///
    /// The returned wrapper remembers the input octets.
    fn decode_decorated(
        &self, input: &[u8]
    ) -> Result<Decorated<Self::Value>, DecodeError> {
        let value = self.decode_value(input)?;
        Ok(Decorated::with_encoded(value, Bytes::copy_from_slice(input)))
    }

    /// Brings a typed value into the codec’s presentation.
    ///
    /// This is pure adaptation: a plain value is wrapped, an already
    /// decorated one is returned unchanged.
    fn decorate(
        &self, value: impl Into<Decorated<Self::Value>>
    ) -> Decorated<Self::Value> {
        value.into()
    }
}


//------------ SyncDoneFactory -----------------------------------------------

/// The factory for sync done control values.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyncDoneFactory;

impl PduFactory for SyncDoneFactory {
    type Value = SyncDoneValue;

    fn oid(&self) -> &'static str {
        SyncDoneValue::OID
    }

    fn decode_value(
        &self, input: &[u8]
    ) -> Result<Self::Value, DecodeError> {
        SyncDoneValue::decode(input)
    }

    fn encode_value(&self, buffer: &mut Buffer, value: &Self::Value) {
        value.encode(buffer)
    }
}


//------------ CertGenerationFactory -----------------------------------------

/// The factory for certificate generation request values.
#[derive(Clone, Copy, Debug, Default)]
pub struct CertGenerationFactory;

impl PduFactory for CertGenerationFactory {
    type Value = CertGenerationRequest;

    fn oid(&self) -> &'static str {
        CertGenerationRequest::OID
    }

    fn decode_value(
        &self, input: &[u8]
    ) -> Result<Self::Value, DecodeError> {
        CertGenerationRequest::decode(input)
    }

    fn encode_value(&self, buffer: &mut Buffer, value: &Self::Value) {
        value.encode(buffer)
    }
}


//============ Tests =========================================================
