//! The value of the certificate generation extended request.
//!
//! The request asks the server to generate a certificate for an entry. Its
//! value is a SEQUENCE of four mandatory fields in fixed order:
//!
//! ```text
//! CertGenerationRequest ::= SEQUENCE {
//!     keyAlgorithm  OCTET STRING,
//!     subjectDN     OCTET STRING,
//!     issuerDN      OCTET STRING,
//!     targetDN      OCTET STRING
//! }
//! ```
//!
//! The order is part of the wire contract: the fields are distinguished by
//! position alone, all four sharing the OCTET STRING tag.

use std::sync::OnceLock;
use bytes::Bytes;
use crate::decode::{Container, DecodeError, Grammar, States, Tlv};
use crate::encode::Buffer;
use crate::tag::Tag;


//------------ CertGenerationRequest -----------------------------------------

/// The decoded value of a certificate generation extended request.
///
/// The distinguished names and the algorithm name are text. Decoding
/// converts them from UTF-8 lossily, replacing offending octets rather
/// than failing, since their exact validation is the business of the
/// directory layer, not the codec.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CertGenerationRequest {
    /// The algorithm to generate the key pair with, e.g. `RSA`.
    key_algorithm: String,

    /// The subject DN of the certificate to generate.
    subject_dn: String,

    /// The issuer DN of the certificate to generate.
    issuer_dn: String,

    /// The DN of the entry to store the certificate in.
    target_dn: String,
}

impl CertGenerationRequest {
    /// The object identifier of the certificate generation request.
    pub const OID: &'static str = "1.3.6.1.4.1.18060.0.1.8";

    /// Creates a request from its four fields.
    pub fn new(
        key_algorithm: impl Into<String>,
        subject_dn: impl Into<String>,
        issuer_dn: impl Into<String>,
        target_dn: impl Into<String>,
    ) -> Self {
        CertGenerationRequest {
            key_algorithm: key_algorithm.into(),
            subject_dn: subject_dn.into(),
            issuer_dn: issuer_dn.into(),
            target_dn: target_dn.into(),
        }
    }

    /// Returns the key algorithm.
    pub fn key_algorithm(&self) -> &str {
        &self.key_algorithm
    }

    /// Returns the subject DN.
    pub fn subject_dn(&self) -> &str {
        &self.subject_dn
    }

    /// Returns the issuer DN.
    pub fn issuer_dn(&self) -> &str {
        &self.issuer_dn
    }

    /// Returns the target DN.
    pub fn target_dn(&self) -> &str {
        &self.target_dn
    }

    /// Decodes a request from the octets of an extended request value.
    pub fn decode(input: &[u8]) -> Result<Self, DecodeError> {
        grammar().decode(input)
    }

    /// Appends the encoded request to a buffer.
    ///
    /// Writes the four fields in their fixed wire order and wraps them in
    /// the outer SEQUENCE whose length is measured from what was written.
    pub fn encode(&self, buffer: &mut Buffer) {
        let start = buffer.pos();
        buffer.octet_string(self.key_algorithm.as_bytes());
        buffer.octet_string(self.subject_dn.as_bytes());
        buffer.octet_string(self.issuer_dn.as_bytes());
        buffer.octet_string(self.target_dn.as_bytes());
        buffer.wrap_sequence(start);
    }

    /// Returns the encoded request as octets.
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = Buffer::new();
        self.encode(&mut buffer);
        buffer.into_bytes()
    }
}


//------------ CertGenerationStates ------------------------------------------

/// The states of the certificate generation request grammar.
#[derive(Clone, Copy, Debug)]
enum CertGenerationStates {
    /// Nothing has been read yet.
    Start,

    /// The outer SEQUENCE header has been read.
    Sequence,

    /// The key algorithm has been stored.
    KeyAlgorithm,

    /// The subject DN has been stored.
    SubjectDn,

    /// The issuer DN has been stored.
    IssuerDn,

    /// The target DN has been stored. Final.
    TargetDn,
}

impl States for CertGenerationStates {
    const COUNT: usize = 6;

    fn ordinal(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            CertGenerationStates::Start => "START",
            CertGenerationStates::Sequence => "CERT_GENERATION_SEQUENCE",
            CertGenerationStates::KeyAlgorithm => "KEY_ALGORITHM",
            CertGenerationStates::SubjectDn => "SUBJECT_DN",
            CertGenerationStates::IssuerDn => "ISSUER_DN",
            CertGenerationStates::TargetDn => "TARGET_DN",
        }
    }
}


//------------ The grammar ---------------------------------------------------

/// Returns the shared grammar for certificate generation requests.
fn grammar() -> &'static Grammar<CertGenerationStates, CertGenerationRequest> {
    static GRAMMAR: OnceLock<
        Grammar<CertGenerationStates, CertGenerationRequest>
    > = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::builder("certGenerationRequest", CertGenerationStates::Start)
            .transition(
                CertGenerationStates::Start, Tag::SEQUENCE,
                CertGenerationStates::Sequence, enter_sequence
            )
            .transition(
                CertGenerationStates::Sequence, Tag::OCTET_STRING,
                CertGenerationStates::KeyAlgorithm, store_key_algorithm
            )
            .transition(
                CertGenerationStates::KeyAlgorithm, Tag::OCTET_STRING,
                CertGenerationStates::SubjectDn, store_subject_dn
            )
            .transition(
                CertGenerationStates::SubjectDn, Tag::OCTET_STRING,
                CertGenerationStates::IssuerDn, store_issuer_dn
            )
            .transition(
                CertGenerationStates::IssuerDn, Tag::OCTET_STRING,
                CertGenerationStates::TargetDn, store_target_dn
            )
            .build()
    })
}

/// Returns the current value octets as text.
fn text(tlv: &Tlv) -> String {
    String::from_utf8_lossy(tlv.value()).into_owned()
}

/// Enters the outer SEQUENCE. All four fields are still required.
fn enter_sequence(
    _container: &mut Container<CertGenerationRequest>
) -> Result<(), DecodeError> {
    Ok(())
}

/// Stores the key algorithm field.
fn store_key_algorithm(
    container: &mut Container<CertGenerationRequest>
) -> Result<(), DecodeError> {
    let value = text(container.current());
    container.target_mut().key_algorithm = value;
    Ok(())
}

/// Stores the subject DN field.
fn store_subject_dn(
    container: &mut Container<CertGenerationRequest>
) -> Result<(), DecodeError> {
    let value = text(container.current());
    container.target_mut().subject_dn = value;
    Ok(())
}

/// Stores the issuer DN field.
fn store_issuer_dn(
    container: &mut Container<CertGenerationRequest>
) -> Result<(), DecodeError> {
    let value = text(container.current());
    container.target_mut().issuer_dn = value;
    Ok(())
}

/// Stores the target DN field, completing the value.
fn store_target_dn(
    container: &mut Container<CertGenerationRequest>
) -> Result<(), DecodeError> {
    let value = text(container.current());
    container.target_mut().target_dn = value;
    container.set_end_allowed(true);
    Ok(())
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn request() -> CertGenerationRequest {
        CertGenerationRequest::new("RSA", "cn=a", "cn=b", "cn=c")
    }

    #[test]
    fn encode_concrete() {
        // Four OCTET STRING TLVs in field order inside one SEQUENCE whose
        // length is the exact sum of the inner TLVs' encoded sizes.
        assert_eq!(
            request().to_bytes().as_ref(),
            b"\x30\x17\
              \x04\x03RSA\
              \x04\x04cn=a\
              \x04\x04cn=b\
              \x04\x04cn=c"
        );
    }

    #[test]
    fn decode_concrete() {
        let decoded = CertGenerationRequest::decode(
            b"\x30\x17\x04\x03RSA\x04\x04cn=a\x04\x04cn=b\x04\x04cn=c"
        ).unwrap();
        assert_eq!(decoded.key_algorithm(), "RSA");
        assert_eq!(decoded.subject_dn(), "cn=a");
        assert_eq!(decoded.issuer_dn(), "cn=b");
        assert_eq!(decoded.target_dn(), "cn=c");
    }

    #[test]
    fn round_trip() {
        let value = request();
        assert_eq!(
            CertGenerationRequest::decode(&value.to_bytes()).unwrap(),
            value
        );
    }

    #[test]
    fn rejects_missing_fields() {
        // Only three of the four mandatory fields present.
        assert_eq!(
            CertGenerationRequest::decode(
                b"\x30\x11\x04\x03RSA\x04\x04cn=a\x04\x04cn=b"
            ),
            Err(DecodeError::UnexpectedEndOfInput)
        );
        // The empty SEQUENCE is no more complete.
        assert_eq!(
            CertGenerationRequest::decode(b"\x30\x00"),
            Err(DecodeError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn rejects_unexpected_tag() {
        assert_eq!(
            CertGenerationRequest::decode(b"\x30\x03\x02\x01\x05"),
            Err(DecodeError::UnexpectedTag {
                state: "CERT_GENERATION_SEQUENCE",
                tag: Tag::INTEGER,
            })
        );
    }

    #[test]
    fn rejects_fifth_field() {
        assert_eq!(
            CertGenerationRequest::decode(
                b"\x30\x19\x04\x03RSA\x04\x04cn=a\x04\x04cn=b\x04\x04cn=c\
                  \x04\x00"
            ),
            Err(DecodeError::UnexpectedTag {
                state: "TARGET_DN",
                tag: Tag::OCTET_STRING,
            })
        );
    }

    #[test]
    fn decodes_empty_fields() {
        let decoded = CertGenerationRequest::decode(
            b"\x30\x08\x04\x00\x04\x00\x04\x00\x04\x00"
        ).unwrap();
        assert_eq!(decoded, CertGenerationRequest::default());
    }
}
