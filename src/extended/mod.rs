//! Values carried by LDAP extended operations.
//!
//! An extended operation names an OID and carries its arguments as an
//! opaque octet string. The types in this module are the decoded forms of
//! those octet strings for the operations this crate supports.

pub use self::cert_generation::CertGenerationRequest;

pub mod cert_generation;
