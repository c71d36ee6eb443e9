//! Values carried by LDAP controls.
//!
//! A control attaches an OID plus an opaque octet string to an LDAP
//! operation. The types in this module are the decoded forms of those
//! octet strings for the controls this crate supports.

pub use self::sync_done::SyncDoneValue;

pub mod sync_done;
