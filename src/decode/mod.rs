//! Decoding BER encoded data.
//!
//! Decoding is driven by a [`Grammar`]: an immutable table that maps the
//! pair of a state and an observed tag to a transition carrying the next
//! state and a semantic action. The engine reads the input one
//! tag-length-value triplet at a time – see [`Tlv`] –, looks up the
//! transition, lets the action pull typed data out of the current triplet
//! into the target value held by the [`Container`], and moves on. There is
//! no backtracking and no lookahead beyond the current tag: if the table
//! has no entry, decoding fails right there.
//!
//! Grammars are built once through [`GrammarBuilder`] and shared for the
//! lifetime of the process; every decode call owns its own container and
//! cursor and leaves no state behind.

pub use self::error::DecodeError;
pub use self::grammar::{
    Action, Container, Grammar, GrammarBuilder, States, Transition
};
pub use self::source::SliceSource;
pub use self::tlv::Tlv;

pub mod error;
pub mod grammar;
pub mod source;
pub mod tlv;
