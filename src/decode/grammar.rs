//! The transition table and the engine that drives it.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::fmt;
use super::error::DecodeError;
use super::source::SliceSource;
use super::tlv::Tlv;
use crate::tag::Tag;


//------------ States --------------------------------------------------------

/// The finite set of states of one grammar.
///
/// Each grammar defines its own small state enum and implements this trait
/// for it. The ordinal numbers the implementation reports size the
/// transition table, so they must be dense: every value must map to an
/// ordinal below [`COUNT`][Self::COUNT].
pub trait States: Copy + 'static {
    /// The number of states.
    const COUNT: usize;

    /// Returns the ordinal of this state.
    fn ordinal(self) -> usize;

    /// Returns the name of this state for error reporting.
    fn name(self) -> &'static str;
}


//------------ Action --------------------------------------------------------

/// The semantic action executed when a transition is taken.
///
/// An action reads the current triplet through
/// [`Container::current`] and stores typed data into the target through
/// [`Container::target_mut`]. An action that consumes the last field of a
/// run of optional or defaulted fields additionally calls
/// [`Container::set_end_allowed`] so the engine knows the input may
/// legally stop here.
pub type Action<T> = fn(&mut Container<'_, T>) -> Result<(), DecodeError>;


//------------ Transition ----------------------------------------------------

/// A single entry of the transition table.
pub struct Transition<S, T> {
    /// The tag this transition fires on.
    tag: Tag,

    /// The state the grammar moves to.
    to: S,

    /// The semantic action to execute.
    action: Action<T>,
}

//--- Clone and Copy
//
//  Implemented manually since deriving would place a spurious `Copy` bound
//  on the target type, which only occurs inside a function pointer.

impl<S: Copy, T> Clone for Transition<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Copy, T> Copy for Transition<S, T> { }


//------------ Container -----------------------------------------------------

/// The mutable state of one decode call.
///
/// A container is created by [`Grammar::decode`] and dropped when the call
/// returns. It carries the triplet currently being processed and the
/// target value under construction; semantic actions receive it mutably
/// and are the only code that touches it.
pub struct Container<'s, T> {
    /// The triplet the engine just read.
    tlv: Tlv<'s>,

    /// May the input legally end before the next triplet?
    end_allowed: bool,

    /// The value being assembled.
    target: T,
}

impl<'s, T> Container<'s, T> {
    /// Returns the triplet currently being processed.
    pub fn current(&self) -> &Tlv<'s> {
        &self.tlv
    }

    /// Returns a mutable reference to the value being assembled.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Declares whether the input may legally end at this point.
    ///
    /// An action sets this to `true` after consuming a field that is the
    /// last mandatory one, i.e., when all fields that could still follow
    /// are optional or defaulted. The engine consults the flag only once
    /// the input is exhausted.
    pub fn set_end_allowed(&mut self, allowed: bool) {
        self.end_allowed = allowed;
    }
}


//------------ Grammar -------------------------------------------------------

/// The complete transition table for one structured type.
///
/// A grammar is immutable once built and carries no per-decode state, so a
/// single instance is safely shared by any number of concurrent decode
/// calls. The usual pattern is to build it lazily into a
/// `std::sync::OnceLock` the first time the type is decoded.
///
/// The table is two-dimensional: one row per state, one column per
/// possible first identifier octet. This makes the lookup a pair of array
/// index operations and guarantees there can only ever be one transition
/// per state and observed tag. For the rare multi-octet tag, the column is
/// shared by all tags with the same leading octet and the stored tag
/// decides; a mismatch is an unexpected tag like any other.
pub struct Grammar<S: States, T> {
    /// The name of the grammar for diagnostics.
    name: &'static str,

    /// The state decoding starts in.
    initial: S,

    /// Whether empty input is already acceptable in the initial state.
    initial_end_allowed: bool,

    /// The transition table, `S::COUNT` rows of 256 columns.
    transitions: Vec<[Option<Transition<S, T>>; 256]>,
}

impl<S: States, T> Grammar<S, T> {
    /// Returns a builder for a grammar with the given name.
    ///
    /// Decoding will start in the `initial` state.
    pub fn builder(
        name: &'static str, initial: S
    ) -> GrammarBuilder<S, T> {
        GrammarBuilder {
            name,
            initial,
            initial_end_allowed: false,
            transitions: {
                let mut rows = Vec::with_capacity(S::COUNT);
                rows.resize_with(S::COUNT, || [None; 256]);
                rows
            },
        }
    }

    /// Returns the name of the grammar.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up the transition for a state and an observed tag.
    fn lookup(&self, state: S, tag: Tag) -> Option<Transition<S, T>> {
        let transition = self.transitions[state.ordinal()][
            tag.first_octet() as usize
        ]?;
        if transition.tag == tag {
            Some(transition)
        }
        else {
            None
        }
    }
}

impl<S: States, T: Default> Grammar<S, T> {
    /// Decodes one value from the given input.
    ///
    /// Walks the input triplet by triplet in a single forward pass:
    /// read a [`Tlv`], look up the transition for the current state and
    /// its tag, run the transition’s action against a fresh [`Container`],
    /// advance the state, repeat. Decoding succeeds when the input is
    /// exhausted at a point the grammar has flagged as end-allowed and
    /// fails deterministically otherwise.
    pub fn decode(&self, input: &[u8]) -> Result<T, DecodeError> {
        let mut source = SliceSource::new(input);
        let mut state = self.initial;
        let mut container = Container {
            tlv: Tlv::empty(),
            end_allowed: self.initial_end_allowed,
            target: T::default(),
        };
        loop {
            if source.is_exhausted() {
                if container.end_allowed {
                    return Ok(container.target)
                }
                return xerr!(Err(DecodeError::UnexpectedEndOfInput))
            }
            let tlv = Tlv::take_from(&mut source)?;
            let transition = match self.lookup(state, tlv.tag()) {
                Some(transition) => transition,
                None => {
                    return xerr!(Err(DecodeError::UnexpectedTag {
                        state: state.name(),
                        tag: tlv.tag(),
                    }))
                }
            };
            container.tlv = tlv;
            (transition.action)(&mut container)?;
            state = transition.to;
        }
    }
}

impl<S: States, T> fmt::Debug for Grammar<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grammar({})", self.name)
    }
}


//------------ GrammarBuilder ------------------------------------------------

/// A builder assembling the transition table of a grammar.
///
/// Registering two transitions for the same state and tag is a programming
/// error in the grammar itself, not a property of any input, so the
/// builder panics on the spot rather than deferring to a runtime error.
pub struct GrammarBuilder<S: States, T> {
    name: &'static str,
    initial: S,
    initial_end_allowed: bool,
    transitions: Vec<[Option<Transition<S, T>>; 256]>,
}

impl<S: States, T> GrammarBuilder<S, T> {
    /// Marks the initial state as end-allowed.
    ///
    /// Only relevant for types whose entire body is optional, where the
    /// empty input is a legal encoding.
    pub fn end_allowed_at_start(mut self) -> Self {
        self.initial_end_allowed = true;
        self
    }

    /// Registers a transition.
    ///
    /// When the grammar is in state `from` and observes `tag`, it will
    /// execute `action` and move to state `to`.
    ///
    /// # Panics
    ///
    /// Panics if a transition for `from` and `tag` is already registered.
    pub fn transition(
        mut self, from: S, tag: Tag, to: S, action: Action<T>
    ) -> Self {
        let slot = &mut self.transitions[from.ordinal()][
            tag.first_octet() as usize
        ];
        if slot.is_some() {
            panic!(
                "duplicate transition from {} on {} in grammar {}",
                from.name(), tag, self.name
            );
        }
        *slot = Some(Transition { tag, to, action });
        self
    }

    /// Finishes building and returns the immutable grammar.
    pub fn build(self) -> Grammar<S, T> {
        Grammar {
            name: self.name,
            initial: self.initial,
            initial_end_allowed: self.initial_end_allowed,
            transitions: self.transitions,
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    /// A grammar for `SEQUENCE { flag BOOLEAN }`.
    #[derive(Clone, Copy, Debug)]
    enum FlagStates {
        Start,
        Sequence,
        Flag,
    }

    impl States for FlagStates {
        const COUNT: usize = 3;

        fn ordinal(self) -> usize {
            self as usize
        }

        fn name(self) -> &'static str {
            match self {
                FlagStates::Start => "START",
                FlagStates::Sequence => "SEQUENCE",
                FlagStates::Flag => "FLAG",
            }
        }
    }

    fn flag_grammar() -> Grammar<FlagStates, Option<bool>> {
        Grammar::builder("flag", FlagStates::Start)
            .transition(
                FlagStates::Start, Tag::SEQUENCE, FlagStates::Sequence,
                |_| Ok(())
            )
            .transition(
                FlagStates::Sequence, Tag::BOOLEAN, FlagStates::Flag,
                |container| {
                    let flag = container.current().to_bool()?;
                    *container.target_mut() = Some(flag);
                    container.set_end_allowed(true);
                    Ok(())
                }
            )
            .build()
    }

    #[test]
    fn walks_transitions() {
        let grammar = flag_grammar();
        assert_eq!(
            grammar.decode(b"\x30\x03\x01\x01\xff").unwrap(),
            Some(true)
        );
    }

    #[test]
    fn end_only_where_allowed() {
        let grammar = flag_grammar();
        assert_eq!(
            grammar.decode(b""),
            Err(DecodeError::UnexpectedEndOfInput)
        );
        assert_eq!(
            grammar.decode(b"\x30\x00"),
            Err(DecodeError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn end_allowed_at_start() {
        let grammar = Grammar::<FlagStates, Option<bool>>::builder(
            "empty-ok", FlagStates::Start
        ).end_allowed_at_start().build();
        assert_eq!(grammar.decode(b"").unwrap(), None);
    }

    #[test]
    fn rejects_unknown_tag() {
        let grammar = flag_grammar();
        assert_eq!(
            grammar.decode(b"\x30\x03\x02\x01\x00"),
            Err(DecodeError::UnexpectedTag {
                state: "SEQUENCE",
                tag: Tag::INTEGER,
            })
        );
    }

    #[test]
    fn rejects_trailing_input() {
        let grammar = flag_grammar();
        assert_eq!(
            grammar.decode(b"\x30\x03\x01\x01\xff\x01\x01\x00"),
            Err(DecodeError::UnexpectedTag {
                state: "FLAG",
                tag: Tag::BOOLEAN,
            })
        );
    }

    #[test]
    fn deterministic_lookup() {
        let grammar = flag_grammar();
        let input = b"\x30\x03\x01\x01\x2a";
        assert_eq!(grammar.decode(input), grammar.decode(input));
    }

    #[test]
    #[should_panic(expected = "duplicate transition")]
    fn duplicate_registration_panics() {
        let _ = Grammar::<FlagStates, Option<bool>>::builder(
            "dup", FlagStates::Start
        )
            .transition(
                FlagStates::Start, Tag::SEQUENCE, FlagStates::Sequence,
                |_| Ok(())
            )
            .transition(
                FlagStates::Start, Tag::SEQUENCE, FlagStates::Flag,
                |_| Ok(())
            );
    }
}
