// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern chain model
//!
//! A pattern is a backward-linked chain of named elements. Each builder call
//! consumes the current tail and returns a new tail pointing at it:
//!
//! ```rust
//! use eventflux_cep::query_api::pattern::{Pattern, Strictness};
//!
//! struct Event {
//!     price: f64,
//! }
//!
//! let pattern = Pattern::<Event>::begin("start")
//!     .where_(|e: &Event| e.price > 2.0)
//!     .followed_by("middle")   // relaxed: tolerates unrelated events
//!     .one_or_more()
//!     .next("end");            // strict: nothing may come in between
//!
//! assert_eq!(pattern.names(), ["start", "middle", "end"]);
//! assert_eq!(pattern.strictness(), Strictness::Strict);
//! assert_eq!(pattern.previous().unwrap().strictness(), Strictness::Relaxed);
//! ```
//!
//! The compiler walks the chain tail to head via [`Pattern::previous`].

pub mod condition;

use std::fmt;
use std::sync::Arc;

use self::condition::{AndCondition, Condition, ConditionRef, SubtypeCondition, Subtyped};

/// How strictly an element must follow its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// `next`: no unmatched events may occur in between
    Strict,
    /// `followed_by`: unmatched events in between are discarded
    Relaxed,
}

/// Minimum occurrence flag for looping elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occurrences {
    ZeroOrMore,
    OneOrMore,
}

/// How many consecutive times an element's condition may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quantifier {
    /// Exactly once
    #[default]
    Single,
    /// Repeats; the flag decides whether zero occurrences are allowed
    Looping(Occurrences),
}

impl Quantifier {
    #[inline]
    pub const fn is_looping(&self) -> bool {
        matches!(self, Quantifier::Looping(_))
    }

    /// True for zero-or-more loops.
    #[inline]
    pub const fn allows_zero(&self) -> bool {
        matches!(self, Quantifier::Looping(Occurrences::ZeroOrMore))
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Single => write!(f, "single"),
            Quantifier::Looping(Occurrences::ZeroOrMore) => write!(f, "zero-or-more"),
            Quantifier::Looping(Occurrences::OneOrMore) => write!(f, "one-or-more"),
        }
    }
}

/// One named element of a pattern chain, plus the chain before it.
pub struct Pattern<E> {
    name: String,
    condition: Option<ConditionRef<E>>,
    subtype: Option<ConditionRef<E>>,
    quantifier: Quantifier,
    strictness: Strictness,
    previous: Option<Box<Pattern<E>>>,
}

impl<E> Pattern<E> {
    fn element(name: impl Into<String>, strictness: Strictness, previous: Option<Self>) -> Self {
        Self {
            name: name.into(),
            condition: None,
            subtype: None,
            quantifier: Quantifier::Single,
            strictness,
            previous: previous.map(Box::new),
        }
    }

    /// Starts a new chain with its head element.
    pub fn begin(name: impl Into<String>) -> Self {
        Self::element(name, Strictness::Strict, None)
    }

    /// Appends an element that must match the very next event.
    pub fn next(self, name: impl Into<String>) -> Self {
        Self::element(name, Strictness::Strict, Some(self))
    }

    /// Appends an element that may be preceded by unrelated events.
    pub fn followed_by(self, name: impl Into<String>) -> Self {
        Self::element(name, Strictness::Relaxed, Some(self))
    }

    /// Sets the condition of this element. Calling it again ANDs the conditions.
    pub fn where_<C>(mut self, condition: C) -> Self
    where
        C: Condition<E> + 'static,
        E: 'static,
    {
        let condition: ConditionRef<E> = Arc::new(condition);
        self.condition = Some(match self.condition.take() {
            Some(existing) => Arc::new(AndCondition::new(existing, condition)),
            None => condition,
        });
        self
    }

    pub fn zero_or_more(mut self) -> Self {
        self.quantifier = Quantifier::Looping(Occurrences::ZeroOrMore);
        self
    }

    pub fn one_or_more(mut self) -> Self {
        self.quantifier = Quantifier::Looping(Occurrences::OneOrMore);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn condition(&self) -> Option<&ConditionRef<E>> {
        self.condition.as_ref()
    }

    pub fn subtype_constraint(&self) -> Option<&ConditionRef<E>> {
        self.subtype.as_ref()
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Head elements report `Strict`: there is nothing before them to skip.
    pub fn strictness(&self) -> Strictness {
        if self.previous.is_none() {
            Strictness::Strict
        } else {
            self.strictness
        }
    }

    pub fn previous(&self) -> Option<&Pattern<E>> {
        self.previous.as_deref()
    }

    pub fn is_head(&self) -> bool {
        self.previous.is_none()
    }

    /// Iterates the chain from this element back to the head.
    pub fn iter(&self) -> PatternIter<'_, E> {
        PatternIter {
            current: Some(self),
        }
    }

    /// Number of elements in the chain ending at this element.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// A chain always holds at least its head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Element names in declaration order (head first).
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.iter().map(Pattern::name).collect();
        names.reverse();
        names
    }
}

impl<E: Subtyped> Pattern<E> {
    /// Restricts this element to events whose concrete type is `T`.
    pub fn subtype<T: 'static>(mut self) -> Self {
        self.subtype = Some(Arc::new(SubtypeCondition::<T>::new()));
        self
    }
}

impl<E> fmt::Debug for Pattern<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("name", &self.name)
            .field("quantifier", &self.quantifier)
            .field("strictness", &self.strictness())
            .field("has_condition", &self.condition.is_some())
            .field("has_subtype", &self.subtype.is_some())
            .field("previous", &self.previous.as_ref().map(|p| p.name.as_str()))
            .finish()
    }
}

/// Tail-to-head iterator over a pattern chain.
pub struct PatternIter<'a, E> {
    current: Option<&'a Pattern<E>>,
}

impl<'a, E> Iterator for PatternIter<'a, E> {
    type Item = &'a Pattern<E>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.previous();
        Some(current)
    }
}
