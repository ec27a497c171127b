// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event conditions attached to pattern elements and NFA transitions.
//!
//! The compiler never evaluates a condition. It only combines them and hangs
//! them on transitions; the matcher calls [`Condition::filter`] at runtime.

use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Shared handle to a condition, cloned onto every transition that uses it.
pub type ConditionRef<E> = Arc<dyn Condition<E>>;

/// A predicate over a candidate event.
pub trait Condition<E>: Send + Sync {
    /// Returns true if `event` satisfies this condition.
    fn filter(&self, event: &E) -> bool;

    /// Short human readable form, used in automaton descriptions.
    fn describe(&self) -> String {
        "condition".to_string()
    }
}

impl<E, F> Condition<E> for F
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn filter(&self, event: &E) -> bool {
        self(event)
    }

    fn describe(&self) -> String {
        "fn".to_string()
    }
}

impl<E> fmt::Debug for dyn Condition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Condition({})", self.describe())
    }
}

/// Events that can be narrowed to a concrete subtype.
///
/// Mirrors the `as_any` downcasting used by complex events in the runtime.
pub trait Subtyped: Any {
    fn as_any(&self) -> &dyn Any;
}

/// Matches every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrueCondition;

impl<E> Condition<E> for TrueCondition {
    fn filter(&self, _event: &E) -> bool {
        true
    }

    fn describe(&self) -> String {
        "true".to_string()
    }
}

/// Logical AND of two conditions, left side evaluated first.
pub struct AndCondition<E> {
    left: ConditionRef<E>,
    right: ConditionRef<E>,
}

impl<E> AndCondition<E> {
    pub fn new(left: ConditionRef<E>, right: ConditionRef<E>) -> Self {
        Self { left, right }
    }
}

impl<E> Condition<E> for AndCondition<E> {
    fn filter(&self, event: &E) -> bool {
        self.left.filter(event) && self.right.filter(event)
    }

    fn describe(&self) -> String {
        format!("({} AND {})", self.left.describe(), self.right.describe())
    }
}

/// Negation of a condition. Relaxed elements use it to skip events that
/// do not match.
pub struct NotCondition<E> {
    inner: ConditionRef<E>,
}

impl<E> NotCondition<E> {
    pub fn new(inner: ConditionRef<E>) -> Self {
        Self { inner }
    }
}

impl<E> Condition<E> for NotCondition<E> {
    fn filter(&self, event: &E) -> bool {
        !self.inner.filter(event)
    }

    fn describe(&self) -> String {
        format!("NOT {}", self.inner.describe())
    }
}

/// Accepts only events whose concrete type is `T`.
pub struct SubtypeCondition<T> {
    _subtype: PhantomData<fn() -> T>,
}

impl<T: 'static> SubtypeCondition<T> {
    pub fn new() -> Self {
        Self {
            _subtype: PhantomData,
        }
    }

    pub fn subtype_name(&self) -> &'static str {
        type_name::<T>()
    }
}

impl<T: 'static> Default for SubtypeCondition<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Subtyped, T: 'static> Condition<E> for SubtypeCondition<T> {
    fn filter(&self, event: &E) -> bool {
        event.as_any().is::<T>()
    }

    fn describe(&self) -> String {
        format!("subtype {}", self.subtype_name())
    }
}
