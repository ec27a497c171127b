// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quantifier expansion
//!
//! Turns one pattern element into automaton states wired to the already
//! built continuation state `next`.
//!
//! ```text
//! single, strict      S --TAKE--> next
//! single, relaxed     S --TAKE--> next,  S --IGNORE--> S
//!
//! looping             S_cont --TAKE-->    S_cont
//!                     S_cont --IGNORE-->  S_loop     (relaxed only)
//!                     S_cont --PROCEED--> next
//!                     S_loop --TAKE-->    S_cont
//!                     S_loop --IGNORE-->  S_loop     (relaxed only)
//! ```
//!
//! `S_cont` may stop repeating at any time. `S_loop` has to take one more
//! event first. Zero-or-more elements are entered through `S_cont`,
//! one-or-more elements through `S_loop`, so `PROCEED` is only reachable
//! once the first occurrence has been taken.

use std::sync::Arc;

use crate::core::nfa::{NfaBuilder, StateId, StateKind};
use crate::query_api::pattern::condition::{
    AndCondition, ConditionRef, NotCondition, TrueCondition,
};
use crate::query_api::pattern::{Pattern, Quantifier, Strictness};

/// States produced for one pattern element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// State the predecessor element transitions into
    pub entry: StateId,
    /// Every state created for the element, entry included
    pub states: Vec<StateId>,
}

/// Condition a `TAKE` transition must satisfy: subtype first, then the
/// element's own condition. Elements with neither accept every event.
pub fn take_condition<E: 'static>(element: &Pattern<E>) -> ConditionRef<E> {
    match (element.subtype_constraint(), element.condition()) {
        (Some(subtype), Some(condition)) => {
            Arc::new(AndCondition::new(subtype.clone(), condition.clone()))
        }
        (Some(subtype), None) => subtype.clone(),
        (None, Some(condition)) => condition.clone(),
        (None, None) => Arc::new(TrueCondition),
    }
}

/// Condition of an `IGNORE` transition: any event the element would not take.
pub fn ignore_condition<E: 'static>(take: &ConditionRef<E>) -> ConditionRef<E> {
    Arc::new(NotCondition::new(take.clone()))
}

pub(crate) fn expand<E: 'static>(
    builder: &mut NfaBuilder<E>,
    element: &Pattern<E>,
    next: StateId,
) -> Expansion {
    let take = take_condition(element);
    let relaxed = element.strictness() == Strictness::Relaxed;

    match element.quantifier() {
        Quantifier::Single => expand_single(builder, element.name(), take, relaxed, next),
        quantifier @ Quantifier::Looping(_) => expand_looping(
            builder,
            element.name(),
            take,
            relaxed,
            quantifier.allows_zero(),
            next,
        ),
    }
}

fn expand_single<E: 'static>(
    builder: &mut NfaBuilder<E>,
    name: &str,
    take: ConditionRef<E>,
    relaxed: bool,
    next: StateId,
) -> Expansion {
    let state = builder.add_state(name, StateKind::Normal);
    let ignore = relaxed.then(|| ignore_condition(&take));

    builder.add_take(state, next, take);
    if let Some(ignore) = ignore {
        builder.add_ignore(state, state, ignore);
    }

    Expansion {
        entry: state,
        states: vec![state],
    }
}

fn expand_looping<E: 'static>(
    builder: &mut NfaBuilder<E>,
    name: &str,
    take: ConditionRef<E>,
    relaxed: bool,
    allows_zero: bool,
    next: StateId,
) -> Expansion {
    let looping = builder.add_state(name, StateKind::Normal);
    let continuation = builder.add_state(name, StateKind::Normal);
    let ignore = relaxed.then(|| ignore_condition(&take));

    builder.add_take(looping, continuation, take.clone());
    if let Some(ignore) = &ignore {
        builder.add_ignore(looping, looping, ignore.clone());
    }

    builder.add_take(continuation, continuation, take);
    if let Some(ignore) = ignore {
        builder.add_ignore(continuation, looping, ignore);
    }
    builder.add_proceed(continuation, next);

    let entry = if allows_zero { continuation } else { looping };

    Expansion {
        entry,
        states: vec![looping, continuation],
    }
}
