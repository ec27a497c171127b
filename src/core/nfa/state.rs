// SPDX-License-Identifier: MIT OR Apache-2.0

//! NFA states and transitions
//!
//! States live in an arena owned by the automaton and are addressed by
//! [`StateId`]. Two states may share a name (the two halves of a looping
//! element); identity is always the id, never the name.

use std::fmt;

use serde::Serialize;

use crate::query_api::pattern::condition::ConditionRef;

/// Arena index of a state inside one automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StateId(pub(crate) usize);

impl StateId {
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a state in the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    Start,
    Normal,
    Final,
}

/// What a transition does with the current event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StateTransitionAction {
    /// Consume the event and move to the target
    Take,
    /// Drop the event and keep waiting
    Ignore,
    /// Move to the target without consuming anything
    Proceed,
}

impl StateTransitionAction {
    /// Whether this action needs a condition attached.
    #[inline]
    pub const fn requires_condition(&self) -> bool {
        !matches!(self, StateTransitionAction::Proceed)
    }
}

impl fmt::Display for StateTransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StateTransitionAction::Take => "TAKE",
            StateTransitionAction::Ignore => "IGNORE",
            StateTransitionAction::Proceed => "PROCEED",
        };
        f.write_str(s)
    }
}

/// An outgoing edge of a state.
pub struct StateTransition<E> {
    action: StateTransitionAction,
    target: StateId,
    condition: Option<ConditionRef<E>>,
}

impl<E> StateTransition<E> {
    pub(crate) fn new(
        action: StateTransitionAction,
        target: StateId,
        condition: Option<ConditionRef<E>>,
    ) -> Self {
        Self {
            action,
            target,
            condition,
        }
    }

    pub fn action(&self) -> StateTransitionAction {
        self.action
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    /// Present for `Take` and `Ignore`, absent for `Proceed`.
    pub fn condition(&self) -> Option<&ConditionRef<E>> {
        self.condition.as_ref()
    }
}

impl<E> Clone for StateTransition<E> {
    fn clone(&self) -> Self {
        Self {
            action: self.action,
            target: self.target,
            condition: self.condition.clone(),
        }
    }
}

impl<E> fmt::Debug for StateTransition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTransition")
            .field("action", &self.action)
            .field("target", &self.target)
            .field("condition", &self.condition)
            .finish()
    }
}

/// A named automaton state with its ordered outgoing transitions.
pub struct State<E> {
    id: StateId,
    name: String,
    kind: StateKind,
    transitions: Vec<StateTransition<E>>,
}

impl<E> State<E> {
    pub(crate) fn new(id: StateId, name: impl Into<String>, kind: StateKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            transitions: Vec::new(),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn is_start(&self) -> bool {
        self.kind == StateKind::Start
    }

    pub fn is_final(&self) -> bool {
        self.kind == StateKind::Final
    }

    pub fn transitions(&self) -> &[StateTransition<E>] {
        &self.transitions
    }

    pub(crate) fn set_kind(&mut self, kind: StateKind) {
        self.kind = kind;
    }

    pub(crate) fn add_transition(&mut self, transition: StateTransition<E>) {
        self.transitions.push(transition);
    }
}

impl<E> Clone for State<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            transitions: self.transitions.clone(),
        }
    }
}

impl<E> fmt::Debug for State<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("transitions", &self.transitions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_state_roles() {
        let mut state = State::<i32>::new(StateId(0), "start", StateKind::Normal);
        assert!(!state.is_start());
        state.set_kind(StateKind::Start);
        assert!(state.is_start());
        assert!(!state.is_final());
        assert_eq!(state.name(), "start");
        assert_eq!(state.id().index(), 0);
    }

    #[test]
    fn test_transitions_keep_insertion_order() {
        let mut state = State::<i32>::new(StateId(1), "middle", StateKind::Normal);
        let cond: ConditionRef<i32> = Arc::new(|v: &i32| *v > 0);
        state.add_transition(StateTransition::new(
            StateTransitionAction::Take,
            StateId(2),
            Some(cond.clone()),
        ));
        state.add_transition(StateTransition::new(
            StateTransitionAction::Ignore,
            StateId(1),
            Some(cond),
        ));
        state.add_transition(StateTransition::new(
            StateTransitionAction::Proceed,
            StateId(3),
            None,
        ));

        let actions: Vec<_> = state.transitions().iter().map(|t| t.action()).collect();
        assert_eq!(
            actions,
            vec![
                StateTransitionAction::Take,
                StateTransitionAction::Ignore,
                StateTransitionAction::Proceed
            ]
        );
        assert!(state.transitions()[2].condition().is_none());
        assert_eq!(state.transitions()[1].target(), StateId(1));
    }

    #[test]
    fn test_action_condition_requirements() {
        assert!(StateTransitionAction::Take.requires_condition());
        assert!(StateTransitionAction::Ignore.requires_condition());
        assert!(!StateTransitionAction::Proceed.requires_condition());
        assert_eq!(StateTransitionAction::Proceed.to_string(), "PROCEED");
    }
}
