// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled NFA
//!
//! An [`Nfa`] is the output of [`compiler::NfaCompiler`]: an arena of
//! [`State`]s with exactly one start state and exactly one final state.
//! It is immutable once built and can be shared between matcher instances.

pub mod compiler;
pub mod description;
pub mod state;

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::core::error::{CepError, CepResult};
use crate::query_api::pattern::condition::ConditionRef;
use crate::query_api::pattern::Pattern;

pub use description::{NfaDescription, NfaShape};
pub use state::{State, StateId, StateKind, StateTransition, StateTransitionAction};

use self::compiler::NfaCompiler;

/// A compiled pattern automaton.
pub struct Nfa<E> {
    states: Vec<State<E>>,
    start: StateId,
    final_state: StateId,
}

impl<E> Nfa<E> {
    /// All states, indexed by [`StateId::index`].
    pub fn states(&self) -> &[State<E>] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> Option<&State<E>> {
        self.states.get(id.0)
    }

    pub fn start_state(&self) -> &State<E> {
        &self.states[self.start.0]
    }

    pub fn final_state(&self) -> &State<E> {
        &self.states[self.final_state.0]
    }

    /// Every state carrying `name`. Looping elements yield two.
    pub fn states_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a State<E>> + 'a {
        self.states.iter().filter(move |s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Target state of a transition.
    pub fn target_of(&self, transition: &StateTransition<E>) -> Option<&State<E>> {
        self.state(transition.target())
    }

    /// Check every structural invariant of a compiled automaton
    ///
    /// 1. exactly one start state, and it is the designated one
    /// 2. exactly one final state, with no outgoing transitions
    /// 3. every transition targets a state of this automaton
    /// 4. take/ignore carry a condition, proceed does not
    /// 5. every non-final state reachable from start has an outgoing transition
    /// 6. every non-final state can reach the final state
    pub fn verify(&self) -> CepResult<()> {
        let starts: Vec<StateId> = self
            .states
            .iter()
            .filter(|s| s.is_start())
            .map(State::id)
            .collect();
        if starts.len() != 1 || starts[0] != self.start {
            return Err(CepError::internal_consistency(format!(
                "expected exactly one start state {}, found {:?}",
                self.start, starts
            )));
        }

        let finals: Vec<StateId> = self
            .states
            .iter()
            .filter(|s| s.is_final())
            .map(State::id)
            .collect();
        if finals.len() != 1 || finals[0] != self.final_state {
            return Err(CepError::internal_consistency(format!(
                "expected exactly one final state {}, found {:?}",
                self.final_state, finals
            )));
        }
        if !self.final_state().transitions().is_empty() {
            return Err(CepError::internal_consistency(format!(
                "final state '{}' has {} outgoing transitions",
                self.final_state().name(),
                self.final_state().transitions().len()
            )));
        }

        for (index, state) in self.states.iter().enumerate() {
            if state.id().0 != index {
                return Err(CepError::internal_consistency(format!(
                    "state '{}' stored at index {} has id {}",
                    state.name(),
                    index,
                    state.id()
                )));
            }
            for transition in state.transitions() {
                if transition.target().0 >= self.states.len() {
                    return Err(CepError::internal_consistency(format!(
                        "state '{}' has a {} transition to unknown state {}",
                        state.name(),
                        transition.action(),
                        transition.target()
                    )));
                }
                if transition.action().requires_condition() != transition.condition().is_some() {
                    return Err(CepError::internal_consistency(format!(
                        "state '{}' has a {} transition with a misplaced condition",
                        state.name(),
                        transition.action()
                    )));
                }
            }
        }

        let reachable = self.reachable_from_start();
        for state in &self.states {
            if reachable[state.id().0] && !state.is_final() && state.transitions().is_empty() {
                return Err(CepError::internal_consistency(format!(
                    "state '{}' is a dead end",
                    state.name()
                )));
            }
        }

        let reaches_final = self.reaching_final();
        if let Some(state) = self.states.iter().find(|s| !reaches_final[s.id().0]) {
            return Err(CepError::internal_consistency(format!(
                "state '{}' ({}) cannot reach the final state",
                state.name(),
                state.id()
            )));
        }

        Ok(())
    }

    fn reachable_from_start(&self) -> Vec<bool> {
        let mut seen = vec![false; self.states.len()];
        let mut queue = VecDeque::from([self.start]);
        seen[self.start.0] = true;

        while let Some(id) = queue.pop_front() {
            for transition in self.states[id.0].transitions() {
                let target = transition.target().0;
                if !seen[target] {
                    seen[target] = true;
                    queue.push_back(transition.target());
                }
            }
        }
        seen
    }

    /// Backward search from the final state over reversed edges.
    fn reaching_final(&self) -> Vec<bool> {
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); self.states.len()];
        for state in &self.states {
            for transition in state.transitions() {
                incoming[transition.target().0].push(state.id().0);
            }
        }

        let mut seen = vec![false; self.states.len()];
        let mut queue = VecDeque::from([self.final_state.0]);
        seen[self.final_state.0] = true;

        while let Some(index) = queue.pop_front() {
            for &source in &incoming[index] {
                if !seen[source] {
                    seen[source] = true;
                    queue.push_back(source);
                }
            }
        }
        seen
    }
}

impl<E> fmt::Debug for Nfa<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nfa")
            .field("start", &self.start)
            .field("final_state", &self.final_state)
            .field("states", &self.states)
            .finish()
    }
}

/// Scratch space holding an automaton while it is being compiled.
///
/// Dropped without trace if compilation fails, so no partial graph escapes.
pub(crate) struct NfaBuilder<E> {
    states: Vec<State<E>>,
    trace: bool,
}

impl<E> NfaBuilder<E> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            trace: true,
        }
    }

    /// Toggle the per-transition trace lines
    pub(crate) fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub(crate) fn add_state(&mut self, name: &str, kind: StateKind) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(State::new(id, name, kind));
        id
    }

    pub(crate) fn add_take(&mut self, from: StateId, to: StateId, condition: ConditionRef<E>) {
        self.add_transition(from, StateTransitionAction::Take, to, Some(condition));
    }

    pub(crate) fn add_ignore(&mut self, from: StateId, to: StateId, condition: ConditionRef<E>) {
        self.add_transition(from, StateTransitionAction::Ignore, to, Some(condition));
    }

    pub(crate) fn add_proceed(&mut self, from: StateId, to: StateId) {
        self.add_transition(from, StateTransitionAction::Proceed, to, None);
    }

    fn add_transition(
        &mut self,
        from: StateId,
        action: StateTransitionAction,
        to: StateId,
        condition: Option<ConditionRef<E>>,
    ) {
        if self.trace {
            log::trace!("  {} -[{}]-> {}", from, action, to);
        }
        self.states[from.0].add_transition(StateTransition::new(action, to, condition));
    }

    pub(crate) fn set_kind(&mut self, id: StateId, kind: StateKind) {
        self.states[id.0].set_kind(kind);
    }

    #[cfg(test)]
    pub(crate) fn state(&self, id: StateId) -> &State<E> {
        &self.states[id.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn build(self, start: StateId, final_state: StateId) -> Nfa<E> {
        Nfa {
            states: self.states,
            start,
            final_state,
        }
    }
}

/// Compiles a pattern once and hands out shared handles to the automaton.
///
/// Each matcher instance (one per key, say) keeps its own traversal position
/// and reads the same immutable graph.
pub struct NfaFactory<E> {
    nfa: Arc<Nfa<E>>,
}

impl<E: 'static> NfaFactory<E> {
    pub fn new(pattern: &Pattern<E>) -> CepResult<Self> {
        Self::with_compiler(&NfaCompiler::new(), pattern)
    }

    pub fn with_compiler(compiler: &NfaCompiler, pattern: &Pattern<E>) -> CepResult<Self> {
        Ok(Self {
            nfa: Arc::new(compiler.compile(pattern)?),
        })
    }
}

impl<E> NfaFactory<E> {
    /// A handle to the compiled automaton for a new matcher instance.
    pub fn create_nfa(&self) -> Arc<Nfa<E>> {
        Arc::clone(&self.nfa)
    }
}

impl<E> Clone for NfaFactory<E> {
    fn clone(&self) -> Self {
        Self {
            nfa: Arc::clone(&self.nfa),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_api::pattern::condition::TrueCondition;

    fn always() -> ConditionRef<i32> {
        Arc::new(TrueCondition)
    }

    fn two_state_nfa() -> NfaBuilder<i32> {
        let mut builder = NfaBuilder::with_capacity(2);
        let end = builder.add_state("$endState$", StateKind::Final);
        let start = builder.add_state("start", StateKind::Start);
        builder.add_take(start, end, always());
        builder
    }

    #[test]
    fn test_verify_accepts_well_formed() {
        let nfa = two_state_nfa().build(StateId(1), StateId(0));
        assert!(nfa.verify().is_ok());
        assert_eq!(nfa.len(), 2);
        assert_eq!(nfa.start_state().name(), "start");
        assert!(nfa.final_state().is_final());
    }

    #[test]
    fn test_verify_rejects_two_start_states() {
        let mut builder = two_state_nfa();
        let extra = builder.add_state("extra", StateKind::Start);
        builder.add_take(extra, StateId(0), always());
        let nfa = builder.build(StateId(1), StateId(0));
        assert!(matches!(
            nfa.verify(),
            Err(CepError::InternalConsistencyFault { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_outgoing_from_final() {
        let mut builder = two_state_nfa();
        builder.add_proceed(StateId(0), StateId(1));
        let nfa = builder.build(StateId(1), StateId(0));
        assert!(nfa.verify().is_err());
    }

    #[test]
    fn test_verify_rejects_dead_end() {
        let mut builder = two_state_nfa();
        let stuck = builder.add_state("stuck", StateKind::Normal);
        builder.add_take(StateId(1), stuck, always());
        let nfa = builder.build(StateId(1), StateId(0));
        let err = nfa.verify().unwrap_err();
        assert!(err.to_string().contains("stuck"));
    }

    #[test]
    fn test_verify_rejects_self_loop_trap() {
        let mut builder = two_state_nfa();
        let trap = builder.add_state("trap", StateKind::Normal);
        builder.add_take(trap, trap, always());
        let nfa = builder.build(StateId(1), StateId(0));
        let err = nfa.verify().unwrap_err();
        assert!(err.to_string().contains("cannot reach the final state"));
    }

    #[test]
    fn test_verify_rejects_unconditioned_take() {
        let mut builder = two_state_nfa();
        builder.add_transition(StateId(1), StateTransitionAction::Take, StateId(0), None);
        let nfa = builder.build(StateId(1), StateId(0));
        assert!(nfa.verify().is_err());
    }

    #[test]
    fn test_verify_rejects_dangling_target() {
        let mut builder = two_state_nfa();
        builder.add_proceed(StateId(1), StateId(9));
        let nfa = builder.build(StateId(1), StateId(0));
        assert!(nfa.verify().is_err());
    }

    #[test]
    fn test_states_named_and_target_lookup() {
        let nfa = two_state_nfa().build(StateId(1), StateId(0));
        assert_eq!(nfa.states_named("start").count(), 1);
        assert_eq!(nfa.states_named("missing").count(), 0);
        let take = &nfa.start_state().transitions()[0];
        assert!(nfa.target_of(take).unwrap().is_final());
    }
}
