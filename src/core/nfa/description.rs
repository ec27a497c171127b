// SPDX-License-Identifier: MIT OR Apache-2.0

//! Name-level views of a compiled automaton
//!
//! [`NfaDescription`] is a serializable snapshot for logs and tooling.
//! [`NfaShape`] is a canonical form that ignores state ids, so two
//! compilations of the same pattern compare equal.

use serde::Serialize;

use super::state::{State, StateId, StateKind, StateTransitionAction};
use super::Nfa;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionDescription {
    pub action: StateTransitionAction,
    pub target: StateId,
    pub target_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateDescription {
    pub id: StateId,
    pub name: String,
    pub kind: StateKind,
    pub transitions: Vec<TransitionDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NfaDescription {
    pub start: StateId,
    pub states: Vec<StateDescription>,
}

impl NfaDescription {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Transitions of one state as sorted `(action, target name)` pairs.
pub type TransitionShape = Vec<(StateTransitionAction, String)>;

/// Canonical, id-free form of an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NfaShape {
    states: Vec<(StateKind, String, TransitionShape)>,
}

impl NfaShape {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether some state has exactly this name and transition set.
    pub fn contains(&self, name: &str, transitions: &[(StateTransitionAction, &str)]) -> bool {
        let mut wanted: TransitionShape = transitions
            .iter()
            .map(|(action, target)| (*action, target.to_string()))
            .collect();
        wanted.sort();
        self.states
            .iter()
            .any(|(_, n, t)| n == name && *t == wanted)
    }
}

impl<E> Nfa<E> {
    /// `(target name, action)` for each transition of `state`, in order.
    pub fn unfold_transitions(&self, state: &State<E>) -> Vec<(&str, StateTransitionAction)> {
        state
            .transitions()
            .iter()
            .filter_map(|t| self.state(t.target()).map(|target| (target.name(), t.action())))
            .collect()
    }

    pub fn describe(&self) -> NfaDescription {
        let states = self
            .states()
            .iter()
            .map(|state| StateDescription {
                id: state.id(),
                name: state.name().to_string(),
                kind: state.kind(),
                transitions: state
                    .transitions()
                    .iter()
                    .map(|t| TransitionDescription {
                        action: t.action(),
                        target: t.target(),
                        target_name: self
                            .state(t.target())
                            .map(|s| s.name().to_string())
                            .unwrap_or_default(),
                        condition: t.condition().map(|c| c.describe()),
                    })
                    .collect(),
            })
            .collect();

        NfaDescription {
            start: self.start_state().id(),
            states,
        }
    }

    pub fn shape(&self) -> NfaShape {
        let mut states: Vec<(StateKind, String, TransitionShape)> = self
            .states()
            .iter()
            .map(|state| {
                let mut transitions: TransitionShape = self
                    .unfold_transitions(state)
                    .into_iter()
                    .map(|(target, action)| (action, target.to_string()))
                    .collect();
                transitions.sort();
                (state.kind(), state.name().to_string(), transitions)
            })
            .collect();
        states.sort();
        NfaShape { states }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::nfa::compiler::NfaCompiler;
    use crate::query_api::pattern::Pattern;

    fn compile_simple() -> Nfa<i32> {
        let pattern = Pattern::<i32>::begin("start")
            .where_(|v: &i32| *v > 2)
            .next("end");
        NfaCompiler::new().compile(&pattern).unwrap()
    }

    #[test]
    fn test_describe_to_json() {
        let nfa = compile_simple();
        let description = nfa.describe();
        assert_eq!(description.states.len(), 3);

        let json = description.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let start = value["states"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["kind"] == "start")
            .unwrap();
        assert_eq!(start["name"], "start");
        assert_eq!(start["transitions"][0]["action"], "TAKE");
        assert_eq!(start["transitions"][0]["target_name"], "end");
        assert_eq!(start["transitions"][0]["condition"], "fn");
    }

    #[test]
    fn test_shape_ignores_ids() {
        let first = compile_simple().shape();
        let second = compile_simple().shape();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first.contains("start", &[(StateTransitionAction::Take, "end")]));
        assert!(first.contains("$endState$", &[]));
        assert!(!first.contains("start", &[]));
    }
}
