// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for NFA compiler integration tests

#![allow(dead_code)]

use std::any::Any;
use std::collections::HashSet;

use eventflux_cep::core::nfa::{Nfa, State, StateTransitionAction};
use eventflux_cep::query_api::pattern::condition::Subtyped;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

impl Event {
    pub fn new(id: i32, name: &str, price: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubEvent {
    pub base: Event,
    pub volume: f64,
}

/// Event hierarchy used by subtype constraints
pub enum TestEvent {
    Plain(Event),
    Sub(SubEvent),
}

impl TestEvent {
    pub fn event(&self) -> &Event {
        match self {
            TestEvent::Plain(e) => e,
            TestEvent::Sub(s) => &s.base,
        }
    }
}

impl Subtyped for TestEvent {
    fn as_any(&self) -> &dyn Any {
        match self {
            TestEvent::Plain(e) => e,
            TestEvent::Sub(s) => s,
        }
    }
}

pub fn start_filter(e: &TestEvent) -> bool {
    e.event().price > 2.0
}

pub fn end_filter(e: &TestEvent) -> bool {
    e.event().name == "end"
}

/// `(target name, action)` set of one state's transitions
pub fn unfold<E>(nfa: &Nfa<E>, state: &State<E>) -> HashSet<(String, StateTransitionAction)> {
    nfa.unfold_transitions(state)
        .into_iter()
        .map(|(name, action)| (name.to_string(), action))
        .collect()
}

pub fn transitions(
    entries: &[(&str, StateTransitionAction)],
) -> HashSet<(String, StateTransitionAction)> {
    entries
        .iter()
        .map(|(name, action)| (name.to_string(), *action))
        .collect()
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
