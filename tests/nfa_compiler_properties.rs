// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests over randomly shaped pattern chains

use eventflux_cep::core::error::CepError;
use eventflux_cep::core::nfa::compiler::compile;
use eventflux_cep::query_api::pattern::Pattern;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
struct ElementSpec {
    /// 0 = single, 1 = zero-or-more, 2 = one-or-more
    quantifier: u8,
    relaxed: bool,
}

fn element_spec() -> impl Strategy<Value = ElementSpec> {
    (0u8..3, any::<bool>()).prop_map(|(quantifier, relaxed)| ElementSpec {
        quantifier,
        relaxed,
    })
}

fn build(specs: &[ElementSpec], names: &[String]) -> Pattern<i32> {
    let mut pattern: Option<Pattern<i32>> = None;
    for (spec, name) in specs.iter().zip(names) {
        let element = match pattern.take() {
            None => Pattern::begin(name.clone()),
            Some(prev) if spec.relaxed => prev.followed_by(name.clone()),
            Some(prev) => prev.next(name.clone()),
        };
        let element = element.where_(|v: &i32| *v >= 0);
        pattern = Some(match spec.quantifier {
            1 => element.zero_or_more(),
            2 => element.one_or_more(),
            _ => element,
        });
    }
    pattern.expect("at least one element")
}

fn names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("e{}", i)).collect()
}

proptest! {
    #[test]
    fn compiled_automaton_holds_invariants(specs in prop::collection::vec(element_spec(), 1..12)) {
        let nfa = compile(&build(&specs, &names(specs.len()))).unwrap();

        let expected_states = 1 + specs
            .iter()
            .map(|s| if s.quantifier == 0 { 1 } else { 2 })
            .sum::<usize>();
        prop_assert_eq!(nfa.len(), expected_states);
        prop_assert_eq!(nfa.states().iter().filter(|s| s.is_start()).count(), 1);
        prop_assert_eq!(nfa.states().iter().filter(|s| s.is_final()).count(), 1);
        prop_assert!(nfa.final_state().transitions().is_empty());
        prop_assert!(nfa.states().iter().all(|s| s.transitions().len() <= 3));
        prop_assert!(nfa.verify().is_ok());
    }

    #[test]
    fn compilation_is_deterministic(specs in prop::collection::vec(element_spec(), 1..12)) {
        let names = names(specs.len());
        let first = compile(&build(&specs, &names)).unwrap();
        let second = compile(&build(&specs, &names)).unwrap();
        prop_assert_eq!(first.shape(), second.shape());
    }

    #[test]
    fn duplicate_names_rejected_anywhere(
        specs in prop::collection::vec(element_spec(), 2..12),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let mut names = names(specs.len());
        let (i, j) = (a.index(specs.len()), b.index(specs.len()));
        prop_assume!(i != j);
        let (first, second) = (i.min(j), i.max(j));
        names[second] = names[first].clone();

        let err = compile(&build(&specs, &names)).unwrap_err();
        let is_malformed = matches!(err, CepError::MalformedPattern { .. });
        prop_assert!(is_malformed);
        prop_assert_eq!(err.pattern_name(), Some(names[first].as_str()));
    }
}
