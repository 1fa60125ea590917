#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(VariantState::Pending, VariantState::Building)]
#[test_case(VariantState::Pending, VariantState::Packaging)]
#[test_case(VariantState::Building, VariantState::Packaging)]
#[test_case(VariantState::Packaging, VariantState::Done)]
#[test_case(VariantState::Pending, VariantState::Failed)]
#[test_case(VariantState::Building, VariantState::Failed)]
#[test_case(VariantState::Packaging, VariantState::Failed)]
fn VariantState___valid_transitions___allowed(from: VariantState, to: VariantState) {
    assert!(
        from.can_transition_to(to),
        "{:?} should transition to {:?}",
        from,
        to
    );
}

#[test_case(VariantState::Pending, VariantState::Done)]
#[test_case(VariantState::Building, VariantState::Done)]
#[test_case(VariantState::Building, VariantState::Building)]
#[test_case(VariantState::Packaging, VariantState::Building)]
#[test_case(VariantState::Done, VariantState::Pending)]
#[test_case(VariantState::Done, VariantState::Failed)]
#[test_case(VariantState::Failed, VariantState::Building)]
#[test_case(VariantState::Failed, VariantState::Pending)]
fn VariantState___invalid_transitions___not_allowed(from: VariantState, to: VariantState) {
    assert!(
        !from.can_transition_to(to),
        "{:?} should not transition to {:?}",
        from,
        to
    );
}

#[test_case(VariantState::Done, true)]
#[test_case(VariantState::Failed, true)]
#[test_case(VariantState::Pending, false)]
#[test_case(VariantState::Building, false)]
#[test_case(VariantState::Packaging, false)]
fn VariantState___is_terminal___only_done_and_failed(state: VariantState, expected: bool) {
    assert_eq!(state.is_terminal(), expected);
}

#[test]
fn VariantState___default___is_pending() {
    assert_eq!(VariantState::default(), VariantState::Pending);
}

#[test]
fn VariantState___serde___uses_snake_case() {
    let json = serde_json::to_string(&VariantState::Packaging).unwrap();

    assert_eq!(json, "\"packaging\"");
}
