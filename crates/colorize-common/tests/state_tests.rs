//! Tests for the processing lifecycle state machine.

use colorize_common::ProcessingState::{self, *};

const ALL: [ProcessingState; 4] = [Idle, Processing, Completed, Error];

#[test]
fn test_happy_path_transitions() {
    assert!(Idle.can_transition_to(Processing));
    assert!(Processing.can_transition_to(Completed));
    assert!(Completed.can_transition_to(Idle));
}

#[test]
fn test_error_path_transitions() {
    assert!(Processing.can_transition_to(Error));
    assert!(Error.can_transition_to(Idle));
    assert!(Error.can_transition_to(Processing));
}

#[test]
fn test_processing_cannot_be_abandoned() {
    // No cancellation: a started run must finish.
    assert!(!Processing.can_transition_to(Idle));
    assert!(!Processing.can_transition_to(Processing));
}

#[test]
fn test_idle_cannot_skip_processing() {
    assert!(!Idle.can_transition_to(Completed));
    assert!(!Idle.can_transition_to(Error));
}

#[test]
fn test_no_self_transitions() {
    for state in ALL {
        assert!(!state.can_transition_to(state), "{state} -> {state} should be rejected");
    }
}

#[test]
fn test_terminal_states() {
    let terminal: Vec<_> = ALL.into_iter().filter(|s| s.is_terminal()).collect();
    assert_eq!(terminal, vec![Completed, Error]);
}

#[test]
fn test_display_matches_wire_name() {
    for state in ALL {
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json.trim_matches('"'), state.to_string());
    }
}
