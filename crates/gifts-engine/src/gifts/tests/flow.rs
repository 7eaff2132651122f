use super::common::*;
use crate::gifts::bank::{Gift, TIEBREAK_ITEMS_PER_GIFT};
use crate::gifts::domain::TiebreakSubmission;
use crate::gifts::engine::{ConfidenceLabel, EngineError, InvalidInputError};
use crate::gifts::flow::{AssessmentFlow, FlowError, FlowStep};

fn tiebreak(primary: [i32; 3], secondary: [i32; 3]) -> TiebreakSubmission {
    TiebreakSubmission {
        primary: primary.to_vec(),
        secondary: secondary.to_vec(),
    }
}

#[test]
fn clear_winner_finalizes_immediately() {
    let mut flow = AssessmentFlow::default();

    let step = flow
        .submit_base("en".to_string(), dominant(Gift::Leadership))
        .expect("valid submission");

    match step {
        FlowStep::Finalized(finalized) => {
            assert_eq!(finalized.result.primary, Gift::Leadership);
            assert!(!finalized.used_tiebreak);
            assert_eq!(finalized.confidence(), ConfidenceLabel::High);
        }
        other => panic!("expected finalized attempt, got {other:?}"),
    }
    assert_eq!(flow, AssessmentFlow::AwaitingBase);
}

#[test]
fn close_result_parks_with_candidate_items() {
    let mut flow = AssessmentFlow::default();

    let step = flow
        .submit_base("en".to_string(), near_tie())
        .expect("valid submission");

    let FlowStep::TiebreakRequired(prompt) = step else {
        panic!("expected a tie-break prompt");
    };
    assert_eq!(prompt.primary, Gift::Mercy);
    assert_eq!(prompt.secondary, Gift::Teaching);
    assert_eq!(prompt.primary_items.len(), TIEBREAK_ITEMS_PER_GIFT);
    assert!(prompt.primary_items.iter().all(|item| item.gift == Gift::Mercy));
    assert!(prompt
        .secondary_items
        .iter()
        .all(|item| item.gift == Gift::Teaching));

    let pending = flow.pending().expect("tie-break pending");
    assert_eq!(pending.prompt(), prompt);
    assert!(pending.base().needs_tiebreak);
}

#[test]
fn tiebreak_without_pending_base_is_rejected() {
    let mut flow = AssessmentFlow::default();

    let err = flow
        .submit_tiebreak(&tiebreak([3, 3, 3], [3, 3, 3]))
        .expect_err("nothing pending");

    assert_eq!(err, FlowError::NoPendingTiebreak);
}

#[test]
fn invalid_tiebreak_answers_keep_the_pending_state() {
    let mut flow = AssessmentFlow::default();
    flow.submit_base("en".to_string(), near_tie())
        .expect("valid submission");
    let before = flow.clone();

    let err = flow
        .submit_tiebreak(&tiebreak([3, 0, 3], [3, 3, 3]))
        .expect_err("out of range answer");

    assert!(matches!(
        err,
        FlowError::Engine(EngineError::InvalidInput(InvalidInputError::OutOfRange { .. }))
    ));
    assert_eq!(flow, before);
}

#[test]
fn valid_tiebreak_finalizes_and_resets() {
    let mut flow = AssessmentFlow::default();
    let responses = near_tie();
    flow.submit_base("sw".to_string(), responses.clone())
        .expect("valid submission");

    let finalized = flow
        .submit_tiebreak(&tiebreak([1, 1, 1], [5, 5, 5]))
        .expect("tie resolves");

    assert!(finalized.used_tiebreak);
    assert_eq!(finalized.language, "sw");
    assert_eq!(finalized.responses, responses);
    assert_eq!(finalized.result.primary, Gift::Teaching);
    assert!(!finalized.result.needs_tiebreak);
    assert_eq!(flow, AssessmentFlow::AwaitingBase);
}

#[test]
fn new_base_replaces_a_pending_tiebreak() {
    let mut flow = AssessmentFlow::default();
    flow.submit_base("en".to_string(), near_tie())
        .expect("valid submission");

    let step = flow
        .submit_base("en".to_string(), dominant(Gift::Giving))
        .expect("valid submission");

    assert!(matches!(step, FlowStep::Finalized(_)));
    assert!(flow.pending().is_none());
}

#[test]
fn invalid_base_leaves_the_flow_untouched() {
    let mut flow = AssessmentFlow::default();
    flow.submit_base("en".to_string(), near_tie())
        .expect("valid submission");
    let before = flow.clone();

    let err = flow
        .submit_base("en".to_string(), vec![3; 10])
        .expect_err("short vector");

    assert!(matches!(
        err,
        EngineError::InvalidInput(InvalidInputError::WrongLength { actual: 10, .. })
    ));
    assert_eq!(flow, before);
}
