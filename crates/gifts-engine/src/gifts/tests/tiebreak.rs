use super::common::*;
use crate::gifts::bank::Gift;
use crate::gifts::engine::{
    confidence_label, resolve_tie, score, ConfidenceLabel, EngineError, GiftResult, GiftScores,
    InvalidInputError, PreconditionError,
};

fn tied_base() -> GiftResult {
    score(&near_tie()).expect("valid responses")
}

#[test]
fn neutral_triples_scale_candidates_by_exactly_seven_tenths() {
    let base = tied_base();

    let resolved = resolve_tie(&base, &[3, 3, 3], &[3, 3, 3]).expect("tie resolves");

    assert_eq!(
        resolved.scores[&base.primary],
        0.7 * base.scores[&base.primary]
    );
    assert_eq!(
        resolved.scores[&base.secondary],
        0.7 * base.scores[&base.secondary]
    );
    assert!(!resolved.needs_tiebreak);
}

#[test]
fn other_gifts_keep_their_base_scores() {
    let base = tied_base();

    let resolved = resolve_tie(&base, &[2, 1, 2], &[4, 5, 4]).expect("tie resolves");

    for gift in Gift::ALL {
        if gift == base.primary || gift == base.secondary {
            continue;
        }
        assert_eq!(resolved.scores[&gift], base.scores[&gift], "{gift} moved");
    }
}

#[test]
fn decisive_answers_can_swap_the_candidates() {
    let base = tied_base();
    assert_eq!(base.primary, Gift::Mercy);

    let resolved = resolve_tie(&base, &[1, 1, 1], &[5, 5, 5]).expect("tie resolves");

    assert_eq!(resolved.primary, Gift::Teaching);
    assert_eq!(resolved.secondary, Gift::Mercy);
    assert!(resolved.margin > 0.5);
    assert_eq!(confidence_label(resolved.margin), ConfidenceLabel::High);
    assert!(resolved
        .ranked
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn still_close_results_are_not_tie_broken_again() {
    let base = score(&dead_heat(Gift::Giving, Gift::Wisdom)).expect("valid responses");

    let resolved = resolve_tie(&base, &[4, 4, 4], &[4, 4, 4]).expect("tie resolves");

    assert_eq!(resolved.margin, 0.0);
    assert!(!resolved.needs_tiebreak);
    assert_eq!(resolved.primary, Gift::Giving);
}

#[test]
fn refuses_results_that_do_not_need_a_tiebreak() {
    let base = score(&narrow_lead()).expect("valid responses");

    match resolve_tie(&base, &[3, 3, 3], &[3, 3, 3]) {
        Err(EngineError::Precondition(PreconditionError::TiebreakNotRequired { .. })) => {}
        other => panic!("expected precondition failure, got {other:?}"),
    }
}

#[test]
fn rejects_malformed_triples() {
    let base = tied_base();

    match resolve_tie(&base, &[3, 3], &[3, 3, 3]) {
        Err(EngineError::InvalidInput(InvalidInputError::WrongLength {
            expected: 3,
            actual: 2,
            ..
        })) => {}
        other => panic!("expected wrong length, got {other:?}"),
    }

    match resolve_tie(&base, &[3, 3, 3], &[3, 6, 3]) {
        Err(EngineError::InvalidInput(InvalidInputError::OutOfRange {
            index: 1,
            value: 6,
            ..
        })) => {}
        other => panic!("expected out of range, got {other:?}"),
    }
}

#[test]
fn rejects_bases_missing_a_candidate_score() {
    let mut scores = GiftScores::new();
    scores.insert(Gift::Mercy, 0.4);
    scores.insert(Gift::Helps, 0.35);
    let base = GiftResult {
        ranked: Vec::new(),
        primary: Gift::Mercy,
        secondary: Gift::Teaching,
        margin: 0.05,
        needs_tiebreak: true,
        scores,
    };

    match resolve_tie(&base, &[3, 3, 3], &[3, 3, 3]) {
        Err(EngineError::Precondition(PreconditionError::MissingCandidate(Gift::Teaching))) => {}
        other => panic!("expected missing candidate, got {other:?}"),
    }
}
