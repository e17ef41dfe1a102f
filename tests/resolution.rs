//! Integration tests for the match resolution policy.

use bracket_tournament_web::{
    resolve_match, resolve_match_in, GameMatch, MatchStatus, Resolution, Team,
};
use uuid::Uuid;

fn played(score_a: u32, score_b: u32) -> (GameMatch, Team, Team) {
    let a = Team::new("A");
    let b = Team::new("B");
    let mut m = GameMatch::new(Uuid::new_v4(), Uuid::new_v4(), Some(a.id), Some(b.id));
    m.score_a = Some(score_a);
    m.score_b = Some(score_b);
    m.status = MatchStatus::Completed;
    (m, a, b)
}

#[test]
fn bye_wins_regardless_of_status() {
    let team = Team::new("Solo");
    let m = GameMatch::new(Uuid::new_v4(), Uuid::new_v4(), Some(team.id), None);
    assert!(m.is_bye);
    assert_eq!(m.status, MatchStatus::Scheduled);
    assert_eq!(resolve_match(&m), Resolution::Winner(team.id));
}

#[test]
fn single_filled_slot_is_treated_as_bye_even_without_flag() {
    let team = Team::new("Solo");
    let mut m = GameMatch::new(Uuid::new_v4(), Uuid::new_v4(), None, Some(team.id));
    m.is_bye = false;
    assert_eq!(resolve_match(&m), Resolution::Winner(team.id));
}

#[test]
fn unfinished_match_is_undecided() {
    let (mut m, _, _) = played(3, 1);
    m.status = MatchStatus::Ongoing;
    assert_eq!(resolve_match(&m), Resolution::Undecided);
    m.status = MatchStatus::Scheduled;
    assert_eq!(resolve_match(&m), Resolution::Undecided);
}

#[test]
fn higher_score_wins() {
    let (m, a, _) = played(3, 1);
    assert_eq!(resolve_match(&m), Resolution::Winner(a.id));
    let (m, _, b) = played(0, 2);
    assert_eq!(resolve_match(&m), Resolution::Winner(b.id));
}

#[test]
fn equal_scores_are_a_tie_not_a_guess() {
    let (mut m, a, _) = played(2, 2);
    m.winner_id = Some(a.id);
    assert_eq!(resolve_match(&m), Resolution::Tie);
    assert_eq!(resolve_match(&m).winner(), None);
}

#[test]
fn missing_scores_fall_back_to_recorded_winner_only_if_it_played() {
    let (mut m, a, _) = played(0, 0);
    m.score_a = None;
    m.score_b = None;
    assert_eq!(resolve_match(&m), Resolution::Undecided);
    m.winner_id = Some(a.id);
    assert_eq!(resolve_match(&m), Resolution::Winner(a.id));
    m.winner_id = Some(Uuid::new_v4());
    assert_eq!(resolve_match(&m), Resolution::Undecided);
}

#[test]
fn empty_match_is_undecided() {
    let mut m = GameMatch::new(Uuid::new_v4(), Uuid::new_v4(), None, None);
    m.status = MatchStatus::Completed;
    assert_eq!(resolve_match(&m), Resolution::Undecided);
}

#[test]
fn unknown_team_in_roster_check_is_undecided() {
    let (m, a, b) = played(3, 1);
    assert_eq!(resolve_match_in(&m, &[a.clone(), b]), Resolution::Winner(a.id));
    assert_eq!(resolve_match_in(&m, &[a]), Resolution::Undecided);
}
