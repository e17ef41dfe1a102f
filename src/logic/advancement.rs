//! Bracket advancement: resolve the latest round, then create the next round, declare a
//! champion, or project a placeholder round for display.
//!
//! The read path ([`build_bracket`], [`bracket_phase`]) is pure over a [`BracketSnapshot`] and
//! holds no state between calls. The write path goes through a [`BracketStore`], where round
//! creation is single-writer per `(tournament, ordinal)`: if another caller got there first,
//! the existing round wins and is returned instead.

use crate::logic::entrants::normalize_entrants;
use crate::logic::resolver::{resolve_match_in, Resolution};
use crate::logic::rounds::{first_round, next_round, RoundPlan};
use crate::logic::stats::compute_stats;
use crate::models::{
    Bracket, BracketError, BracketMatch, BracketPhase, BracketRound, BracketSnapshot, GameMatch,
    MatchId, MatchKey, MatchSchedule, MatchStatus, Round, RoundKey, Team, TeamId, TournamentId,
};
use crate::store::{BracketStore, MatchUpdate};
use serde::Serialize;

/// Resolution of every match of one round, in match order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundOutcome {
    /// Winners and bye recipients, in the order their matches appear.
    pub survivors: Vec<TeamId>,
    pub undecided: Vec<MatchId>,
    pub ties: Vec<MatchId>,
}

impl RoundOutcome {
    pub fn is_resolved(&self) -> bool {
        self.undecided.is_empty() && self.ties.is_empty()
    }

    /// The wait state of an unresolved round as an error; ties take precedence.
    pub fn blocking_error(&self) -> Option<BracketError> {
        if let Some(&match_id) = self.ties.first() {
            return Some(BracketError::TieUnresolved { match_id });
        }
        if !self.undecided.is_empty() {
            return Some(BracketError::IncompleteRound);
        }
        None
    }
}

/// Resolve every match of a round against the roster.
pub fn round_outcome(matches: &[&GameMatch], roster: &[Team]) -> RoundOutcome {
    let mut outcome = RoundOutcome::default();
    for m in matches {
        match resolve_match_in(m, roster) {
            Resolution::Winner(team) => outcome.survivors.push(team),
            Resolution::Undecided => outcome.undecided.push(m.id),
            Resolution::Tie => {
                log::debug!("Match {} is tied and cannot advance anyone", m.id);
                outcome.ties.push(m.id)
            }
        }
    }
    outcome
}

fn latest_round(snapshot: &BracketSnapshot) -> Option<&Round> {
    snapshot.rounds.iter().max_by_key(|r| r.ordinal)
}

fn phase_of(round: &Round, outcome: &RoundOutcome) -> BracketPhase {
    if !outcome.is_resolved() {
        return BracketPhase::InProgress {
            ordinal: round.ordinal,
        };
    }
    match outcome.survivors.as_slice() {
        [champion] => BracketPhase::Finished {
            champion: *champion,
        },
        // Unreachable while rounds are built from a non-empty roster.
        [] => BracketPhase::InProgress {
            ordinal: round.ordinal,
        },
        survivors => BracketPhase::RoundComplete {
            ordinal: round.ordinal,
            survivors: survivors.to_vec(),
        },
    }
}

/// Where the bracket stands, judged on the latest persisted round.
pub fn bracket_phase(snapshot: &BracketSnapshot) -> BracketPhase {
    match latest_round(snapshot) {
        None => BracketPhase::Empty,
        Some(round) => {
            let matches = snapshot.round_matches(round.id);
            phase_of(round, &round_outcome(&matches, &snapshot.teams))
        }
    }
}

fn bracket_match(m: &GameMatch, roster: &[Team]) -> BracketMatch {
    let key = MatchKey::Persisted { id: m.id };
    BracketMatch {
        key,
        id: key.display_id(),
        team_a: m.team_a,
        team_b: m.team_b,
        score_a: m.score_a,
        score_b: m.score_b,
        status: m.status,
        is_bye: m.is_bye || m.lone_team().is_some(),
        winner_id: resolve_match_in(m, roster).winner(),
    }
}

/// Speculative next round from the survivors of a resolved round. Never persisted.
pub fn placeholder_round(ordinal: u32, survivors: &[TeamId]) -> Option<BracketRound> {
    let plan = next_round(ordinal, survivors).ok().flatten()?;
    let key = RoundKey::Placeholder { ordinal };
    let matches = plan
        .pairings
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let key = MatchKey::Placeholder {
                ordinal,
                index: i + 1,
            };
            BracketMatch {
                key,
                id: key.display_id(),
                team_a: p.team_a,
                team_b: p.team_b,
                score_a: None,
                score_b: None,
                status: MatchStatus::Scheduled,
                is_bye: p.is_bye(),
                winner_id: None,
            }
        })
        .collect();
    Some(BracketRound {
        key,
        id: key.display_id(),
        name: plan.name,
        ordinal,
        is_placeholder: true,
        matches,
    })
}

/// Assemble the bracket for display from a snapshot.
///
/// Persisted rounds come in ordinal order. When the latest round is resolved with more than
/// one survivor, a placeholder for the next round is appended. Matches whose round is not in
/// the snapshot are left out.
pub fn build_bracket(snapshot: &BracketSnapshot) -> Bracket {
    let mut rounds: Vec<BracketRound> = snapshot
        .ordered_rounds()
        .into_iter()
        .map(|round| {
            let key = RoundKey::Persisted { id: round.id };
            BracketRound {
                key,
                id: key.display_id(),
                name: round.name.clone(),
                ordinal: round.ordinal,
                is_placeholder: false,
                matches: snapshot
                    .round_matches(round.id)
                    .into_iter()
                    .map(|m| bracket_match(m, &snapshot.teams))
                    .collect(),
            }
        })
        .collect();

    let orphans = snapshot
        .matches
        .iter()
        .filter(|m| !snapshot.rounds.iter().any(|r| r.id == m.round_id))
        .count();
    if orphans > 0 {
        log::warn!(
            "Tournament {}: {} match(es) reference unknown rounds",
            snapshot.tournament_id,
            orphans
        );
    }

    let phase = bracket_phase(snapshot);
    if let BracketPhase::RoundComplete { ordinal, survivors } = &phase {
        rounds.extend(placeholder_round(ordinal + 1, survivors));
    }
    let stats = compute_stats(&rounds, snapshot.teams.len());

    Bracket {
        tournament_id: snapshot.tournament_id,
        rounds,
        phase,
        stats,
    }
}

/// Result of a materialization attempt.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "result", content = "round", rename_all = "snake_case")]
pub enum Materialized {
    /// This call wrote the round.
    Created(Round),
    /// The round already existed; nothing was written.
    Existing(Round),
}

impl Materialized {
    pub fn round(&self) -> &Round {
        match self {
            Materialized::Created(r) | Materialized::Existing(r) => r,
        }
    }
}

/// Result of asking the bracket to move on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Advancement {
    Materialized(Materialized),
    Finished { champion: TeamId },
}

fn materialize<S: BracketStore>(
    store: &S,
    tournament_id: TournamentId,
    plan: &RoundPlan,
) -> Result<Materialized, BracketError> {
    let (round, matches) = plan.build(tournament_id);
    match store.insert_round(round, matches) {
        Ok(round) => Ok(Materialized::Created(round)),
        Err(BracketError::ConcurrentMaterializationConflict { ordinal }) => {
            log::warn!(
                "Tournament {}: round {} already created by another writer, using it",
                tournament_id,
                ordinal
            );
            let snapshot = store.snapshot(tournament_id)?;
            snapshot
                .rounds
                .into_iter()
                .find(|r| r.ordinal == ordinal)
                .map(Materialized::Existing)
                .ok_or(BracketError::ConcurrentMaterializationConflict { ordinal })
        }
        Err(e) => Err(e),
    }
}

/// Create round 1 from the roster (registration order). Empty → InProgress.
///
/// Fires once per tournament: if round 1 exists it is returned and nothing is written.
pub fn seed_bracket<S: BracketStore>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Materialized, BracketError> {
    let snapshot = store.snapshot(tournament_id)?;
    if let Some(existing) = snapshot.rounds.iter().find(|r| r.ordinal == 1) {
        log::debug!("Tournament {}: already seeded", tournament_id);
        return Ok(Materialized::Existing(existing.clone()));
    }
    let roster: Vec<TeamId> = snapshot
        .teams
        .iter()
        .filter(|t| t.is_active())
        .map(|t| t.id)
        .collect();
    if roster.is_empty() {
        return Err(BracketError::NoSurvivors);
    }
    let seeds = normalize_entrants(&roster)?;
    log::info!(
        "Tournament {}: seeding {} team(s) into {} match(es)",
        tournament_id,
        roster.len(),
        seeds.match_count()
    );
    materialize(store, tournament_id, &first_round(&seeds))
}

/// Create the round after `ordinal` once `ordinal` is fully resolved.
///
/// Idempotent: if round `ordinal + 1` exists it is returned untouched. A single survivor
/// finishes the tournament instead.
pub fn materialize_next_round<S: BracketStore>(
    store: &S,
    tournament_id: TournamentId,
    ordinal: u32,
) -> Result<Advancement, BracketError> {
    let snapshot = store.snapshot(tournament_id)?;
    let round = snapshot
        .rounds
        .iter()
        .find(|r| r.ordinal == ordinal)
        .ok_or(BracketError::InvalidState)?;
    let outcome = round_outcome(&snapshot.round_matches(round.id), &snapshot.teams);
    if let Some(err) = outcome.blocking_error() {
        return Err(err);
    }

    let Some(plan) = next_round(ordinal + 1, &outcome.survivors)? else {
        let champion = *outcome.survivors.first().ok_or(BracketError::NoSurvivors)?;
        log::info!("Tournament {}: finished, champion {}", tournament_id, champion);
        return Ok(Advancement::Finished { champion });
    };
    if let Some(existing) = snapshot.rounds.iter().find(|r| r.ordinal == ordinal + 1) {
        return Ok(Advancement::Materialized(Materialized::Existing(
            existing.clone(),
        )));
    }
    materialize(store, tournament_id, &plan).map(Advancement::Materialized)
}

/// Advance from the latest persisted round.
pub fn advance_bracket<S: BracketStore>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Advancement, BracketError> {
    let snapshot = store.snapshot(tournament_id)?;
    let latest = latest_round(&snapshot)
        .map(|r| r.ordinal)
        .ok_or(BracketError::InvalidState)?;
    materialize_next_round(store, tournament_id, latest)
}

/// Record a final score. The winner is decided here and the loser is eliminated.
///
/// Equal scores are rejected with `TieUnresolved` and nothing is written. Byes take no score.
/// A decided match can no longer be changed; a tied one can be corrected until its round
/// has been followed by another.
pub fn record_match_result<S: BracketStore>(
    store: &S,
    tournament_id: TournamentId,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
) -> Result<GameMatch, BracketError> {
    let snapshot = store.snapshot(tournament_id)?;
    let m = snapshot
        .matches
        .iter()
        .find(|m| m.id == match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    let (Some(team_a), Some(team_b)) = (m.team_a, m.team_b) else {
        return Err(BracketError::InvalidState);
    };
    let (winner, loser) = match score_a.cmp(&score_b) {
        std::cmp::Ordering::Greater => (team_a, team_b),
        std::cmp::Ordering::Less => (team_b, team_a),
        std::cmp::Ordering::Equal => return Err(BracketError::TieUnresolved { match_id }),
    };
    let update = MatchUpdate::Result {
        score_a,
        score_b,
        winner,
        loser,
    };
    // Early answer from the snapshot; the store repeats the check under its write lock.
    update.check(m, &snapshot.rounds)?;
    log::info!(
        "Tournament {}: match {} finished {}-{}",
        tournament_id,
        match_id,
        score_a,
        score_b
    );
    store.update_match(tournament_id, match_id, update)
}

/// Move a match between `scheduled` and `ongoing`. Completion goes through
/// [`record_match_result`]; finished matches and byes cannot be reopened.
pub fn set_match_status<S: BracketStore>(
    store: &S,
    tournament_id: TournamentId,
    match_id: MatchId,
    status: MatchStatus,
) -> Result<GameMatch, BracketError> {
    let update = MatchUpdate::Status(status);
    let snapshot = store.snapshot(tournament_id)?;
    let m = snapshot
        .matches
        .iter()
        .find(|m| m.id == match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    update.check(m, &snapshot.rounds)?;
    store.update_match(tournament_id, match_id, update)
}

/// Update date/time/venue of a match.
pub fn set_match_schedule<S: BracketStore>(
    store: &S,
    tournament_id: TournamentId,
    match_id: MatchId,
    schedule: MatchSchedule,
) -> Result<GameMatch, BracketError> {
    store.update_match(tournament_id, match_id, MatchUpdate::Schedule(schedule))
}
