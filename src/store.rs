//! Storage seam for bracket data, plus the in-memory store the web binary uses.
//!
//! The one shared mutable resource is the set of persisted rounds/matches of a tournament.
//! [`BracketStore::insert_round`] is the only way to create a round and must reject a second
//! round with the same `(tournament, ordinal)`; the controller treats that rejection as
//! "someone else won" and re-reads.

use crate::logic::resolve_match;
use crate::models::{
    BracketError, BracketSnapshot, GameMatch, MatchId, MatchSchedule, MatchStatus, Round, TeamId,
    Tournament, TournamentId,
};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// A change to one stored match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchUpdate {
    /// Final score with the decided winner; the loser is eliminated in the same write.
    Result {
        score_a: u32,
        score_b: u32,
        winner: TeamId,
        loser: TeamId,
    },
    Status(MatchStatus),
    Schedule(MatchSchedule),
}

impl MatchUpdate {
    /// Whether this update may be applied to `m`, given every round of its tournament.
    ///
    /// A result needs two teams, no winner yet, the two teams as winner and loser, and no
    /// round after the match's round. A status change cannot touch a completed match or a bye.
    pub fn check(&self, m: &GameMatch, rounds: &[Round]) -> Result<(), BracketError> {
        match self {
            MatchUpdate::Result { winner, loser, .. } => {
                let (Some(team_a), Some(team_b)) = (m.team_a, m.team_b) else {
                    return Err(BracketError::InvalidState);
                };
                if m.is_bye || resolve_match(m).winner().is_some() {
                    return Err(BracketError::InvalidState);
                }
                let slots = (*winner == team_a && *loser == team_b)
                    || (*winner == team_b && *loser == team_a);
                if !slots {
                    return Err(BracketError::InvalidState);
                }
                let ordinal = rounds
                    .iter()
                    .find(|r| r.id == m.round_id)
                    .map(|r| r.ordinal)
                    .ok_or(BracketError::InvalidState)?;
                if rounds.iter().any(|r| r.ordinal > ordinal) {
                    return Err(BracketError::InvalidState);
                }
                Ok(())
            }
            MatchUpdate::Status(status) => {
                if *status == MatchStatus::Completed
                    || m.status == MatchStatus::Completed
                    || m.is_bye
                {
                    return Err(BracketError::InvalidState);
                }
                Ok(())
            }
            MatchUpdate::Schedule(_) => Ok(()),
        }
    }
}

/// What the bracket logic needs from persistence.
pub trait BracketStore {
    /// Current teams, rounds and matches of a tournament.
    fn snapshot(&self, tournament_id: TournamentId) -> Result<BracketSnapshot, BracketError>;

    /// Persist a round and its matches atomically.
    ///
    /// Fails with `ConcurrentMaterializationConflict` when the ordinal is already taken, and
    /// with `InvalidState` when the ordinal would leave a gap.
    fn insert_round(&self, round: Round, matches: Vec<GameMatch>) -> Result<Round, BracketError>;

    /// Apply one update to a match and return the stored result.
    ///
    /// Must run [`MatchUpdate::check`] against the stored data in the same write that applies
    /// the update, so a competing writer cannot slip in between check and write.
    fn update_match(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        update: MatchUpdate,
    ) -> Result<GameMatch, BracketError>;
}

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// Tournaments held in memory, keyed by id. Writes serialize on one lock.
#[derive(Default)]
pub struct MemoryStore {
    tournaments: RwLock<HashMap<TournamentId, TournamentEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tournament(&self, tournament: Tournament) -> Result<TournamentId, BracketError> {
        let id = tournament.id;
        let mut g = self
            .tournaments
            .write()
            .map_err(|_| BracketError::StorageUnavailable)?;
        g.insert(
            id,
            TournamentEntry {
                tournament,
                last_activity: Instant::now(),
            },
        );
        Ok(id)
    }

    /// Clone of a stored tournament. Refreshes its last activity.
    pub fn get_tournament(&self, id: TournamentId) -> Result<Tournament, BracketError> {
        self.with_tournament_mut(id, |t| Ok(t.clone()))
    }

    /// Run `f` on a stored tournament under the write lock. Refreshes its last activity.
    pub fn with_tournament_mut<T, F>(&self, id: TournamentId, f: F) -> Result<T, BracketError>
    where
        F: FnOnce(&mut Tournament) -> Result<T, BracketError>,
    {
        let mut g = self
            .tournaments
            .write()
            .map_err(|_| BracketError::StorageUnavailable)?;
        let entry = g.get_mut(&id).ok_or(BracketError::TournamentNotFound(id))?;
        entry.last_activity = Instant::now();
        f(&mut entry.tournament)
    }

    /// Number of tournaments held.
    pub fn tournament_count(&self) -> Result<usize, BracketError> {
        self.tournaments
            .read()
            .map(|g| g.len())
            .map_err(|_| BracketError::StorageUnavailable)
    }

    /// Drop tournaments with no activity for `timeout`. Returns how many were removed.
    pub fn evict_idle(&self, timeout: Duration) -> Result<usize, BracketError> {
        let mut g = self
            .tournaments
            .write()
            .map_err(|_| BracketError::StorageUnavailable)?;
        let before = g.len();
        g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
        Ok(before - g.len())
    }
}

impl BracketStore for MemoryStore {
    fn snapshot(&self, tournament_id: TournamentId) -> Result<BracketSnapshot, BracketError> {
        let g = self
            .tournaments
            .read()
            .map_err(|_| BracketError::StorageUnavailable)?;
        g.get(&tournament_id)
            .map(|entry| entry.tournament.snapshot())
            .ok_or(BracketError::TournamentNotFound(tournament_id))
    }

    fn insert_round(&self, round: Round, matches: Vec<GameMatch>) -> Result<Round, BracketError> {
        let ordinal = round.ordinal;
        self.with_tournament_mut(round.tournament_id, |t| {
            if t.rounds.iter().any(|r| r.ordinal == ordinal) {
                return Err(BracketError::ConcurrentMaterializationConflict { ordinal });
            }
            let expected = t.rounds.iter().map(|r| r.ordinal).max().unwrap_or(0) + 1;
            if ordinal != expected {
                return Err(BracketError::InvalidState);
            }
            if matches.iter().any(|m| m.round_id != round.id) {
                return Err(BracketError::InvalidState);
            }
            log::info!(
                "Tournament {}: created {} (round {}) with {} match(es)",
                t.id,
                round.name,
                ordinal,
                matches.len()
            );
            t.rounds.push(round.clone());
            t.matches.extend(matches);
            Ok(round)
        })
    }

    fn update_match(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        update: MatchUpdate,
    ) -> Result<GameMatch, BracketError> {
        self.with_tournament_mut(tournament_id, |t| {
            if let MatchUpdate::Result { loser, .. } = &update {
                t.get_team_mut(*loser)
                    .ok_or(BracketError::TeamNotFound(*loser))?;
            }
            let current = t
                .get_match(match_id)
                .ok_or(BracketError::MatchNotFound(match_id))?;
            update.check(current, &t.rounds)?;
            let m = t
                .get_match_mut(match_id)
                .ok_or(BracketError::MatchNotFound(match_id))?;
            let loser = match update {
                MatchUpdate::Result {
                    score_a,
                    score_b,
                    winner,
                    loser,
                } => {
                    m.score_a = Some(score_a);
                    m.score_b = Some(score_b);
                    m.winner_id = Some(winner);
                    m.status = MatchStatus::Completed;
                    Some(loser)
                }
                MatchUpdate::Status(status) => {
                    m.status = status;
                    None
                }
                MatchUpdate::Schedule(schedule) => {
                    m.schedule = schedule;
                    None
                }
            };
            let updated = m.clone();
            if let Some(team) = loser.and_then(|id| t.get_team_mut(id)) {
                team.eliminate();
                log::info!("Tournament {}: team {} eliminated", tournament_id, team.name);
            }
            Ok(updated)
        })
    }
}
