//! Assembled bracket view: rounds (persisted or placeholder), phase, and stats.
//!
//! Nothing here is persisted. A [`Bracket`] is rebuilt from a [`BracketSnapshot`] each time a
//! caller wants to display or advance the tournament.

use crate::models::game::{GameMatch, MatchId, MatchStatus};
use crate::models::round::{Round, RoundId};
use crate::models::team::{Team, TeamId};
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Identity of a bracket round: a stored round, or a projection of the next one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundKey {
    Persisted { id: RoundId },
    Placeholder { ordinal: u32 },
}

impl RoundKey {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RoundKey::Placeholder { .. })
    }

    /// Id for display: the uuid for stored rounds, `placeholder-<ordinal>` otherwise.
    pub fn display_id(&self) -> String {
        match self {
            RoundKey::Persisted { id } => id.to_string(),
            RoundKey::Placeholder { ordinal } => format!("placeholder-{}", ordinal),
        }
    }
}

/// Identity of a bracket match. Placeholder indices are 1-based.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKey {
    Persisted { id: MatchId },
    Placeholder { ordinal: u32, index: usize },
}

impl MatchKey {
    pub fn display_id(&self) -> String {
        match self {
            MatchKey::Persisted { id } => id.to_string(),
            MatchKey::Placeholder { ordinal, index } => {
                format!("placeholder-match-{}-{}", ordinal, index)
            }
        }
    }
}

/// Everything the engine needs to know about one tournament, as read from storage.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BracketSnapshot {
    pub tournament_id: TournamentId,
    /// Roster in registration order.
    pub teams: Vec<Team>,
    pub rounds: Vec<Round>,
    pub matches: Vec<GameMatch>,
}

impl BracketSnapshot {
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Rounds sorted by ordinal.
    pub fn ordered_rounds(&self) -> Vec<&Round> {
        let mut rounds: Vec<&Round> = self.rounds.iter().collect();
        rounds.sort_by_key(|r| r.ordinal);
        rounds
    }

    /// Matches of one round, in stored order.
    pub fn round_matches(&self, round_id: RoundId) -> Vec<&GameMatch> {
        self.matches.iter().filter(|m| m.round_id == round_id).collect()
    }
}

/// One match as shown in the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub key: MatchKey,
    pub id: String,
    pub team_a: Option<TeamId>,
    pub team_b: Option<TeamId>,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub status: MatchStatus,
    pub is_bye: bool,
    /// Resolved winner, if any (see `logic::resolve_match`).
    pub winner_id: Option<TeamId>,
}

/// One round as shown in the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    pub key: RoundKey,
    pub id: String,
    pub name: String,
    pub ordinal: u32,
    pub is_placeholder: bool,
    pub matches: Vec<BracketMatch>,
}

/// Where the bracket stands. `Materializing` is transient and never observed in a snapshot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BracketPhase {
    /// No rounds yet.
    Empty,
    /// Latest round still has undecided matches (including ties).
    InProgress { ordinal: u32 },
    /// Latest round fully resolved with more than one survivor; next round may be created.
    RoundComplete { ordinal: u32, survivors: Vec<TeamId> },
    /// Latest round resolved to a single survivor.
    Finished { champion: TeamId },
}

/// Summary counts for display.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketStats {
    pub round_count: usize,
    pub total_matches: usize,
    /// Matches with `status == completed`. Byes are not counted here.
    pub completed_matches: usize,
    /// Matches with a winner, byes included.
    pub resolved_matches: usize,
    pub total_teams: usize,
}

/// Bracket assembled for display: persisted rounds, then an optional placeholder round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub tournament_id: TournamentId,
    pub rounds: Vec<BracketRound>,
    pub phase: BracketPhase,
    pub stats: BracketStats,
}

impl Bracket {
    pub fn champion(&self) -> Option<TeamId> {
        match self.phase {
            BracketPhase::Finished { champion } => Some(champion),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<&BracketRound> {
        self.rounds.iter().find(|r| r.is_placeholder)
    }
}
