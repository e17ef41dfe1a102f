//! Match (game), its status and scheduling metadata.

use crate::models::round::RoundId;
use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Progress of a match as recorded by the organizer.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Ongoing,
    Completed,
}

/// When and where a match is played. Not used by the bracket logic.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchSchedule {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub venue: Option<String>,
}

/// A single match between two team slots. `None` in a slot means a bye or a team not yet known.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub round_id: RoundId,
    pub tournament_id: TournamentId,
    pub team_a: Option<TeamId>,
    pub team_b: Option<TeamId>,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub status: MatchStatus,
    /// Set when a result is recorded; byes resolve without it.
    pub winner_id: Option<TeamId>,
    pub is_bye: bool,
    #[serde(default)]
    pub schedule: MatchSchedule,
}

impl GameMatch {
    pub fn new(
        tournament_id: TournamentId,
        round_id: RoundId,
        team_a: Option<TeamId>,
        team_b: Option<TeamId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_id,
            tournament_id,
            team_a,
            team_b,
            score_a: None,
            score_b: None,
            status: MatchStatus::Scheduled,
            winner_id: None,
            is_bye: team_a.is_some() != team_b.is_some(),
            schedule: MatchSchedule::default(),
        }
    }

    /// The one populated slot when exactly one is filled.
    pub fn lone_team(&self) -> Option<TeamId> {
        match (self.team_a, self.team_b) {
            (Some(t), None) | (None, Some(t)) => Some(t),
            _ => None,
        }
    }

    /// Populated slots, in slot order.
    pub fn teams(&self) -> impl Iterator<Item = TeamId> {
        self.team_a.into_iter().chain(self.team_b)
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team_a == Some(team_id) || self.team_b == Some(team_id)
    }
}
