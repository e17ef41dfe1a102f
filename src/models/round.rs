//! Round: one persisted layer of the single-elimination tree.

use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a persisted round.
pub type RoundId = Uuid;

/// Teams per match; the bracket is binary.
pub const TEAMS_PER_MATCH: u8 = 2;

/// A persisted round. Ordinals start at 1 and are contiguous within a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub ordinal: u32,
    pub created_at: DateTime<Utc>,
    /// Expected match arity, carried for forward compatibility (always 2).
    pub min_teams: u8,
    pub max_teams: u8,
}

impl Round {
    pub fn new(tournament_id: TournamentId, ordinal: u32, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            ordinal,
            created_at: Utc::now(),
            min_teams: TEAMS_PER_MATCH,
            max_teams: TEAMS_PER_MATCH,
        }
    }
}

/// Display name for a round from the number of pairings it holds.
///
/// `pairings` is the number of matches in the round, not the number of teams entering it.
/// Two survivors make one pairing, so a projected round from two survivors is the Final.
pub fn round_display_name(ordinal: u32, pairings: usize) -> String {
    match pairings {
        1 => "Final".to_string(),
        2 => "Semifinal".to_string(),
        4 => "Quarterfinal".to_string(),
        _ => format!("Round {}", ordinal),
    }
}
