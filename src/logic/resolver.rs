//! Match resolution: who, if anyone, advances out of a match.

use crate::models::{GameMatch, MatchStatus, Team, TeamId};
use serde::Serialize;

/// Outcome of resolving one match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "team_id", rename_all = "snake_case")]
pub enum Resolution {
    Winner(TeamId),
    /// Not played yet, or data too incomplete to tell.
    Undecided,
    /// Completed with equal scores. No winner is defined.
    Tie,
}

impl Resolution {
    pub fn winner(&self) -> Option<TeamId> {
        match self {
            Resolution::Winner(id) => Some(*id),
            _ => None,
        }
    }
}

/// Resolve a match on its own data. Pure.
///
/// In priority order:
/// 1. A bye (flagged, or exactly one slot filled) is won by the filled slot, whatever its status.
/// 2. A match that is not `completed` is undecided.
/// 3. The strictly higher score wins.
/// 4. Equal scores are a tie.
///
/// A completed match without both scores falls back to `winner_id` if it names a slot team.
pub fn resolve_match(m: &GameMatch) -> Resolution {
    if let Some(team) = m.lone_team() {
        return Resolution::Winner(team);
    }
    if m.is_bye {
        log::warn!("Match {} is flagged as a bye but has {} teams", m.id, m.teams().count());
        return Resolution::Undecided;
    }
    if m.status != MatchStatus::Completed {
        return Resolution::Undecided;
    }
    let (Some(team_a), Some(team_b)) = (m.team_a, m.team_b) else {
        return Resolution::Undecided;
    };
    match (m.score_a, m.score_b) {
        (Some(a), Some(b)) if a > b => Resolution::Winner(team_a),
        (Some(a), Some(b)) if b > a => Resolution::Winner(team_b),
        (Some(_), Some(_)) => Resolution::Tie,
        _ => match m.winner_id {
            Some(w) if m.involves(w) => Resolution::Winner(w),
            _ => Resolution::Undecided,
        },
    }
}

/// Resolve a match against the roster; any slot naming an unknown team makes it undecided.
pub fn resolve_match_in(m: &GameMatch, roster: &[Team]) -> Resolution {
    let unknown = m.teams().find(|id| !roster.iter().any(|t| t.id == *id));
    if let Some(id) = unknown {
        log::warn!("Match {} references unknown team {}", m.id, id);
        return Resolution::Undecided;
    }
    resolve_match(m)
}
