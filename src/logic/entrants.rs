//! Entrant normalization: roster order → round 1 seed list.

use crate::models::{BracketError, TeamId};
use std::collections::HashSet;

/// Two slots of a match to be created. An empty slot is a bye.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Pairing {
    pub team_a: Option<TeamId>,
    pub team_b: Option<TeamId>,
}

impl Pairing {
    pub fn versus(team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            team_a: Some(team_a),
            team_b: Some(team_b),
        }
    }

    pub fn bye(team: TeamId) -> Self {
        Self {
            team_a: Some(team),
            team_b: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team_a.is_some() != self.team_b.is_some()
    }

    /// Team slots that are filled (1 for a bye, 2 otherwise).
    pub fn slot_count(&self) -> usize {
        usize::from(self.team_a.is_some()) + usize::from(self.team_b.is_some())
    }
}

/// Round 1 seeding: an optional bye for the last entrant, then sequential pairs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SeedList {
    pub bye: Option<TeamId>,
    pub pairs: Vec<(TeamId, TeamId)>,
}

impl SeedList {
    /// Pairings in match order. The bye, if any, comes first.
    pub fn pairings(&self) -> Vec<Pairing> {
        self.bye
            .map(Pairing::bye)
            .into_iter()
            .chain(self.pairs.iter().map(|&(a, b)| Pairing::versus(a, b)))
            .collect()
    }

    pub fn match_count(&self) -> usize {
        self.pairs.len() + usize::from(self.bye.is_some())
    }
}

/// Seed round 1 from teams in input order.
///
/// With an odd count the *last* team gets the bye; the rest pair up two-by-two in order.
/// Seeding is deliberately order-based, not skill-based. The input is not modified.
pub fn normalize_entrants(teams: &[TeamId]) -> Result<SeedList, BracketError> {
    let mut seen = HashSet::with_capacity(teams.len());
    for &id in teams {
        if !seen.insert(id) {
            return Err(BracketError::DuplicateTeam(id));
        }
    }

    let (paired, bye) = match teams.split_last() {
        Some((&last, rest)) if teams.len() % 2 == 1 => (rest, Some(last)),
        _ => (teams, None),
    };
    let pairs = paired
        .chunks_exact(2)
        .map(|chunk| (chunk[0], chunk[1]))
        .collect();
    Ok(SeedList { bye, pairs })
}
