//! Round building: pairings for round 1 and for every later round.

use crate::logic::entrants::{Pairing, SeedList};
use crate::models::{round_display_name, BracketError, GameMatch, Round, TeamId, TournamentId};

/// A round that has been computed but not yet written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundPlan {
    pub ordinal: u32,
    pub name: String,
    pub pairings: Vec<Pairing>,
}

impl RoundPlan {
    fn new(ordinal: u32, pairings: Vec<Pairing>) -> Self {
        Self {
            ordinal,
            name: round_display_name(ordinal, pairings.len()),
            pairings,
        }
    }

    /// Concrete round and matches for this plan, with fresh ids.
    pub fn build(&self, tournament_id: TournamentId) -> (Round, Vec<GameMatch>) {
        let round = Round::new(tournament_id, self.ordinal, self.name.clone());
        let matches = self
            .pairings
            .iter()
            .map(|p| GameMatch::new(tournament_id, round.id, p.team_a, p.team_b))
            .collect();
        (round, matches)
    }
}

/// Round 1 from the seed list: bye first (if any), then pairs in order.
pub fn first_round(seeds: &SeedList) -> RoundPlan {
    RoundPlan::new(1, seeds.pairings())
}

/// Pair survivors two-by-two in order; an odd survivor out gets a bye as the last match.
pub fn pair_survivors(survivors: &[TeamId]) -> Vec<Pairing> {
    let mut chunks = survivors.chunks_exact(2);
    let mut pairings: Vec<Pairing> = chunks
        .by_ref()
        .map(|chunk| Pairing::versus(chunk[0], chunk[1]))
        .collect();
    if let [odd] = chunks.remainder() {
        pairings.push(Pairing::bye(*odd));
    }
    pairings
}

/// Round `ordinal` from the ordered survivors of the round before it.
///
/// Returns `Ok(None)` for a single survivor: the tournament is decided and no round is built.
/// Deterministic: the same survivor order always yields the same pairings.
pub fn next_round(ordinal: u32, survivors: &[TeamId]) -> Result<Option<RoundPlan>, BracketError> {
    match survivors.len() {
        0 => Err(BracketError::NoSurvivors),
        1 => Ok(None),
        _ => Ok(Some(RoundPlan::new(ordinal, pair_survivors(survivors)))),
    }
}
