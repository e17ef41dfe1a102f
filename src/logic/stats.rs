//! Summary counts for an assembled bracket.

use crate::models::{BracketRound, BracketStats, MatchStatus};

/// Count rounds and matches of the persisted rounds; placeholder rounds are skipped.
///
/// `completed_matches` counts only `status == completed`, so byes are left out of it even
/// though they are resolved. `resolved_matches` includes them.
pub fn compute_stats(rounds: &[BracketRound], total_teams: usize) -> BracketStats {
    let persisted = || rounds.iter().filter(|r| !r.is_placeholder);
    let matches = || persisted().flat_map(|r| r.matches.iter());
    BracketStats {
        round_count: persisted().count(),
        total_matches: matches().count(),
        completed_matches: matches()
            .filter(|m| m.status == MatchStatus::Completed)
            .count(),
        resolved_matches: matches().filter(|m| m.winner_id.is_some()).count(),
        total_teams,
    }
}
