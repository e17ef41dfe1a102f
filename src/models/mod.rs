//! Data structures for the bracket: teams, rounds, matches, tournaments, assembled bracket views.

mod bracket;
mod game;
mod round;
mod team;
mod tournament;

pub use bracket::{
    Bracket, BracketMatch, BracketPhase, BracketRound, BracketSnapshot, BracketStats, MatchKey,
    RoundKey,
};
pub use game::{GameMatch, MatchId, MatchSchedule, MatchStatus};
pub use round::{round_display_name, Round, RoundId, TEAMS_PER_MATCH};
pub use team::{Team, TeamId, TeamStatus};
pub use tournament::{BracketError, Tournament, TournamentId};
