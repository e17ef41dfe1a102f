//! Single-elimination bracket engine: library with models, business logic and storage seam.

pub mod config;
pub mod logic;
pub mod models;
pub mod roster;
pub mod store;

pub use logic::{
    advance_bracket, bracket_phase, build_bracket, compute_stats, first_round,
    materialize_next_round, next_round, normalize_entrants, pair_survivors, placeholder_round,
    record_match_result, resolve_match, resolve_match_in, round_outcome, seed_bracket,
    set_match_schedule, set_match_status, Advancement, Materialized, Pairing, Resolution,
    RoundOutcome, RoundPlan, SeedList,
};
pub use models::{
    round_display_name, Bracket, BracketError, BracketMatch, BracketPhase, BracketRound,
    BracketSnapshot, BracketStats, GameMatch, MatchId, MatchKey, MatchSchedule, MatchStatus, Round,
    RoundId, RoundKey, Team, TeamId, TeamStatus, Tournament, TournamentId, TEAMS_PER_MATCH,
};
pub use store::{BracketStore, MatchUpdate, MemoryStore};
