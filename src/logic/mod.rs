//! Bracket business logic: seeding, round building, match resolution, advancement, stats.

mod advancement;
mod entrants;
mod resolver;
mod rounds;
mod stats;

pub use advancement::{
    advance_bracket, bracket_phase, build_bracket, materialize_next_round, placeholder_round,
    record_match_result, round_outcome, seed_bracket, set_match_schedule, set_match_status,
    Advancement, Materialized, RoundOutcome,
};
pub use entrants::{normalize_entrants, Pairing, SeedList};
pub use resolver::{resolve_match, resolve_match_in, Resolution};
pub use rounds::{first_round, next_round, pair_survivors, RoundPlan};
pub use stats::compute_stats;
