//! Team roster import from CSV (`name` column, one team per row, registration order).

use crate::models::{BracketError, TeamId, Tournament};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
}

/// Parse team names from CSV text with a `name` header. Blank names are skipped.
pub fn parse_roster_csv(input: &str) -> Result<Vec<String>, BracketError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input.as_bytes());
    let mut names = Vec::new();
    for (i, row) in reader.deserialize::<RosterRow>().enumerate() {
        let row = row.map_err(|e| BracketError::InvalidRoster(format!("row {}: {}", i + 1, e)))?;
        if !row.name.is_empty() {
            names.push(row.name);
        }
    }
    Ok(names)
}

/// Register every team of a CSV roster, in file order. Nothing is added if any row fails.
pub fn import_roster(tournament: &mut Tournament, input: &str) -> Result<Vec<TeamId>, BracketError> {
    let names = parse_roster_csv(input)?;
    let mut staged = tournament.clone();
    let ids = names
        .into_iter()
        .map(|name| staged.add_team(name))
        .collect::<Result<Vec<_>, _>>()?;
    *tournament = staged;
    log::info!("Tournament {}: imported {} team(s)", tournament.id, ids.len());
    Ok(ids)
}
