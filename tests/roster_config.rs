//! Integration tests for roster import and server configuration.

use bracket_tournament_web::config::ServerConfig;
use bracket_tournament_web::roster::{import_roster, parse_roster_csv};
use bracket_tournament_web::{
    seed_bracket, BracketError, BracketStore, MemoryStore, Tournament,
};
use std::collections::HashMap;
use std::time::Duration;

#[test]
fn parse_roster_keeps_file_order_and_skips_blanks() {
    let csv = "name\nRed Arrows\n  Blue Jays \n\nGreen Geckos\n";
    assert_eq!(
        parse_roster_csv(csv).unwrap(),
        vec!["Red Arrows", "Blue Jays", "Green Geckos"]
    );
}

#[test]
fn parse_roster_requires_a_name_column() {
    assert!(matches!(
        parse_roster_csv("team\nRed\n"),
        Err(BracketError::InvalidRoster(_))
    ));
}

#[test]
fn import_is_all_or_nothing() {
    let mut t = Tournament::new("Cup");
    t.add_team("Red").unwrap();
    assert_eq!(
        import_roster(&mut t, "name\nBlue\nred\n"),
        Err(BracketError::DuplicateTeamName)
    );
    assert_eq!(t.teams.len(), 1);

    let ids = import_roster(&mut t, "name\nBlue\nGreen\n").unwrap();
    assert_eq!(ids.len(), 2);
    let names: Vec<_> = t.teams.iter().map(|team| team.name.as_str()).collect();
    assert_eq!(names, vec!["Red", "Blue", "Green"]);
}

#[test]
fn roster_is_frozen_after_seeding() {
    let store = MemoryStore::new();
    let mut t = Tournament::new("Cup");
    import_roster(&mut t, "name\nA\nB\nC\n").unwrap();
    let id = store.insert_tournament(t).unwrap();
    seed_bracket(&store, id).unwrap();

    let result = store.with_tournament_mut(id, |t| t.add_team("D").map(|_| ()));
    assert_eq!(result, Err(BracketError::InvalidState));
    assert_eq!(store.snapshot(id).unwrap().teams.len(), 3);
}

#[test]
fn unknown_tournament_is_reported() {
    let store = MemoryStore::new();
    let id = uuid::Uuid::new_v4();
    assert_eq!(
        store.snapshot(id).map(|_| ()),
        Err(BracketError::TournamentNotFound(id))
    );
}

#[test]
fn idle_tournaments_are_evicted() {
    let store = MemoryStore::new();
    store.insert_tournament(Tournament::new("Cup")).unwrap();
    assert_eq!(store.tournament_count().unwrap(), 1);
    assert_eq!(store.evict_idle(Duration::from_secs(3600)).unwrap(), 0);
    assert_eq!(store.evict_idle(Duration::ZERO).unwrap(), 1);
    assert_eq!(store.tournament_count().unwrap(), 0);
}

#[test]
fn config_defaults_and_overrides() {
    let defaults = ServerConfig::from_lookup(|_| None);
    assert_eq!(defaults, ServerConfig::default());
    assert_eq!(defaults.port, 8080);
    assert_eq!(defaults.inactivity_timeout, Duration::from_secs(12 * 3600));

    let env: HashMap<&str, &str> = [
        ("HOST", "127.0.0.1"),
        ("PORT", "9000"),
        ("INACTIVITY_HOURS", "1"),
        ("CLEANUP_INTERVAL_MINUTES", "nope"),
    ]
    .into_iter()
    .collect();
    let config = ServerConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.inactivity_timeout, Duration::from_secs(3600));
    assert_eq!(config.cleanup_interval, Duration::from_secs(30 * 60));
}

#[test]
fn config_values_too_large_to_scale_fall_back_to_defaults() {
    let max = u64::MAX.to_string();
    let config = ServerConfig::from_lookup(|key| match key {
        "INACTIVITY_HOURS" | "CLEANUP_INTERVAL_MINUTES" => Some(max.clone()),
        _ => None,
    });
    assert_eq!(config.inactivity_timeout, Duration::from_secs(12 * 3600));
    assert_eq!(config.cleanup_interval, Duration::from_secs(30 * 60));

    let config =
        ServerConfig::from_lookup(|key| (key == "INACTIVITY_HOURS").then(|| "2".to_string()));
    assert_eq!(config.inactivity_timeout, Duration::from_secs(2 * 3600));
}
