//! Tournament record and BracketError.

use crate::models::bracket::BracketSnapshot;
use crate::models::game::{GameMatch, MatchId};
use crate::models::round::Round;
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during bracket operations. All are recoverable by the caller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Latest round still has matches without a result. A wait state, not a failure.
    IncompleteRound,
    /// A completed match has equal scores; the score must be corrected.
    TieUnresolved { match_id: MatchId },
    /// A round would start with no teams.
    NoSurvivors,
    /// Another writer already created the round with this ordinal.
    ConcurrentMaterializationConflict { ordinal: u32 },
    TournamentNotFound(TournamentId),
    MatchNotFound(MatchId),
    TeamNotFound(TeamId),
    /// The same team id appears twice in a roster.
    DuplicateTeam(TeamId),
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    InvalidTeamName,
    /// Tournament or match is not in a state that allows this action.
    InvalidState,
    /// A roster import could not be parsed.
    InvalidRoster(String),
    /// The backing store could not be read or written.
    StorageUnavailable,
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::IncompleteRound => write!(f, "Not all matches of the current round have a result"),
            BracketError::TieUnresolved { match_id } => {
                write!(f, "Match {} ended in a tie; correct the score to decide a winner", match_id)
            }
            BracketError::NoSurvivors => write!(f, "No teams are left to play the next round"),
            BracketError::ConcurrentMaterializationConflict { ordinal } => {
                write!(f, "Round {} was already created by another request", ordinal)
            }
            BracketError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            BracketError::MatchNotFound(_) => write!(f, "Match not found"),
            BracketError::TeamNotFound(_) => write!(f, "Team not found"),
            BracketError::DuplicateTeam(id) => write!(f, "Team {} appears more than once", id),
            BracketError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            BracketError::InvalidTeamName => write!(f, "Team name must not be empty"),
            BracketError::InvalidState => write!(f, "Invalid state for this action"),
            BracketError::InvalidRoster(msg) => write!(f, "Invalid roster: {}", msg),
            BracketError::StorageUnavailable => write!(f, "Storage is unavailable"),
        }
    }
}

impl std::error::Error for BracketError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Stored tournament: roster plus every persisted round and match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Teams in registration order; this order seeds round 1.
    pub teams: Vec<Team>,
    pub rounds: Vec<Round>,
    pub matches: Vec<GameMatch>,
}

impl Tournament {
    /// Create an empty tournament (no teams, no rounds).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            teams: Vec::new(),
            rounds: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Create a tournament with an initial roster.
    pub fn with_teams(name: impl Into<String>, teams: Vec<Team>) -> Self {
        Self {
            teams,
            ..Self::new(name)
        }
    }

    /// True once round 1 exists; the roster is frozen from then on.
    pub fn is_seeded(&self) -> bool {
        !self.rounds.is_empty()
    }

    pub fn get_team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Register a team (only before seeding). Names must be unique (case-insensitive).
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, BracketError> {
        if self.is_seeded() {
            return Err(BracketError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(BracketError::InvalidTeamName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(BracketError::DuplicateTeamName);
        }
        let team = Team::new(name_trimmed);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Remove a team by id (only before seeding).
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), BracketError> {
        if self.is_seeded() {
            return Err(BracketError::InvalidState);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(BracketError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Copy of the data the bracket logic reads.
    pub fn snapshot(&self) -> BracketSnapshot {
        BracketSnapshot {
            tournament_id: self.id,
            teams: self.teams.clone(),
            rounds: self.rounds.clone(),
            matches: self.matches.clone(),
        }
    }
}
