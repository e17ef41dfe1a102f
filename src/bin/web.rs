//! Single binary web server: bracket REST API over an in-memory store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, INACTIVITY_HOURS,
//! CLEANUP_INTERVAL_MINUTES.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_tournament_web::config::ServerConfig;
use bracket_tournament_web::roster::import_roster;
use bracket_tournament_web::{
    advance_bracket, build_bracket, record_match_result, seed_bracket, set_match_schedule,
    set_match_status, BracketError, BracketStore, MatchId, MatchSchedule, MatchStatus, MemoryStore,
    Tournament, TournamentId,
};
use serde::Deserialize;

type AppState = Data<MemoryStore>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct MatchResultBody {
    score_a: u32,
    score_b: u32,
}

#[derive(Deserialize)]
struct MatchStatusBody {
    status: MatchStatus,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

/// JSON error body with a status that tells the caller how to recover.
fn error_response(e: BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        BracketError::TournamentNotFound(_)
        | BracketError::MatchNotFound(_)
        | BracketError::TeamNotFound(_) => HttpResponse::NotFound().json(body),
        BracketError::IncompleteRound
        | BracketError::TieUnresolved { .. }
        | BracketError::ConcurrentMaterializationConflict { .. } => {
            HttpResponse::Conflict().json(body)
        }
        BracketError::StorageUnavailable => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, BracketError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tournament-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let tournament = Tournament::new(body.name.trim());
    let result = state
        .insert_tournament(tournament)
        .and_then(|id| state.get_tournament(id));
    respond(result)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.get_tournament(path.id))
}

/// Register a team (before the bracket is seeded).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<AddTeamBody>) -> HttpResponse {
    respond(state.with_tournament_mut(path.id, |t| {
        t.add_team(body.name.trim())?;
        Ok(t.clone())
    }))
}

/// Register teams from a CSV body with a `name` header.
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    respond(state.with_tournament_mut(path.id, |t| {
        import_roster(t, &body)?;
        Ok(t.clone())
    }))
}

/// Create round 1 from the roster. Repeating the call returns the existing round.
#[post("/api/tournaments/{id}/bracket/seed")]
async fn api_seed_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(seed_bracket(state.get_ref(), path.id))
}

/// Create the next round, or report the champion, once the latest round is resolved.
#[post("/api/tournaments/{id}/bracket/advance")]
async fn api_advance_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(advance_bracket(state.get_ref(), path.id))
}

/// Bracket for display: persisted rounds, a placeholder next round if one is due, stats.
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.snapshot(path.id).map(|snapshot| build_bracket(&snapshot)))
}

/// Record a final score (the loser is eliminated).
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_set_match_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchResultBody>,
) -> HttpResponse {
    respond(record_match_result(
        state.get_ref(),
        path.id,
        path.match_id,
        body.score_a,
        body.score_b,
    ))
}

/// Mark a match scheduled or ongoing.
#[put("/api/tournaments/{id}/matches/{match_id}/status")]
async fn api_set_match_status(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchStatusBody>,
) -> HttpResponse {
    respond(set_match_status(state.get_ref(), path.id, path.match_id, body.status))
}

/// Set date, time and venue of a match.
#[put("/api/tournaments/{id}/matches/{match_id}/schedule")]
async fn api_set_match_schedule(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchSchedule>,
) -> HttpResponse {
    respond(set_match_schedule(
        state.get_ref(),
        path.id,
        path.match_id,
        body.into_inner(),
    ))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(MemoryStore::new());

    // Background task: periodically remove tournaments inactive past the timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    let cleanup_interval = config.cleanup_interval;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            match state_cleanup.evict_idle(inactivity_timeout) {
                Ok(0) => {}
                Ok(removed) => log::info!("Cleaned up {} inactive tournament(s)", removed),
                Err(e) => log::warn!("Cleanup skipped: {}", e),
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_import_teams)
            .service(api_seed_bracket)
            .service(api_advance_bracket)
            .service(api_get_bracket)
            .service(api_set_match_result)
            .service(api_set_match_status)
            .service(api_set_match_schedule)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
