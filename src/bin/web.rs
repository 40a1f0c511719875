//! Single binary web server: the bracket engine over a small JSON API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).
//! Engine limits come from BRACKET_MIN_PARTICIPANTS, BRACKET_MAX_PARTICIPANTS, BRACKET_MAX_SET_SCORE.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use knockout_bracket::{
    bracket_csv, BracketError, BracketId, BracketRegistry, EngineConfig, ErrorKind, NodeId,
    PlayerId, Round, SetScore, TournamentId,
};
use serde::Deserialize;
use std::time::Duration;

/// Shared state: the registry locks per bracket internally.
type AppState = Data<BracketRegistry>;

/// How often the registry size is logged.
const SUMMARY_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct GenerateBody {
    participants: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct SeedBody {
    #[serde(default)]
    seed_order: Option<Vec<PlayerId>>,
}

#[derive(Deserialize)]
struct MatchResultBody {
    winner_id: PlayerId,
    #[serde(default)]
    sets: Option<Vec<SetScore>>,
}

#[derive(Deserialize)]
struct RoundQuery {
    round: Option<Round>,
}

/// Path segment: tournament id (e.g. /api/brackets/{tournament_id})
#[derive(Deserialize)]
struct TournamentPath {
    tournament_id: TournamentId,
}

/// Path segment: bracket id (e.g. /api/brackets/seed/{bracket_id})
#[derive(Deserialize)]
struct BracketPath {
    bracket_id: BracketId,
}

/// Path segments: bracket id and node id (e.g. /api/brackets/{bracket_id}/match/{node_id})
#[derive(Deserialize)]
struct NodePath {
    bracket_id: BracketId,
    node_id: NodeId,
}

/// 404 for missing brackets or nodes, 400 for everything else.
fn error_response(e: &BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string(), "kind": e.kind() });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "knockout-bracket",
    })
}

/// Generate the bracket from the confirmed participants, in registration order.
#[post("/api/brackets/generate/{tournament_id}")]
async fn api_generate_bracket(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<GenerateBody>,
) -> HttpResponse {
    match state.build(path.tournament_id, &body.participants) {
        Ok(bracket) => HttpResponse::Created().json(serde_json::json!({
            "bracket_id": bracket.id,
            "total_rounds": bracket.total_rounds(),
            "current_round": bracket.current_round,
            "total_matches": bracket.nodes.len(),
            "first_round_matches": bracket.nodes_in_round(bracket.first_round()).count(),
        })),
        Err(e) => error_response(&e),
    }
}

/// Apply an optional seed order and activate the bracket (generated status only).
#[post("/api/brackets/seed/{bracket_id}")]
async fn api_seed_bracket(
    state: AppState,
    path: Path<BracketPath>,
    body: Option<Json<SeedBody>>,
) -> HttpResponse {
    let seed_order = body.as_ref().and_then(|b| b.seed_order.as_deref());
    match state.seed(path.bracket_id, seed_order) {
        Ok(bracket) => HttpResponse::Ok().json(serde_json::json!({
            "bracket_id": bracket.id,
            "status": bracket.status,
            "is_seeded": bracket.is_seeded,
        })),
        Err(e) => error_response(&e),
    }
}

/// Record a match result and advance the winner.
#[put("/api/brackets/{bracket_id}/match/{node_id}")]
async fn api_record_result(
    state: AppState,
    path: Path<NodePath>,
    body: Json<MatchResultBody>,
) -> HttpResponse {
    match state.record_result(
        path.bracket_id,
        path.node_id,
        body.winner_id,
        body.sets.as_deref(),
    ) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}

/// Cancel a match that has not been completed.
#[post("/api/brackets/{bracket_id}/match/{node_id}/cancel")]
async fn api_cancel_match(state: AppState, path: Path<NodePath>) -> HttpResponse {
    match state.cancel_match(path.bracket_id, path.node_id) {
        Ok(node) => HttpResponse::Ok().json(node),
        Err(e) => error_response(&e),
    }
}

#[get("/api/brackets/{tournament_id}/stats")]
async fn api_bracket_stats(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.stats_for_tournament(path.tournament_id) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

#[get("/api/brackets/{tournament_id}/export.csv")]
async fn api_export_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let bracket = match state.bracket_for_tournament(path.tournament_id) {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };
    match bracket_csv(&bracket) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => {
            log::error!("CSV export of bracket {} failed: {}", bracket.id, e);
            HttpResponse::InternalServerError().body("export error")
        }
    }
}

/// Full bracket (nodes with match records), or one round with ?round=quarter_finals.
#[get("/api/brackets/{tournament_id}")]
async fn api_get_bracket(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<RoundQuery>,
) -> HttpResponse {
    match state.view_for_tournament(path.tournament_id, query.round) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    let config = EngineConfig::from_env();
    log::info!(
        "Starting server at http://{}:{} (participants {}..={}, set score max {})",
        bind.0,
        bind.1,
        config.min_participants,
        config.max_participants,
        config.max_set_score
    );

    let state = Data::new(BracketRegistry::new(config));

    // Background task: periodically log how many brackets are held in memory
    let state_summary = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(SUMMARY_INTERVAL);
        loop {
            interval.tick().await;
            log::info!("Holding {} bracket(s)", state_summary.len());
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_generate_bracket)
            .service(api_seed_bracket)
            .service(api_record_result)
            .service(api_cancel_match)
            .service(api_bracket_stats)
            .service(api_export_bracket)
            .service(api_get_bracket)
    })
    .bind(bind)?
    .run()
    .await
}
