//! Single binary JSON service exposing bracket generation to the tournament web app.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, BRACKET_MAX_TEAMS (validator limit, default 64)
//! and BRACKET_ID_SCHEME (`sequential` or `uuid`).

use actix_web::{
    get, post,
    web::{Data, Json},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use stage_brackets::{
    calculate_pool_advancement, calculate_swiss_standings, generate_swiss_pairings,
    models::SwissPairingOptions, AdvancementPolicy, BracketError, BracketFormat, BracketGenerator,
    MatchIdGenerator, Pool, SequentialIds, StageTransition, SwissAdvancementCriteria, SwissRound,
    TeamId, TournamentId, UuidIds, DEFAULT_MAX_BRACKET_SIZE,
};

/// How match ids are produced for generated brackets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum IdScheme {
    /// `winners-1`, `losers-9`, ...: stable across identical requests.
    Sequential,
    /// Unique across requests, for brackets that may be regenerated.
    Uuid,
}

impl IdScheme {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sequential" => Some(IdScheme::Sequential),
            "uuid" => Some(IdScheme::Uuid),
            _ => None,
        }
    }

    fn generator(self) -> Box<dyn MatchIdGenerator> {
        match self {
            IdScheme::Sequential => Box::new(SequentialIds::new()),
            IdScheme::Uuid => Box::new(UuidIds),
        }
    }
}

/// Service configuration, shared read-only by all workers.
#[derive(Clone, Copy, Debug)]
struct ServiceConfig {
    generator: BracketGenerator,
    id_scheme: IdScheme,
}

type AppState = Data<ServiceConfig>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct ValidateBody {
    team_count: usize,
    #[serde(default)]
    bracket_type: BracketFormat,
    max_size: Option<usize>,
}

#[derive(Deserialize)]
struct FromPoolsBody {
    tournament_id: TournamentId,
    pools: Vec<Pool>,
    #[serde(default)]
    transition: StageTransition,
}

#[derive(Deserialize)]
struct FromSwissBody {
    tournament_id: TournamentId,
    rounds: Vec<SwissRound>,
    teams: Vec<TeamId>,
    criteria: SwissAdvancementCriteria,
    #[serde(default)]
    bracket_type: BracketFormat,
}

#[derive(Deserialize)]
struct RoundRobinBody {
    tournament_id: TournamentId,
    teams: Vec<TeamId>,
}

#[derive(Deserialize)]
struct PoolAdvancementBody {
    pools: Vec<Pool>,
    #[serde(default)]
    policy: AdvancementPolicy,
}

#[derive(Deserialize)]
struct SwissPairingsBody {
    rounds: Vec<SwissRound>,
    teams: Vec<TeamId>,
    round_number: u32,
    #[serde(default)]
    options: SwissPairingOptions,
}

fn bad_request(e: BracketError) -> HttpResponse {
    log::info!("Rejected request: {}", e);
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "stage-brackets",
    })
}

/// Check a team count against a bracket type (advisory; always 200).
#[post("/api/brackets/validate")]
async fn api_validate(state: AppState, body: Json<ValidateBody>) -> HttpResponse {
    let max_size = body.max_size.unwrap_or(state.generator.max_size);
    let report =
        stage_brackets::validate_bracket_generation(body.team_count, body.bracket_type, max_size);
    HttpResponse::Ok().json(report)
}

/// Elimination bracket seeded from pool-play results.
#[post("/api/brackets/from-pools")]
async fn api_from_pools(state: AppState, body: Json<FromPoolsBody>) -> HttpResponse {
    let mut ids = state.id_scheme.generator();
    match state.generator.generate_bracket_from_pools(
        &body.pools,
        &body.transition,
        &body.tournament_id,
        ids.as_mut(),
    ) {
        Ok(structure) => HttpResponse::Ok().json(structure),
        Err(e) => bad_request(e),
    }
}

/// Elimination bracket seeded from Swiss rounds.
#[post("/api/brackets/from-swiss")]
async fn api_from_swiss(state: AppState, body: Json<FromSwissBody>) -> HttpResponse {
    let mut ids = state.id_scheme.generator();
    match state.generator.generate_bracket_from_swiss(
        &body.rounds,
        &body.teams,
        &body.criteria,
        body.bracket_type,
        &body.tournament_id,
        ids.as_mut(),
    ) {
        Ok(structure) => HttpResponse::Ok().json(structure),
        Err(e) => bad_request(e),
    }
}

/// Round robin among already-decided advancing teams.
#[post("/api/brackets/round-robin")]
async fn api_round_robin(state: AppState, body: Json<RoundRobinBody>) -> HttpResponse {
    let mut ids = state.id_scheme.generator();
    match state.generator.generate_round_robin_from_pools(
        &body.teams,
        &body.tournament_id,
        ids.as_mut(),
    ) {
        Ok(structure) => HttpResponse::Ok().json(structure),
        Err(e) => bad_request(e),
    }
}

/// Advancement and seeding out of pool play, without building a bracket.
#[post("/api/pools/advancement")]
async fn api_pool_advancement(body: Json<PoolAdvancementBody>) -> HttpResponse {
    HttpResponse::Ok().json(calculate_pool_advancement(&body.pools, &body.policy))
}

/// Pairings for the next Swiss round.
#[post("/api/swiss/pairings")]
async fn api_swiss_pairings(body: Json<SwissPairingsBody>) -> HttpResponse {
    match calculate_swiss_standings(&body.rounds, &body.teams) {
        Ok(standings) => HttpResponse::Ok().json(generate_swiss_pairings(
            &standings,
            body.round_number,
            &body.options,
        )),
        Err(e) => bad_request(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn config_from_env() -> ServiceConfig {
    let max_size = std::env::var("BRACKET_MAX_TEAMS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_BRACKET_SIZE);
    let id_scheme = match std::env::var("BRACKET_ID_SCHEME") {
        Ok(v) => IdScheme::from_env_value(&v).unwrap_or_else(|| {
            log::warn!("Unknown BRACKET_ID_SCHEME {:?}, using sequential ids", v);
            IdScheme::Sequential
        }),
        Err(_) => IdScheme::Sequential,
    };
    ServiceConfig {
        generator: BracketGenerator::new(max_size),
        id_scheme,
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let config = config_from_env();
    log::info!(
        "Starting server at http://{}:{} (max {} teams, {:?} ids)",
        host,
        port,
        config.generator.max_size,
        config.id_scheme
    );

    let state = Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_validate)
            .service(api_from_pools)
            .service(api_from_swiss)
            .service(api_round_robin)
            .service(api_pool_advancement)
            .service(api_swiss_pairings)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    fn test_state() -> AppState {
        Data::new(ServiceConfig {
            generator: BracketGenerator::default(),
            id_scheme: IdScheme::Sequential,
        })
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(test_state())
                    .service(api_health)
                    .service(api_validate)
                    .service(api_from_pools)
                    .service(api_from_swiss)
                    .service(api_round_robin)
                    .service(api_pool_advancement)
                    .service(api_swiss_pairings),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ok"], true);
    }

    #[actix_web::test]
    async fn validate_rejects_small_double_elimination() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/brackets/validate")
            .set_json(json!({ "team_count": 3, "bracket_type": "double-elimination" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], false);
        assert_eq!(
            body["errors"][0],
            "Double elimination requires at least 4 teams"
        );
    }

    #[actix_web::test]
    async fn round_robin_returns_all_pairs() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/brackets/round-robin")
            .set_json(json!({ "tournament_id": "t1", "teams": ["A", "B", "C", "D"] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_matches"], 6);
        assert_eq!(body["format"], "round-robin");
        assert_eq!(body["matches"][0]["id"], "rr-1");
    }

    #[actix_web::test]
    async fn too_few_swiss_qualifiers_is_a_bad_request() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/brackets/from-swiss")
            .set_json(json!({
                "tournament_id": "t1",
                "rounds": [],
                "teams": ["A", "B", "C"],
                "criteria": { "total_teams_advancing": 1 },
                "bracket_type": "single-elimination"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[::core::prelude::v1::test]
    fn id_scheme_parses_env_values() {
        assert_eq!(IdScheme::from_env_value("UUID"), Some(IdScheme::Uuid));
        assert_eq!(IdScheme::from_env_value(" sequential "), Some(IdScheme::Sequential));
        assert_eq!(IdScheme::from_env_value("random"), None);
    }
}
