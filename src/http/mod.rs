//! HTTP transport: a thin axum layer over the graph queries.
//!
//! Validation failures map to 400, a route with no path to 404 with a
//! `pathExists: false` body, and storage failures to 500. Not-found
//! conditions inside the graph (absent ids, empty neighborhoods) are modeled
//! results, not errors.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Db;
use crate::error::{KingraphError, Result};
use crate::graph::{self, Connection, PersonId};
use crate::route;

/// Degree bounds accepted by the connections endpoint.
const MIN_DEGREES: u32 = 1;
const MAX_DEGREES: u32 = 6;

/// HTTP server exposing the relationship query endpoints.
pub struct HttpServer {
    state: AppState,
    allowed_origins: Vec<String>,
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    db: Arc<Db>,
}

impl HttpServer {
    /// Create a new HTTP server over an opened database
    pub fn new(db: Db, config: &Config) -> Self {
        Self {
            state: AppState { db: Arc::new(db) },
            allowed_origins: config.http_server.allowed_origins.clone(),
        }
    }

    /// Run the HTTP server
    pub async fn run(&self, port: u16) -> Result<()> {
        let app = self.create_router();

        let addr = format!("127.0.0.1:{}", port);
        log::info!("Starting kingraph HTTP server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
            KingraphError::Io(std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!("Failed to bind to {}: {}", addr, e),
            ))
        })?;

        axum::serve(listener, app).await.map_err(|e| {
            KingraphError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("HTTP server error: {}", e),
            ))
        })?;

        Ok(())
    }

    /// Create the axum router
    fn create_router(&self) -> Router {
        // Restrict CORS to configured origins; allow Any for local dev when
        // none are configured.
        let cors = if self.allowed_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<axum::http::HeaderValue> = self
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/route/:id1/:id2", get(handle_route))
            .route("/graph/stats", get(handle_stats))
            .route("/:id/connections/:degrees", get(handle_connections))
            .route("/health", get(handle_health))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
            .with_state(self.state.clone())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionsResponse {
    person_id: PersonId,
    max_degrees: u32,
    connections: Vec<Connection>,
}

/// Handle GET /route/{id1}/{id2}
async fn handle_route(
    State(state): State<AppState>,
    Path((id1, id2)): Path<(String, String)>,
) -> Response {
    let start = match parse_person_id(&id1) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };
    let end = match parse_person_id(&id2) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    match route::find_route_between_people(&state.db, start, end).await {
        Ok(result) if result.path_exists => (StatusCode::OK, Json(result)).into_response(),
        // No path is a modeled outcome: 404 carrying the pathExists:false body
        Ok(result) => (StatusCode::NOT_FOUND, Json(result)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handle GET /graph/stats
async fn handle_stats(State(state): State<AppState>) -> Response {
    match graph::build_graph(&state.db).await {
        Ok(g) => (StatusCode::OK, Json(graph::compute_statistics(&g))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handle GET /{id}/connections/{degrees}
async fn handle_connections(
    State(state): State<AppState>,
    Path((id, degrees)): Path<(String, String)>,
) -> Response {
    let person_id = match parse_person_id(&id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };
    let max_degrees = match parse_degrees(&degrees) {
        Ok(d) => d,
        Err(e) => return error_response(e),
    };

    match graph::build_graph(&state.db).await {
        Ok(g) => {
            let connections = graph::find_connections_within_degrees(&g, person_id, max_degrees);
            (
                StatusCode::OK,
                Json(ConnectionsResponse {
                    person_id,
                    max_degrees,
                    connections,
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Handle health check endpoint
async fn handle_health() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "kingraph",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
        .into_response()
}

fn parse_person_id(raw: &str) -> Result<PersonId> {
    raw.parse::<i64>().map(PersonId).map_err(|_| {
        KingraphError::Validation(format!("'{}' is not a valid person id", raw))
    })
}

fn parse_degrees(raw: &str) -> Result<u32> {
    let degrees: u32 = raw.parse().map_err(|_| {
        KingraphError::Validation(format!("'{}' is not a valid degree count", raw))
    })?;
    if !(MIN_DEGREES..=MAX_DEGREES).contains(&degrees) {
        return Err(KingraphError::Validation(format!(
            "degrees must be between {} and {}, got {}",
            MIN_DEGREES, MAX_DEGREES, degrees
        )));
    }
    Ok(degrees)
}

fn error_response(err: KingraphError) -> Response {
    let status = match &err {
        KingraphError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("Request failed: {}", err);
    }
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_person_id_accepts_integers() {
        assert_eq!(parse_person_id("42").unwrap(), PersonId(42));
        assert_eq!(parse_person_id("-3").unwrap(), PersonId(-3));
    }

    #[test]
    fn test_parse_person_id_rejects_garbage() {
        assert!(parse_person_id("abc").is_err());
        assert!(parse_person_id("1.5").is_err());
        assert!(parse_person_id("").is_err());
    }

    #[test]
    fn test_parse_degrees_bounds() {
        assert_eq!(parse_degrees("1").unwrap(), 1);
        assert_eq!(parse_degrees("6").unwrap(), 6);
        assert!(parse_degrees("0").is_err());
        assert!(parse_degrees("7").is_err());
        assert!(parse_degrees("-1").is_err());
        assert!(parse_degrees("two").is_err());
    }

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        let response = error_response(KingraphError::Validation("nope".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_errors_map_to_server_error() {
        let response = error_response(KingraphError::Database(rusqlite::Error::InvalidQuery));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
