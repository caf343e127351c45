//! HTTP front end for simulation intake
//!
//! `POST {prefix}` validates and stores a submission; `GET {prefix}/{id}`
//! returns a stored record. Routing is plain method/path matching so the same
//! handler serves Lambda function URLs and API Gateway proxies.

use crate::config::ServiceConfig;
use crate::engine::IssuanceEngine;
use crate::simulation::SimulationSubmission;
use crate::storage::SimulationStore;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, Response};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Status code and JSON body produced by a route
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: StatusCode::OK, body }
    }

    fn error(status: StatusCode, message: &str) -> Self {
        Self { status, body: json!({ "error": message }) }
    }

    fn with_details(status: StatusCode, message: &str, details: Value) -> Self {
        Self { status, body: json!({ "error": message, "details": details }) }
    }

    fn internal(err: impl std::fmt::Display) -> Self {
        log::error!("internal error: {err}");
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

/// Request handler with its injected store, engine and configuration
pub struct SimulationApi {
    store: Arc<dyn SimulationStore>,
    engine: IssuanceEngine,
    config: ServiceConfig,
}

impl SimulationApi {
    pub fn new(store: Arc<dyn SimulationStore>, engine: IssuanceEngine, config: ServiceConfig) -> Self {
        Self { store, engine, config }
    }

    /// Dispatch a request by method and path
    pub fn route(&self, method: &Method, path: &str, body: &[u8]) -> ApiResponse {
        let Some(rest) = path.strip_prefix(self.config.route_prefix.as_str()) else {
            return ApiResponse::error(StatusCode::NOT_FOUND, "Not found");
        };
        let rest = rest.trim_end_matches('/');

        match (method, rest) {
            (&Method::POST, "") => self.create(body),
            (&Method::GET, id) if id.starts_with('/') && !id[1..].contains('/') => self.fetch(&id[1..]),
            (_, "") => ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            (_, id) if id.starts_with('/') && !id[1..].contains('/') => {
                ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
            }
            _ => ApiResponse::error(StatusCode::NOT_FOUND, "Not found"),
        }
    }

    /// Lambda entry point: adapt the HTTP request and response
    pub fn handle(&self, req: &Request) -> Result<Response<Body>, lambda_http::Error> {
        let body: &[u8] = req.body();
        let response = self.route(req.method(), req.uri().path(), body);
        log::debug!("{} {} -> {}", req.method(), req.uri().path(), response.status);

        let resp = Response::builder()
            .status(response.status)
            .header("content-type", "application/json")
            .body(Body::from(response.body.to_string()))?;
        Ok(resp)
    }

    fn create(&self, body: &[u8]) -> ApiResponse {
        let submission: SimulationSubmission = match serde_json::from_slice(body) {
            Ok(submission) => submission,
            Err(e) => {
                log::info!("malformed simulation payload: {e}");
                return ApiResponse::with_details(
                    StatusCode::BAD_REQUEST,
                    "Malformed payload",
                    json!([{ "message": e.to_string() }]),
                );
            }
        };

        let request = match submission.validate() {
            Ok(request) => request,
            Err(e) => {
                log::info!("{e}");
                return ApiResponse::with_details(
                    StatusCode::BAD_REQUEST,
                    "Validation error",
                    json!(e.issues),
                );
            }
        };

        let results = self
            .config
            .persist_results
            .then(|| self.engine.calculate(&request.to_simulation_data()));

        match self.store.create(submission, results) {
            Ok(record) => match serde_json::to_value(&record) {
                Ok(value) => ApiResponse::ok(value),
                Err(e) => ApiResponse::internal(e),
            },
            Err(e) => ApiResponse::internal(e),
        }
    }

    fn fetch(&self, id: &str) -> ApiResponse {
        let not_found = || ApiResponse::error(StatusCode::NOT_FOUND, "Simulation not found");
        let Ok(id) = Uuid::parse_str(id) else {
            return not_found();
        };

        match self.store.get(&id) {
            Ok(Some(record)) => match serde_json::to_value(&record) {
                Ok(value) => ApiResponse::ok(value),
                Err(e) => ApiResponse::internal(e),
            },
            Ok(None) => not_found(),
            Err(e) => ApiResponse::internal(e),
        }
    }
}
