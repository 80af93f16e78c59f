//! HTTP routes for the compile service.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use vyperd_core::{Compiler, Error, OutputSelector};

use crate::dispatcher::WorkerPool;
use crate::error::ServerResult;
use crate::protocol::{CompileRequest, CompileResponse, Diagnostic};

/// `Access-Control-Allow-Headers` value attached to every response.
const ALLOWED_HEADERS: &str = "X-Requested-With, Content-type";

/// Application state shared across handlers.
pub struct AppState {
    /// Compiler toolchain, cloned into worker closures per request.
    pub compiler: Arc<dyn Compiler>,

    /// Bounded compile slots.
    pub pool: WorkerPool,
}

impl AppState {
    /// Build state around a compiler with `workers` concurrent slots.
    pub fn new(compiler: Arc<dyn Compiler>, workers: usize) -> Self {
        Self {
            compiler,
            pool: WorkerPool::new(workers),
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(banner_handler))
        .route("/compile", post(compile_handler).options(preflight_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers([HeaderName::from_static("x-requested-with"), CONTENT_TYPE]),
        )
        // Browser pre-flight aside, clients expect the allow-headers value
        // on plain responses too, so it rides on every response.
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .with_state(state)
}

/// Plaintext banner with the toolchain version.
async fn banner_handler(State(state): State<Arc<AppState>>) -> String {
    format!("Vyper Compiler. Version: {} \n", state.compiler.version())
}

/// Empty pre-flight response; CORS headers ride on the router layers.
async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Compile the submitted source on a worker slot.
///
/// The handler suspends only while awaiting its own submission's result;
/// the compile itself runs off the request-accepting runtime.
async fn compile_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompileRequest>,
) -> ServerResult<CompileResponse> {
    let compiler = state.compiler.clone();
    state
        .pool
        .submit(move || compile_source(compiler.as_ref(), request))
        .await?
}

/// Validate the request body, invoke the compiler, shape the response.
///
/// Classified compile failures become 400 payloads; any other compiler
/// error propagates to the caller as an infrastructure fault.
fn compile_source(
    compiler: &dyn Compiler,
    request: CompileRequest,
) -> ServerResult<CompileResponse> {
    let source = match request.into_source() {
        Ok(source) => source,
        Err(response) => return Ok(response),
    };

    match compiler.compile(&source, &OutputSelector::ALL) {
        Ok(artifacts) => Ok(CompileResponse::success(artifacts)),
        Err(Error::Failure(failure)) => Ok(CompileResponse::failed(Diagnostic::from(failure))),
        Err(error) => Err(error.into()),
    }
}
