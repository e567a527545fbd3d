//! HTTP surface of the broker.
//!
//! Routes follow the Cloud Foundry service broker API (v2). Handlers do not
//! inspect path ids beyond passing them to the broker for logging.
use crate::core::{EmptyResponse, ServiceBroker};
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<dyn ServiceBroker>,
}

impl AppState {
    pub fn new<B: ServiceBroker + 'static>(broker: B) -> Self {
        Self {
            broker: Arc::new(broker),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            )
        });

    Router::new()
        .route("/v2/catalog", axum::routing::get(get_catalog))
        .route(
            "/v2/service_instances/:service_id",
            axum::routing::put(create_service_instance).delete(delete_service_instance),
        )
        .route(
            "/v2/service_instances/:service_id/service_bindings/:binding_id",
            axum::routing::put(create_service_binding).delete(delete_service_binding),
        )
        .route("/dashboard", axum::routing::get(show_dashboard))
        .layer(trace_layer)
        .with_state(state)
}

/// Serializes `body` with `status`. A serialization failure becomes a 500
/// with an empty body.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize broker response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(crate) async fn get_catalog(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, &state.broker.catalog())
}

pub(crate) async fn create_service_instance(State(state): State<AppState>, uri: Uri) -> Response {
    let ids = PathIds::from_uri(&uri);
    json_response(StatusCode::CREATED, &state.broker.provision(ids.instance_id))
}

pub(crate) async fn delete_service_instance(State(state): State<AppState>, uri: Uri) -> Response {
    let ids = PathIds::from_uri(&uri);
    state.broker.deprovision(ids.instance_id);
    json_response(StatusCode::OK, &EmptyResponse::default())
}

pub(crate) async fn create_service_binding(State(state): State<AppState>, uri: Uri) -> Response {
    let ids = PathIds::from_uri(&uri);
    json_response(
        StatusCode::CREATED,
        &state.broker.bind(ids.instance_id, ids.binding_id),
    )
}

pub(crate) async fn delete_service_binding(State(state): State<AppState>, uri: Uri) -> Response {
    let ids = PathIds::from_uri(&uri);
    state.broker.unbind(ids.instance_id, ids.binding_id);
    json_response(StatusCode::OK, &EmptyResponse::default())
}

/// Instance and binding ids as they appear in the request path, still
/// percent-encoded. Reading them never fails, whatever bytes they encode.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PathIds<'a> {
    instance_id: &'a str,
    binding_id: &'a str,
}

impl<'a> PathIds<'a> {
    // /v2/service_instances/{instance_id}[/service_bindings/{binding_id}]
    fn from_uri(uri: &'a Uri) -> Self {
        let mut segments = uri.path().split('/').skip(3);
        let instance_id = segments.next().unwrap_or_default();
        let binding_id = segments.nth(1).unwrap_or_default();
        Self {
            instance_id,
            binding_id,
        }
    }
}

pub(crate) async fn show_dashboard(State(state): State<AppState>) -> Response {
    (StatusCode::OK, state.broker.dashboard().to_string()).into_response()
}
