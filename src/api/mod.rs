mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

#[allow(unused_imports)]
pub use handlers::{answer_from, not_found, query, root, QueryError, ROOT_MESSAGE};
#[allow(unused_imports)]
pub use models::{ErrorResponse, QueryRequest, QueryResponse, RootResponse, BOT_SENDER};

/// Any origin, method and header, with credentials. Origins are mirrored
/// because a wildcard origin cannot be combined with credentials.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/query", post(query))
        .fallback(not_found)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
