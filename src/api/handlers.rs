use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{completion::CompletionError, context::ContextError, prompt::build_messages, AppState};

use super::models::{ErrorResponse, QueryRequest, QueryResponse, RootResponse};

pub const ROOT_MESSAGE: &str = "DUE LLM Chat API is running (full context)";

/// Everything that can go wrong while answering; rendered into `answer`, never into the status.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Không thể đọc file kiến thức: {0}")]
    Context(#[from] ContextError),

    #[error("Lỗi khi gọi LLM: {0}")]
    Completion(#[from] CompletionError),
}

pub fn answer_from(outcome: Result<String, QueryError>) -> String {
    match outcome {
        Ok(answer) => answer,
        Err(err) => {
            warn!(error = %err, "query failed, returning diagnostic answer");
            err.to_string()
        }
    }
}

fn local_timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
    })
}

pub async fn query(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    debug!(query_len = payload.query.len(), "query received");

    let answer = answer_from(answer_query(&state, &payload.query).await);
    Json(QueryResponse::from_answer(answer, local_timestamp())).into_response()
}

async fn answer_query(state: &AppState, query: &str) -> Result<String, QueryError> {
    let context = state.context.load().await?;
    let messages = build_messages(&context, query);
    Ok(state.completion.complete(&messages).await?)
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
