use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use tracing::error;

use corpfinder_core::Query;
use corpfinder_dataset::ApiInputRow;
use corpfinder_matcher::Matcher;

#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<Matcher>,
}

pub fn router(state: AppState, max_body_size_mb: usize) -> Router {
    Router::new()
        .route("/api/match", post(match_one))
        .route("/api/bulk-match", post(bulk_match))
        .route("/api/process-csv", post(process_csv))
        .layer(DefaultBodyLimit::max(max_body_size_mb * 1024 * 1024))
        .with_state(state)
}

fn error_response(context: &str, err: impl std::fmt::Display) -> axum::response::Response {
    error!(context, error = %err, "unexpected server error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"status": "error", "message": err.to_string()})),
    )
        .into_response()
}

async fn match_one(State(state): State<AppState>, Json(query): Json<Query>) -> impl IntoResponse {
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "at least one of name, website, phone, facebook is required"})),
        )
            .into_response();
    }

    match state.matcher.match_query(&query).await {
        Ok(Some(result)) => (StatusCode::OK, Json(json!({"status": "success", "match": result}))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Json(json!({"status": "not_found"}))).into_response(),
        Err(e) => error_response("match", e),
    }
}

async fn bulk_match(State(state): State<AppState>, Json(body): Json<Value>) -> impl IntoResponse {
    let Some(items) = body.as_array() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "request body must be a JSON list"})),
        )
            .into_response();
    };

    match run_queries(&state.matcher, items).await {
        Ok((results, match_count, total_count)) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "match_count": match_count,
                "total_count": total_count,
                "results": results,
            })),
        )
            .into_response(),
        Err(e) => error_response("bulk-match", e),
    }
}

async fn run_queries(
    matcher: &Matcher,
    items: &[Value],
) -> Result<(Vec<Value>, usize, usize), corpfinder_matcher::MatcherError> {
    let mut results = Vec::with_capacity(items.len());
    let mut match_count = 0usize;

    for item in items {
        let query: Query = serde_json::from_value(item.clone()).unwrap_or_default();
        match matcher.match_query(&query).await? {
            Some(m) => {
                match_count += 1;
                results.push(json!({"input": item, "match": m}));
            }
            None => results.push(json!({"input": item, "match": null})),
        }
    }

    Ok((results, match_count, items.len()))
}

async fn process_csv(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response("process-csv multipart", e),
        };
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = match field.bytes().await {
            Ok(b) => b,
            Err(e) => return error_response("process-csv multipart", e),
        };
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let Some((filename, bytes)) = upload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "no file field in request"})),
        )
            .into_response();
    };

    if !filename.to_lowercase().ends_with(".csv") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "uploaded file must have a .csv extension"})),
        )
            .into_response();
    }

    // `NamedTempFile` removes the backing file on drop, which covers every
    // exit path below (success, parse failure, matcher failure) without an
    // explicit cleanup branch.
    let temp_file = match tempfile::Builder::new().suffix(".csv").tempfile() {
        Ok(f) => f,
        Err(e) => return error_response("process-csv tempfile", e),
    };
    if let Err(e) = std::fs::write(temp_file.path(), &bytes) {
        return error_response("process-csv tempfile write", e);
    }

    let rows = match corpfinder_dataset::load_api_input_rows(temp_file.path()) {
        Ok(rows) => rows,
        Err(e) => return error_response("process-csv parse", e),
    };

    let items: Vec<Value> = rows
        .iter()
        .map(|r: &ApiInputRow| serde_json::to_value(api_input_as_query(r)).unwrap_or(Value::Null))
        .collect();

    match run_queries(&state.matcher, &items).await {
        Ok((results, match_count, total_count)) => {
            let match_rate = if total_count == 0 {
                0.0
            } else {
                (match_count as f64 / total_count as f64) * 100.0
            };
            (
                StatusCode::OK,
                Json(json!({
                    "status": "success",
                    "match_rate": format!("{:.2}%", match_rate),
                    "matched_count": match_count,
                    "total_count": total_count,
                    "results": results,
                })),
            )
                .into_response()
        }
        Err(e) => error_response("process-csv match", e),
    }
}

fn api_input_as_query(row: &ApiInputRow) -> Query {
    Query::from(row)
}
