//! Truth endpoints: weighted random selection and lookup by id.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{Datelike, Utc, Weekday};
use tracing::instrument;

use crate::error::{AppError, AppErrorResponse, ResultExt};
use crate::format::{self, ResponseFormat, TruthReply};
use crate::middleware::RequestId;
use crate::selector;
use crate::state::AppState;
use crate::store::TruthRecord;

/// `GET /truth` - one record, drawn fresh per request.
#[instrument(name = "truth::random", skip(state, headers))]
pub async fn random(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let day = current_day();
    let record = {
        let mut rng = rand::thread_rng();
        selector::select(day, &state.store, &state.config.selection, &mut rng)
    };
    tracing::info!(
        truth_id = %record.id,
        day = selector::day_name(day),
        weight = %record.weight,
        "Selected truth"
    );
    respond(record, day, &headers)
}

/// `GET /truth/{id}` - a specific record, shareable by link.
#[instrument(name = "truth::by_id", skip(state, request_id, headers))]
pub async fn by_id(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppErrorResponse> {
    let record = state
        .store
        .get(&id)
        .ok_or_else(|| AppError::TruthNotFound(id.clone()))
        .with_request_id(&request_id)?;
    Ok(respond(record, current_day(), &headers))
}

fn current_day() -> Weekday {
    Utc::now().weekday()
}

fn respond(record: &TruthRecord, day: Weekday, headers: &HeaderMap) -> Response {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    match format::negotiate(accept) {
        ResponseFormat::PlainText => format::plain_body(record).into_response(),
        ResponseFormat::Json => Json(TruthReply::new(record, selector::day_name(day))).into_response(),
    }
}
