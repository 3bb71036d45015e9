use crate::advice::AdviceSource;
use crate::errors::IntoErrorResponse;
use crate::tables::{TableError, TableId, TableRegistry};
use seatread_engine::board::CommunityCards;
use seatread_engine::player::Player;
use seatread_engine::stage::Stage;
use seatread_engine::validation::TableSummary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

#[derive(Debug, Deserialize)]
pub struct SetupRequest {
    pub players: Vec<Player>,
}

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub players: Vec<Player>,
    #[serde(default, alias = "communityCards")]
    pub cards: CommunityCards,
}

#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub table_id: TableId,
    pub summary: TableSummary,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub table_id: TableId,
    pub stage: Stage,
    pub first_prompt: bool,
    pub prompt: String,
    /// `null` while no advice source is configured
    pub advice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub table_id: TableId,
    pub active: bool,
}

/// Registers a table and starts its first hand.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/tables`
///
/// # Request Format
/// ```json
/// {
///   "players": [
///     { "name": "Ann", "chips": 200, "position": 1, "isDealer": false,
///       "holeCards": { "card1": "SA", "card2": "HK" } },
///     { "name": "Ben", "chips": 200, "position": 2, "isDealer": true }
///   ]
/// }
/// ```
///
/// # Response Format
/// - **Success (201 Created)**: `{ "table_id": "...", "summary": { "total_players": 2, ... } }`
/// - **Error (400 Bad Request)**: `validation_failed` when the seat count, dealer
///   count, chips or names are invalid. No table is created.
pub async fn create_table(tables: Arc<TableRegistry>, request: SetupRequest) -> Response {
    match tables.create_table(request.players) {
        Ok((table_id, summary)) => {
            json_response(StatusCode::CREATED, SetupResponse { table_id, summary })
        }
        Err(err) => table_error(err),
    }
}

/// Starts a new hand on an existing table, replacing the one in progress.
///
/// `POST /api/tables/{id}/setup`, same body and errors as [`create_table`].
/// On failure the previous hand is kept.
pub async fn setup_table(
    tables: Arc<TableRegistry>,
    table_id: TableId,
    request: SetupRequest,
) -> Response {
    match tables.setup_table(&table_id, request.players) {
        Ok(summary) => json_response(StatusCode::OK, SetupResponse { table_id, summary }),
        Err(err) => table_error(err),
    }
}

/// Renders the scene description for the table's latest data.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/tables/{id}/advice`
///
/// # Request Format
/// ```json
/// {
///   "players": [ ... ],
///   "cards": { "flop": ["HA", "D7", "C2"], "turn": "", "river": "" }
/// }
/// ```
/// The first player is the one the description is written for.
///
/// # Response Format
/// - **Success (200 OK)**: `{ table_id, stage, first_prompt, prompt, advice }`
/// - **Error (404 Not Found)**: `table_not_found`
/// - **Error (422 Unprocessable Entity)**: `position_unresolved` when no seat
///   is the dealer, `render_failed` when the viewer's hole cards are missing
///   on the first prompt of a hand
pub async fn request_advice(
    tables: Arc<TableRegistry>,
    source: Arc<dyn AdviceSource>,
    table_id: TableId,
    request: AdviceRequest,
) -> Response {
    let id = table_id.clone();
    // Rendering holds the table lock and may append to the prompt log.
    let result = tokio::task::spawn_blocking(move || {
        tables.advise(&id, request.players, &request.cards)
    })
    .await
    .unwrap_or_else(|err| Err(TableError::Worker(err.to_string())));

    match result {
        Ok(rendered) => {
            let advice = source.advise(&rendered.prompt);
            json_response(
                StatusCode::OK,
                AdviceResponse {
                    table_id,
                    stage: rendered.stage,
                    first_prompt: rendered.first_prompt,
                    prompt: rendered.prompt,
                    advice,
                },
            )
        }
        Err(err) => table_error(err),
    }
}

pub async fn reset_table(tables: Arc<TableRegistry>, table_id: TableId) -> Response {
    match tables.reset(&table_id) {
        Ok(()) => json_response(
            StatusCode::OK,
            ResetResponse {
                table_id,
                active: false,
            },
        ),
        Err(err) => table_error(err),
    }
}

pub async fn get_table(tables: Arc<TableRegistry>, table_id: TableId) -> Response {
    match tables.status(&table_id) {
        Ok(status) => json_response(StatusCode::OK, status),
        Err(err) => table_error(err),
    }
}

pub async fn delete_table(tables: Arc<TableRegistry>, table_id: TableId) -> Response {
    match tables.delete_table(&table_id) {
        Ok(()) => reply::with_status(reply::reply(), StatusCode::NO_CONTENT).into_response(),
        Err(err) => table_error(err),
    }
}

fn json_response<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(&body), status).into_response()
}

fn table_error(err: TableError) -> Response {
    err.into_http_response()
}
