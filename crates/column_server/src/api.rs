//! HTTP routes of the account and score service.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Router, body::Body, http::Request};
use column_match::{Credentials, GameKind, ScoreEvent, routes};
use tower::ServiceBuilder;
use tracing::{info, instrument};

use crate::AccountBook;

/// Builds the service router over `book`.
#[instrument(skip(book))]
pub fn router(book: AccountBook) -> Router {
    Router::new()
        .route(routes::SIGN_UP, post(sign_up))
        .route(routes::SIGN_IN, post(sign_in))
        .route(routes::LEADERBOARD, get(leaderboard))
        .route(routes::WIN_FOUR_IN_ROW, post(win_four_in_row))
        .route(routes::LOSE_FOUR_IN_ROW, post(lose_four_in_row))
        .route(routes::WIN_DUAL_LETTER, post(win_dual_letter))
        .route(routes::LOSE_DUAL_LETTER, post(lose_dual_letter))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(book)
}

async fn sign_up(
    State(book): State<AccountBook>,
    Json(credentials): Json<Credentials>,
) -> impl IntoResponse {
    match book.create(&credentials).await {
        Ok(()) => (StatusCode::OK, "Account created successfully".to_string()),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()),
    }
}

async fn sign_in(
    State(book): State<AccountBook>,
    Json(credentials): Json<Credentials>,
) -> Json<bool> {
    Json(book.verify(&credentials).await)
}

async fn leaderboard(State(book): State<AccountBook>) -> Json<String> {
    Json(book.leaderboard().await)
}

async fn record(
    book: &AccountBook,
    kind: GameKind,
    event: ScoreEvent,
    username: &str,
) -> StatusCode {
    book.record(kind, event, username).await;
    StatusCode::OK
}

async fn win_four_in_row(
    State(book): State<AccountBook>,
    Json(username): Json<String>,
) -> StatusCode {
    record(&book, GameKind::FourInRow, ScoreEvent::Win, &username).await
}

async fn lose_four_in_row(
    State(book): State<AccountBook>,
    Json(username): Json<String>,
) -> StatusCode {
    record(&book, GameKind::FourInRow, ScoreEvent::Loss, &username).await
}

async fn win_dual_letter(
    State(book): State<AccountBook>,
    Json(username): Json<String>,
) -> StatusCode {
    record(&book, GameKind::DualLetter, ScoreEvent::Win, &username).await
}

async fn lose_dual_letter(
    State(book): State<AccountBook>,
    Json(username): Json<String>,
) -> StatusCode {
    record(&book, GameKind::DualLetter, ScoreEvent::Loss, &username).await
}
