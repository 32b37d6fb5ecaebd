use axum::{Router, routing::get};

use super::handlers::{get_cumulative, get_history, get_leaderboard, get_rules, get_status};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/history", get(get_history))
        .route("/cumulative", get(get_cumulative))
        .route("/leaderboard", get(get_leaderboard))
        .route("/rules", get(get_rules))
}
