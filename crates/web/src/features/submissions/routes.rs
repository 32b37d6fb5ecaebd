use axum::{
    Router,
    routing::{delete, get},
};

use super::handlers::{
    create_submission, delete_submission, latest_submissions, list_submissions, month_calendar,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions).post(create_submission))
        .route("/latest", get(latest_submissions))
        .route("/calendar", get(month_calendar))
        .route("/:id", delete(delete_submission))
}
