use axum::{
    Router,
    routing::{get, put},
};

use super::handlers::{
    create_participant, delete_participant, get_participant, list_participant_submissions,
    list_participants, update_emoji,
};
use crate::features::fines::handlers::get_participant_fines;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_participants).post(create_participant))
        .route("/:id", get(get_participant).delete(delete_participant))
        .route("/:id/emoji", put(update_emoji))
        .route("/:id/submissions", get(list_participant_submissions))
        .route("/:id/fines", get(get_participant_fines))
}
