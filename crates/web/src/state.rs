use axum::extract::FromRef;
use storage::Database;

use crate::config::LedgerSettings;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub ledger: LedgerSettings,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for LedgerSettings {
    fn from_ref(state: &AppState) -> Self {
        state.ledger
    }
}
