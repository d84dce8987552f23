//! `GET /test`: reports backend liveness and database connectivity.
//!
//! Every failure is folded into the report, so the endpoint always answers 200.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// How many collection names the report lists.
pub const MAX_COLLECTIONS: usize = 10;
/// How much of an error message the report repeats.
pub const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

fn presence(set: bool) -> String {
    let status = if set { "✅ Set" } else { "❌ Not Set" };
    status.to_string()
}

fn truncate(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}

/// Probes the store and builds the report. Never fails.
pub async fn probe(state: &AppState) -> DiagnosticReport {
    let mut report = DiagnosticReport {
        backend: "✅ Running".to_string(),
        database: "⚠️  Available but not initialized".to_string(),
        database_url: presence(state.config.database_url.is_some()),
        database_name: presence(state.config.database_name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let Some(store) = &state.store else {
        return report;
    };

    report.database = "✅ Available".to_string();
    report.connection_status = "Connected".to_string();

    match store.list_collection_names().await {
        Ok(names) => {
            report.collections = names
                .into_iter()
                .take(MAX_COLLECTIONS)
                .collect();
            report.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            report.database = format!(
                "⚠️  Connected but Error: {}",
                truncate(&e.to_string(), MAX_ERROR_CHARS)
            );
        }
    }

    report
}

pub async fn test_handler(State(state): State<AppState>) -> Json<DiagnosticReport> {
    Json(probe(&state).await)
}
