use axum::{Json, extract::State};
use bson::Document;
use serde::Serialize;
use tavola_core::{
    model::{ContactMessage, MenuItem, Reservation, sample_menu},
    serialize::serialize_document,
    validate::{ContactMessageIn, ReservationIn},
};
use tracing::info;

use crate::{error::AppError, extract::ValidatedJson, state::AppState};

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

/// Response to a successful create.
#[derive(Debug, Serialize)]
pub struct Created {
    pub status: &'static str,
    pub id: String,
}

impl Created {
    fn ok(id: String) -> Self {
        Self { status: "ok", id }
    }
}

pub async fn root_handler() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello from FastAPI Backend!",
    })
}

pub async fn hello_handler() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello from the backend API!",
    })
}

/// Lists the menu, seeding the demo dishes into an empty collection first.
pub async fn menu_handler(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let items = state
        .store()?
        .typed_collection::<MenuItem>()
        .ensure_seeded(&sample_menu())
        .await?;

    Ok(Json(items.into_iter().map(serialize_document).collect()))
}

pub async fn reservation_handler(
    State(state): State<AppState>,
    ValidatedJson(reservation): ValidatedJson<ReservationIn>,
) -> Result<Json<Created>, AppError> {
    let id = state
        .store()?
        .typed_collection::<Reservation>()
        .insert(&reservation)
        .await?;

    info!(id = %id, guests = reservation.guests, "Reservation created");

    Ok(Json(Created::ok(id)))
}

pub async fn contact_handler(
    State(state): State<AppState>,
    ValidatedJson(message): ValidatedJson<ContactMessageIn>,
) -> Result<Json<Created>, AppError> {
    let id = state
        .store()?
        .typed_collection::<ContactMessage>()
        .insert(&message)
        .await?;

    info!(id = %id, "Contact message stored");

    Ok(Json(Created::ok(id)))
}
