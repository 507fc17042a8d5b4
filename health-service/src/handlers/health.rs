use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use service_core::error::AppError;

use crate::middleware::auth::AuthHeader;
use crate::models::PersonHealth;
use crate::services::person_client::PersonLookup;
use crate::AppState;

/// Confirm the person exists in the registry before touching any record.
///
/// An unreachable registry is answered exactly like an unknown person, so on
/// this path the caller cannot tell "don't know" from "doesn't exist".
async fn ensure_person(
    state: &AppState,
    person_id: i64,
    auth: &AuthHeader,
) -> Result<(), AppError> {
    match state.person_client.exists(person_id, &auth.0).await {
        PersonLookup::Exists => Ok(()),
        PersonLookup::NotFound | PersonLookup::Unreachable => {
            Err(AppError::NotFound(anyhow::anyhow!("person not found")))
        }
    }
}

/// The stored document is caller-defined JSON; the only rule is that a
/// missing, unparsable, null, or empty-object body is rejected.
fn require_document(body: Option<Json<Value>>) -> Result<Value, AppError> {
    let document = match body {
        Some(Json(document)) => document,
        None => return Err(AppError::BadRequest(anyhow::anyhow!("json body required"))),
    };

    let empty = match &document {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };

    if empty {
        return Err(AppError::BadRequest(anyhow::anyhow!("json body required")));
    }

    Ok(document)
}

pub async fn get_health(
    State(state): State<AppState>,
    auth: AuthHeader,
    Path(person_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ensure_person(&state, person_id, &auth).await?;

    let document = state
        .store
        .get(person_id)
        .await
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("no health data")))?;

    Ok(Json(document))
}

pub async fn create_health(
    State(state): State<AppState>,
    auth: AuthHeader,
    Path(person_id): Path<i64>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    ensure_person(&state, person_id, &auth).await?;

    let document = require_document(body)?;
    state.store.put(person_id, document.clone()).await?;

    Ok((StatusCode::CREATED, Json(document)))
}

/// Same overwrite semantics as `create_health`; only the status differs.
pub async fn update_health(
    State(state): State<AppState>,
    auth: AuthHeader,
    Path(person_id): Path<i64>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    ensure_person(&state, person_id, &auth).await?;

    let document = require_document(body)?;
    state.store.put(person_id, document.clone()).await?;

    Ok(Json(document))
}

/// Idempotent: 204 whether or not a record was present.
pub async fn delete_health(
    State(state): State<AppState>,
    auth: AuthHeader,
    Path(person_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ensure_person(&state, person_id, &auth).await?;

    state.store.delete(person_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_health(
    State(state): State<AppState>,
    auth: AuthHeader,
) -> Result<impl IntoResponse, AppError> {
    let persons = state.person_client.list(&auth.0).await?;

    // One snapshot load for the whole merge instead of one per person.
    let records = state.store.load_all().await;

    let combined: Vec<PersonHealth> = persons
        .into_iter()
        .map(|person| {
            let health = records
                .get(&person.id.to_string())
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            PersonHealth {
                id: person.id,
                name: person.name,
                health,
            }
        })
        .collect();

    Ok(Json(combined))
}
