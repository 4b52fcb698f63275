use crate::AppState;
use crate::body::BodyFields;
use crate::coerce::{number_field, to_number};
use crate::error::{ApiError, BODY_EMPTY, CHARACTER_DOES_NOT_EXIST, CHARACTER_NOT_FOUND};
use axum::{
    Json,
    extract::{FromRequest, Path, Request, State},
    http::StatusCode,
};
use serde_json::{Map, Value};
use shared::models::{Character, Field, MessageResponse, NewCharacterForm};

/// A character decoded from a JSON or url-encoded request body.
///
/// A body the parsers do not recognise, an empty body, and a body with no
/// keys all count as an empty body.
pub struct CharacterBody(pub Character);

impl<S> FromRequest<S> for CharacterBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = BodyFields::from_request(req, state).await?;
        if fields.is_empty() {
            return Err(ApiError::BadRequest(BODY_EMPTY.into()));
        }
        let character = match fields {
            BodyFields::Json(map) => decode_character(map)?,
            BodyFields::Form(pairs) => form_character(&NewCharacterForm::from_pairs(&pairs)),
            BodyFields::Absent => return Err(ApiError::BadRequest(BODY_EMPTY.into())),
        };
        Ok(CharacterBody(character))
    }
}

fn decode_character(map: Map<String, Value>) -> Result<Character, ApiError> {
    serde_json::from_value(Value::Object(map))
        .map_err(|e| ApiError::BadRequest(format!("Invalid character payload: {e}")))
}

/// Url-encoded API bodies carry text only: numeric fields are coerced, and a
/// key that was not sent stays missing.
fn form_character(form: &NewCharacterForm) -> Character {
    let number = |raw: &Option<String>| {
        raw.as_deref()
            .map_or(Field::Missing, |text| number_field(Some(text)))
    };
    let text = |raw: &Option<String>| raw.clone().map_or(Field::Missing, Field::Value);
    Character {
        id: number(&form.id),
        name: text(&form.name),
        job: text(&form.job),
        weapon: text(&form.weapon),
        level: number(&form.level),
    }
}

pub async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = state
        .db
        .get_characters()
        .await
        .map_err(|e| ApiError::from_db(e, CHARACTER_NOT_FOUND))?;
    Ok(Json(characters))
}

pub async fn get_character(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Character>, ApiError> {
    let Some(character_id) = to_number(Some(&raw_id)) else {
        return Err(ApiError::NotFound(CHARACTER_NOT_FOUND.into()));
    };
    let character = state
        .db
        .get_character(character_id)
        .await
        .map_err(|e| ApiError::from_db(e, CHARACTER_NOT_FOUND))?;
    Ok(Json(character))
}

pub async fn create_character(
    State(state): State<AppState>,
    CharacterBody(character): CharacterBody,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = character.id.clone();
    state
        .db
        .create_character(character)
        .await
        .map_err(|e| {
            tracing::debug!(?id, "create rejected: {e}");
            ApiError::from_db(e, CHARACTER_NOT_FOUND)
        })?;

    tracing::info!(?id, "character created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Character created".into(),
        }),
    ))
}

pub async fn update_character(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    CharacterBody(character): CharacterBody,
) -> Result<StatusCode, ApiError> {
    let Some(character_id) = to_number(Some(&raw_id)) else {
        return Err(ApiError::NotFound(CHARACTER_DOES_NOT_EXIST.into()));
    };
    let new_id = character.id.clone();
    state
        .db
        .update_character(character_id, character)
        .await
        .map_err(|e| {
            tracing::debug!(character_id, "update rejected: {e}");
            ApiError::from_db(e, CHARACTER_DOES_NOT_EXIST)
        })?;

    tracing::info!(character_id, ?new_id, "character updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_character(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Some(character_id) = to_number(Some(&raw_id)) else {
        return Err(ApiError::NotFound(CHARACTER_DOES_NOT_EXIST.into()));
    };
    state
        .db
        .delete_character(character_id)
        .await
        .map_err(|e| {
            tracing::debug!(character_id, "delete rejected: {e}");
            ApiError::from_db(e, CHARACTER_DOES_NOT_EXIST)
        })?;

    tracing::info!(character_id, "character deleted");
    Ok(StatusCode::NO_CONTENT)
}
