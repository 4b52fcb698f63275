use crate::AppState;
use crate::body::BodyFields;
use crate::coerce::{json_number, number_field};
use crate::error::ApiError;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use serde_json::{Map, Value};
use shared::models::{Character, Field, NewCharacterForm};

pub async fn index_page() -> Html<String> {
    Html(layout(
        "Welcome",
        "<p>Welcome to the character roster.</p>\n\
         <p><a href=\"/list\">Character list</a> | <a href=\"/new\">New character</a></p>",
    ))
}

pub async fn list_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let characters = state
        .db
        .get_characters()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Html(layout("Character list", &character_table(&characters))))
}

pub async fn new_page() -> Html<String> {
    let form = "<form method=\"post\" action=\"/new\">\n\
        <label>ID <input type=\"number\" name=\"id\"></label>\n\
        <label>Name <input type=\"text\" name=\"name\"></label>\n\
        <label>Job <input type=\"text\" name=\"job\"></label>\n\
        <label>Weapon <input type=\"text\" name=\"weapon\"></label>\n\
        <label>Level <input type=\"number\" name=\"level\"></label>\n\
        <button type=\"submit\">Create</button>\n\
        </form>";
    Html(layout("New character", form))
}

/// Stores whatever the form carried. Nothing is validated and an undecodable
/// body is treated as an empty form.
pub async fn submit_new(
    State(state): State<AppState>,
    fields: Result<BodyFields, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = fields.unwrap_or_else(|rejection| {
        tracing::debug!(?rejection, "form body ignored");
        BodyFields::Absent
    });

    let character = match fields {
        BodyFields::Form(pairs) => coerce_form(NewCharacterForm::from_pairs(&pairs)),
        BodyFields::Json(map) => coerce_json(&map),
        BodyFields::Absent => coerce_form(NewCharacterForm::default()),
    };
    let id = character.id.clone();
    state
        .db
        .append_character(character)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(?id, "character added from form");
    Ok((StatusCode::FOUND, [(header::LOCATION, "/list")]))
}

fn coerce_form(form: NewCharacterForm) -> Character {
    let text = |raw: Option<String>| raw.map_or(Field::Missing, Field::Value);
    Character {
        id: number_field(form.id.as_deref()),
        name: text(form.name),
        job: text(form.job),
        weapon: text(form.weapon),
        level: number_field(form.level.as_deref()),
    }
}

fn coerce_json(map: &Map<String, Value>) -> Character {
    let text = |key: &str| match map.get(key) {
        None => Field::Missing,
        Some(Value::Null) => Field::Null,
        Some(Value::String(s)) => Field::Value(s.clone()),
        Some(other) => Field::Value(other.to_string()),
    };
    Character {
        id: json_number(map.get("id")),
        name: text("name"),
        job: text("job"),
        weapon: text("weapon"),
        level: json_number(map.get("level")),
    }
}

fn layout(title: &str, body: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n\
         <body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}

fn character_table(characters: &[Character]) -> String {
    let mut out = String::from(
        "<table>\n<tr><th>ID</th><th>Name</th><th>Job</th><th>Weapon</th><th>Level</th></tr>\n",
    );
    for c in characters {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            number_cell(&c.id),
            text_cell(&c.name),
            text_cell(&c.job),
            text_cell(&c.weapon),
            number_cell(&c.level),
        ));
    }
    out.push_str("</table>\n<p><a href=\"/new\">New character</a></p>");
    out
}

fn number_cell(value: &Field<i64>) -> String {
    match value {
        Field::Value(n) => n.to_string(),
        Field::NotANumber => "NaN".to_string(),
        Field::Missing | Field::Null => String::new(),
    }
}

fn text_cell(value: &Field<String>) -> String {
    value.value().map(|s| escape_html(s)).unwrap_or_default()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
