use crate::error::ApiError;
use axum::{
    Form,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde_json::{Map, Value};

/// A request body decoded by the JSON or url-encoded parser, whichever the
/// content type selects. Any other content type yields no fields.
#[derive(Debug)]
pub enum BodyFields {
    Absent,
    Json(Map<String, Value>),
    Form(Vec<(String, String)>),
}

impl BodyFields {
    /// An absent body, an object without keys and a form without pairs are
    /// all empty.
    pub fn is_empty(&self) -> bool {
        match self {
            BodyFields::Absent => true,
            BodyFields::Json(map) => map.is_empty(),
            BodyFields::Form(pairs) => pairs.is_empty(),
        }
    }
}

enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(content_type: Option<&str>) -> BodyKind {
    let Some(content_type) = content_type else {
        return BodyKind::Other;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if essence == "application/json" || essence.ends_with("+json") {
        BodyKind::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

impl<S> FromRequest<S> for BodyFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        match body_kind(content_type) {
            BodyKind::Json => {
                let body = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                decode_json(&body)
            }
            BodyKind::Form => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                Ok(BodyFields::Form(pairs))
            }
            BodyKind::Other => Ok(BodyFields::Absent),
        }
    }
}

fn decode_json(body: &[u8]) -> Result<BodyFields, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(BodyFields::Absent);
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;
    match value {
        Value::Object(map) => Ok(BodyFields::Json(map)),
        Value::Array(items) if items.is_empty() => Ok(BodyFields::Absent),
        _ => Err(ApiError::BadRequest("Body must be a JSON object".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types() {
        assert!(matches!(body_kind(Some("application/json")), BodyKind::Json));
        assert!(matches!(
            body_kind(Some("application/json; charset=utf-8")),
            BodyKind::Json
        ));
        assert!(matches!(body_kind(Some("application/vnd.api+json")), BodyKind::Json));
        assert!(matches!(
            body_kind(Some("application/x-www-form-urlencoded")),
            BodyKind::Form
        ));
        assert!(matches!(body_kind(Some("text/plain")), BodyKind::Other));
        assert!(matches!(body_kind(None), BodyKind::Other));
    }

    #[test]
    fn blank_and_empty_json_have_no_fields() {
        assert!(decode_json(b"  \n").unwrap().is_empty());
        assert!(decode_json(b"{}").unwrap().is_empty());
        assert!(decode_json(b"[]").unwrap().is_empty());
        assert!(!decode_json(br#"{"id": 1}"#).unwrap().is_empty());
    }

    #[test]
    fn non_object_json_is_rejected() {
        match decode_json(b"42") {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "Body must be a JSON object"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(decode_json(b"{\"id\": 4,"), Err(ApiError::BadRequest(_))));
    }
}
