use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{HeaderMap, header, request::Parts},
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{error::AppError, validation::FieldErrors};

/// A single `{id}` path segment. Anything that is not a UUID names no record, so it is a 404.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub Uuid);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        Uuid::parse_str(raw.trim())
            .map(PathId)
            .map_err(|_| AppError::NotFound)
    }
}

/// JSON body whose type errors come back as per-field validation failures.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Err(AppError::BadRequest(
                "Expected request with `Content-Type: application/json`".into(),
            ));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        decode(&bytes).map(JsonBody)
    }
}

/// Deserialize a JSON document, reporting type mismatches against the offending field.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let field = match err.path().to_string() {
            path if path == "." => "body".to_string(),
            path => path,
        };
        let inner = err.into_inner();
        if inner.is_syntax() || inner.is_eof() || inner.is_io() {
            return AppError::BadRequest(format!("Malformed JSON: {inner}"));
        }
        let mut errors = FieldErrors::new();
        errors.add(&field, inner.to_string());
        AppError::Validation(errors)
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        price: Option<i64>,
        #[serde(default)]
        images: Vec<String>,
    }

    fn fields(err: AppError) -> FieldErrors {
        match err {
            AppError::Validation(fields) => fields,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn reports_type_errors_by_field() {
        let err = decode::<Sample>(br#"{"price":"abc"}"#).unwrap_err();
        assert!(fields(err).contains("price"));

        let err = decode::<Sample>(br#"{"price":1.5}"#).unwrap_err();
        assert!(fields(err).contains("price"));

        let err = decode::<Sample>(br#"{"images":["a.jpg", 3]}"#).unwrap_err();
        assert!(fields(err).contains("images[1]"));
    }

    #[test]
    fn wrong_top_level_type_is_reported_on_body() {
        let err = decode::<Sample>(b"\"oops\"").unwrap_err();
        assert!(fields(err).contains("body"));
    }

    #[test]
    fn malformed_json_is_a_bad_request() {
        let err = decode::<Sample>(br#"{"price": 1"#).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn accepts_valid_documents() {
        let sample = decode::<Sample>(br#"{"price": 12, "images": ["a.jpg"]}"#).unwrap();
        assert_eq!(sample.price, Some(12));
        assert_eq!(sample.images, vec!["a.jpg".to_string()]);
    }

    #[test]
    fn recognises_json_content_types() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));
        headers.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json(&headers));
        headers.insert(header::CONTENT_TYPE, "application/problem+json".parse().unwrap());
        assert!(is_json(&headers));
        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!is_json(&headers));
    }
}
