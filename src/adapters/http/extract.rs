//! Request extraction helpers.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use super::error::ApiError;
use crate::domain::foundation::PageRequest;

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                let reason = match &rejection {
                    JsonRejection::MissingJsonContentType(_) => {
                        "Expected request with `Content-Type: application/json`".to_string()
                    }
                    other => other.body_text(),
                };
                tracing::debug!(%reason, "Rejected request body");
                Err(ApiError::bad_request(reason))
            }
        }
    }
}

/// `?page=&limit=` as raw strings so bad values are clamped instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Lenient deserializers for fields clients send as either strings or numbers.
pub mod lenient {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        Float(f64),
        Str(String),
    }

    /// Accepts a string or a number and keeps it as text.
    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            None => None,
            Some(Scalar::Str(s)) => Some(s),
            Some(Scalar::Int(n)) => Some(n.to_string()),
            Some(Scalar::Float(n)) => Some(n.to_string()),
            Some(Scalar::Bool(b)) => Some(b.to_string()),
        })
    }

    /// Accepts a number or a numeric string.
    pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Scalar>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Scalar::Int(n)) => Ok(Some(n)),
            Some(Scalar::Str(s)) if s.trim().is_empty() => Ok(None),
            Some(Scalar::Str(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
            Some(_) => Err(de::Error::custom("expected an integer")),
        }
    }

    /// Accepts `true`/`false`, `0`/`1` and their string forms.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Scalar>::deserialize(deserializer)? {
            None => Ok(false),
            Some(Scalar::Bool(b)) => Ok(b),
            Some(Scalar::Int(n)) => Ok(n != 0),
            Some(Scalar::Str(s)) => match s.trim() {
                "1" | "true" => Ok(true),
                "" | "0" | "false" => Ok(false),
                other => Err(de::Error::custom(format!("invalid flag: {}", other))),
            },
            Some(Scalar::Float(_)) => Err(de::Error::custom("expected a boolean")),
        }
    }
}
