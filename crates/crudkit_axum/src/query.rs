//! List query extractor backed by the configured page size.

use crate::error::ApiError;
use axum::extract::{FromRequestParts, Query};
use axum::Extension;
use axum::Router;
use crudkit_core::{CoreConfig, QueryParams};
use http::request::Parts;
use serde::Deserialize;

/// Defaults a `ListQuery` starts from before applying the request's own values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefaults(pub QueryParams);

impl QueryDefaults {
    pub fn from_config(config: &CoreConfig) -> Self {
        Self(config.default_query())
    }
}

/// `QueryParams` read from the query string.
///
/// Absent keys keep the values installed by [`with_query_defaults`]; without
/// that layer they keep `QueryParams::default()`. Malformed values are a
/// `BadValue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery(pub QueryParams);

#[derive(Debug, Deserialize)]
struct SentQuery {
    q: Option<String>,
    skip: Option<u32>,
    limit: Option<u32>,
}

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(sent) = Query::<SentQuery>::from_request_parts(parts, state).await?;
        let mut params = parts
            .extensions
            .get::<QueryDefaults>()
            .map(|defaults| defaults.0.clone())
            .unwrap_or_default();

        if sent.q.is_some() {
            params.q = sent.q;
        }
        if let Some(skip) = sent.skip {
            params.skip = skip;
        }
        if let Some(limit) = sent.limit {
            params.limit = limit;
        }
        Ok(Self(params))
    }
}

/// Makes `config.default_limit` the page size of every `ListQuery` on `router`.
pub fn with_query_defaults<S>(router: Router<S>, config: &CoreConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(Extension(QueryDefaults::from_config(config)))
}
