//! Clients for the remote indicator and catalog APIs.
//!
//! Both APIs are consumed as black-box request/response contracts: the
//! traits here are the seam the wizard core depends on, and the `Http*`
//! implementations are thin `reqwest` wrappers over them.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod catalog;
pub mod error;
pub mod indicators;

pub use catalog::{CatalogApi, CatalogEntry, HttpCatalogApi, TechniqueInfo, VisualizationInfo};
pub use error::ApiError;
pub use indicators::{
    HttpIndicatorApi, IndicatorApi, IndicatorDetail, IndicatorSummary, Page, PageRequest, Pageable,
    SaveIndicatorRequest, SortDirection,
};

/// Map a non-success response to an [`ApiError`]
async fn error_for_response(endpoint: &str, response: reqwest::Response) -> ApiError {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::unauthorized(endpoint),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            ApiError::rate_limited(endpoint, retry_after)
        }
        _ => {
            let message = response.text().await.unwrap_or_default();
            ApiError::http(endpoint, status.as_u16(), message)
        }
    }
}

/// GET a JSON payload, mapping transport and status failures to [`ApiError`]
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    endpoint: &str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ApiError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| ApiError::network(endpoint, e.to_string()))?;

    if !response.status().is_success() {
        return Err(error_for_response(endpoint, response).await);
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::decode(endpoint, e.to_string()))
}

/// POST a JSON body and read a JSON payload back
pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
    client: &reqwest::Client,
    endpoint: &str,
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| ApiError::network(endpoint, e.to_string()))?;

    if !response.status().is_success() {
        return Err(error_for_response(endpoint, response).await);
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::decode(endpoint, e.to_string()))
}

/// DELETE a resource, discarding the response body
pub(crate) async fn delete(
    client: &reqwest::Client,
    endpoint: &str,
    url: &str,
) -> Result<(), ApiError> {
    let response = client
        .delete(url)
        .send()
        .await
        .map_err(|e| ApiError::network(endpoint, e.to_string()))?;

    if !response.status().is_success() {
        return Err(error_for_response(endpoint, response).await);
    }
    Ok(())
}
