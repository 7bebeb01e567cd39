//! Remote indicator API: saved indicators and their generated code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::{AnalysisRef, IndicatorDraft, IndicatorQuery, VisRef};

use super::ApiError;

/// Sort order for indicator listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One page of an indicator listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort_by: &'static str,
    pub sort_direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort_by: "name",
            sort_direction: SortDirection::Asc,
        }
    }
}

/// Paging metadata echoed back by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page_number: u32,
    pub page_size: u32,
}

/// Paginated response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub pageable: Pageable,
    pub total_elements: u64,
}

/// Listing row for a saved indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub indicator_type: String,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

/// Full definition of a saved indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorDetail {
    pub id: String,
    pub draft: IndicatorDraft,
    pub query: IndicatorQuery,
    pub analysis: AnalysisRef,
    pub visualization: VisRef,
}

/// Payload for creating or updating an indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveIndicatorRequest {
    /// Present when updating an existing indicator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub draft: IndicatorDraft,
    pub query: IndicatorQuery,
    pub analysis: AnalysisRef,
    pub visualization: VisRef,
}

/// Remote store of finished indicators
#[async_trait]
pub trait IndicatorApi: Send + Sync {
    /// List saved indicators, one page at a time
    async fn list(&self, request: PageRequest) -> Result<Page<IndicatorSummary>, ApiError>;

    /// Fetch the full definition of one indicator
    async fn detail(&self, id: &str) -> Result<IndicatorDetail, ApiError>;

    /// Fetch the generated embed code for one indicator
    async fn generated_code(&self, id: &str) -> Result<String, ApiError>;

    /// Delete an indicator
    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    /// Create or update an indicator; returns its id
    async fn save(&self, request: &SaveIndicatorRequest) -> Result<String, ApiError>;
}

/// `reqwest`-backed implementation of [`IndicatorApi`]
pub struct HttpIndicatorApi {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GeneratedCodeResponse {
    code: String,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    id: String,
}

impl HttpIndicatorApi {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/indicators{}", self.base_url, path)
    }
}

#[async_trait]
impl IndicatorApi for HttpIndicatorApi {
    async fn list(&self, request: PageRequest) -> Result<Page<IndicatorSummary>, ApiError> {
        let query = [
            ("page", request.page.to_string()),
            ("size", request.size.to_string()),
            ("sortBy", request.sort_by.to_string()),
            ("sortDirection", request.sort_direction.as_str().to_string()),
        ];
        super::get_json(&self.client, "indicators", &self.url(""), &query).await
    }

    async fn detail(&self, id: &str) -> Result<IndicatorDetail, ApiError> {
        super::get_json(&self.client, "indicators", &self.url(&format!("/{id}")), &[]).await
    }

    async fn generated_code(&self, id: &str) -> Result<String, ApiError> {
        let response: GeneratedCodeResponse = super::get_json(
            &self.client,
            "indicators",
            &self.url(&format!("/{id}/code")),
            &[],
        )
        .await?;
        Ok(response.code)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        super::delete(&self.client, "indicators", &self.url(&format!("/{id}"))).await
    }

    async fn save(&self, request: &SaveIndicatorRequest) -> Result<String, ApiError> {
        let response: SaveResponse =
            super::post_json(&self.client, "indicators", &self.url(""), request).await?;
        Ok(response.id)
    }
}
