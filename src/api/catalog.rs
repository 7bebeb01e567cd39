//! Remote catalog API: the selectable options at each wizard step.
//!
//! Every lookup is a filtered list keyed by the selections made upstream
//! of it, so the UI only ever offers combinations the backend can query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ApiError;

/// A selectable catalog option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

/// An available analytics technique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Input ports the technique expects to be mapped
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Output ports the technique produces
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// A visualization compatible with a technique's outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationInfo {
    pub library_id: String,
    pub type_id: String,
    pub name: String,
}

/// Lookups backing the wizard's pickers
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn lrs_stores(&self) -> Result<Vec<CatalogEntry>, ApiError>;

    async fn platforms(&self, stores: &BTreeSet<String>) -> Result<Vec<CatalogEntry>, ApiError>;

    async fn activity_types(
        &self,
        stores: &BTreeSet<String>,
        platforms: &BTreeSet<String>,
    ) -> Result<Vec<CatalogEntry>, ApiError>;

    async fn activities(
        &self,
        stores: &BTreeSet<String>,
        platforms: &BTreeSet<String>,
        activity_type: &str,
    ) -> Result<Vec<CatalogEntry>, ApiError>;

    async fn actions(
        &self,
        stores: &BTreeSet<String>,
        platforms: &BTreeSet<String>,
        activities: &BTreeSet<String>,
    ) -> Result<Vec<CatalogEntry>, ApiError>;

    async fn techniques(&self) -> Result<Vec<TechniqueInfo>, ApiError>;

    async fn visualizations(&self, technique_id: &str)
        -> Result<Vec<VisualizationInfo>, ApiError>;
}

/// `reqwest`-backed implementation of [`CatalogApi`]
pub struct HttpCatalogApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/catalog/{path}", self.base_url)
    }
}

fn joined(values: &BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(",")
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn lrs_stores(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        super::get_json(&self.client, "catalog", &self.url("lrs-stores"), &[]).await
    }

    async fn platforms(&self, stores: &BTreeSet<String>) -> Result<Vec<CatalogEntry>, ApiError> {
        let query = [("lrsStores", joined(stores))];
        super::get_json(&self.client, "catalog", &self.url("platforms"), &query).await
    }

    async fn activity_types(
        &self,
        stores: &BTreeSet<String>,
        platforms: &BTreeSet<String>,
    ) -> Result<Vec<CatalogEntry>, ApiError> {
        let query = [
            ("lrsStores", joined(stores)),
            ("platforms", joined(platforms)),
        ];
        super::get_json(&self.client, "catalog", &self.url("activity-types"), &query).await
    }

    async fn activities(
        &self,
        stores: &BTreeSet<String>,
        platforms: &BTreeSet<String>,
        activity_type: &str,
    ) -> Result<Vec<CatalogEntry>, ApiError> {
        let query = [
            ("lrsStores", joined(stores)),
            ("platforms", joined(platforms)),
            ("activityType", activity_type.to_string()),
        ];
        super::get_json(&self.client, "catalog", &self.url("activities"), &query).await
    }

    async fn actions(
        &self,
        stores: &BTreeSet<String>,
        platforms: &BTreeSet<String>,
        activities: &BTreeSet<String>,
    ) -> Result<Vec<CatalogEntry>, ApiError> {
        let query = [
            ("lrsStores", joined(stores)),
            ("platforms", joined(platforms)),
            ("activities", joined(activities)),
        ];
        super::get_json(&self.client, "catalog", &self.url("actions"), &query).await
    }

    async fn techniques(&self) -> Result<Vec<TechniqueInfo>, ApiError> {
        super::get_json(&self.client, "catalog", &self.url("techniques"), &[]).await
    }

    async fn visualizations(
        &self,
        technique_id: &str,
    ) -> Result<Vec<VisualizationInfo>, ApiError> {
        let query = [("techniqueId", technique_id.to_string())];
        super::get_json(&self.client, "catalog", &self.url("visualizations"), &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_is_deterministic() {
        let mut stores = BTreeSet::new();
        stores.insert("lrs2".to_string());
        stores.insert("lrs1".to_string());
        assert_eq!(joined(&stores), "lrs1,lrs2");
    }

    #[test]
    fn test_catalog_entry_camel_case() {
        let json = serde_json::json!({"id": "lrs1", "name": "Main LRS"});
        let entry: CatalogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.id, "lrs1");
    }

    #[test]
    fn test_technique_info_defaults_optional_fields() {
        let json = serde_json::json!({"id": "count", "name": "Count per item"});
        let info: TechniqueInfo = serde_json::from_value(json).unwrap();
        assert!(info.inputs.is_empty());
        assert!(info.description.is_empty());
    }
}
