//! HTTP client for the patch-data CDN

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::types::{AssetKind, ChampionListDocument, SpellDataDocument};
use crate::context::AppConfig;

const USER_AGENT: &str = concat!("spellwatch/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum PatchDataError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    BadStatus { url: String, status: u16 },

    #[error("version list is empty")]
    NoVersions,

    #[error("deserialization failed: {0}")]
    DeserializeFailed(String),
}

pub type Result<T> = std::result::Result<T, PatchDataError>;

/// Read interface over the patch-data service.
///
/// The catalog refresh and asset sync only talk to this trait, so tests can
/// substitute an in-memory source.
pub trait PatchSource: Send + Sync {
    /// Newest published data version (first entry of the versions list).
    fn latest_version(&self) -> impl Future<Output = Result<String>> + Send;

    fn spell_data(&self, version: &str) -> impl Future<Output = Result<SpellDataDocument>> + Send;

    fn champion_ids(&self, version: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Download URL for a single art asset.
    fn asset_url(&self, version: &str, kind: AssetKind, id: &str) -> String;

    fn fetch_asset(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Patch-data client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct PatchDataClient {
    client: Client,
    versions_url: String,
    cdn_base_url: String,
    locale: String,
    version_timeout: Duration,
    data_timeout: Duration,
    asset_timeout: Duration,
}

impl PatchDataClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            versions_url: config.versions_url.clone(),
            cdn_base_url: config.cdn_base_url.trim_end_matches('/').to_string(),
            locale: config.locale.clone(),
            version_timeout: config.version_timeout(),
            data_timeout: config.spell_data_timeout(),
            asset_timeout: config.asset_timeout(),
        })
    }

    fn data_url(&self, version: &str, file: &str) -> String {
        format!("{}/{}/data/{}/{}", self.cdn_base_url, version, self.locale, file)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, timeout: Duration) -> Result<T> {
        debug!(url, "GET");
        let response = self.client.get(url).timeout(timeout).send().await?;

        if !response.status().is_success() {
            return Err(PatchDataError::BadStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| PatchDataError::DeserializeFailed(e.to_string()))
    }
}

impl PatchSource for PatchDataClient {
    async fn latest_version(&self) -> Result<String> {
        let versions: Vec<String> = self.get_json(&self.versions_url, self.version_timeout).await?;
        versions.into_iter().next().ok_or(PatchDataError::NoVersions)
    }

    async fn spell_data(&self, version: &str) -> Result<SpellDataDocument> {
        let url = self.data_url(version, "summoner.json");
        self.get_json(&url, self.data_timeout).await
    }

    async fn champion_ids(&self, version: &str) -> Result<Vec<String>> {
        let url = self.data_url(version, "champion.json");
        let doc: ChampionListDocument = self.get_json(&url, self.asset_timeout).await?;
        Ok(doc.champion_ids())
    }

    fn asset_url(&self, version: &str, kind: AssetKind, id: &str) -> String {
        format!(
            "{}/{}/img/{}/{}.png",
            self.cdn_base_url,
            version,
            kind.cdn_segment(),
            id
        )
    }

    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(self.asset_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PatchDataError::BadStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
