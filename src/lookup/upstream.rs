use super::html::CbePage;
use super::{EntityKey, EntityKind, EntitySource};
use crate::config::ServerConfig;
use crate::error::{CbeError, Result};
use crate::mapping::MapperRegistry;
use async_trait::async_trait;
use oxrdf::Triple;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

const ORGANIZATION_PAGE: &str = "toonondernemingps.html?ondernemingsnummer=";
const SITE_PAGE: &str = "toonvestigingps.html?vestigingsnummer=";

/// Reads the public search page of an entity and maps it like a register row
pub struct UpstreamSource {
    client: reqwest::Client,
    base_url: String,
    registry: Arc<MapperRegistry>,
}

impl UpstreamSource {
    pub fn new(config: &ServerConfig, registry: Arc<MapperRegistry>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            base_url: config.upstream_url.trim_end_matches('/').to_string(),
            registry,
        })
    }

    pub fn page_url(&self, key: &EntityKey) -> String {
        let page = match key.kind() {
            EntityKind::Organization => ORGANIZATION_PAGE,
            EntityKind::Site => SITE_PAGE,
        };
        format!("{}/{}{}", self.base_url, page, key.digits())
    }

    /// Statements of a parsed page, in the same shape as the bulk conversion
    pub fn page_triples(&self, page: &CbePage) -> Vec<Triple> {
        let mut triples: Vec<Triple> = Vec::new();
        for (kind, row) in page.to_rows() {
            for triple in self.registry.map(kind, &row) {
                if !triples.contains(&triple) {
                    triples.push(triple);
                }
            }
        }
        triples
    }
}

#[async_trait]
impl EntitySource for UpstreamSource {
    fn name(&self) -> &str {
        "upstream"
    }

    #[instrument(skip(self), fields(key = %key.digits()))]
    async fn describe(&self, key: &EntityKey) -> Result<Option<Vec<Triple>>> {
        let url = self.page_url(key);
        debug!("Fetching {}", url);

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                return Err(CbeError::Upstream {
                    message: format!("{} answered {}", url, status),
                })
            }
            _ => {}
        }

        let body = response.text().await?;
        let page = CbePage::parse(&body);
        if page.id.is_none() {
            return Ok(None);
        }
        let triples = self.page_triples(&page);
        Ok(if triples.is_empty() { None } else { Some(triples) })
    }
}
