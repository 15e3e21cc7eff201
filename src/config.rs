use crate::constants::DEFAULT_BATCH_SIZE;
use crate::error::{CbeError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vocab: VocabConfig,
    pub pipeline: PipelineConfig,
    pub server: ServerConfig,
}

/// Identifier layout. Only one scheme may be used per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// `{domain}/id/cbe/{type}/{key}`
    #[default]
    Current,
    /// `{domain}/cbe/{type}/{key}#id`
    Legacy,
}

/// Namespace configuration owned by the identifier builder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VocabConfig {
    pub domain: String,
    pub scheme: IdScheme,
    pub org_type_prefix: String,
    pub nace2008_prefix: String,
    pub nace2003_prefix: String,
    pub opencorporates_prefix: String,
    pub ramon_prefix: String,
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            domain: "http://org.belgif.be".to_string(),
            scheme: IdScheme::Current,
            org_type_prefix: "http://vocab.belgif.be/auth/orgtype/".to_string(),
            nace2008_prefix: "http://vocab.belgif.be/auth/nace2008/".to_string(),
            nace2003_prefix: "http://vocab.belgif.be/auth/nace2003/".to_string(),
            opencorporates_prefix: "https://opencorporates.com/id/companies/be/".to_string(),
            ramon_prefix: "http://ec.europa.eu/eurostat/ramon/rdfdata/nace_r2/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL of the public search pages
    pub upstream_url: String,
    pub redirect_org: String,
    pub redirect_site: String,
    /// N-Triples file loaded into memory at startup
    pub store: Option<PathBuf>,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            upstream_url: "https://kbopub.economie.fgov.be/kbopub".to_string(),
            redirect_org:
                "https://kbopub.economie.fgov.be/kbopub/toonondernemingps.html?ondernemingsnummer="
                    .to_string(),
            redirect_site:
                "https://kbopub.economie.fgov.be/kbopub/toonvestigingps.html?vestigingsnummer="
                    .to_string(),
            store: None,
            timeout_seconds: 10,
            user_agent: concat!("cbe_lod/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CbeError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file when present, defaults otherwise; environment overrides are applied last.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            info!("No config file at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(domain) = std::env::var("CBE_DOMAIN") {
            if !domain.trim().is_empty() {
                self.vocab.domain = domain.trim().to_string();
            }
        }
        if let Ok(port) = std::env::var("CBE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| CbeError::Config(format!("Invalid CBE_PORT '{}': {}", port, e)))?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if !self.vocab.domain.starts_with("http") {
            return Err(CbeError::Config(format!(
                "Identifier domain must be an http(s) URL, got '{}'",
                self.vocab.domain
            )));
        }
        if self.pipeline.batch_size == 0 {
            return Err(CbeError::Config("batch_size must be at least 1".into()));
        }
        Ok(())
    }
}
