//! Resolution of a single register entity into statements, for the lookup service.

pub mod html;
pub mod store;
pub mod upstream;

pub use store::{StoreSource, TripleStore};
pub use upstream::UpstreamSource;

use crate::error::{CbeError, Result};
use crate::ids::EntityPath;
use crate::metrics as m;
use async_trait::async_trait;
use metrics::{counter, histogram};
use once_cell::sync::Lazy;
use oxrdf::Triple;
use regex::Regex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-2][0-9]{8,11}$").unwrap());

/// What a key identifies: an enterprise or one of its establishment units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Organization,
    Site,
}

impl EntityKind {
    pub fn path(self) -> EntityPath {
        match self {
            EntityKind::Organization => EntityPath::Organization,
            EntityKind::Site => EntityPath::Site,
        }
    }
}

/// Validated numeric key of a lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityKey {
    kind: EntityKind,
    digits: String,
}

impl EntityKey {
    pub fn parse(kind: EntityKind, raw: &str) -> Result<Self> {
        if !KEY_PATTERN.is_match(raw) {
            return Err(CbeError::InvalidKey(raw.to_string()));
        }
        Ok(Self {
            kind,
            digits: raw.to_string(),
        })
    }

    /// Keys of the older identifiers are written like `0671_516_647`
    pub fn parse_legacy(kind: EntityKind, raw: &str) -> Result<Self> {
        Self::parse(kind, &raw.replace('_', ""))
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Dotted form used in the register files: `0671.516.647`, `2.147.812.701`.
    /// Nine digit enterprise numbers predate the leading zero.
    pub fn register_number(&self) -> String {
        let digits = if self.digits.len() == 9 {
            format!("0{}", self.digits)
        } else {
            self.digits.clone()
        };
        if digits.len() != 10 {
            return digits;
        }
        match self.kind {
            EntityKind::Organization => {
                format!("{}.{}.{}", &digits[..4], &digits[4..7], &digits[7..])
            }
            EntityKind::Site => format!(
                "{}.{}.{}.{}",
                &digits[..1],
                &digits[1..4],
                &digits[4..7],
                &digits[7..]
            ),
        }
    }
}

/// A place where statements about an entity can be found
#[async_trait]
pub trait EntitySource: Send + Sync {
    fn name(&self) -> &str;

    /// `None` when the source does not know the entity
    async fn describe(&self, key: &EntityKey) -> Result<Option<Vec<Triple>>>;
}

/// Asks each source in turn; the first one that knows the entity answers.
pub struct Resolver {
    sources: Vec<Arc<dyn EntitySource>>,
}

impl Resolver {
    pub fn new(sources: Vec<Arc<dyn EntitySource>>) -> Self {
        Self { sources }
    }

    /// A failing source does not stop the search. The failure is only
    /// returned when no later source knows the entity either.
    pub async fn resolve(&self, key: &EntityKey) -> Result<Option<Vec<Triple>>> {
        let mut failure = None;
        for source in &self.sources {
            let started = Instant::now();
            let outcome = source.describe(key).await;
            histogram!(m::LOOKUP_DURATION, "source" => source.name().to_string())
                .record(started.elapsed().as_secs_f64());

            match outcome {
                Ok(Some(triples)) => {
                    counter!(m::LOOKUPS, "source" => source.name().to_string(), "outcome" => "found")
                        .increment(1);
                    debug!("{} found {} ({} statements)", source.name(), key.digits(), triples.len());
                    return Ok(Some(triples));
                }
                Ok(None) => {
                    counter!(m::LOOKUPS, "source" => source.name().to_string(), "outcome" => "missing")
                        .increment(1);
                }
                Err(e) => {
                    counter!(m::LOOKUPS, "source" => source.name().to_string(), "outcome" => "error")
                        .increment(1);
                    warn!("Lookup of {} in {} failed: {}", key.digits(), source.name(), e);
                    failure = Some(e);
                }
            }
        }
        match failure {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}
