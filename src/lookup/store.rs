use super::{EntityKey, EntitySource};
use crate::error::Result;
use crate::ids::{EntityPath, IdBuilder};
use async_trait::async_trait;
use oxrdf::{NamedNode, Subject, Term, Triple};
use oxrdfio::{RdfFormat, RdfParser};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Statements of a converted register file, indexed by subject
#[derive(Debug, Default)]
pub struct TripleStore {
    by_subject: HashMap<NamedNode, Vec<Triple>>,
    len: usize,
}

impl TripleStore {
    pub fn load(path: &Path) -> Result<Self> {
        let store = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!("Loaded {} statements from {}", store.len(), path.display());
        Ok(store)
    }

    /// Reads N-Triples
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut store = Self::default();
        for quad in RdfParser::from_format(RdfFormat::NTriples).for_reader(reader) {
            let quad = quad?;
            store.insert(Triple::new(quad.subject, quad.predicate, quad.object));
        }
        Ok(store)
    }

    pub fn insert(&mut self, triple: Triple) {
        if let Subject::NamedNode(subject) = &triple.subject {
            self.by_subject
                .entry(subject.clone())
                .or_default()
                .push(triple);
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn about(&self, subject: &NamedNode) -> &[Triple] {
        self.by_subject
            .get(subject)
            .map(|triples| triples.as_slice())
            .unwrap_or_default()
    }

    /// Statements about `subject`, followed by those about the linked
    /// resources whose identifier starts with one of `detail_prefixes`.
    pub fn describe(&self, subject: &NamedNode, detail_prefixes: &[String]) -> Vec<Triple> {
        let own = self.about(subject);
        let mut description = own.to_vec();
        let mut seen = vec![subject];

        for triple in own {
            let Term::NamedNode(object) = &triple.object else {
                continue;
            };
            let detail = detail_prefixes
                .iter()
                .any(|prefix| object.as_str().starts_with(prefix.as_str()));
            if detail && !seen.contains(&object) {
                seen.push(object);
                description.extend_from_slice(self.about(object));
            }
        }
        description
    }
}

/// Looks entities up in a previously converted file
pub struct StoreSource {
    store: Arc<TripleStore>,
    ids: IdBuilder,
    detail_prefixes: Vec<String>,
}

impl StoreSource {
    pub fn new(store: Arc<TripleStore>, ids: IdBuilder) -> Self {
        let detail_prefixes = vec![
            ids.prefix(EntityPath::Registration),
            ids.prefix(EntityPath::Address),
        ];
        Self {
            store,
            ids,
            detail_prefixes,
        }
    }
}

#[async_trait]
impl EntitySource for StoreSource {
    fn name(&self) -> &str {
        "store"
    }

    async fn describe(&self, key: &EntityKey) -> Result<Option<Vec<Triple>>> {
        let subject = self
            .ids
            .entity_at(key.kind().path(), &key.register_number());
        let triples = self.store.describe(&subject, &self.detail_prefixes);
        Ok(if triples.is_empty() { None } else { Some(triples) })
    }
}
