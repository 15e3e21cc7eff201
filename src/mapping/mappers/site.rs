use super::date;
use crate::ids::{EntityPath, IdBuilder};
use crate::mapping::{RecordKind, RecordMapper, Row};
use crate::normalize::as_date;
use crate::vocab::{dcterms, org};
use oxrdf::vocab::rdf;
use oxrdf::{NamedNode, Triple};

const NUMBER: usize = 0;
const START_DATE: usize = 1;
const ENTERPRISE_NUMBER: usize = 2;

/// Establishment file: sites linked to their organization
pub struct SiteMapper;

impl RecordMapper for SiteMapper {
    fn kind(&self) -> RecordKind {
        RecordKind::Site
    }

    fn map(&self, ids: &IdBuilder, row: &Row) -> Vec<Triple> {
        let site = ids.entity_at(EntityPath::Site, row.field(NUMBER));
        let organization = ids.entity_at(EntityPath::Organization, row.field(ENTERPRISE_NUMBER));

        let mut triples = vec![
            Triple::new(site.clone(), rdf::TYPE, org::SITE_CLASS.into_owned()),
            Triple::new(organization.clone(), org::HAS_SITE, site.clone()),
            Triple::new(site.clone(), org::SITE_OF, organization),
        ];
        if let Some(issued) = as_date(row.field(START_DATE)) {
            triples.push(Triple::new(site, dcterms::ISSUED, date(issued)));
        }
        triples
    }

    fn subject(&self, ids: &IdBuilder, row: &Row) -> Option<NamedNode> {
        Some(ids.entity_at(EntityPath::Site, row.field(NUMBER)))
    }
}
