use super::date;
use crate::ids::{EntityPath, IdBuilder};
use crate::mapping::{RecordKind, RecordMapper, Row};
use crate::normalize::as_date;
use crate::vocab::{dcterms, owl, rov};
use oxrdf::vocab::rdf;
use oxrdf::{NamedNode, Triple};

const NUMBER: usize = 0;
const JURIDICAL_FORM: usize = 4;
const START_DATE: usize = 5;

/// Enterprise file: registered organization with its registration record
pub struct OrganizationMapper;

impl RecordMapper for OrganizationMapper {
    fn kind(&self) -> RecordKind {
        RecordKind::Organization
    }

    fn map(&self, ids: &IdBuilder, row: &Row) -> Vec<Triple> {
        let number = row.field(NUMBER);
        let subject = ids.entity_at(EntityPath::Organization, number);
        let registration = ids.entity_at(EntityPath::Registration, number);

        let mut triples = vec![
            Triple::new(
                subject.clone(),
                rdf::TYPE,
                rov::REGISTERED_ORGANIZATION.into_owned(),
            ),
            Triple::new(subject.clone(), rov::REGISTRATION, registration.clone()),
            Triple::new(subject.clone(), owl::SAME_AS, ids.external_company(number)),
        ];

        if let Some(issued) = as_date(row.field(START_DATE)) {
            triples.push(Triple::new(registration, dcterms::ISSUED, date(issued)));
        }
        if let Some(org_type) = ids.org_type(row.field(JURIDICAL_FORM)) {
            triples.push(Triple::new(subject, rov::ORG_TYPE, org_type));
        }
        triples
    }

    fn subject(&self, ids: &IdBuilder, row: &Row) -> Option<NamedNode> {
        Some(ids.entity_at(EntityPath::Organization, row.field(NUMBER)))
    }
}
