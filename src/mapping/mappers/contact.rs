use crate::ids::IdBuilder;
use crate::mapping::{RecordKind, RecordMapper, Row};
use crate::normalize::{as_mail, as_page, as_phone};
use crate::vocab::foaf;
use oxrdf::{NamedNode, NamedNodeRef, Triple};
use tracing::debug;

const NUMBER: usize = 0;
const CONTACT_TYPE: usize = 2;
const VALUE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactType {
    Phone,
    Web,
    Email,
}

impl ContactType {
    pub fn from_code(code: &str) -> Option<ContactType> {
        match code {
            "TEL" => Some(ContactType::Phone),
            "WEB" => Some(ContactType::Web),
            "EMAIL" => Some(ContactType::Email),
            _ => None,
        }
    }

    fn predicate(self) -> NamedNodeRef<'static> {
        match self {
            ContactType::Phone => foaf::PHONE,
            ContactType::Web => foaf::HOMEPAGE,
            ContactType::Email => foaf::MBOX,
        }
    }

    fn normalize(self, raw: &str) -> Option<NamedNode> {
        match self {
            ContactType::Phone => as_phone(raw),
            ContactType::Web => as_page(raw),
            ContactType::Email => as_mail(raw),
        }
    }
}

/// Contact file: phone, web page and email of organizations and sites
pub struct ContactMapper;

impl RecordMapper for ContactMapper {
    fn kind(&self) -> RecordKind {
        RecordKind::Contact
    }

    fn map(&self, ids: &IdBuilder, row: &Row) -> Vec<Triple> {
        let Some(contact_type) = ContactType::from_code(row.field(CONTACT_TYPE)) else {
            debug!("Unknown contact type {}", row.field(CONTACT_TYPE));
            return Vec::new();
        };
        match contact_type.normalize(row.field(VALUE)) {
            Some(contact) => vec![Triple::new(
                ids.entity(row.field(NUMBER)),
                contact_type.predicate(),
                contact,
            )],
            None => Vec::new(),
        }
    }
}
