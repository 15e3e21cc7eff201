use super::text;
use crate::constants::LEGAL_NAME_CODE;
use crate::ids::{is_organization, IdBuilder};
use crate::mapping::{RecordKind, RecordMapper, Row};
use crate::normalize::Lang;
use crate::vocab::{rov, skos};
use oxrdf::vocab::rdfs;
use oxrdf::{NamedNodeRef, Triple};

const NUMBER: usize = 0;
const LANGUAGE: usize = 1;
const NAME_TYPE: usize = 2;
const NAME: usize = 3;

/// Denomination file: legal names and alternative names of organizations and sites
pub struct NameMapper;

impl RecordMapper for NameMapper {
    fn kind(&self) -> RecordKind {
        RecordKind::Name
    }

    fn map(&self, ids: &IdBuilder, row: &Row) -> Vec<Triple> {
        let number = row.field(NUMBER);
        let subject = ids.entity(number);
        let literal = text(row.field(NAME), Lang::from_code(row.field(LANGUAGE)));

        let predicate: NamedNodeRef<'_> = if row.field(NAME_TYPE) == LEGAL_NAME_CODE {
            rov::LEGAL_NAME
        } else {
            skos::ALT_LABEL
        };

        // Display label: every legal name, but alternative names of sites only
        let labelled = predicate == rov::LEGAL_NAME || !is_organization(number);

        let mut triples = vec![Triple::new(subject.clone(), predicate, literal.clone())];
        if labelled {
            triples.push(Triple::new(subject, rdfs::LABEL, literal));
        }
        triples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::mappers::test_support::{ids, lines};

    #[test]
    fn test_legal_name_gets_label() {
        let row = Row::from_fields(["0671516647", "2", "001", "FOD BOSA"]);
        let triples = NameMapper.map(&ids(), &row);

        assert_eq!(
            lines(&triples),
            vec![
                "<http://org.belgif.be/id/cbe/org/0671516647> <http://www.w3.org/ns/regorg#legalName> \"FOD BOSA\"@nl",
                "<http://org.belgif.be/id/cbe/org/0671516647> <http://www.w3.org/2000/01/rdf-schema#label> \"FOD BOSA\"@nl",
            ]
        );
    }

    #[test]
    fn test_organization_alt_label_has_no_label() {
        let row = Row::from_fields(["0671.516.647", "1", "002", "SPF BOSA"]);
        let triples = NameMapper.map(&ids(), &row);

        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].predicate, skos::ALT_LABEL);
    }

    #[test]
    fn test_site_alt_label_gets_label() {
        let row = Row::from_fields(["2.147.812.701", "3", "003", "Zweigstelle"]);
        let triples = NameMapper.map(&ids(), &row);

        assert_eq!(
            lines(&triples),
            vec![
                "<http://org.belgif.be/id/cbe/site/2_147_812_701> <http://www.w3.org/2004/02/skos/core#altLabel> \"Zweigstelle\"@de",
                "<http://org.belgif.be/id/cbe/site/2_147_812_701> <http://www.w3.org/2000/01/rdf-schema#label> \"Zweigstelle\"@de",
            ]
        );
    }

    #[test]
    fn test_unknown_language_is_untagged() {
        let row = Row::from_fields(["0200.065.765", "0", "001", "Intercommunale"]);
        let triples = NameMapper.map(&ids(), &row);

        assert!(triples[0].to_string().ends_with("\"Intercommunale\""));
    }
}
