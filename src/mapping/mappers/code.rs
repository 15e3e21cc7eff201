use crate::constants::CURRENT_NACE_VERSION;
use crate::ids::IdBuilder;
use crate::mapping::{RecordKind, RecordMapper, Row};
use crate::normalize::{broader_nace, Lang};
use crate::vocab::skos;
use oxrdf::vocab::rdf;
use oxrdf::{Literal, NamedNode, Triple};
use tracing::debug;

const CATEGORY: usize = 0;
const CODE: usize = 1;
const LANGUAGE: usize = 2;
const DESCRIPTION: usize = 3;

/// NACE codes shorter than this are the same concept in the European
/// classification; longer ones are national subdivisions.
const EXACT_MATCH_MAX_LEN: usize = 5;

/// Code tables of the code file that are published as vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCategory {
    JuridicalForm,
    Nace2008,
}

impl CodeCategory {
    pub fn from_name(name: &str) -> Option<CodeCategory> {
        match name {
            "JuridicalForm" => Some(CodeCategory::JuridicalForm),
            "Nace2008" => Some(CodeCategory::Nace2008),
            _ => None,
        }
    }
}

/// Reference to the European NACE rev. 2 concept: `62010` becomes `62.01`.
fn authority_reference(code: &str) -> String {
    let mut chars = code.chars();
    let division: String = chars.by_ref().take(2).collect();
    let group: String = chars.take(2).collect();
    if group.is_empty() {
        division
    } else {
        format!("{}.{}", division, group)
    }
}

/// Code file: legal forms and NACE codes as SKOS concepts.
///
/// Every code recurs once per language. The concept itself is only
/// described on the Dutch row, the other rows only add their label.
pub struct CodeMapper;

impl CodeMapper {
    fn concept(ids: &IdBuilder, category: CodeCategory, code: &str) -> Option<NamedNode> {
        match category {
            CodeCategory::JuridicalForm => ids.org_type(code),
            CodeCategory::Nace2008 => ids.classification(code, CURRENT_NACE_VERSION),
        }
    }
}

impl RecordMapper for CodeMapper {
    fn kind(&self) -> RecordKind {
        RecordKind::Code
    }

    fn map(&self, ids: &IdBuilder, row: &Row) -> Vec<Triple> {
        let Some(category) = CodeCategory::from_name(row.field(CATEGORY)) else {
            debug!("Skipping code category {}", row.field(CATEGORY));
            return Vec::new();
        };
        let code = row.field(CODE).trim();
        let Some(concept) = Self::concept(ids, category, code) else {
            return Vec::new();
        };

        let lang = row.field(LANGUAGE).trim().to_lowercase();
        let description = row.field(DESCRIPTION);
        let label = Literal::new_language_tagged_literal(description, lang.as_str())
            .unwrap_or_else(|_| Literal::new_simple_literal(description));

        let mut triples = vec![Triple::new(concept.clone(), skos::PREF_LABEL, label)];
        if lang != Lang::Nl.tag() {
            return triples;
        }

        triples.push(Triple::new(concept.clone(), rdf::TYPE, skos::CONCEPT.into_owned()));
        if category == CodeCategory::Nace2008 {
            triples.push(Triple::new(
                concept.clone(),
                skos::NOTATION,
                Literal::new_simple_literal(code),
            ));
            if let Some(broader) =
                broader_nace(code).and_then(|parent| ids.classification(parent, CURRENT_NACE_VERSION))
            {
                triples.push(Triple::new(concept.clone(), skos::BROADER, broader));
            }
            let predicate = if code.chars().count() < EXACT_MATCH_MAX_LEN {
                skos::EXACT_MATCH
            } else {
                skos::BROAD_MATCH
            };
            triples.push(Triple::new(
                concept,
                predicate,
                ids.authority(&authority_reference(code)),
            ));
        }
        triples
    }

    fn subject(&self, ids: &IdBuilder, row: &Row) -> Option<NamedNode> {
        let category = CodeCategory::from_name(row.field(CATEGORY))?;
        Self::concept(ids, category, row.field(CODE).trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::mappers::test_support::{ids, lines};

    #[test]
    fn test_authority_reference() {
        assert_eq!(authority_reference("62"), "62");
        assert_eq!(authority_reference("620"), "62.0");
        assert_eq!(authority_reference("6201"), "62.01");
        assert_eq!(authority_reference("62010"), "62.01");
    }

    #[test]
    fn test_juridical_form_dutch_row() {
        let row = Row::from_fields(["JuridicalForm", "417", "NL", "Federale overheidsdienst"]);
        assert_eq!(
            lines(&CodeMapper.map(&ids(), &row)),
            vec![
                "<http://vocab.belgif.be/auth/orgtype/CBE417> <http://www.w3.org/2004/02/skos/core#prefLabel> \"Federale overheidsdienst\"@nl",
                "<http://vocab.belgif.be/auth/orgtype/CBE417> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#Concept>",
            ]
        );
    }

    #[test]
    fn test_french_row_only_adds_label() {
        let row = Row::from_fields(["Nace2008", "62010", "FR", "Programmation informatique"]);
        assert_eq!(
            lines(&CodeMapper.map(&ids(), &row)),
            vec!["<http://vocab.belgif.be/auth/nace2008/62010> <http://www.w3.org/2004/02/skos/core#prefLabel> \"Programmation informatique\"@fr"]
        );
    }

    #[test]
    fn test_nace_subdivision_has_broader_and_broad_match() {
        let row = Row::from_fields(["Nace2008", "62010", "NL", "Ontwerpen en programmeren van computerprogramma's"]);
        let triples = CodeMapper.map(&ids(), &row);
        let concept = "<http://vocab.belgif.be/auth/nace2008/62010>";

        assert_eq!(triples.len(), 5);
        assert_eq!(
            lines(&triples[2..]),
            vec![
                format!("{concept} <http://www.w3.org/2004/02/skos/core#notation> \"62010\""),
                format!("{concept} <http://www.w3.org/2004/02/skos/core#broader> <http://vocab.belgif.be/auth/nace2008/620>"),
                format!("{concept} <http://www.w3.org/2004/02/skos/core#broadMatch> <http://ec.europa.eu/eurostat/ramon/rdfdata/nace_r2/62.01>"),
            ]
        );
    }

    #[test]
    fn test_nace_class_has_exact_match() {
        let row = Row::from_fields(["Nace2008", "6201", "NL", "Ontwerpen en programmeren"]);
        let triples = CodeMapper.map(&ids(), &row);

        assert!(triples.iter().any(|t| t.predicate == skos::EXACT_MATCH));
        assert!(triples
            .iter()
            .any(|t| t.predicate == skos::BROADER && t.object.to_string().ends_with("/nace2008/62>")));
    }

    #[test]
    fn test_nace_division_has_no_broader() {
        let row = Row::from_fields(["Nace2008", "62", "NL", "Informatica"]);
        let triples = CodeMapper.map(&ids(), &row);
        assert!(!triples.iter().any(|t| t.predicate == skos::BROADER));
    }

    #[test]
    fn test_unknown_category_is_skipped() {
        let row = Row::from_fields(["ActivityGroup", "001", "NL", "BTW-activiteiten"]);
        assert!(CodeMapper.map(&ids(), &row).is_empty());
        assert!(CodeMapper.subject(&ids(), &row).is_none());
    }
}
