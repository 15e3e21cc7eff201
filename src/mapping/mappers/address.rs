use super::text;
use crate::constants::{DEFAULT_COUNTRY_FR, DEFAULT_COUNTRY_NL};
use crate::ids::IdBuilder;
use crate::mapping::{RecordKind, RecordMapper, Row};
use crate::normalize::{guess_lang, Lang};
use crate::vocab::locn;
use oxrdf::vocab::rdf;
use oxrdf::{Literal, NamedNode, NamedNodeRef, Triple};

const NUMBER: usize = 0;
const COUNTRY_NL: usize = 2;
const COUNTRY_FR: usize = 3;
const ZIPCODE: usize = 4;
const MUNICIPALITY_NL: usize = 5;
const MUNICIPALITY_FR: usize = 6;
const STREET_NL: usize = 7;
const STREET_FR: usize = 8;
const HOUSE_NUMBER: usize = 9;
const BOX: usize = 10;

/// Address file: postal address of organizations and sites
pub struct AddressMapper;

impl AddressMapper {
    /// Identifier of the address of a row, shared by every entity at that address
    pub fn address_id(ids: &IdBuilder, row: &Row) -> NamedNode {
        ids.address(&[
            row.field(COUNTRY_NL),
            row.field(COUNTRY_FR),
            row.field(ZIPCODE),
            row.field(MUNICIPALITY_NL),
            row.field(MUNICIPALITY_FR),
            row.field(STREET_NL),
            row.field(STREET_FR),
            row.field(HOUSE_NUMBER),
            row.field(BOX),
        ])
    }
}

/// Dutch and French spelling of a bilingual name. When both spellings are the
/// same, the spelling in the language the postal code points to is dropped in
/// favour of the other one; an unknown guess keeps both.
fn bilingual(
    triples: &mut Vec<Triple>,
    address: &NamedNode,
    predicate: NamedNodeRef<'_>,
    dutch: &str,
    french: &str,
    guess: Option<Lang>,
) {
    if !dutch.is_empty() && (dutch != french || guess != Some(Lang::Fr)) {
        triples.push(Triple::new(
            address.clone(),
            predicate,
            text(dutch, Some(Lang::Nl)),
        ));
    }
    if !french.is_empty() && (french != dutch || guess != Some(Lang::Nl)) {
        triples.push(Triple::new(
            address.clone(),
            predicate,
            text(french, Some(Lang::Fr)),
        ));
    }
}

impl RecordMapper for AddressMapper {
    fn kind(&self) -> RecordKind {
        RecordKind::Address
    }

    fn map(&self, ids: &IdBuilder, row: &Row) -> Vec<Triple> {
        let subject = ids.entity(row.field(NUMBER));
        let address = Self::address_id(ids, row);

        let country_nl = row.field(COUNTRY_NL);
        let country_fr = row.field(COUNTRY_FR);
        let zipcode = row.field(ZIPCODE);

        let mut triples = vec![
            Triple::new(subject, locn::ADDRESS, address.clone()),
            Triple::new(address.clone(), rdf::TYPE, locn::ADDRESS_CLASS.into_owned()),
            Triple::new(
                address.clone(),
                locn::ADMIN_UNIT_L1,
                text(
                    if country_nl.is_empty() { DEFAULT_COUNTRY_NL } else { country_nl },
                    Some(Lang::Nl),
                ),
            ),
            Triple::new(
                address.clone(),
                locn::ADMIN_UNIT_L1,
                text(
                    if country_fr.is_empty() { DEFAULT_COUNTRY_FR } else { country_fr },
                    Some(Lang::Fr),
                ),
            ),
        ];

        if !zipcode.is_empty() {
            triples.push(Triple::new(
                address.clone(),
                locn::POST_CODE,
                Literal::new_simple_literal(zipcode),
            ));
        }

        // Only Belgian addresses (no country given) have a meaningful postal code guess
        let guess = if country_nl.is_empty() {
            guess_lang(zipcode)
        } else {
            None
        };

        bilingual(
            &mut triples,
            &address,
            locn::POST_NAME,
            row.field(MUNICIPALITY_NL),
            row.field(MUNICIPALITY_FR),
            guess,
        );
        bilingual(
            &mut triples,
            &address,
            locn::THOROUGHFARE,
            row.field(STREET_NL),
            row.field(STREET_FR),
            guess,
        );

        let house_number = row.field(HOUSE_NUMBER);
        if !house_number.is_empty() {
            let box_number = row.field(BOX);
            let designator = if box_number.is_empty() {
                house_number.to_string()
            } else {
                format!("{}/{}", house_number, box_number)
            };
            triples.push(Triple::new(
                address,
                locn::LOCATOR_DESIGNATOR,
                Literal::new_simple_literal(designator),
            ));
        }
        triples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::mappers::test_support::{ids, lines};

    fn row(zip: &str, muni: (&str, &str), street: (&str, &str), house: &str, box_nr: &str) -> Row {
        Row::from_fields([
            "0671.516.647",
            "REGO",
            "",
            "",
            zip,
            muni.0,
            muni.1,
            street.0,
            street.1,
            house,
            box_nr,
            "",
            "",
        ])
    }

    #[test]
    fn test_bilingual_brussels_address() {
        let triples = AddressMapper.map(
            &ids(),
            &row("1000", ("Brussel", "Bruxelles"), ("Simon Bolivarlaan", "Boulevard Simon Bolivar"), "30", "B"),
        );
        let addr = "<http://org.belgif.be/id/cbe/addr/1000_Brussel_Bruxelles_Simon_Bolivarlaan_Boulevard_Simon_Bolivar_30_B>";

        assert_eq!(
            lines(&triples),
            vec![
                format!("<http://org.belgif.be/id/cbe/org/0671_516_647> <http://www.w3.org/ns/locn#address> {addr}"),
                format!("{addr} <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/ns/locn#Address>"),
                format!("{addr} <http://www.w3.org/ns/locn#adminUnitL1> \"België\"@nl"),
                format!("{addr} <http://www.w3.org/ns/locn#adminUnitL1> \"Belgique\"@fr"),
                format!("{addr} <http://www.w3.org/ns/locn#postCode> \"1000\""),
                format!("{addr} <http://www.w3.org/ns/locn#postName> \"Brussel\"@nl"),
                format!("{addr} <http://www.w3.org/ns/locn#postName> \"Bruxelles\"@fr"),
                format!("{addr} <http://www.w3.org/ns/locn#thoroughfare> \"Simon Bolivarlaan\"@nl"),
                format!("{addr} <http://www.w3.org/ns/locn#thoroughfare> \"Boulevard Simon Bolivar\"@fr"),
                format!("{addr} <http://www.w3.org/ns/locn#locatorDesignator> \"30/B\""),
            ]
        );
    }

    fn post_names(triples: &[Triple]) -> Vec<String> {
        triples
            .iter()
            .filter(|t| t.predicate == locn::POST_NAME)
            .map(|t| t.object.to_string())
            .collect()
    }

    #[test]
    fn test_identical_names_in_french_region_keep_french() {
        let triples = AddressMapper.map(&ids(), &row("4000", ("Liège", "Liège"), ("", ""), "", ""));
        assert_eq!(post_names(&triples), vec!["\"Liège\"@fr"]);
    }

    #[test]
    fn test_identical_names_in_dutch_region_keep_dutch() {
        let triples = AddressMapper.map(&ids(), &row("9000", ("Gent", "Gent"), ("", ""), "", ""));
        assert_eq!(post_names(&triples), vec!["\"Gent\"@nl"]);
    }

    #[test]
    fn test_identical_names_without_guess_keep_both() {
        let triples = AddressMapper.map(&ids(), &row("1000", ("Brussel", "Brussel"), ("", ""), "", ""));
        assert_eq!(post_names(&triples), vec!["\"Brussel\"@nl", "\"Brussel\"@fr"]);
    }

    #[test]
    fn test_foreign_address_uses_given_country() {
        let mut fields: Vec<&str> = vec!["0671.516.647", "REGO", "Frankrijk", "France", "75001", "Parijs", "Paris", "", "", "1", ""];
        fields.extend(["", ""]);
        let triples = AddressMapper.map(&ids(), &Row::from_fields(fields));

        assert!(lines(&triples).iter().any(|l| l.ends_with("<http://www.w3.org/ns/locn#adminUnitL1> \"Frankrijk\"@nl")));
        assert!(!lines(&triples).iter().any(|l| l.contains("België")));
        assert_eq!(post_names(&triples), vec!["\"Parijs\"@nl", "\"Paris\"@fr"]);
    }

    #[test]
    fn test_repeated_address_rows_share_identifier() {
        let ids = ids();
        let first = row("9000", ("Gent", "Gand"), ("Veldstraat", "Veldstraat"), "1", "");
        let mut other = Row::from_fields([
            "2.147.812.701", "BAET", "", "", "9000", "Gent", "Gand", "Veldstraat", "Veldstraat", "1", "",
        ]);
        assert_eq!(AddressMapper::address_id(&ids, &first), AddressMapper::address_id(&ids, &other));

        other = Row::from_fields([
            "2.147.812.701", "BAET", "", "", "9000", "Gent", "Gand", "Veldstraat", "Veldstraat", "2", "",
        ]);
        assert_ne!(AddressMapper::address_id(&ids, &first), AddressMapper::address_id(&ids, &other));
    }
}
