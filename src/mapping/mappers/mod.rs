// Individual mapper implementations, one per register file
pub mod activity;
pub mod address;
pub mod code;
pub mod contact;
pub mod name;
pub mod organization;
pub mod site;

pub use activity::ActivityMapper;
pub use address::AddressMapper;
pub use code::CodeMapper;
pub use contact::ContactMapper;
pub use name::NameMapper;
pub use organization::OrganizationMapper;
pub use site::SiteMapper;

use crate::normalize::Lang;
use chrono::NaiveDate;
use oxrdf::vocab::xsd;
use oxrdf::Literal;

/// Literal tagged with the language when one is known
pub(crate) fn text(value: &str, lang: Option<Lang>) -> Literal {
    match lang {
        Some(lang) => Literal::new_language_tagged_literal_unchecked(value, lang.tag()),
        None => Literal::new_simple_literal(value),
    }
}

pub(crate) fn date(value: NaiveDate) -> Literal {
    Literal::new_typed_literal(value.format("%Y-%m-%d").to_string(), xsd::DATE)
}
