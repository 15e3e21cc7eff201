use crate::config::{IdScheme, VocabConfig};
use crate::constants::{CURRENT_NACE_VERSION, PREVIOUS_NACE_VERSION};
use oxrdf::NamedNode;
use std::fmt::Write;
use tracing::warn;

/// Path segment of an identifier inside the register domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityPath {
    Organization,
    Site,
    Registration,
    Address,
}

impl EntityPath {
    fn segment(self) -> &'static str {
        match self {
            EntityPath::Organization => "org",
            EntityPath::Site => "site",
            EntityPath::Registration => "registration",
            EntityPath::Address => "addr",
        }
    }
}

/// Register numbers of organizations start with `0`, everything else is a site.
pub fn is_organization(register_number: &str) -> bool {
    register_number.starts_with('0')
}

/// Builds the identifiers of every resource emitted by the mappers.
///
/// The same input always yields the same identifier, whatever file it was read from,
/// so statements produced from different extracts join on their subjects.
#[derive(Debug, Clone)]
pub struct IdBuilder {
    config: VocabConfig,
}

impl IdBuilder {
    pub fn new(config: VocabConfig) -> Self {
        Self { config }
    }

    /// Namespace of one kind of identifier, up to the key
    pub fn prefix(&self, path: EntityPath) -> String {
        let domain = self.config.domain.trim_end_matches('/');
        match self.config.scheme {
            IdScheme::Current => format!("{}/id/cbe/{}/", domain, path.segment()),
            IdScheme::Legacy => format!("{}/cbe/{}/", domain, path.segment()),
        }
    }

    fn fragment(&self) -> &'static str {
        match self.config.scheme {
            IdScheme::Current => "",
            IdScheme::Legacy => "#id",
        }
    }

    /// Organization or site identifier, routed on the leading digit.
    pub fn entity(&self, register_number: &str) -> NamedNode {
        let path = if is_organization(register_number) {
            EntityPath::Organization
        } else {
            EntityPath::Site
        };
        self.entity_at(path, register_number)
    }

    pub fn entity_at(&self, path: EntityPath, register_number: &str) -> NamedNode {
        NamedNode::new_unchecked(format!(
            "{}{}{}",
            self.prefix(path),
            escape_key(register_number),
            self.fragment()
        ))
    }

    /// OpenCorporates identifier: dots are dropped, not replaced.
    pub fn external_company(&self, register_number: &str) -> NamedNode {
        NamedNode::new_unchecked(format!(
            "{}{}",
            self.config.opencorporates_prefix,
            escape_iri(&register_number.replace('.', ""))
        ))
    }

    pub fn org_type(&self, code: &str) -> Option<NamedNode> {
        let code = code.trim();
        if code.is_empty() {
            warn!("Empty org type");
            return None;
        }
        Some(NamedNode::new_unchecked(format!(
            "{}CBE{}",
            self.config.org_type_prefix,
            escape_iri(code)
        )))
    }

    /// Address identifier from its parts. Empty parts and a part equal to the
    /// previous one are skipped, so the order of `parts` must be stable.
    pub fn address(&self, parts: &[&str]) -> NamedNode {
        let mut key = String::new();
        let mut previous = "";
        for part in parts {
            if part.is_empty() || *part == previous {
                continue;
            }
            previous = part;
            key.extend(part.chars().map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else {
                    '_'
                }
            }));
            key.push('_');
        }
        key.pop();
        NamedNode::new_unchecked(format!("{}{}", self.prefix(EntityPath::Address), key))
    }

    /// Activity classification concept; the version selects the NACE edition.
    pub fn classification(&self, code: &str, version: &str) -> Option<NamedNode> {
        let code = code.trim();
        if code.is_empty() {
            warn!("Empty classification code for version {}", version);
            return None;
        }
        let prefix = if version.starts_with(CURRENT_NACE_VERSION) {
            &self.config.nace2008_prefix
        } else if version.starts_with(PREVIOUS_NACE_VERSION) {
            &self.config.nace2003_prefix
        } else {
            warn!("Unsupported classification version {} for code {}", version, code);
            return None;
        };
        Some(NamedNode::new_unchecked(format!("{}{}", prefix, escape_key(code))))
    }

    /// Concept of the European NACE rev. 2 authority, e.g. `62.01`
    pub fn authority(&self, reference: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}", self.config.ramon_prefix, escape_iri(reference)))
    }
}

/// Key escaping of register numbers: `.` becomes `_`, the rest as [`escape_iri`].
pub fn escape_key(key: &str) -> String {
    escape_iri(&key.replace('.', "_"))
}

/// Percent-encodes spaces and characters that are not allowed in an IRI
/// or that would change its structure.
pub fn escape_iri(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_control()
            || c.is_whitespace()
            || matches!(
                c,
                '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | '#' | '?' | '/' | '%'
            )
        {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(escaped, "%{:02X}", byte);
            }
        } else {
            escaped.push(c);
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> IdBuilder {
        IdBuilder::new(VocabConfig::default())
    }

    #[test]
    fn test_entity_routes_on_leading_digit() {
        let ids = builder();
        assert_eq!(
            ids.entity("0671.516.647").as_str(),
            "http://org.belgif.be/id/cbe/org/0671_516_647"
        );
        assert_eq!(
            ids.entity("2.147.812.701").as_str(),
            "http://org.belgif.be/id/cbe/site/2_147_812_701"
        );
        assert!(ids.entity("1000.000.001").as_str().contains("/site/"));
    }

    #[test]
    fn test_entity_is_stable() {
        let ids = builder();
        assert_eq!(ids.entity("0200.065.765"), ids.entity("0200.065.765"));
        assert_eq!(
            ids.entity("0200.065.765"),
            ids.entity_at(EntityPath::Organization, "0200.065.765")
        );
    }

    #[test]
    fn test_dots_and_spaces_are_escaped() {
        let id = builder().entity("0123. 456 .789");
        let key = id.as_str().rsplit('/').next().unwrap();
        assert!(!key.contains('.'));
        assert!(!key.contains(' '));
        assert_eq!(key, "0123_%20456%20_789");
    }

    #[test]
    fn test_legacy_scheme_adds_fragment() {
        let config = VocabConfig {
            scheme: IdScheme::Legacy,
            ..VocabConfig::default()
        };
        let ids = IdBuilder::new(config);
        assert_eq!(
            ids.entity("0671.516.647").as_str(),
            "http://org.belgif.be/cbe/org/0671_516_647#id"
        );
    }

    #[test]
    fn test_external_company_strips_dots() {
        assert_eq!(
            builder().external_company("0671.516.647").as_str(),
            "https://opencorporates.com/id/companies/be/0671516647"
        );
    }

    #[test]
    fn test_org_type() {
        let ids = builder();
        assert_eq!(
            ids.org_type(" 417 ").unwrap().as_str(),
            "http://vocab.belgif.be/auth/orgtype/CBE417"
        );
        assert!(ids.org_type("   ").is_none());
    }

    #[test]
    fn test_address_collapses_parts() {
        let ids = builder();
        let addr = ids.address(&["", "", "1000", "Brussel", "Bruxelles", "Wetstraat", "Wetstraat", "16", ""]);
        assert_eq!(
            addr.as_str(),
            "http://org.belgif.be/id/cbe/addr/1000_Brussel_Bruxelles_Wetstraat_16"
        );

        let accented = ids.address(&["België", "", "4000", "", "", "Rue d'Or", "", "1", "A"]);
        assert_eq!(
            accented.as_str(),
            "http://org.belgif.be/id/cbe/addr/Belgi__4000_Rue_d_Or_1_A"
        );
    }

    #[test]
    fn test_classification_versions() {
        let ids = builder();
        assert_eq!(
            ids.classification("62010", "2008").unwrap().as_str(),
            "http://vocab.belgif.be/auth/nace2008/62010"
        );
        assert_eq!(
            ids.classification("72202", "2003").unwrap().as_str(),
            "http://vocab.belgif.be/auth/nace2003/72202"
        );
        assert!(ids.classification("", "2008").is_none());
        assert!(ids.classification("62010", "1993").is_none());
    }
}
