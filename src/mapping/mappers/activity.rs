use crate::constants::CURRENT_NACE_VERSION;
use crate::ids::IdBuilder;
use crate::mapping::{RecordKind, RecordMapper, Row};
use crate::vocab::rov;
use oxrdf::Triple;
use tracing::debug;

const NUMBER: usize = 0;
const NACE_VERSION: usize = 2;
const NACE_CODE: usize = 3;

/// Activity file: economic activities of organizations and sites.
/// Only activities coded in the current NACE edition are kept.
pub struct ActivityMapper;

impl RecordMapper for ActivityMapper {
    fn kind(&self) -> RecordKind {
        RecordKind::Activity
    }

    fn map(&self, ids: &IdBuilder, row: &Row) -> Vec<Triple> {
        let version = row.field(NACE_VERSION);
        let code = row.field(NACE_CODE);

        if version != CURRENT_NACE_VERSION {
            debug!("Skipping activity {} of NACE version {}", code, version);
            return Vec::new();
        }
        if code.trim().is_empty() {
            return Vec::new();
        }

        match ids.classification(code, version) {
            Some(activity) => vec![Triple::new(
                ids.entity(row.field(NUMBER)),
                rov::ORG_ACTIVITY,
                activity,
            )],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::mappers::test_support::{ids, lines};

    #[test]
    fn test_current_activity() {
        let row = Row::from_fields(["0671.516.647", "RSZ", "2008", "84130", "MAIN"]);
        assert_eq!(
            lines(&ActivityMapper.map(&ids(), &row)),
            vec!["<http://org.belgif.be/id/cbe/org/0671_516_647> <http://www.w3.org/ns/regorg#orgActivity> <http://vocab.belgif.be/auth/nace2008/84130>"]
        );
    }

    #[test]
    fn test_site_activity() {
        let row = Row::from_fields(["2.147.812.701", "BTW", "2008", "62.010", "SECO"]);
        assert_eq!(
            lines(&ActivityMapper.map(&ids(), &row)),
            vec!["<http://org.belgif.be/id/cbe/site/2_147_812_701> <http://www.w3.org/ns/regorg#orgActivity> <http://vocab.belgif.be/auth/nace2008/62_010>"]
        );
    }

    #[test]
    fn test_outdated_version_is_skipped() {
        let row = Row::from_fields(["0671.516.647", "RSZ", "2003", "75110", "MAIN"]);
        assert!(ActivityMapper.map(&ids(), &row).is_empty());
    }

    #[test]
    fn test_empty_code_is_skipped() {
        let row = Row::from_fields(["0671.516.647", "RSZ", "2008", "", "MAIN"]);
        assert!(ActivityMapper.map(&ids(), &row).is_empty());
    }
}
