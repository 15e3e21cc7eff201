//! Row-to-statement conversion, one mapper per register file kind.

pub mod mappers;
pub mod registry;

pub use registry::MapperRegistry;

use crate::ids::IdBuilder;
use csv::StringRecord;
use oxrdf::{NamedNode, Triple};
use serde::Serialize;
use std::fmt;

/// One line of a register file. Field meaning is positional per file kind;
/// fields past the end of a short line read as empty.
#[derive(Debug, Clone)]
pub struct Row(StringRecord);

impl Row {
    pub fn new(record: StringRecord) -> Self {
        Self(record)
    }

    pub fn from_fields<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field.as_ref());
        }
        Self(record)
    }

    pub fn field(&self, index: usize) -> &str {
        self.0.get(index).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<StringRecord> for Row {
    fn from(record: StringRecord) -> Self {
        Self(record)
    }
}

/// Kinds of register records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Organization,
    Name,
    Site,
    Contact,
    Address,
    Activity,
    Code,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Organization,
        RecordKind::Name,
        RecordKind::Site,
        RecordKind::Contact,
        RecordKind::Address,
        RecordKind::Activity,
        RecordKind::Code,
    ];
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Organization => "organization",
            RecordKind::Name => "name",
            RecordKind::Site => "site",
            RecordKind::Contact => "contact",
            RecordKind::Address => "address",
            RecordKind::Activity => "activity",
            RecordKind::Code => "code",
        };
        f.write_str(name)
    }
}

/// Converts a row of one file kind into statements.
///
/// Mappers are stateless: the output only depends on the row and the
/// identifier builder, so rows can be mapped in any order or in parallel.
pub trait RecordMapper: Send + Sync {
    fn kind(&self) -> RecordKind;

    /// Statements for the row; empty when the row carries nothing usable.
    fn map(&self, ids: &IdBuilder, row: &Row) -> Vec<Triple>;

    /// Identifier the row's statements are about, used to retract them.
    fn subject(&self, ids: &IdBuilder, row: &Row) -> Option<NamedNode> {
        Some(ids.entity(row.field(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_row_reads_empty_fields() {
        let row = Row::from_fields(["0200.065.765", "AC"]);
        assert_eq!(row.len(), 2);
        assert_eq!(row.field(1), "AC");
        assert_eq!(row.field(5), "");
    }
}
