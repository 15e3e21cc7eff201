//! Bounded batches of rows from a register CSV file.

use crate::error::Result;
use crate::mapping::Row;
use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::fs::File;
use std::io::Read;
use std::iter::Peekable;
use std::path::Path;

/// Reads a comma separated file with a header line, a batch of rows at a time,
/// so that memory use does not depend on the file size.
pub struct BatchReader<R: Read> {
    records: Peekable<StringRecordsIntoIter<R>>,
}

impl BatchReader<File> {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_reader(File::open(path)?))
    }
}

impl<R: Read> BatchReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .quote(b'"')
            .double_quote(true)
            .flexible(true)
            .from_reader(reader)
            .into_records()
            .peekable();
        Self { records }
    }

    pub fn has_more(&mut self) -> bool {
        self.records.peek().is_some()
    }

    /// Up to `size` rows; empty once the input is exhausted.
    /// A bad record ends the batch early and is returned by the next call,
    /// so the rows before it are never lost.
    pub fn read_batch(&mut self, size: usize) -> Result<Vec<Row>> {
        let mut batch = Vec::with_capacity(size.min(1024));
        while batch.len() < size {
            match self.records.peek() {
                None => break,
                Some(Err(_)) if !batch.is_empty() => break,
                Some(_) => {}
            }
            if let Some(record) = self.records.next() {
                batch.push(Row::new(record?));
            }
        }
        Ok(batch)
    }
}

impl<R: Read> Iterator for BatchReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .next()
            .map(|record| record.map(Row::new).map_err(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CbeError;

    const ENTERPRISES: &str = "\"EnterpriseNumber\",\"Status\",\"JuridicalSituation\",\"TypeOfEnterprise\",\"JuridicalForm\",\"StartDate\"\n\
        \"0200.065.765\",\"AC\",\"000\",\"2\",\"417\",\"09-08-1960\"\n\
        \"0200.068.636\",\"AC\",\"000\",\"2\",\"417\",\"22-08-1960\"\n\
        \"0200.171.970\",\"AC\",\"000\",\"2\",\"\",\"01-01-1961\"\n";

    #[test]
    fn test_batches_skip_header() {
        let mut reader = BatchReader::from_reader(ENTERPRISES.as_bytes());

        assert!(reader.has_more());
        let first = reader.read_batch(2).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].field(0), "0200.065.765");

        let second = reader.read_batch(2).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].field(4), "");

        assert!(!reader.has_more());
        assert!(reader.read_batch(2).unwrap().is_empty());
    }

    #[test]
    fn test_quoted_fields() {
        let data = "a,b,c,d\n0200.065.765,2,001,\"Intercommunale \"\"De Watergroep\"\", Brussel\"\n";
        let rows: Vec<Row> = BatchReader::from_reader(data.as_bytes())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows[0].field(3), "Intercommunale \"De Watergroep\", Brussel");
    }

    #[test]
    fn test_short_rows_are_accepted() {
        let data = "a,b,c\n0200.065.765,2\n0200.068.636,1,001\n";
        let rows: Vec<Row> = BatchReader::from_reader(data.as_bytes())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field(2), "");
        assert_eq!(rows[1].field(2), "001");
    }

    #[test]
    fn test_bad_record_ends_batch() {
        let data = b"a,b\n0200.065.765,ok\n0200.068.636,\xFF\xFE\n0200.171.970,ok\n";
        let mut reader = BatchReader::from_reader(&data[..]);

        let batch = reader.read_batch(10).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].field(0), "0200.065.765");

        assert!(reader.has_more());
        assert!(matches!(reader.read_batch(10), Err(CbeError::Csv(_))));
    }

    #[test]
    fn test_header_only_file() {
        let mut reader = BatchReader::from_reader("a,b,c\n".as_bytes());
        assert!(!reader.has_more());
    }
}
