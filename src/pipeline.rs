use crate::config::Config;
use crate::constants::*;
use crate::error::Result;
use crate::ids::IdBuilder;
use crate::mapping::{MapperRegistry, RecordKind};
use crate::metrics as m;
use crate::reader::BatchReader;
use crate::sink::{IdSink, TripleSink};
use metrics::{counter, histogram};
use serde::Serialize;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

/// Whether the rows of a file are added to the data set or retracted from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Insert,
    Delete,
}

/// Input file name and how its rows are processed
#[derive(Debug, Clone, Copy)]
pub struct FileMapping {
    pub file_name: &'static str,
    pub kind: RecordKind,
    pub direction: Direction,
}

const fn insert(file_name: &'static str, kind: RecordKind) -> FileMapping {
    FileMapping {
        file_name,
        kind,
        direction: Direction::Insert,
    }
}

const fn delete(file_name: &'static str, kind: RecordKind) -> FileMapping {
    FileMapping {
        file_name,
        kind,
        direction: Direction::Delete,
    }
}

/// Full load, all written to one statement file. The order is fixed so that
/// two runs over the same input give identical output.
pub const FULL_TABLE: &[FileMapping] = &[
    insert(ENTERPRISE_FILE, RecordKind::Organization),
    insert(DENOMINATION_FILE, RecordKind::Name),
    insert(ESTABLISHMENT_FILE, RecordKind::Site),
    insert(CONTACT_FILE, RecordKind::Contact),
    insert(ACTIVITY_FILE, RecordKind::Activity),
    insert(ADDRESS_FILE, RecordKind::Address),
];

/// Code tables, published separately from the register itself
pub const CODE_TABLE: &[FileMapping] = &[insert(CODE_FILE, RecordKind::Code)];

/// Differential update: retractions first, then additions
pub const UPDATE_TABLE: &[FileMapping] = &[
    delete(ENTERPRISE_DELETE_FILE, RecordKind::Organization),
    delete(DENOMINATION_DELETE_FILE, RecordKind::Name),
    delete(ESTABLISHMENT_DELETE_FILE, RecordKind::Site),
    delete(CONTACT_DELETE_FILE, RecordKind::Contact),
    delete(ACTIVITY_DELETE_FILE, RecordKind::Activity),
    delete(ADDRESS_DELETE_FILE, RecordKind::Address),
    insert(ENTERPRISE_INSERT_FILE, RecordKind::Organization),
    insert(DENOMINATION_INSERT_FILE, RecordKind::Name),
    insert(ESTABLISHMENT_INSERT_FILE, RecordKind::Site),
    insert(CONTACT_INSERT_FILE, RecordKind::Contact),
    insert(ACTIVITY_INSERT_FILE, RecordKind::Activity),
    insert(ADDRESS_INSERT_FILE, RecordKind::Address),
];

/// `enterprise_delete.csv` is listed in `enterprise_id.csv`
pub fn id_file_name(file_name: &str) -> String {
    file_name.replacen(DELETE_SUFFIX, ID_SUFFIX, 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Processed,
    Missing,
    Failed,
}

/// Outcome of one input file
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub kind: RecordKind,
    pub direction: Direction,
    pub status: FileStatus,
    pub rows_read: u64,
    /// Statements for inserts, identifiers for deletes
    pub written: u64,
    pub output_file: Option<String>,
    pub error: Option<String>,
}

impl FileReport {
    fn new(mapping: &FileMapping) -> Self {
        Self {
            file_name: mapping.file_name.to_string(),
            kind: mapping.kind,
            direction: mapping.direction,
            status: FileStatus::Processed,
            rows_read: 0,
            written: 0,
            output_file: None,
            error: None,
        }
    }

    fn fail(&mut self, e: impl Display) {
        error!("Processing {} failed: {}", self.file_name, e);
        counter!(m::FILES_FAILED, "file" => self.file_name.clone()).increment(1);
        self.status = FileStatus::Failed;
        self.error = Some(e.to_string());
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub output_file: String,
    pub files: Vec<FileReport>,
    pub triples_written: u64,
    pub ids_written: u64,
}

impl PipelineResult {
    pub fn errors(&self) -> Vec<String> {
        self.files
            .iter()
            .filter_map(|f| f.error.as_ref().map(|e| format!("{}: {}", f.file_name, e)))
            .collect()
    }
}

/// Drives register files through the mappers into the output files
#[derive(Clone)]
pub struct Pipeline {
    registry: Arc<MapperRegistry>,
    batch_size: usize,
}

impl Pipeline {
    pub fn new(registry: Arc<MapperRegistry>, batch_size: usize) -> Self {
        Self {
            registry,
            batch_size: batch_size.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let ids = IdBuilder::new(config.vocab.clone());
        Self::new(Arc::new(MapperRegistry::new(ids)), config.pipeline.batch_size)
    }

    /// Full load: the register into `cbe.nt`, the code tables into `cbetypes.nt`
    pub fn convert(&self, input: &Path, output: &Path) -> Result<Vec<PipelineResult>> {
        Ok(vec![
            self.run(FULL_TABLE, input, output, FULL_OUTPUT)?,
            self.run(CODE_TABLE, input, output, CODES_OUTPUT)?,
        ])
    }

    /// Differential update into `cbe-upd.nt` and one `*_id.csv` per delete file
    pub fn update(&self, input: &Path, output: &Path) -> Result<PipelineResult> {
        self.run(UPDATE_TABLE, input, output, UPDATE_OUTPUT)
    }

    /// Processes the files of `table` in order. A missing or unreadable file is
    /// reported and skipped; failing to write the shared statement file ends the run.
    #[instrument(skip(self, table), fields(input = %input.display(), output = %output.display()))]
    pub fn run(
        &self,
        table: &[FileMapping],
        input: &Path,
        output: &Path,
        triples_name: &str,
    ) -> Result<PipelineResult> {
        fs::create_dir_all(output)?;
        let output_file = output.join(triples_name);
        info!("Writing statements to {}", output_file.display());
        let mut sink = TripleSink::new(BufWriter::new(File::create(&output_file)?));

        let mut files = Vec::with_capacity(table.len());
        let mut ids_written = 0;

        for mapping in table {
            let path = input.join(mapping.file_name);
            let mut report = FileReport::new(mapping);

            if !path.exists() {
                warn!("File {} not found, skipping", path.display());
                counter!(m::FILES_SKIPPED, "file" => mapping.file_name).increment(1);
                report.status = FileStatus::Missing;
                files.push(report);
                continue;
            }

            let started = Instant::now();
            match mapping.direction {
                Direction::Insert => {
                    report.output_file = Some(output_file.to_string_lossy().to_string());
                    if let Err(e) = self.insert_file(&path, mapping.kind, &mut sink, &mut report) {
                        error!("Writing {} failed, stopping: {}", output_file.display(), e);
                        return Err(e);
                    }
                }
                Direction::Delete => {
                    let id_file = output.join(id_file_name(mapping.file_name));
                    report.output_file = Some(id_file.to_string_lossy().to_string());
                    if let Err(e) = self.delete_file(&path, mapping.kind, &id_file, &mut report) {
                        report.fail(e);
                    }
                    ids_written += report.written;
                }
            }
            histogram!(m::FILE_DURATION, "file" => mapping.file_name)
                .record(started.elapsed().as_secs_f64());
            counter!(m::ROWS_READ, "file" => mapping.file_name).increment(report.rows_read);

            info!(
                "Processed {}: {} rows, {} written",
                mapping.file_name, report.rows_read, report.written
            );
            files.push(report);
        }

        let triples_written = sink.written();
        sink.finish()?.flush()?;
        counter!(m::TRIPLES_WRITTEN).increment(triples_written);
        counter!(m::IDS_WRITTEN).increment(ids_written);

        Ok(PipelineResult {
            output_file: output_file.to_string_lossy().to_string(),
            files,
            triples_written,
            ids_written,
        })
    }

    /// Read failures end this file only; write failures are returned.
    fn insert_file<W: Write>(
        &self,
        path: &Path,
        kind: RecordKind,
        sink: &mut TripleSink<W>,
        report: &mut FileReport,
    ) -> Result<()> {
        let mut reader = match BatchReader::open(path) {
            Ok(reader) => reader,
            Err(e) => {
                report.fail(e);
                return Ok(());
            }
        };

        while reader.has_more() {
            let batch = match reader.read_batch(self.batch_size) {
                Ok(batch) => batch,
                Err(e) => {
                    report.fail(e);
                    return Ok(());
                }
            };
            report.rows_read += batch.len() as u64;
            for row in &batch {
                report.written += sink.write_all(&self.registry.map(kind, row))?;
            }
        }
        Ok(())
    }

    fn delete_file(
        &self,
        path: &Path,
        kind: RecordKind,
        id_file: &Path,
        report: &mut FileReport,
    ) -> Result<()> {
        let mut reader = BatchReader::open(path)?;
        let mut sink = IdSink::new(BufWriter::new(File::create(id_file)?));

        // Identifiers written before a failure stay in the file and are counted.
        let outcome = self.write_ids(&mut reader, kind, &mut sink, report);
        report.written = sink.written();
        sink.finish()?;
        outcome
    }

    fn write_ids<W: Write>(
        &self,
        reader: &mut BatchReader<File>,
        kind: RecordKind,
        sink: &mut IdSink<W>,
        report: &mut FileReport,
    ) -> Result<()> {
        while reader.has_more() {
            let batch = reader.read_batch(self.batch_size)?;
            report.rows_read += batch.len() as u64;
            for row in &batch {
                if let Some(id) = self.registry.subject(kind, row) {
                    sink.write(&id)?;
                }
            }
        }
        Ok(())
    }
}
