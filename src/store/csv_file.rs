use super::{PlanRecord, RecordStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Plan history kept in a CSV file, one row per run.
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Adds the missing newline when the last row was written without one.
fn terminate_last_line(file: &mut File) -> io::Result<()> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        file.write_all(b"\n")?;
    }
    Ok(())
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    async fn append(&self, record: &PlanRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open history file: {}", self.path.display()))?;
        let is_new = file.metadata()?.len() == 0;
        if !is_new {
            terminate_last_line(&mut file)
                .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write history file: {}", self.path.display()))?;
        writer.flush()?;

        debug!(path = %self.path.display(), header = is_new, "Appended plan record");
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<PlanRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open history file: {}", self.path.display()))?;
        reader
            .deserialize::<PlanRecord>()
            .map(|row| row.context("Failed to read history record"))
            .collect()
    }
}
