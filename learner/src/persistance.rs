use std::fs;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::table::ValueTable;

/// Durable storage for a value table: gzip-compressed JSON, one vector per
/// state key, lengths independent per key. Load is all or nothing; a
/// malformed blob is an error, never a partial table.
pub struct TablePersistance {
    table_path: PathBuf,
}

impl TablePersistance {
    pub fn new(table_path: PathBuf) -> Self {
        Self { table_path }
    }

    pub fn save(&self, table: &ValueTable) -> Result<()> {
        if let Some(parent) = self.table_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.table_path)
            .with_context(|| format!("Failed to create table file at {:?}", self.table_path))?;
        let compressor = GzEncoder::new(file, Compression::default());
        serde_json::to_writer(compressor, table)?;

        Ok(())
    }

    pub fn load(&self) -> Result<ValueTable> {
        let file = File::open(&self.table_path)
            .with_context(|| format!("Failed to open table file at {:?}", self.table_path))?;
        let content = GzDecoder::new(file);
        let table = serde_json::from_reader(content)
            .with_context(|| format!("Malformed table file at {:?}", self.table_path))?;

        Ok(table)
    }
}
