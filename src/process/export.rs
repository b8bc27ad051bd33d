// src/process/export.rs

use arrow::csv::WriterBuilder;
use std::{fs, fs::File, path::Path};
use tracing::info;

use super::Table;
use crate::error::{Error, Result};

impl Table {
    /// Write the table as comma-delimited text with a header row. Nulls are
    /// written as empty fields.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("creating {}", parent.display()), e))?;
        }

        let file = File::create(path)
            .map_err(|e| Error::io(format!("creating {}", path.display()), e))?;
        let mut writer = WriterBuilder::new().with_header(true).build(file);
        writer.write(self.batch())?;

        info!(path = %path.display(), rows = self.num_rows(), "table written");
        Ok(())
    }
}
