// src/fetch/cache.rs

use chrono::NaiveDate;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// `<dir>/<report>_<YYYY-MM-DD>.csv`
pub fn cache_path(dir: &Path, report: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}_{}.csv", report, date.format("%Y-%m-%d")))
}

/// Write `body` to `path`, creating parent directories and replacing any
/// existing file. Returns the number of bytes written.
pub fn write_response(path: &Path, body: &str) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| Error::io(format!("creating {}", parent.display()), e))?;
    }
    fs::write(path, body).map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
    Ok(body.len())
}
