//! Append-only JSONL case log.
//!
//! One `CaseRecord` per line at `.triage/cases.jsonl` by default. Appends use
//! `serde_jsonlines::append_json_lines`; free text is JSON-escaped, so commas,
//! quotes, and newlines in an anamnesis cannot corrupt later reads.
//!
//! Reads are tolerant: a line that does not decode is counted and skipped,
//! never surfaced as an error. An append after a torn write first terminates
//! the partial line, so only the torn record is lost.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use triage_core::dataset::DatasetSnapshot;
use triage_core::entities::{Case, CaseRecord};
use triage_schema::SchemaRegistry;

use crate::error::StoreError;
use crate::lock::{self, CaseLogLock, LockOptions};

/// Typed records read from the log plus the number of lines skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogScan {
    pub records: Vec<CaseRecord>,
    pub unreadable: usize,
}

/// Handle to the case log file. The file is created on first append.
#[derive(Debug, Clone)]
pub struct CaseLog {
    path: PathBuf,
}

impl CaseLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Sibling lock file, e.g. `cases.jsonl.lock`.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("cases"), OsString::from);
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Take the writer lock with default timing.
    ///
    /// # Errors
    ///
    /// See [`CaseLog::lock_with`].
    pub fn lock(&self) -> Result<CaseLogLock, StoreError> {
        self.lock_with(&LockOptions::default())
    }

    /// Take the writer lock, blocking the current thread while another
    /// writer holds it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Locked` on timeout and `StoreError::Io` if the
    /// lock file cannot be created.
    pub fn lock_with(&self, options: &LockOptions) -> Result<CaseLogLock, StoreError> {
        self.ensure_parent()?;
        lock::acquire(&self.lock_path(), options)
    }

    /// Stamp a case with the current time and append it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory or file cannot be written.
    pub fn append(&self, case: &Case) -> Result<CaseRecord, StoreError> {
        let record = CaseRecord::new(case.clone(), Utc::now());
        self.append_records(std::slice::from_ref(&record))?;
        Ok(record)
    }

    /// Append already-stamped records in order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory or file cannot be written.
    pub fn append_records(&self, records: &[CaseRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        self.ensure_parent()?;
        self.terminate_torn_line()?;

        serde_jsonlines::append_json_lines(&self.path, records)
            .map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            "appended case records"
        );
        Ok(())
    }

    /// Append with schema validation of each record.
    ///
    /// Validation is warn-only; every record is written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the write fails.
    pub fn append_validated(
        &self,
        records: &[CaseRecord],
        schema: &SchemaRegistry,
    ) -> Result<(), StoreError> {
        for record in records {
            let value = serde_json::to_value(record).map_err(anyhow::Error::from)?;
            if let Err(error) = schema.validate("case_record", &value) {
                tracing::warn!(ts = %record.ts, %error, "case record failed schema validation");
            }
        }
        self.append_records(records)
    }

    /// Read every decodable record in insertion order.
    ///
    /// A missing log reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` for failures other than undecodable lines.
    pub fn scan(&self) -> Result<LogScan, StoreError> {
        let (records, unreadable) = self.read_lines::<CaseRecord>()?;
        Ok(LogScan {
            records,
            unreadable,
        })
    }

    /// Reload the full history as cleaned training data.
    ///
    /// Rows with a missing, null, or blank anamnesis or decision are dropped,
    /// as are lines that are not JSON at all.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` for failures other than undecodable lines.
    pub fn snapshot(&self) -> Result<DatasetSnapshot, StoreError> {
        let (values, unreadable) = self.read_lines::<Value>()?;

        let raw = values
            .iter()
            .map(|value| (text_field(value, "anamnesis"), text_field(value, "decision")))
            .chain(std::iter::repeat_n((None, None), unreadable));

        let snapshot = DatasetSnapshot::clean(raw);
        if snapshot.dropped > 0 {
            tracing::debug!(
                path = %self.path.display(),
                dropped = snapshot.dropped,
                "dropped invalid case rows"
            );
        }
        Ok(snapshot)
    }

    /// Number of decodable records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the log cannot be read.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.scan()?.records.len())
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        Ok(())
    }

    /// Write a newline if the log does not end with one.
    fn terminate_torn_line(&self) -> Result<(), StoreError> {
        let io = |e| StoreError::io(&self.path, e);

        let mut file = match OpenOptions::new().read(true).append(true).open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(io(error)),
        };
        if file.metadata().map_err(io)?.len() == 0 {
            return Ok(());
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1)).map_err(io)?;
        file.read_exact(&mut last).map_err(io)?;
        if last[0] != b'\n' {
            tracing::warn!(path = %self.path.display(), "terminating torn case log line");
            file.write_all(b"\n").map_err(io)?;
        }
        Ok(())
    }

    fn read_lines<T: DeserializeOwned>(&self) -> Result<(Vec<T>, usize), StoreError> {
        if !self.exists() {
            return Ok((Vec::new(), 0));
        }

        let lines = serde_jsonlines::json_lines::<T, _>(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;

        let mut items = Vec::new();
        let mut unreadable = 0usize;
        for line in lines {
            match line {
                Ok(item) => items.push(item),
                Err(error)
                    if matches!(error.kind(), ErrorKind::InvalidData | ErrorKind::UnexpectedEof) =>
                {
                    tracing::debug!(%error, "skipping undecodable case log line");
                    unreadable += 1;
                }
                Err(error) => return Err(StoreError::io(&self.path, error)),
            }
        }
        Ok((items, unreadable))
    }
}

/// Read a field as text. Null and absent fields are `None`; non-string
/// scalars use their JSON rendering.
fn text_field(value: &Value, field: &str) -> Option<String> {
    match value.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
