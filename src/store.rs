use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, warn};

use crate::error::{Result, TallyError};
use crate::models::{Transaction, TransactionInput, TransactionRow, FIELDNAMES};

/// Result of a lossy read: the rows that parsed plus how many were dropped.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub records: Vec<Transaction>,
    pub skipped: usize,
}

/// Optional filters for [`RecordStore::get`]. Set filters combine with AND.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Case-insensitive exact category match.
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(start) = &self.start_date {
            if t.date.as_str() < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end_date {
            if t.date.as_str() > end.as_str() {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if t.category.to_lowercase() != category.to_lowercase() {
                return false;
            }
        }
        true
    }
}

/// The transaction list persisted as one CSV file. Every mutation reloads the
/// whole file, applies the change and rewrites the whole file; nothing is
/// cached between calls.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write a header-only file if none exists yet. Returns whether a file was created.
    pub fn init(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.save(&[])?;
        Ok(true)
    }

    pub fn load(&self) -> Result<Vec<Transaction>> {
        Ok(self.load_with_outcome()?.records)
    }

    /// Read every row of the backing file. A missing file is an empty store.
    /// Rows that fail coercion are logged and counted, never returned as errors.
    pub fn load_with_outcome(&self) -> Result<LoadOutcome> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadOutcome::default()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(BufReader::new(file));
        let headers = reader.headers()?.clone();

        let mut outcome = LoadOutcome::default();
        let mut record = StringRecord::new();
        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!("{}: skipping unreadable row: {e}", self.path.display());
                    outcome.skipped += 1;
                    continue;
                }
            }
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let parsed = record
                .deserialize::<TransactionRow>(Some(&headers))
                .map_err(|e| e.to_string())
                .and_then(Transaction::try_from);
            match parsed {
                Ok(t) => outcome.records.push(t),
                Err(reason) => {
                    warn!("{}:{line}: skipping malformed row: {reason}", self.path.display());
                    outcome.skipped += 1;
                }
            }
        }
        Ok(outcome)
    }

    /// Truncate and rewrite the backing file with exactly `records`, header first.
    pub fn save(&self, records: &[Transaction]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        writer.write_record(FIELDNAMES)?;
        for t in records {
            writer.serialize(TransactionRow::from(t))?;
        }
        writer.flush()?;
        debug!("saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Append a new record under the next free id and return that id.
    pub fn add(&self, input: TransactionInput) -> Result<u64> {
        // validate before touching the file
        let mut record = input.into_transaction(0)?;
        let mut records = self.load()?;
        record.id = next_id(&records)?;
        let id = record.id;
        records.push(record);
        self.save(&records)?;
        debug!("added transaction {id}");
        Ok(id)
    }

    pub fn get(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect())
    }

    /// Remove the record with `id`. Returns `false` (and leaves the file as it
    /// was) when no such record exists.
    pub fn delete(&self, id: u64) -> Result<bool> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|t| t.id != id);
        if records.len() == before {
            debug!("delete: no transaction with id {id}");
            return Ok(false);
        }
        self.save(&records)?;
        Ok(true)
    }

    /// Overwrite every field of the record with `id`; the id itself is kept.
    pub fn update(&self, id: u64, input: TransactionInput) -> Result<()> {
        let replacement = input.into_transaction(id)?;
        let mut records = self.load()?;
        let slot = records
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TallyError::NotFound(id))?;
        *slot = replacement;
        self.save(&records)
    }
}

/// `max(existing ids) + 1`, or 1 for an empty store.
fn next_id(records: &[Transaction]) -> Result<u64> {
    records
        .iter()
        .map(|t| t.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| TallyError::Other("transaction id space exhausted".into()))
}
