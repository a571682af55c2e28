use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde_json::{Number, Value};
use tracing::info;

use super::domain::{UserId, UserRecord};
use super::engine::user_id_of;

/// Read-only lookup of stored user records.
pub trait UserRepository: Send + Sync {
    fn fetch(&self, user_id: UserId) -> Option<&UserRecord>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Error raised while loading the user table.
#[derive(Debug, thiserror::Error)]
pub enum UserTableError {
    #[error("failed to read user data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid user CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} has no integer user_id")]
    MissingUserId { row: usize },
    #[error("user_id {0} appears more than once")]
    DuplicateUserId(UserId),
}

/// User records keyed by id, built once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    records: HashMap<UserId, UserRecord>,
}

impl UserTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, UserTableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(path = %path.display(), users = table.len(), "user table loaded");
        Ok(table)
    }

    /// Reads a headed CSV. Cells are typed the way a data-frame loader would
    /// (integer, then float, then string); empty cells are left out so the
    /// validator can report them.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, UserTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut records = HashMap::new();

        for (index, row) in csv_reader.records().enumerate() {
            let row = row?;
            let mut record = UserRecord::new();
            for (header, cell) in headers.iter().zip(row.iter()) {
                if let Some(value) = typed_cell(cell) {
                    record.insert(header.to_string(), value);
                }
            }

            let user_id =
                user_id_of(&record).map_err(|_| UserTableError::MissingUserId { row: index + 1 })?;
            if records.insert(user_id, record).is_some() {
                return Err(UserTableError::DuplicateUserId(user_id));
            }
        }

        Ok(Self { records })
    }

    pub fn from_records<I>(records: I) -> Result<Self, UserTableError>
    where
        I: IntoIterator<Item = UserRecord>,
    {
        let mut table = HashMap::new();
        for (index, record) in records.into_iter().enumerate() {
            let user_id =
                user_id_of(&record).map_err(|_| UserTableError::MissingUserId { row: index + 1 })?;
            if table.insert(user_id, record).is_some() {
                return Err(UserTableError::DuplicateUserId(user_id));
            }
        }
        Ok(Self { records: table })
    }

    /// Records ordered by id.
    pub fn records(&self) -> Vec<(UserId, &UserRecord)> {
        let mut entries: Vec<_> = self.records.iter().map(|(id, record)| (*id, record)).collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}

impl UserRepository for UserTable {
    fn fetch(&self, user_id: UserId) -> Option<&UserRecord> {
        self.records.get(&user_id)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

fn typed_cell(cell: &str) -> Option<Value> {
    if cell.is_empty() {
        return None;
    }

    if let Ok(integer) = cell.parse::<i64>() {
        return Some(Value::from(integer));
    }

    if let Some(number) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Some(Value::Number(number));
    }

    Some(Value::String(cell.to_string()))
}
