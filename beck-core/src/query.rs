use crate::{AsValue, Error, Result, RowMetadata, Value};
use std::sync::Arc;

/// Metadata about modify operations (INSERT/UPDATE/DELETE).
#[derive(Default, Debug, Clone, Copy)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted / affected identifier when available.
    pub last_affected_id: Option<i64>,
}

/// Owned row value slice, aligned by index with the result's metadata.
pub type Row = Box<[Value]>;

/// A result row together with its column metadata.
#[derive(Debug, Clone)]
pub struct RowLabeled {
    /// Column metadata, shared by every row of one result.
    pub metadata: Arc<RowMetadata>,
    /// Data values (aligned by index with the metadata).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(metadata: Arc<RowMetadata>, values: Row) -> Self {
        Self { metadata, values }
    }

    pub fn metadata(&self) -> &RowMetadata {
        &self.metadata
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Value lookup by label, following the metadata resolution rules
    /// (case insensitive, last match wins).
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.metadata
            .column_metadata(name)
            .and_then(|column| self.values.get(column.index))
    }

    pub fn try_get<T: AsValue>(&self, index: usize) -> Result<T> {
        let value = self.values.get(index).ok_or_else(|| {
            Error::Decode(format!("column index {} is out of range", index))
        })?;
        T::try_from_value(value.clone())
    }

    pub fn try_get_column<T: AsValue>(&self, name: &str) -> Result<T> {
        let value = self
            .get_column(name)
            .ok_or_else(|| Error::Decode(format!("no column labeled `{}`", name)))?;
        T::try_from_value(value.clone())
    }
}

/// Heterogeneous items emitted by a statement execution: the shape (rows
/// versus update count) is decided by the engine only after the native
/// call, so consumers must handle both.
#[derive(Debug, Clone)]
pub enum QueryResult {
    /// A labeled row.
    RowLabeled(RowLabeled),
    /// A modify effect aggregation.
    Affected(RowsAffected),
}

impl QueryResult {
    pub fn as_row(&self) -> Option<&RowLabeled> {
        match self {
            QueryResult::RowLabeled(v) => Some(v),
            _ => None,
        }
    }
    pub fn as_affected(&self) -> Option<&RowsAffected> {
        match self {
            QueryResult::Affected(v) => Some(v),
            _ => None,
        }
    }
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
            if elem.last_affected_id.is_some() {
                self.last_affected_id = elem.last_affected_id;
            }
        }
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

impl From<RowLabeled> for QueryResult {
    fn from(value: RowLabeled) -> Self {
        QueryResult::RowLabeled(value)
    }
}

impl From<RowsAffected> for QueryResult {
    fn from(value: RowsAffected) -> Self {
        QueryResult::Affected(value)
    }
}
