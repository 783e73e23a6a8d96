use crate::DataType;

/// One column of a result, as reported by the engine catalog after
/// execution. Immutable for the lifetime of the result.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// The label as declared in the SELECT list (alias included).
    pub label: String,
    /// The underlying column name.
    pub name: String,
    /// 0-based position in the row.
    pub index: usize,
    pub data_type: DataType,
}

/// Per-result column metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMetadata {
    columns: Box<[ColumnDescriptor]>,
}

impl RowMetadata {
    pub fn new(columns: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Looks a column up by label, case insensitive. When several columns
    /// share a label the **last** declared one wins.
    pub fn column_metadata(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .rev()
            .find(|column| column.label.eq_ignore_ascii_case(name))
    }

    /// The distinct column labels, canonicalized to uppercase.
    pub fn column_names(&self) -> ColumnNames {
        let mut names = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let canonical = column.label.to_ascii_uppercase();
            if !names.contains(&canonical) {
                names.push(canonical);
            }
        }
        ColumnNames {
            names: names.into(),
        }
    }
}

/// Set of column labels stored in canonical (uppercased) form; membership
/// queries normalize the same way, so any casing of a label is contained.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNames {
    names: Box<[String]>,
}

impl ColumnNames {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|v| v.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
