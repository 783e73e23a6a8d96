use std::fmt::{self, Display};

/// The logical identity of a placeholder, independent of how many times it
/// occurs in the SQL text.
///
/// Positional (`?`) and indexed (`$n`) placeholders share the integer key
/// space: the n-th `?` of a statement and `$n` are the same logical
/// parameter. Indices are 1-based. Named placeholders (`:name`) are keyed
/// by their identifier, case sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterKey {
    /// Wider than the parser's index range on purpose: a negative or
    /// oversized key coming from a bind call never matches a slot, but it
    /// keeps its face value for the error message.
    Index(i64),
    Name(String),
}

impl Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKey::Index(index) => write!(f, "${}", index),
            ParameterKey::Name(name) => write!(f, ":{}", name),
        }
    }
}

impl From<u32> for ParameterKey {
    fn from(value: u32) -> Self {
        Self::Index(value.into())
    }
}

impl From<usize> for ParameterKey {
    fn from(value: usize) -> Self {
        Self::Index(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i32> for ParameterKey {
    fn from(value: i32) -> Self {
        Self::Index(value.into())
    }
}

impl From<i64> for ParameterKey {
    fn from(value: i64) -> Self {
        Self::Index(value)
    }
}

impl From<&str> for ParameterKey {
    fn from(value: &str) -> Self {
        Self::Name(value.to_owned())
    }
}

impl From<String> for ParameterKey {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}
