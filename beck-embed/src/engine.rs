use beck_core::{DataType, Result, Row, RowsAffected, Value};

/// One column as reported by the engine catalog for a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineColumn {
    /// Label as declared in the SELECT list (alias included).
    pub label: String,
    /// Underlying column name.
    pub name: String,
    pub data_type: DataType,
}

/// Engine-side iterator over a query's rows.
///
/// Exclusively owned by the execution worker; dropping it releases the
/// underlying resource.
pub trait RowCursor {
    fn next_row(&mut self) -> Result<Option<Row>>;
}

/// Outcome of one native execution. Whether a statement produces rows or
/// an update count is known only after the engine ran it.
pub enum Execution {
    Affected(RowsAffected),
    ResultSet {
        columns: Vec<EngineColumn>,
        cursor: Box<dyn RowCursor>,
    },
}

/// The native, synchronous API of an embedded database engine.
///
/// The handle is not reentrant across threads: the driver moves it onto a
/// dedicated execution thread and serializes every call there. `sql` is in
/// the engine's native form, `?N` markers with 1-based slot numbers, and
/// `params` is ordered by slot. Failures are reported as `Error::Engine`
/// carrying the engine diagnostic verbatim.
pub trait Engine: Send + Sized + 'static {
    /// URL scheme of the engine, e.g. `memory` for `memory://`.
    const NAME: &'static str;

    /// Open an engine instance for the given target (the part of the
    /// connection URL after the scheme).
    fn open(target: &str) -> Result<Self>;

    /// Run one statement. `auto_commit` is the connection's flag at
    /// dispatch time; the engine owns the implicit transaction scope it
    /// may imply.
    fn execute(&mut self, sql: &str, params: &[Value], auto_commit: bool) -> Result<Execution>;
}
