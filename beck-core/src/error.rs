use crate::ParameterKey;

/// Failure taxonomy of the driver.
///
/// Every variant is reported to the immediate caller of the failing
/// operation, nothing is swallowed or retried behind the caller's back.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Malformed placeholder syntax, fatal to statement creation.
    #[error("cannot parse placeholder at byte {offset}: {message}")]
    Parse { message: String, offset: usize },
    /// A bind call referenced a key the SQL text does not contain. The
    /// statement remains usable for correct keys.
    #[error("no parameter {0} in the statement")]
    UnknownParameter(ParameterKey),
    /// `add` or `execute` was invoked while some slots were still unbound.
    /// The statement may be retried after completing the binds.
    #[error("unbound parameters: {missing}")]
    BindIncomplete { missing: String },
    /// The statement was used outside its allowed state transitions.
    #[error("illegal statement state: {0}")]
    IllegalState(String),
    /// The engine rejected the statement or raised a runtime fault. Carries
    /// the engine diagnostic verbatim.
    #[error("{0}")]
    Engine(String),
    /// Row or metadata access after the result was exhausted or closed.
    #[error("the result has already been consumed or closed")]
    ResultConsumed,
    /// A value could not be converted to the requested type.
    #[error("cannot decode value: {0}")]
    Decode(String),
    /// The connection (and its execution context) is gone.
    #[error("the connection is closed")]
    Closed,
    #[error("invalid connection configuration: {0}")]
    Configuration(String),
}

impl Error {
    pub fn bind_incomplete<'a>(missing: impl IntoIterator<Item = &'a ParameterKey>) -> Self {
        let missing = missing
            .into_iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::BindIncomplete { missing }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
