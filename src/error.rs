use thiserror::Error;

/// Failures surfaced to callers of the factory and record operations.
///
/// Missing data inside a payload is never an error; mapping degrades to
/// unset fields instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The tag has no registered concrete record type. A programming or
    /// wiring error, not a transient condition.
    #[error("unknown record type {0:?}")]
    UnknownRecordType(String),

    /// The bound fetch strategy failed while hydrating a record.
    #[error("hydrate failed for {id}")]
    Hydrate {
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
