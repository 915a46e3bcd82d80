use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A range whose end does not lie past its start.
    #[error("Empty item range: {start}-{end}")]
    EmptyRange { start: usize, end: usize },

    /// A `Range` header value that is not of the form `items=<start>-<end>`.
    #[error("Malformed range header: {0}")]
    MalformedRange(String),
}
