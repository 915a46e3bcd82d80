use connectors::error::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrollError {
    #[error("Window size must be greater than zero")]
    InvalidWindow,

    #[error("Failed to fetch the first window of search '{search_id}': {source}")]
    Construction {
        search_id: String,
        #[source]
        source: FetchError,
    },

    #[error("Failed to look up search '{search_id}': {source}")]
    Status {
        search_id: String,
        #[source]
        source: FetchError,
    },
}
