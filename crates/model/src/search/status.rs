use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle state reported by the search status endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum SearchStatus {
    Wait,
    Execute,
    Sorting,
    Completed,
    Canceled,
    Error,
    Other(String),
}

impl SearchStatus {
    /// Whether the search will not make further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchStatus::Completed | SearchStatus::Canceled | SearchStatus::Error
        )
    }
}

impl From<String> for SearchStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "WAIT" => SearchStatus::Wait,
            "EXECUTE" => SearchStatus::Execute,
            "SORTING" => SearchStatus::Sorting,
            "COMPLETED" => SearchStatus::Completed,
            "CANCELED" => SearchStatus::Canceled,
            "ERROR" => SearchStatus::Error,
            _ => SearchStatus::Other(value),
        }
    }
}

impl From<SearchStatus> for String {
    fn from(status: SearchStatus) -> Self {
        status.to_string()
    }
}

impl Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStatus::Wait => write!(f, "WAIT"),
            SearchStatus::Execute => write!(f, "EXECUTE"),
            SearchStatus::Sorting => write!(f, "SORTING"),
            SearchStatus::Completed => write!(f, "COMPLETED"),
            SearchStatus::Canceled => write!(f, "CANCELED"),
            SearchStatus::Error => write!(f, "ERROR"),
            SearchStatus::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// Summary of a submitted search as returned by the status endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchInfo {
    pub search_id: String,
    pub status: SearchStatus,
    #[serde(default)]
    pub record_count: u64,
    #[serde(default)]
    pub progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_info() {
        let body = r#"{
            "search_id": "s-1",
            "status": "COMPLETED",
            "record_count": 120,
            "progress": 100,
            "compressed_data_file_count": 0
        }"#;
        let info: SearchInfo = serde_json::from_str(body).unwrap();

        assert_eq!(info.search_id, "s-1");
        assert_eq!(info.status, SearchStatus::Completed);
        assert!(info.status.is_terminal());
        assert_eq!(info.record_count, 120);
    }

    #[test]
    fn test_unknown_status_preserved() {
        let status = SearchStatus::from("PAUSED".to_string());
        assert_eq!(status, SearchStatus::Other("PAUSED".into()));
        assert_eq!(status.to_string(), "PAUSED");
        assert!(!status.is_terminal());
    }
}
