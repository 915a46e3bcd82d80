use serde::{Deserialize, Serialize};

/// Body of a results response: one window of records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowPage<R> {
    #[serde(default = "Vec::new")]
    pub events: Vec<R>,
}

impl<R> WindowPage<R> {
    pub fn new(events: Vec<R>) -> Self {
        WindowPage { events }
    }

    pub fn into_events(self) -> Vec<R> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::event::Event;

    #[test]
    fn test_decode_events() {
        let body = r#"{"events": [{"sourceip": "10.0.0.1", "qid": 1}, {"sourceip": "10.0.0.2"}]}"#;
        let page: WindowPage<Event> = serde_json::from_str(body).unwrap();

        assert_eq!(page.events.len(), 2);
        assert_eq!(page.events[0].get("qid"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_missing_events_is_empty() {
        let page: WindowPage<Event> = serde_json::from_str("{}").unwrap();
        assert!(page.into_events().is_empty());
    }
}
