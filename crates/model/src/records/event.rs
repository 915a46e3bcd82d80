use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single search result row.
///
/// The contents are whatever columns the search selected; nothing in the
/// scrolling path looks inside.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Event(pub Map<String, Value>);

impl Event {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Event {
    fn from(map: Map<String, Value>) -> Self {
        Event(map)
    }
}
