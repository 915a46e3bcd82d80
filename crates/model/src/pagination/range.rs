use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

const RANGE_UNIT: &str = "items=";

/// Half-open range of result indexes, `[start, end)`, requested in one window fetch.
///
/// On the wire it travels as the `Range` header value `items=<start>-<end>`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRange {
    pub start: usize,
    pub end: usize,
}

impl ItemRange {
    pub fn new(start: usize, end: usize) -> Result<Self, ModelError> {
        if end <= start {
            return Err(ModelError::EmptyRange { start, end });
        }
        Ok(ItemRange { start, end })
    }

    /// Range covering `size` items starting at `start`.
    pub fn window(start: usize, size: usize) -> Result<Self, ModelError> {
        Self::new(start, start.saturating_add(size))
    }

    /// Number of items requested.
    pub fn size(&self) -> usize {
        self.end - self.start
    }

    /// The adjacent range of the same size.
    pub fn next_window(&self) -> Self {
        let size = self.size();
        ItemRange {
            start: self.end,
            end: self.end.saturating_add(size),
        }
    }

    pub fn header_value(&self) -> String {
        format!("{RANGE_UNIT}{}-{}", self.start, self.end)
    }
}

impl FromStr for ItemRange {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ModelError::MalformedRange(s.to_string());

        let bounds = s.trim().strip_prefix(RANGE_UNIT).ok_or_else(malformed)?;
        let (start, end) = bounds.split_once('-').ok_or_else(malformed)?;
        let start = start.trim().parse().map_err(|_| malformed())?;
        let end = end.trim().parse().map_err(|_| malformed())?;

        ItemRange::new(start, end)
    }
}

impl Display for ItemRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
