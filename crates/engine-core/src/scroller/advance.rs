use connectors::error::FetchError;

/// Outcome of asking a scroller for its next record.
#[derive(Debug)]
pub enum Advance {
    /// A record is ready to be taken with `next_record`.
    HasMore,
    /// No further records. Terminal.
    Exhausted,
    /// A window refill failed. Only returned in strict mode.
    FetchFailed(FetchError),
}

impl Advance {
    pub fn has_more(&self) -> bool {
        matches!(self, Advance::HasMore)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Advance::Exhausted)
    }
}

/// Where the scroller stands relative to its cached window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    /// The cached window still holds unconsumed records.
    Ready,
    /// A full-sized window has been consumed; more records may exist.
    NeedsRefill,
    Exhausted,
}
