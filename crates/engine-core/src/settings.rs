use std::{fmt::Display, str::FromStr};

pub const DEFAULT_WINDOW: usize = 50;

/// What a scroller does when a mid-scroll window fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefillMode {
    /// Log the failure and report exhaustion. The scroller stays exhausted.
    #[default]
    Lossy,
    /// Report the failure to the caller and keep the scroller state, so the
    /// same window can be requested again.
    Strict,
}

impl FromStr for RefillMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lossy" => Ok(RefillMode::Lossy),
            "strict" => Ok(RefillMode::Strict),
            other => Err(format!("unknown refill mode '{other}'")),
        }
    }
}

impl Display for RefillMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefillMode::Lossy => write!(f, "lossy"),
            RefillMode::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSettings {
    /// Records requested per window fetch.
    pub window: usize,
    pub mode: RefillMode,
}

impl ScrollSettings {
    pub fn new(window: usize) -> Self {
        ScrollSettings {
            window,
            mode: RefillMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: RefillMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
