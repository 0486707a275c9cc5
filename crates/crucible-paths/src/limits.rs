//! Query parameters: run-length bounds and search configuration.

use crate::error::SearchError;

/// Lower and upper bounds on straight-line run length.
///
/// Every turn (and the first move) covers exactly `min_run` cells; no
/// direction is held for more than `max_run` consecutive cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunLimits {
    pub min_run: u32,
    pub max_run: u32,
}

impl RunLimits {
    /// Turn whenever, but never more than three cells straight.
    pub const STANDARD: Self = Self::new(1, 3);

    /// At least four cells before turning, at most ten straight.
    pub const ULTRA: Self = Self::new(4, 10);

    /// Create limits without validating them.
    pub const fn new(min_run: u32, max_run: u32) -> Self {
        Self { min_run, max_run }
    }

    /// Check `1 <= min_run <= max_run`.
    pub fn validate(self) -> Result<Self, SearchError> {
        if self.min_run == 0 || self.min_run > self.max_run {
            return Err(SearchError::InvalidParameters {
                min_run: self.min_run,
                max_run: self.max_run,
            });
        }
        Ok(self)
    }
}

impl Default for RunLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Configuration for a single [`RunSearch`](crate::RunSearch) query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub limits: RunLimits,
    /// Give up with [`SearchError::ExpansionLimit`] once this many states
    /// have been finalized. `None` searches until the frontier is empty.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Unbounded search with the given limits.
    pub const fn new(limits: RunLimits) -> Self {
        Self {
            limits,
            max_expansions: None,
        }
    }

    /// Replace the run limits.
    pub const fn with_limits(mut self, limits: RunLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Cap the number of finalized states.
    pub const fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }
}

impl From<RunLimits> for SearchConfig {
    fn from(limits: RunLimits) -> Self {
        Self::new(limits)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let c = SearchConfig::new(RunLimits::ULTRA).with_max_expansions(1000);
        let json = serde_json::to_string(&c).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn limits_from_json() {
        let l: RunLimits = serde_json::from_str(r#"{"min_run":2,"max_run":5}"#).unwrap();
        assert_eq!(l, RunLimits::new(2, 5));
    }
}
