//! Display formatting for member names and timestamps.

use chrono::format::{Item, StrftimeItems};

use crate::error::CoreError;
use crate::types::{Member, Timestamp};

/// Default date/time pattern for approval times and modification dates.
pub const DEFAULT_DATETIME_FORMAT: &str = "%d %B %Y, %I:%M %p";

/// Placeholder shown where no timestamp exists.
pub const NO_TIME: &str = "-";

/// Formats values for presentation. Injected into the aggregator and the
/// table renderer so neither depends on a locale source.
pub trait DisplayFormatter: Send + Sync {
    fn date_time(&self, at: Timestamp) -> String;

    fn display_name(&self, member: &Member) -> String;
}

/// strftime-based formatter rendering UTC timestamps.
#[derive(Debug, Clone)]
pub struct StrftimeDisplay {
    pattern: String,
}

impl StrftimeDisplay {
    /// Build a formatter, rejecting patterns chrono cannot render.
    pub fn new(pattern: impl Into<String>) -> Result<Self, CoreError> {
        let pattern = pattern.into();
        if pattern.is_empty() || StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(CoreError::Validation(format!(
                "Invalid date/time format '{pattern}'"
            )));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for StrftimeDisplay {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl DisplayFormatter for StrftimeDisplay {
    fn date_time(&self, at: Timestamp) -> String {
        at.format(&self.pattern).to_string()
    }

    fn display_name(&self, member: &Member) -> String {
        format!("{} {}", member.first_name, member.last_name)
            .trim()
            .to_string()
    }
}
