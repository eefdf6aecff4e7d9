use thiserror::Error;

/// Failures while assembling the exclusion calendar.
///
/// Both variants propagate unchanged from the holiday provider up through
/// the evaluator; nothing in the crate retries or degrades to a partial
/// calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The holiday provider could not be reached, timed out, or answered
    /// with a non-success status.
    #[error("holiday provider request failed: {0}")]
    Network(String),
    /// The provider answered, but not with the expected record shape.
    #[error("holiday provider response could not be parsed: {0}")]
    Parse(String),
}

impl CalendarError {
    pub fn is_network(&self) -> bool {
        matches!(self, CalendarError::Network(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, CalendarError::Parse(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            CalendarError::Network(_) => "NETWORK_ERROR",
            CalendarError::Parse(_) => "PARSE_ERROR",
        }
    }
}

impl From<reqwest::Error> for CalendarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CalendarError::Parse(err.to_string())
        } else {
            CalendarError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CalendarError {
    fn from(err: serde_json::Error) -> Self {
        CalendarError::Parse(err.to_string())
    }
}
