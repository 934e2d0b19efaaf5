//! Queue state value object

use serde::{Serialize, Serializer};

/// Lifecycle state of a queue.
///
/// Values outside `RUNNING`/`STOPPED` are kept verbatim in `Other` so the
/// state rule can report them instead of the parser silently fixing them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum QueueState {
    #[default]
    Running,
    Stopped,
    Other(String),
}

impl QueueState {
    /// Parse a state string (case-insensitive, surrounding whitespace ignored).
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "RUNNING" => QueueState::Running,
            "STOPPED" => QueueState::Stopped,
            _ => QueueState::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            QueueState::Running => "RUNNING",
            QueueState::Stopped => "STOPPED",
            QueueState::Other(raw) => raw,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, QueueState::Other(_))
    }

    pub fn is_running(&self) -> bool {
        matches!(self, QueueState::Running)
    }
}

impl std::fmt::Display for QueueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for QueueState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_running() {
        assert_eq!(QueueState::default(), QueueState::Running);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(QueueState::parse("running"), QueueState::Running);
        assert_eq!(QueueState::parse(" STOPPED "), QueueState::Stopped);
    }

    #[test]
    fn unknown_state_is_preserved() {
        let state = QueueState::parse("DRAINING");
        assert_eq!(state, QueueState::Other("DRAINING".to_string()));
        assert!(!state.is_valid());
        assert_eq!(state.as_str(), "DRAINING");
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&QueueState::Stopped).unwrap();
        assert_eq!(json, r#""STOPPED""#);
    }
}
