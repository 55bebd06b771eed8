use std::error::Error;
use std::fmt;

/// An action was not found in the canonical enumeration of a state's legal
/// actions. Always a caller bug: actions must be drawn from the enumeration
/// of the state they are indexed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActionError {
    pub state_key: String,
    pub action: String,
}

impl fmt::Display for UnknownActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Action {} is not legal in state {}",
            self.action, self.state_key
        )
    }
}

impl Error for UnknownActionError {}

/// A previously visited state reported a different legal-action count than
/// the one its value vector was sized to at first visit. Indicates an
/// unstable enumeration upstream; the table fails fast rather than reuse a
/// wrongly sized vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorSizeError {
    pub state_key: String,
    pub recorded: usize,
    pub reported: usize,
}

impl fmt::Display for VectorSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State {} recorded {} actions at first visit but now reports {}",
            self.state_key, self.recorded, self.reported
        )
    }
}

impl Error for VectorSizeError {}
