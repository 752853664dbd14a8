use super::Error;

/// Error when a mounting requires a backing relation that the parent target
/// does not expose.
#[derive(Debug)]
pub(super) struct MissingRelationError {
    mounting: Box<str>,
}

impl std::error::Error for MissingRelationError {}

impl core::fmt::Display for MissingRelationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing required relation: {}", self.mounting)
    }
}

impl Error {
    /// Creates a missing relation error.
    pub fn missing_relation(mounting: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingRelation(MissingRelationError {
            mounting: mounting.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing relation error.
    pub fn is_missing_relation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingRelation(_))
    }
}
