use super::Error;

/// Error when a node is constructed without a backing target.
///
/// A node always wraps exactly one target; every resolution step of a
/// mounting coming up empty, or a root built from a blueprint with no
/// declared target class, lands here.
#[derive(Debug)]
pub(super) struct MissingTargetError {
    context: Box<str>,
}

impl std::error::Error for MissingTargetError {}

impl core::fmt::Display for MissingTargetError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing target: {}", self.context)
    }
}

impl Error {
    /// Creates a missing target error.
    pub fn missing_target(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingTarget(MissingTargetError {
            context: context.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing target error.
    pub fn is_missing_target(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingTarget(_))
    }
}
