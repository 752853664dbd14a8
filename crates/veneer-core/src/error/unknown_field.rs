use super::Error;

/// Error when dynamic dispatch cannot resolve a field name anywhere in a
/// node's subtree, or the name is reserved and never dispatched.
#[derive(Debug)]
pub(super) struct UnknownFieldError {
    name: Box<str>,
}

impl std::error::Error for UnknownFieldError {}

impl core::fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown field: `{}`", self.name)
    }
}

impl Error {
    /// Creates an unknown field error.
    pub fn unknown_field(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownField(UnknownFieldError {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown field error.
    pub fn is_unknown_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownField(_))
    }
}
