use super::Error;

/// A field-level validation failure carried as an error value.
///
/// The engine never raises these during `valid?`; they exist so that
/// node-defined write logic can fail with a field and message that the
/// preserve mechanism turns back into an entry in the node's error
/// collection.
#[derive(Debug)]
pub(super) struct ValidationError {
    field: Box<str>,
    message: Box<str>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

impl Error {
    /// Creates a validation error for a field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError {
            field: field.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }

    /// Returns the `(field, message)` pair when this error is a validation
    /// error.
    pub fn validation_parts(&self) -> Option<(&str, &str)> {
        match self.kind() {
            super::ErrorKind::Validation(err) => Some((&err.field, &err.message)),
            _ => None,
        }
    }
}
