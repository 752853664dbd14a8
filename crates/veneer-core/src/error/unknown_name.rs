use super::Error;

/// Error when a declaration references a name that was never registered:
/// a trait, a mounting, a format transform, a delegating method, or a
/// multiparam composite constructor.
///
/// These are caught at blueprint build time or node construction time and
/// are fatal.
#[derive(Debug)]
pub(super) struct UnknownNameError {
    kind: NameKind,
    name: Box<str>,
}

#[derive(Debug, Clone, Copy)]
pub(super) enum NameKind {
    Trait,
    Mounting,
    Format,
    Method,
    Composite,
}

impl NameKind {
    fn as_str(self) -> &'static str {
        match self {
            NameKind::Trait => "trait",
            NameKind::Mounting => "mounting",
            NameKind::Format => "format",
            NameKind::Method => "method",
            NameKind::Composite => "composite",
        }
    }
}

impl std::error::Error for UnknownNameError {}

impl core::fmt::Display for UnknownNameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown {}: `{}`", self.kind.as_str(), self.name)
    }
}

impl Error {
    fn unknown_name(kind: NameKind, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownName(UnknownNameError {
            kind,
            name: name.into().into(),
        }))
    }

    /// Creates an error for a reference to an undeclared trait.
    pub fn unknown_trait(name: impl Into<String>) -> Error {
        Error::unknown_name(NameKind::Trait, name)
    }

    /// Creates an error for a reference to an undeclared mounting.
    pub fn unknown_mounting(name: impl Into<String>) -> Error {
        Error::unknown_name(NameKind::Mounting, name)
    }

    /// Creates an error for a reference to an unregistered format transform.
    pub fn unknown_format(name: impl Into<String>) -> Error {
        Error::unknown_name(NameKind::Format, name)
    }

    /// Creates an error for a reference to an unregistered delegating method.
    pub fn unknown_method(name: impl Into<String>) -> Error {
        Error::unknown_name(NameKind::Method, name)
    }

    /// Creates an error for a reference to an unregistered composite
    /// constructor.
    pub fn unknown_composite(name: impl Into<String>) -> Error {
        Error::unknown_name(NameKind::Composite, name)
    }

    /// Returns `true` if this error is an unknown name error of any kind.
    pub fn is_unknown_name(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownName(_))
    }
}
