use super::Error;

/// Error created from free-form format arguments via `bail!`/`err!`.
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an ad-hoc error from format arguments.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(super::ErrorKind::Adhoc(AdhocError {
            message: match args.as_str() {
                Some(s) => s.into(),
                None => std::fmt::format(args).into(),
            },
        }))
    }

    /// Creates an ad-hoc error from a message.
    pub fn msg(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Adhoc(AdhocError {
            message: message.into().into(),
        }))
    }
}
