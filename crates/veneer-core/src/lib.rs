mod error;
pub use error::{Error, IntoError};

mod params;
pub use params::Params;

pub mod target;
pub use target::{Relation, RelationKind, Target, TargetClass, TargetClassRef, TargetRef};

mod value;
pub use value::Value;

/// A Result type alias that uses Veneer's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
