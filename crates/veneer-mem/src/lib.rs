//! In-memory implementation of the veneer target boundary.
//!
//! `MemClass` describes a record shape (attributes, required keys,
//! relations); `MemRecord` is a mutable record instance with uuid identity,
//! snapshot/rollback, and destruction marks. Classes double as factories
//! and `find` registries, so a mapper can run end-to-end against this crate
//! with no external store.

mod class;
pub use class::{ClassBuilder, MemClass};

mod record;
pub use record::MemRecord;

mod store;
pub(crate) use store::Store;
