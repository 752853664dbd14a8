mod relation;
pub use relation::{Relation, RelationKind};

use crate::Value;

use std::rc::Rc;

/// Shared handle to a backing target.
///
/// The engine is single-threaded by design, so handles are `Rc` and all
/// target operations take `&self`; implementations supply their own interior
/// mutability.
pub type TargetRef = Rc<dyn Target>;

/// Shared handle to a target class.
pub type TargetClassRef = Rc<dyn TargetClass>;

/// The backing object a node maps.
///
/// This is the engine's sole view of the persistence layer: attribute
/// access, a save capability, identity, lifecycle predicates, and optional
/// relationship reflection. Everything is optional except attribute access
/// and save; the provided defaults describe a target with no relations and
/// no destruction/rollback support.
pub trait Target {
    /// Read an attribute by key. `None` means the target has no such
    /// attribute; a present-but-unset attribute reads as `Value::Null`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write an attribute by key.
    fn set(&self, key: &str, value: Value);

    /// Returns `true` if the target carries an attribute under `key`.
    fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Persist the target. Validation performed by the backing store itself
    /// is skipped when `skip_validation` is set; the engine always sets it,
    /// having aggregated validation beforehand.
    fn save(&self, skip_validation: bool) -> bool;

    /// Returns `true` if the target has never been persisted.
    fn is_new_record(&self) -> bool;

    /// The target's identity key, once persisted.
    fn id(&self) -> Option<Value>;

    /// Mark an unpersisted target so the backing store will not treat it as
    /// a dangling required association.
    fn mark_for_destruction(&self) {}

    /// Clear a previous destruction mark.
    fn clear_destruction_mark(&self) {}

    /// Returns `true` if the target is marked for destruction.
    fn marked_for_destruction(&self) -> bool {
        false
    }

    /// Discard unsaved attribute mutations, restoring the last persisted
    /// state.
    fn rollback(&self) {}

    /// Reflect on a relationship declared under `name`.
    fn relation(&self, name: &str) -> Option<Relation> {
        let _ = name;
        None
    }

    /// The existing related object for a singular relation, or the current
    /// ("effective") one when the relation carries that marker.
    fn related(&self, name: &str) -> Option<TargetRef> {
        let _ = name;
        None
    }

    /// Build a fresh, unpersisted related object: the empty member of a
    /// singular relation or a brand-new member of a plural one.
    fn build_related(&self, name: &str) -> Option<TargetRef> {
        let _ = name;
        None
    }

    /// Zero-arg accessor fallback: resolve `name` to some other target the
    /// object exposes outside of relationship reflection.
    fn fetch(&self, name: &str) -> Option<TargetRef> {
        let _ = name;
        None
    }
}

/// Factory capability for a target type: construct a fresh instance or
/// locate an existing one by identity key.
pub trait TargetClass {
    /// Construct a fresh, unpersisted instance.
    fn build(&self) -> TargetRef;

    /// Locate an existing instance by identity key.
    fn find(&self, id: &Value) -> Option<TargetRef>;
}
