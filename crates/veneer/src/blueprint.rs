mod builder;
pub use builder::Builder;

mod mapping;
pub use mapping::{MappingBlueprint, MappingOptions, ReaderSpec, WriterSpec};

mod mounting;
pub use mounting::{MountKind, MountOptions, MountingBlueprint, SaveOrder, TargetSource};

mod registry;
pub use registry::{
    CallbackReaderFn, CallbackWriterFn, CompositeFn, FormatFn, MethodReaderFn, MethodWriterFn,
};
pub(crate) use registry::{Composites, Formats, Methods};

use crate::validation::{Callbacks, Validation};

use veneer_core::TargetClassRef;

use std::rc::Rc;

/// Shared handle to a blueprint. Blueprints are immutable once built and
/// freely shared between the mountings that reference them.
pub type BlueprintRef = Rc<Blueprint>;

/// Declaration-time record of a node class: its mappings, its mountings
/// (trait fragments included), its validations and hooks, and the named
/// registries mapping strategies resolve against.
///
/// Created once per node class via [`Blueprint::builder`]; subtypes copy
/// then append via [`Builder::extend`]. Nothing here is mutated after
/// `build()` returns.
pub struct Blueprint {
    pub(crate) name: String,
    pub(crate) target_class: Option<TargetClassRef>,
    pub(crate) mappings: Vec<MappingBlueprint>,
    pub(crate) mountings: Vec<MountingBlueprint>,
    pub(crate) validations: Vec<Validation>,
    pub(crate) callbacks: Callbacks,
    pub(crate) methods: Methods,
    pub(crate) formats: Formats,
    pub(crate) composites: Composites,
}

impl Blueprint {
    /// Start declaring a new node class.
    pub fn builder(name: impl Into<String>) -> Builder {
        Builder::new(name.into())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn mounting(&self, name: &str) -> Option<&MountingBlueprint> {
        self.mountings.iter().find(|m| m.name == name)
    }

    /// Every trait name reachable from this blueprint, transitively.
    ///
    /// Requested trait sets are checked against this universe at node
    /// construction time; a name outside it can never match anything and is
    /// reported instead of silently ignored.
    pub(crate) fn known_traits(&self, out: &mut Vec<String>) {
        for mounting in &self.mountings {
            if mounting.kind == MountKind::Trait {
                out.push(mounting.name.clone());
            }
            mounting.child.known_traits(out);
        }
    }
}

impl std::fmt::Debug for Blueprint {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Blueprint")
            .field("name", &self.name)
            .field("mappings", &self.mappings.len())
            .field("mountings", &self.mountings.len())
            .finish()
    }
}
