use super::BlueprintRef;

use veneer_core::TargetRef;

use std::rc::Rc;

/// Declaration-time record of one mounting: how to resolve the child's
/// backing target, which traits to request on it, and where it saves
/// relative to the parent.
///
/// Traits are mountings too — the child blueprint is then an inline
/// fragment applied to the parent's own target, materialized only when the
/// trait is required for the active trait set.
#[derive(Clone)]
pub struct MountingBlueprint {
    pub(crate) name: String,
    pub(crate) kind: MountKind,
    pub(crate) child: BlueprintRef,
    pub(crate) traits: Vec<String>,
    pub(crate) target: TargetSource,
    pub(crate) save_order: Option<SaveOrder>,
    pub(crate) suffix: Option<String>,
    pub(crate) extension: Option<BlueprintRef>,
    pub(crate) mandatory_relation: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountKind {
    /// Independent child node with its own backing target.
    Mounting,

    /// Owned fragment of the parent, sharing the parent's target.
    Trait,
}

/// Where a non-trait child saves relative to its parent's own target save.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOrder {
    /// The child must exist before the parent can reference it.
    Before,

    /// The child saves once the parent's own save has been attempted.
    After,
}

/// How a mounting resolves the child's backing target.
///
/// An explicit source always wins over relation inference; relation
/// inference always wins over the name-accessor fallback.
#[derive(Clone, Default)]
pub enum TargetSource {
    /// Resolve through the parent target's relationship reflection, falling
    /// back to a zero-arg accessor under the mounting name, then to a fresh
    /// instance of the child's declared target class.
    #[default]
    Infer,

    /// A literal target supplied at declaration time.
    Value(TargetRef),

    /// A function of the parent's target.
    FromParent(Rc<dyn Fn(&TargetRef) -> Option<TargetRef>>),

    /// A named zero-arg accessor resolved on the parent's target.
    ParentAccessor(String),
}

/// Options accepted by [`Builder::mount_with`].
///
/// [`Builder::mount_with`]: super::Builder::mount_with
#[derive(Clone, Default)]
pub struct MountOptions {
    pub(crate) target: TargetSource,
    pub(crate) traits: Vec<String>,
    pub(crate) save_order: Option<SaveOrder>,
    pub(crate) suffix: Option<String>,
    pub(crate) extension: Option<BlueprintRef>,
    pub(crate) mandatory_relation: bool,
}

impl MountOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount over a literal target.
    pub fn target(mut self, target: TargetRef) -> Self {
        self.target = TargetSource::Value(target);
        self
    }

    /// Resolve the target as a function of the parent's target.
    pub fn target_from(
        mut self,
        f: impl Fn(&TargetRef) -> Option<TargetRef> + 'static,
    ) -> Self {
        self.target = TargetSource::FromParent(Rc::new(f));
        self
    }

    /// Resolve the target through a named accessor on the parent's target.
    pub fn target_accessor(mut self, name: impl Into<String>) -> Self {
        self.target = TargetSource::ParentAccessor(name.into());
        self
    }

    /// Request traits on the mounted child.
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.push(name.into());
        self
    }

    /// Force the child's save order instead of inferring it from the
    /// relation kind.
    pub fn save_order(mut self, order: SaveOrder) -> Self {
        self.save_order = Some(order);
        self
    }

    /// Append a suffix to every name reachable through the child.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Graft an inline extension fragment onto the mounted child.
    pub fn extension(mut self, fragment: BlueprintRef) -> Self {
        self.extension = Some(fragment);
        self
    }

    /// Fail construction unless the parent target reflects a relation under
    /// the mounting name.
    pub fn require_relation(mut self) -> Self {
        self.mandatory_relation = true;
        self
    }
}

impl MountingBlueprint {
    /// Whether this blueprint materializes for the active trait set.
    ///
    /// Non-trait mountings always do. A trait is required when its own name
    /// is active, or when any trait nested under it is — activating a deep
    /// trait materializes the whole mounting path down to it.
    pub(crate) fn required_for(&self, active: &[String]) -> bool {
        match self.kind {
            MountKind::Mounting => true,
            MountKind::Trait => {
                active.iter().any(|t| t == &self.name)
                    || self
                        .child
                        .mountings
                        .iter()
                        .filter(|m| m.kind == MountKind::Trait)
                        .any(|m| m.required_for(active))
            }
        }
    }
}

impl std::fmt::Debug for MountingBlueprint {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("MountingBlueprint")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("child", &self.child.name)
            .finish()
    }
}
