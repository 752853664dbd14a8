/// Relationship reflection descriptor returned by [`Target::relation`].
///
/// [`Target::relation`]: super::Target::relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,

    /// Singular relations may carry a "current/effective" marker: resolution
    /// goes through the effective accessor instead of existing-or-build.
    pub effective: bool,
}

/// The closed set of relationship kinds the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Has-one-like: at most one related object, owned by this side.
    Singular,

    /// Belongs-to-like: the related object must exist before this side can
    /// reference it, so it saves first.
    SingularRequired,

    /// Has-many-like: a collection of related objects.
    Plural,
}

impl Relation {
    pub fn singular() -> Self {
        Self {
            kind: RelationKind::Singular,
            effective: false,
        }
    }

    pub fn singular_required() -> Self {
        Self {
            kind: RelationKind::SingularRequired,
            effective: false,
        }
    }

    pub fn plural() -> Self {
        Self {
            kind: RelationKind::Plural,
            effective: false,
        }
    }

    /// Mark the relation as resolving through its effective accessor.
    pub fn with_effective(mut self) -> Self {
        self.effective = true;
        self
    }

    pub fn is_singular(&self) -> bool {
        self.kind.is_singular()
    }

    pub fn is_plural(&self) -> bool {
        self.kind.is_plural()
    }
}

impl RelationKind {
    pub fn is_singular(self) -> bool {
        matches!(self, Self::Singular | Self::SingularRequired)
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::SingularRequired)
    }

    pub fn is_plural(self) -> bool {
        matches!(self, Self::Plural)
    }
}
