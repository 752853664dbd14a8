mod dispatch;
mod factory;
mod multiparam;
mod save;
mod skip;
mod validate;
mod write;

pub(crate) use dispatch::FieldHandle;

use crate::blueprint::{BlueprintRef, SaveOrder};
use crate::errors::Errors;
use crate::mapping::Mapping;

use veneer_core::{Error, Params, Result, TargetRef, Value};

use indexmap::IndexMap;
use std::cell::{Cell, OnceCell, Ref, RefCell};
use std::fmt;

/// Identifies a node within its mapper tree.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);
}

impl fmt::Debug for NodeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "NodeId({})", self.0)
    }
}

/// Construction options: the requested trait set and an optional inline
/// extension fragment grafted onto the root.
#[derive(Clone, Default)]
pub struct Options {
    pub(crate) traits: Vec<String>,
    pub(crate) extension: Option<BlueprintRef>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a trait by name.
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.push(name.into());
        self
    }

    /// Request several traits.
    pub fn with_traits<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traits.extend(names.into_iter().map(Into::into));
        self
    }

    /// Graft an inline extension fragment onto the root node. The fragment
    /// behaves as a singleton trait: always materialized, validated first.
    pub fn extension(mut self, fragment: BlueprintRef) -> Self {
        self.extension = Some(fragment);
        self
    }
}

/// An instantiated mapper tree.
///
/// Nodes live in an arena indexed by [`NodeId`]; owner and host are
/// non-owning back-references into it. The root is always `NodeId(0)`.
pub struct Mapper {
    pub(crate) nodes: Vec<Node>,
}

/// One node of a mapper tree: a blueprint bound to a backing target.
pub struct Node {
    pub(crate) blueprint: BlueprintRef,
    pub(crate) target: TargetRef,
    pub(crate) traits: Vec<String>,

    /// Set iff this node is a trait of some parent ("owned").
    pub(crate) owner: Option<NodeId>,

    /// The ultimate non-trait ancestor that physically contains this node.
    pub(crate) host: Option<NodeId>,

    /// Mounting identifier, suffixed when a suffix applies. Absent for the
    /// root and for traits.
    pub(crate) name: Option<String>,

    /// For traits: the trait name the mounting was declared under.
    pub(crate) trait_name: Option<String>,

    pub(crate) suffix: Option<String>,
    pub(crate) save_order: SaveOrder,
    pub(crate) children: Vec<NodeId>,
    pub(crate) is_extension: bool,

    mappings: OnceCell<Vec<Mapping>>,
    pub(crate) field_index: OnceCell<IndexMap<String, FieldHandle>>,
    pub(crate) skipped: Cell<bool>,
    pub(crate) errors: RefCell<Errors>,
    pub(crate) preserved: RefCell<Vec<(String, String)>>,
}

impl Node {
    pub(crate) fn new(blueprint: BlueprintRef, target: TargetRef, traits: Vec<String>) -> Self {
        Self {
            blueprint,
            target,
            traits,
            owner: None,
            host: None,
            name: None,
            trait_name: None,
            suffix: None,
            save_order: SaveOrder::After,
            children: vec![],
            is_extension: false,
            mappings: OnceCell::new(),
            field_index: OnceCell::new(),
            skipped: Cell::new(false),
            errors: RefCell::new(Errors::new()),
            preserved: RefCell::new(vec![]),
        }
    }

    /// The backing target this node maps.
    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    /// The mounting name, absent for the root and for traits.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// The active trait set this node was constructed with.
    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    /// `true` iff this node is a trait of some parent.
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// The node's mappings, materialized once on first access.
    pub fn mappings(&self) -> &[Mapping] {
        self.mappings.get_or_init(|| {
            self.blueprint
                .mappings
                .iter()
                .map(|decl| Mapping::materialize(decl, self.suffix.as_deref(), &self.blueprint))
                .collect()
        })
    }

    /// Look up one of the node's own mappings by plain or full name.
    pub fn mapping(&self, name: &str) -> Option<&Mapping> {
        self.mappings()
            .iter()
            .find(|m| m.full_name() == name || m.name() == name)
    }

    /// Read one of the node's own fields. `None` when no such mapping
    /// exists or it has no reader.
    pub fn read_field(&self, name: &str) -> Option<Value> {
        self.mapping(name).and_then(|m| m.read(self))
    }

    /// Write one of the node's own fields.
    pub fn write_field(&self, name: &str, value: &Value) -> Result<()> {
        match self.mapping(name) {
            Some(mapping) => mapping.write(self, value),
            None => Err(Error::unknown_field(name)),
        }
    }

    /// Buffer a preserved field error; merged into the error collection on
    /// the next validation pass, exactly once.
    pub(crate) fn preserve_error(&self, field: impl Into<String>, message: impl Into<String>) {
        self.preserved
            .borrow_mut()
            .push((field.into(), message.into()));
    }
}

impl Mapper {
    /// Construct a root node over a fresh target built from the blueprint's
    /// target class.
    pub fn build(blueprint: &BlueprintRef) -> Result<Self> {
        Self::build_with(blueprint, Options::new())
    }

    pub fn build_with(blueprint: &BlueprintRef, options: Options) -> Result<Self> {
        let class = blueprint.target_class.as_ref().ok_or_else(|| {
            Error::missing_target(format!("blueprint `{}` has no target class", blueprint.name))
        })?;
        let target = class.build();
        Self::wrap_with(blueprint, target, options)
    }

    /// Construct a root node over an existing record located by identity
    /// key.
    pub fn find(blueprint: &BlueprintRef, id: &Value) -> Result<Self> {
        Self::find_with(blueprint, id, Options::new())
    }

    pub fn find_with(blueprint: &BlueprintRef, id: &Value, options: Options) -> Result<Self> {
        let class = blueprint.target_class.as_ref().ok_or_else(|| {
            Error::missing_target(format!("blueprint `{}` has no target class", blueprint.name))
        })?;
        let target = class
            .find(id)
            .ok_or_else(|| Error::record_not_found(format!("blueprint `{}`", blueprint.name)))?;
        Self::wrap_with(blueprint, target, options)
    }

    /// Construct a root node over a caller-supplied target.
    pub fn wrap(blueprint: &BlueprintRef, target: TargetRef) -> Result<Self> {
        Self::wrap_with(blueprint, target, Options::new())
    }

    pub fn wrap_with(blueprint: &BlueprintRef, target: TargetRef, options: Options) -> Result<Self> {
        factory::build_tree(blueprint, target, options)
    }

    /// Handle on the root node.
    pub fn root(&self) -> NodeRef<'_> {
        self.node(NodeId::ROOT)
    }

    /// Handle on an arbitrary node.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "invalid node ID");
        NodeRef { mapper: self, id }
    }

    pub(crate) fn data(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Read the whole tree into one flat map.
    pub fn read(&self) -> Params {
        self.root().read()
    }

    /// Distribute a flat map across the whole tree.
    pub fn write(&self, params: &mut Params) -> Result<()> {
        self.root().write(params)
    }

    /// Validate the whole tree, consolidating errors bottom-up.
    pub fn valid(&self) -> bool {
        self.root().valid()
    }

    /// Persist the whole tree in before/self/after order.
    pub fn save(&self) -> bool {
        self.root().save()
    }

    /// `write`, then `valid && save`.
    pub fn apply(&self, params: Params) -> Result<bool> {
        self.root().apply(params)
    }

    /// The root node's consolidated error collection.
    pub fn errors(&self) -> Ref<'_, Errors> {
        self.root().errors()
    }

    pub fn get_field(&self, name: &str) -> Result<Value> {
        self.root().get_field(name)
    }

    pub fn set_field(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.root().set_field(name, value)
    }

    pub fn responds_to(&self, name: &str) -> bool {
        self.root().responds_to(name)
    }

    /// Look up a mounted child node by name, searching the whole tree in
    /// declaration order.
    pub fn mounting(&self, name: &str) -> Result<NodeRef<'_>> {
        self.root().mounting(name)
    }

    /// Look up a materialized trait node by trait name.
    pub fn trait_node(&self, name: &str) -> Result<NodeRef<'_>> {
        self.root().trait_node(name)
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Mapper")
            .field("blueprint", &self.nodes[0].blueprint.name)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// Borrowed handle on one node of a mapper tree; every aggregate operation
/// is available on any node, scoped to its subtree.
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    mapper: &'a Mapper,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'a Node {
        self.mapper.data(self.id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.data().name.as_deref()
    }

    pub fn suffix(&self) -> Option<&'a str> {
        self.data().suffix.as_deref()
    }

    pub fn target(&self) -> &'a TargetRef {
        &self.data().target
    }

    /// `true` iff this node is a trait of some parent.
    pub fn is_trait(&self) -> bool {
        self.data().owner.is_some()
    }

    /// The node owning this trait, when there is one.
    pub fn owner(&self) -> Option<NodeRef<'a>> {
        self.data().owner.map(|id| self.mapper.node(id))
    }

    /// The ultimate non-trait ancestor physically containing this node.
    pub fn host(&self) -> Option<NodeRef<'a>> {
        self.data().host.map(|id| self.mapper.node(id))
    }

    pub fn save_order(&self) -> SaveOrder {
        self.data().save_order
    }

    pub fn is_skipped(&self) -> bool {
        self.data().skipped.get()
    }

    /// Non-trait children, in mounting order.
    pub fn mountings(&self) -> Vec<NodeRef<'a>> {
        self.data()
            .children
            .iter()
            .filter(|&&c| self.mapper.data(c).owner.is_none())
            .map(|&c| self.mapper.node(c))
            .collect()
    }

    /// Trait children, in mounting order.
    pub fn trait_children(&self) -> Vec<NodeRef<'a>> {
        self.data()
            .children
            .iter()
            .filter(|&&c| self.mapper.data(c).owner.is_some())
            .map(|&c| self.mapper.node(c))
            .collect()
    }

    /// Read this subtree into one flat map: own mappings first, then each
    /// child in order; children win on key collision.
    pub fn read(&self) -> Params {
        let node = self.data();
        let mut out = Params::new();
        for mapping in node.mappings() {
            out.merge(mapping.read_as_params(node));
        }
        for &child in &node.children {
            out.merge(self.mapper.node(child).read());
        }
        out
    }

    /// Distribute the flat map across this subtree. Every node receives the
    /// same full map; multiparam fragments are extracted in place first.
    pub fn write(&self, params: &mut Params) -> Result<()> {
        write::write_node(self.mapper, self.id, params)
    }

    /// Validate this subtree, consolidating every descendant's errors into
    /// this node's collection.
    pub fn valid(&self) -> bool {
        validate::validate_node(self.mapper, self.id)
    }

    /// Persist this subtree: before-group, trait closure of self, then
    /// after-group. Every sibling is attempted even after a failure.
    pub fn save(&self) -> bool {
        save::save_node(self.mapper, self.id)
    }

    /// `write`, then `valid && save`.
    pub fn apply(&self, mut params: Params) -> Result<bool> {
        self.write(&mut params)?;
        Ok(self.valid() && self.save())
    }

    /// The node's consolidated error collection, as of the last `valid`.
    pub fn errors(&self) -> Ref<'a, Errors> {
        self.data().errors.borrow()
    }

    /// Temporarily excise this subtree from validation and save.
    pub fn skip(&self) {
        skip::skip_node(self.mapper, self.id);
    }

    /// Undo [`NodeRef::skip`], re-activating nested mountings of persisted
    /// targets.
    pub fn unskip(&self) {
        skip::unskip_node(self.mapper, self.id);
    }

    /// Read a field anywhere in this subtree by full name.
    pub fn get_field(&self, name: &str) -> Result<Value> {
        dispatch::get_field(self.mapper, self.id, name)
    }

    /// Write a field anywhere in this subtree by full name. Writing into a
    /// skipped node un-skips it first.
    pub fn set_field(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        dispatch::set_field(self.mapper, self.id, name, value.into())
    }

    /// Whether a field under this name is reachable from this node.
    pub fn responds_to(&self, name: &str) -> bool {
        dispatch::responds_to(self.mapper, self.id, name)
    }

    /// Find a mounted child by name, depth-first in declaration order.
    pub fn mounting(&self, name: &str) -> Result<NodeRef<'a>> {
        self.find_mounting(name)
            .ok_or_else(|| Error::unknown_mounting(name))
    }

    fn find_mounting(&self, name: &str) -> Option<NodeRef<'a>> {
        for &child in &self.data().children {
            let child = self.mapper.node(child);
            if !child.is_trait() && child.name() == Some(name) {
                return Some(child);
            }
            if let Some(found) = child.find_mounting(name) {
                return Some(found);
            }
        }
        None
    }

    /// Find a materialized trait node by trait name, depth-first.
    pub fn trait_node(&self, name: &str) -> Result<NodeRef<'a>> {
        self.find_trait(name)
            .ok_or_else(|| Error::unknown_trait(name))
    }

    fn find_trait(&self, name: &str) -> Option<NodeRef<'a>> {
        for &child in &self.data().children {
            let child = self.mapper.node(child);
            if child.data().trait_name.as_deref() == Some(name) {
                return Some(child);
            }
            if let Some(found) = child.find_trait(name) {
                return Some(found);
            }
        }
        None
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("blueprint", &self.data().blueprint.name)
            .field("name", &self.data().name)
            .finish()
    }
}
