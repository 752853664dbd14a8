use crate::{MemRecord, Store};

use veneer_core::{Relation, TargetClass, TargetRef, Value};

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Describes a record shape: its attributes, the keys the store itself
/// requires on save, and its relations to other classes.
///
/// A class is also the factory and registry for its records, so it
/// implements [`TargetClass`] directly.
pub struct MemClass {
    me: Weak<MemClass>,
    name: String,
    attributes: Vec<String>,
    required: Vec<String>,
    relations: RefCell<IndexMap<String, RelationDecl>>,
    store: Store,
}

#[derive(Clone)]
pub(crate) struct RelationDecl {
    pub(crate) relation: Relation,
    pub(crate) class: Weak<MemClass>,
}

/// Builds a [`MemClass`].
pub struct ClassBuilder {
    name: String,
    attributes: Vec<String>,
    required: Vec<String>,
}

impl MemClass {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            attributes: vec![],
            required: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub(crate) fn required(&self) -> &[String] {
        &self.required
    }

    /// Declare a relation to another class. Classes may reference each
    /// other freely; the link is weak.
    pub fn relate(&self, name: impl Into<String>, relation: Relation, class: &Rc<MemClass>) {
        self.relations.borrow_mut().insert(
            name.into(),
            RelationDecl {
                relation,
                class: Rc::downgrade(class),
            },
        );
    }

    pub(crate) fn relation_decl(&self, name: &str) -> Option<RelationDecl> {
        self.relations.borrow().get(name).cloned()
    }

    /// Construct a fresh, unpersisted record of this class.
    pub fn new_record(&self) -> Rc<MemRecord> {
        MemRecord::new(self.me.upgrade().expect("class handle outlives records"))
    }

    pub(crate) fn store(&self) -> &Store {
        &self.store
    }

    /// Number of persisted records, for inspection.
    pub fn count(&self) -> usize {
        self.store.len()
    }
}

impl ClassBuilder {
    /// Declare an attribute.
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    /// Declare an attribute the store refuses to persist blank, unless the
    /// save skips validation.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.attributes.contains(&name) {
            self.attributes.push(name.clone());
        }
        self.required.push(name);
        self
    }

    pub fn build(self) -> Rc<MemClass> {
        Rc::new_cyclic(|me| MemClass {
            me: me.clone(),
            name: self.name,
            attributes: self.attributes,
            required: self.required,
            relations: RefCell::new(IndexMap::new()),
            store: Store::default(),
        })
    }
}

impl TargetClass for MemClass {
    fn build(&self) -> TargetRef {
        self.new_record()
    }

    fn find(&self, id: &Value) -> Option<TargetRef> {
        let record = self.store.find(id.as_str()?)?;
        Some(record as TargetRef)
    }
}
