use crate::MemClass;

use veneer_core::{Relation, Target, TargetRef, Value};

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// A mutable record instance.
///
/// Attributes are fixed by the class; identity is assigned on first save.
/// The last persisted attribute set is kept as a snapshot so `rollback` can
/// discard unsaved mutations.
pub struct MemRecord {
    class: Rc<MemClass>,
    me: Weak<MemRecord>,
    state: RefCell<State>,
}

#[derive(Default)]
struct State {
    id: Option<String>,
    attributes: IndexMap<String, Value>,
    snapshot: IndexMap<String, Value>,
    destroy: bool,
    singular: IndexMap<String, Rc<MemRecord>>,
    plural: IndexMap<String, Vec<Rc<MemRecord>>>,
    effective: IndexMap<String, Rc<MemRecord>>,
    links: IndexMap<String, Rc<MemRecord>>,
}

impl MemRecord {
    pub(crate) fn new(class: Rc<MemClass>) -> Rc<Self> {
        let attributes: IndexMap<String, Value> = class
            .attributes()
            .iter()
            .map(|key| (key.clone(), Value::Null))
            .collect();

        Rc::new_cyclic(|me| Self {
            class,
            me: me.clone(),
            state: RefCell::new(State {
                attributes,
                ..State::default()
            }),
        })
    }

    pub fn class(&self) -> &Rc<MemClass> {
        &self.class
    }

    /// Link another record under an accessor name, outside of relationship
    /// reflection; resolved by [`Target::fetch`].
    pub fn link(&self, name: impl Into<String>, record: &Rc<MemRecord>) {
        self.state
            .borrow_mut()
            .links
            .insert(name.into(), record.clone());
    }

    /// Pre-link the existing member of a singular relation.
    pub fn set_related(&self, name: impl Into<String>, record: &Rc<MemRecord>) {
        self.state
            .borrow_mut()
            .singular
            .insert(name.into(), record.clone());
    }

    /// Set the current member resolved by an effective-marked relation.
    pub fn set_effective(&self, name: impl Into<String>, record: &Rc<MemRecord>) {
        self.state
            .borrow_mut()
            .effective
            .insert(name.into(), record.clone());
    }

    /// The linked singular member, for inspection.
    pub fn related_record(&self, name: &str) -> Option<Rc<MemRecord>> {
        self.state.borrow().singular.get(name).cloned()
    }

    /// The built members of a plural relation, for inspection.
    pub fn plural_records(&self, name: &str) -> Vec<Rc<MemRecord>> {
        self.state
            .borrow()
            .plural
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

impl Target for MemRecord {
    fn get(&self, key: &str) -> Option<Value> {
        self.state.borrow().attributes.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let mut state = self.state.borrow_mut();
        if state.attributes.contains_key(key) {
            state.attributes.insert(key.to_string(), value);
        }
    }

    fn save(&self, skip_validation: bool) -> bool {
        let mut state = self.state.borrow_mut();

        if state.destroy {
            return true;
        }

        if !skip_validation {
            for key in self.class.required() {
                match state.attributes.get(key) {
                    Some(Value::Null) | None => return false,
                    Some(Value::String(s)) if s.trim().is_empty() => return false,
                    Some(_) => {}
                }
            }
        }

        let id = state
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        state.snapshot = state.attributes.clone();
        drop(state);

        self.class
            .store()
            .insert(id, self.me.upgrade().expect("record handle"));
        true
    }

    fn is_new_record(&self) -> bool {
        self.state.borrow().id.is_none()
    }

    fn id(&self) -> Option<Value> {
        self.state.borrow().id.clone().map(Value::String)
    }

    fn mark_for_destruction(&self) {
        self.state.borrow_mut().destroy = true;
    }

    fn clear_destruction_mark(&self) {
        self.state.borrow_mut().destroy = false;
    }

    fn marked_for_destruction(&self) -> bool {
        self.state.borrow().destroy
    }

    fn rollback(&self) {
        let mut state = self.state.borrow_mut();
        if state.id.is_some() {
            state.attributes = state.snapshot.clone();
        }
    }

    fn relation(&self, name: &str) -> Option<Relation> {
        self.class.relation_decl(name).map(|decl| decl.relation)
    }

    fn related(&self, name: &str) -> Option<TargetRef> {
        let decl = self.class.relation_decl(name)?;
        let state = self.state.borrow();
        let record = if decl.relation.effective {
            state.effective.get(name)?
        } else {
            state.singular.get(name)?
        };
        Some(record.clone() as TargetRef)
    }

    fn build_related(&self, name: &str) -> Option<TargetRef> {
        let decl = self.class.relation_decl(name)?;
        let class = decl.class.upgrade()?;
        let record = class.new_record();

        let mut state = self.state.borrow_mut();
        if decl.relation.is_plural() {
            state
                .plural
                .entry(name.to_string())
                .or_default()
                .push(record.clone());
        } else {
            state.singular.insert(name.to_string(), record.clone());
        }
        Some(record as TargetRef)
    }

    fn fetch(&self, name: &str) -> Option<TargetRef> {
        let record = self.state.borrow().links.get(name)?.clone();
        Some(record as TargetRef)
    }
}
