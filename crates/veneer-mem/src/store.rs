use crate::MemRecord;

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Per-class registry of persisted records, keyed by identity.
#[derive(Default)]
pub(crate) struct Store {
    records: RefCell<IndexMap<String, Rc<MemRecord>>>,
}

impl Store {
    pub(crate) fn insert(&self, id: String, record: Rc<MemRecord>) {
        self.records.borrow_mut().insert(id, record);
    }

    pub(crate) fn find(&self, id: &str) -> Option<Rc<MemRecord>> {
        self.records.borrow().get(id).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.borrow().len()
    }
}
