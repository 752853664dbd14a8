use super::{Mapper, NodeId};

use tracing::debug;

/// Excise a node from validation and save.
///
/// An unpersisted target is marked for destruction so the backing store
/// does not treat it as a dangling required association; a persisted one
/// instead discards its in-memory mutations.
pub(crate) fn skip_node(mapper: &Mapper, id: NodeId) {
    let node = mapper.data(id);

    node.skipped.set(true);
    if node.target.is_new_record() {
        node.target.mark_for_destruction();
    } else {
        node.target.rollback();
    }
    node.errors.borrow_mut().clear();
    node.preserved.borrow_mut().clear();

    debug!(node = id.0, "node skipped");
}

/// Undo a skip: clear the flag and destruction mark, and re-activate every
/// nested mounting of a persisted target.
pub(crate) fn unskip_node(mapper: &Mapper, id: NodeId) {
    let node = mapper.data(id);

    node.skipped.set(false);
    node.target.clear_destruction_mark();

    if !node.target.is_new_record() {
        for &child in &node.children {
            unskip_node(mapper, child);
        }
    }

    debug!(node = id.0, "node back in use");
}
