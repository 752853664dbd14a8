use super::{Mapper, NodeId};
use crate::blueprint::SaveOrder;

use tracing::debug;

/// Persist a node and its subtree.
///
/// Non-trait children partition into before/after groups around the shallow
/// save of the node's trait closure. Every group member is attempted even
/// when an earlier one fails; only the aggregate boolean reflects failure.
pub(crate) fn save_node(mapper: &Mapper, id: NodeId) -> bool {
    let node = mapper.data(id);

    if node.skipped.get() {
        return true;
    }

    let mut before = vec![];
    let mut after = vec![];
    for &child in &node.children {
        let child_node = mapper.data(child);
        if child_node.owner.is_some() {
            continue;
        }
        match child_node.save_order {
            SaveOrder::Before => before.push(child),
            SaveOrder::After => after.push(child),
        }
    }

    let before_ok = save_group(mapper, &before);
    let self_ok = shallow_save_closure(mapper, id);
    let after_ok = save_group(mapper, &after);

    debug!(node = id.0, before_ok, self_ok, after_ok, "save finished");
    before_ok && self_ok && after_ok
}

fn save_group(mapper: &Mapper, ids: &[NodeId]) -> bool {
    let mut ok = true;
    for &id in ids {
        // Attempt every member; a failure must not leave later siblings'
        // saves and callbacks un-run.
        let saved = save_node(mapper, id);
        ok = ok && saved;
    }
    ok
}

/// Shallow-save the trait closure of `id`: every trait child transitively,
/// then the node itself, each running its own save hooks and persisting its
/// own target with store-side validation skipped.
fn shallow_save_closure(mapper: &Mapper, id: NodeId) -> bool {
    let mut members = vec![];
    collect_closure(mapper, id, &mut members);

    let mut ok = true;
    for &member in &members {
        let saved = shallow_save(mapper, member);
        ok = ok && saved;
    }
    ok
}

fn collect_closure(mapper: &Mapper, id: NodeId, out: &mut Vec<NodeId>) {
    for &child in &mapper.data(id).children {
        if mapper.data(child).owner.is_some() {
            collect_closure(mapper, child, out);
        }
    }
    out.push(id);
}

fn shallow_save(mapper: &Mapper, id: NodeId) -> bool {
    let node = mapper.data(id);

    if node.skipped.get() {
        return true;
    }

    for hook in &node.blueprint.callbacks.before_save {
        if !hook(node) {
            debug!(node = id.0, "save vetoed by before_save hook");
            return false;
        }
    }

    let persisted = node.target.save(true);
    if persisted {
        for hook in &node.blueprint.callbacks.after_save {
            hook(node);
        }
    }
    persisted
}
