use super::{Mapper, NodeId};
use crate::errors::{suffixed_key, Errors};

/// Validate a node and its subtree, consolidating every descendant's errors
/// into the node's collection.
///
/// Trait children run before the node's own rules so any defaulting they
/// perform is visible to them, with inline extension fragments first among
/// the traits; their errors merge un-namespaced, they are conceptually the
/// host's own. Non-trait children run last and arrive already rewritten
/// under their suffixed names.
pub(crate) fn validate_node(mapper: &Mapper, id: NodeId) -> bool {
    let node = mapper.data(id);

    if node.skipped.get() {
        node.errors.borrow_mut().clear();
        return true;
    }
    node.errors.borrow_mut().clear();

    let mut owned: Vec<NodeId> = node
        .children
        .iter()
        .copied()
        .filter(|&child| mapper.data(child).owner.is_some())
        .collect();
    // Extensions take precedence over named traits.
    owned.sort_by_key(|&child| !mapper.data(child).is_extension);

    for &child in &owned {
        validate_node(mapper, child);
        let child_errors = mapper.data(child).errors.borrow().clone();
        node.errors.borrow_mut().merge(&child_errors);
    }

    for hook in &node.blueprint.callbacks.before_validate {
        hook(node);
    }

    let mut own = Errors::new();
    for validation in &node.blueprint.validations {
        validation.apply(node, &mut own);
    }

    // Preserved write errors merge exactly once, then the buffer clears.
    for (field, message) in node.preserved.borrow_mut().drain(..) {
        own.add(field, message);
    }

    {
        let mut errors = node.errors.borrow_mut();
        for (key, messages) in own.iter() {
            let key = suffixed_key(key, node.suffix.as_deref());
            for message in messages {
                errors.add(key.clone(), message.clone());
            }
        }
    }

    for &child in &node.children {
        if mapper.data(child).owner.is_some() {
            continue;
        }
        validate_node(mapper, child);
        let child_errors = mapper.data(child).errors.borrow().clone();
        node.errors.borrow_mut().merge(&child_errors);
    }

    node.errors.borrow().is_empty()
}
