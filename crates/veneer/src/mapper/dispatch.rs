use super::{skip, Mapper, NodeId};

use veneer_core::{Error, Result, Value};

use indexmap::IndexMap;

/// Names never subject to field dispatch: the node's own surface, plus the
/// reserved params-coercion name.
const RESERVED: &[&str] = &["target", "errors", "mappings", "mountings", "to_params"];

/// Where a dispatched field lives: the node and the position of the mapping
/// in its mapping list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldHandle {
    node: NodeId,
    index: usize,
}

/// The subtree field index, built once per node on first dynamic access.
///
/// Own mappings index first, then each child's depth-first in mounting
/// order; the first occurrence of a name wins, so dispatch forwards to the
/// first node that understands it.
fn index<'a>(mapper: &'a Mapper, id: NodeId) -> &'a IndexMap<String, FieldHandle> {
    mapper.data(id).field_index.get_or_init(|| {
        let mut map = IndexMap::new();
        collect(mapper, id, &mut map);
        map
    })
}

fn collect(mapper: &Mapper, id: NodeId, map: &mut IndexMap<String, FieldHandle>) {
    let node = mapper.data(id);
    for (i, mapping) in node.mappings().iter().enumerate() {
        map.entry(mapping.full_name().to_string())
            .or_insert(FieldHandle { node: id, index: i });
    }
    for &child in &node.children {
        collect(mapper, child, map);
    }
}

pub(crate) fn responds_to(mapper: &Mapper, id: NodeId, name: &str) -> bool {
    !RESERVED.contains(&name) && index(mapper, id).contains_key(name)
}

pub(crate) fn get_field(mapper: &Mapper, id: NodeId, name: &str) -> Result<Value> {
    let handle = lookup(mapper, id, name)?;
    let node = mapper.data(handle.node);
    Ok(node.mappings()[handle.index]
        .read(node)
        .unwrap_or(Value::Null))
}

pub(crate) fn set_field(mapper: &Mapper, id: NodeId, name: &str, value: Value) -> Result<()> {
    let handle = lookup(mapper, id, name)?;

    // A direct write implies intent to use the node.
    if mapper.data(handle.node).skipped.get() {
        skip::unskip_node(mapper, handle.node);
    }

    let node = mapper.data(handle.node);
    let mapping = &node.mappings()[handle.index];
    match mapping.write(node, &value) {
        Err(err) if mapping.preserve() => {
            let (field, message) = match err.validation_parts() {
                Some((field, message)) => (field.to_string(), message.to_string()),
                None => (mapping.full_name().to_string(), err.to_string()),
            };
            node.preserve_error(field, message);
            Ok(())
        }
        other => other,
    }
}

fn lookup(mapper: &Mapper, id: NodeId, name: &str) -> Result<FieldHandle> {
    if RESERVED.contains(&name) {
        return Err(Error::unknown_field(name));
    }
    index(mapper, id)
        .get(name)
        .copied()
        .ok_or_else(|| Error::unknown_field(name))
}
