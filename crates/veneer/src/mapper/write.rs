use super::{multiparam, skip, Mapper, NodeId};

use veneer_core::{err, Params, Result};

pub(crate) fn write_node(mapper: &Mapper, id: NodeId, params: &mut Params) -> Result<()> {
    let node = mapper.data(id);

    multiparam::extract(node, params);

    // A write addressing one of this node's own fields expresses intent to
    // use the node.
    if node.skipped.get()
        && node
            .mappings()
            .iter()
            .any(|m| params.contains_key(m.full_name()))
    {
        skip::unskip_node(mapper, id);
    }

    for mapping in node.mappings() {
        if let Err(err) = mapping.write_from_params(node, params) {
            if mapping.preserve() {
                let (field, message) = match err.validation_parts() {
                    Some((field, message)) => (field.to_string(), message.to_string()),
                    None => (mapping.full_name().to_string(), err.to_string()),
                };
                node.preserve_error(field, message);
            } else {
                return Err(err.context(err!("failed to write `{}`", mapping.full_name())));
            }
        }
    }

    // Every child receives the same full flat map.
    for &child in &node.children {
        write_node(mapper, child, params)?;
    }

    Ok(())
}
