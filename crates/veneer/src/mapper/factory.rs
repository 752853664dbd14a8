use super::{Mapper, Node, NodeId, Options};
use crate::blueprint::{BlueprintRef, MountKind, MountingBlueprint, SaveOrder, TargetSource};

use veneer_core::{Error, Relation, Result, TargetRef};

use tracing::debug;

/// Everything needed to materialize one node, captured before recursion so
/// no references into the growing arena are held across pushes.
struct NodeSpec {
    blueprint: BlueprintRef,
    target: TargetRef,
    traits: Vec<String>,
    owner: Option<NodeId>,
    host: Option<NodeId>,
    name: Option<String>,
    trait_name: Option<String>,
    suffix: Option<String>,
    save_order: SaveOrder,
    extension: Option<BlueprintRef>,
    is_extension: bool,
}

pub(crate) fn build_tree(
    blueprint: &BlueprintRef,
    target: TargetRef,
    options: Options,
) -> Result<Mapper> {
    let mut known = Vec::new();
    blueprint.known_traits(&mut known);
    if let Some(extension) = &options.extension {
        extension.known_traits(&mut known);
    }
    for requested in &options.traits {
        if !known.contains(requested) {
            return Err(Error::unknown_trait(requested));
        }
    }

    let mut nodes = Vec::new();
    build_node(
        &mut nodes,
        NodeSpec {
            blueprint: blueprint.clone(),
            target,
            traits: dedup(options.traits),
            owner: None,
            host: None,
            name: None,
            trait_name: None,
            suffix: None,
            save_order: SaveOrder::After,
            extension: options.extension,
            is_extension: false,
        },
    )?;

    Ok(Mapper { nodes })
}

fn build_node(nodes: &mut Vec<Node>, spec: NodeSpec) -> Result<NodeId> {
    let id = NodeId(nodes.len());

    debug!(
        blueprint = %spec.blueprint.name,
        node = id.0,
        traits = ?spec.traits,
        owned = spec.owner.is_some(),
        "materializing node"
    );

    let blueprint = spec.blueprint.clone();
    let target = spec.target.clone();
    let traits = spec.traits.clone();
    let suffix = spec.suffix.clone();
    let extension = spec.extension.clone();

    let mut node = Node::new(spec.blueprint, spec.target, spec.traits);
    node.owner = spec.owner;
    node.host = spec.host;
    node.name = spec.name;
    node.trait_name = spec.trait_name;
    node.suffix = spec.suffix;
    node.save_order = spec.save_order;
    node.is_extension = spec.is_extension;
    nodes.push(node);

    // The host a child sees: this node unless it is itself a trait, in
    // which case the ultimate non-trait ancestor it already resolved.
    let child_host = if nodes[id.0].owner.is_some() {
        nodes[id.0].host
    } else {
        Some(id)
    };

    let mut children = Vec::new();
    for mounting in &blueprint.mountings {
        match mounting.kind {
            MountKind::Trait => {
                if !mounting.required_for(&traits) {
                    continue;
                }
                // A trait is part of its parent: it adopts the parent's
                // target and suffix, and propagates the full active set.
                let child = build_node(
                    nodes,
                    NodeSpec {
                        blueprint: mounting.child.clone(),
                        target: target.clone(),
                        traits: traits.clone(),
                        owner: Some(id),
                        host: child_host,
                        name: None,
                        trait_name: Some(mounting.name.clone()),
                        suffix: suffix.clone(),
                        save_order: SaveOrder::After,
                        extension: None,
                        is_extension: false,
                    },
                )?;
                children.push(child);
            }
            MountKind::Mounting => {
                for declared in &mounting.traits {
                    let mut child_known = Vec::new();
                    mounting.child.known_traits(&mut child_known);
                    if !child_known.contains(declared) {
                        return Err(Error::unknown_trait(declared));
                    }
                }

                let (child_target, relation) = resolve_target(&target, mounting)?;
                let child_suffix = mounting.suffix.clone().or_else(|| suffix.clone());
                let name = match &child_suffix {
                    Some(s) => format!("{}_{}", mounting.name, s),
                    None => mounting.name.clone(),
                };
                let save_order = mounting.save_order.unwrap_or(match relation {
                    Some(rel) if rel.kind.is_required() => SaveOrder::Before,
                    _ => SaveOrder::After,
                });

                let child = build_node(
                    nodes,
                    NodeSpec {
                        blueprint: mounting.child.clone(),
                        target: child_target,
                        traits: merge_traits(&mounting.traits, &traits),
                        owner: None,
                        host: child_host,
                        name: Some(name),
                        trait_name: None,
                        suffix: child_suffix,
                        save_order,
                        extension: mounting.extension.clone(),
                        is_extension: false,
                    },
                )?;
                children.push(child);
            }
        }
    }

    // The inline extension fragment mounts last, as an owned singleton.
    if let Some(fragment) = extension {
        let child = build_node(
            nodes,
            NodeSpec {
                blueprint: fragment,
                target: target.clone(),
                traits: traits.clone(),
                owner: Some(id),
                host: child_host,
                name: None,
                trait_name: None,
                suffix: suffix.clone(),
                save_order: SaveOrder::After,
                extension: None,
                is_extension: true,
            },
        )?;
        children.push(child);
    }

    nodes[id.0].children = children;
    Ok(id)
}

/// Resolve a mounting's backing target against the parent's.
///
/// An explicit source always wins over relation inference; relation
/// inference always wins over the name-accessor fallback.
fn resolve_target(
    parent: &TargetRef,
    mounting: &MountingBlueprint,
) -> Result<(TargetRef, Option<Relation>)> {
    let relation = parent.relation(&mounting.name);

    let target = match &mounting.target {
        TargetSource::Value(target) => Some(target.clone()),
        TargetSource::FromParent(f) => f(parent),
        TargetSource::ParentAccessor(name) => parent.fetch(name),
        TargetSource::Infer => match relation {
            // A plural relation always contributes a brand-new member,
            // never an existing one.
            Some(rel) if rel.is_plural() => parent.build_related(&mounting.name),
            Some(rel) if rel.effective => parent.related(&mounting.name),
            Some(_) => parent
                .related(&mounting.name)
                .or_else(|| parent.build_related(&mounting.name)),
            None if mounting.mandatory_relation => {
                return Err(Error::missing_relation(&mounting.name));
            }
            None => parent.fetch(&mounting.name).or_else(|| {
                mounting
                    .child
                    .target_class
                    .as_ref()
                    .map(|class| class.build())
            }),
        },
    };

    let target =
        target.ok_or_else(|| Error::missing_target(format!("mounting `{}`", mounting.name)))?;
    Ok((target, relation))
}

fn dedup(traits: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(traits.len());
    for t in traits {
        if !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

fn merge_traits(declared: &[String], extra: &[String]) -> Vec<String> {
    dedup(declared.iter().chain(extra).cloned().collect())
}
