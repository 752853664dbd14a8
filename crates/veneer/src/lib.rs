//! Veneer presents a deep graph of backing records as one flat surface of
//! named fields, and distributes flat input back down into the graph.
//!
//! A [`Blueprint`] declares, once per node class, which fields a node maps
//! and which child nodes it mounts; a [`Mapper`] instantiates a blueprint
//! over a concrete backing target, conditionally materializing trait
//! fragments for the requested trait set, and answers `read`, `write`,
//! `valid`, and `save` by recursive aggregation over the resulting tree.

pub mod blueprint;
pub use blueprint::{
    Blueprint, BlueprintRef, Builder, MappingOptions, MountOptions, SaveOrder, TargetSource,
};

mod errors;
pub use errors::Errors;

mod mapping;
pub use mapping::Mapping;

pub mod mapper;
pub use mapper::{Mapper, Node, NodeId, NodeRef, Options};

pub mod validation;
pub use validation::Validation;

pub use veneer_core::{
    target, Error, Params, Relation, RelationKind, Result, Target, TargetClass, TargetClassRef,
    TargetRef, Value,
};
