use crate::mapper::Node;
use crate::mapping::Mapping;

use veneer_core::{Result, TargetRef, Value};

use indexmap::IndexMap;
use std::rc::Rc;

/// Delegating reader: node-defined logic fully controls the read.
pub type MethodReaderFn = Rc<dyn Fn(&Node, &Mapping) -> Value>;

/// Delegating writer: node-defined logic fully controls the write.
pub type MethodWriterFn = Rc<dyn Fn(&Node, &Mapping, &Value) -> Result<()>>;

/// Callback reader: receives the backing target directly.
pub type CallbackReaderFn = Rc<dyn Fn(&TargetRef) -> Value>;

/// Callback writer: receives the backing target and the value.
pub type CallbackWriterFn = Rc<dyn Fn(&TargetRef, &Value) -> Result<()>>;

/// Post-processing transform for formatted readers; extra declaration-time
/// arguments are forwarded as the second parameter.
pub type FormatFn = Rc<dyn Fn(&Value, &[Value]) -> Value>;

/// Multiparam composite constructor: builds one value from coerced
/// positional parts. `None` means construction failed; the field becomes
/// null rather than erroring.
pub type CompositeFn = Rc<dyn Fn(&[Value]) -> Option<Value>>;

/// Named delegating methods a blueprint's mappings can reference.
#[derive(Clone, Default)]
pub(crate) struct Methods {
    pub(crate) readers: IndexMap<String, MethodReaderFn>,
    pub(crate) writers: IndexMap<String, MethodWriterFn>,
}

/// Named format transforms.
#[derive(Clone, Default)]
pub(crate) struct Formats {
    pub(crate) entries: IndexMap<String, FormatFn>,
}

/// Named multiparam composite constructors.
#[derive(Clone, Default)]
pub(crate) struct Composites {
    pub(crate) entries: IndexMap<String, CompositeFn>,
}
