use crate::blueprint::{
    Blueprint, CallbackReaderFn, CallbackWriterFn, CompositeFn, FormatFn, MappingBlueprint,
    MethodReaderFn, MethodWriterFn, ReaderSpec, WriterSpec,
};
use crate::mapper::Node;

use veneer_core::{Params, Result, Value};

/// A mapping bound to a concrete node: one named field over one target
/// attribute, with its strategies resolved and its full name fixed.
pub struct Mapping {
    name: String,
    key: String,
    full_name: String,
    reader: Option<Reader>,
    writer: Option<Writer>,
    multiparam: Option<CompositeFn>,
    preserve: bool,
}

pub(crate) enum Reader {
    Basic,
    Method(MethodReaderFn),
    Callback(CallbackReaderFn),
    Format { transform: FormatFn, args: Vec<Value> },
}

pub(crate) enum Writer {
    Basic,
    Method(MethodWriterFn),
    Callback(CallbackWriterFn),
}

impl Mapping {
    /// Bind a mapping blueprint to a node's suffix, resolving named
    /// strategies against the blueprint registries.
    ///
    /// Name references were checked when the blueprint was built, so
    /// resolution cannot fail here.
    pub(crate) fn materialize(
        decl: &MappingBlueprint,
        suffix: Option<&str>,
        blueprint: &Blueprint,
    ) -> Self {
        let reader = match &decl.reader {
            ReaderSpec::None => None,
            ReaderSpec::Basic => Some(Reader::Basic),
            ReaderSpec::Method(name) => Some(Reader::Method(
                blueprint
                    .methods
                    .readers
                    .get(name)
                    .expect("reader method validated at build")
                    .clone(),
            )),
            ReaderSpec::Callback(f) => Some(Reader::Callback(f.clone())),
            ReaderSpec::Format { name, args } => Some(Reader::Format {
                transform: blueprint
                    .formats
                    .entries
                    .get(name)
                    .expect("format validated at build")
                    .clone(),
                args: args.clone(),
            }),
        };

        let writer = match &decl.writer {
            WriterSpec::None => None,
            WriterSpec::Basic => Some(Writer::Basic),
            WriterSpec::Method(name) => Some(Writer::Method(
                blueprint
                    .methods
                    .writers
                    .get(name)
                    .expect("writer method validated at build")
                    .clone(),
            )),
            WriterSpec::Callback(f) => Some(Writer::Callback(f.clone())),
        };

        let multiparam = decl.multiparam.as_ref().map(|name| {
            blueprint
                .composites
                .entries
                .get(name)
                .expect("composite validated at build")
                .clone()
        });

        let full_name = match suffix {
            Some(suffix) => format!("{}_{}", decl.name, suffix),
            None => decl.name.clone(),
        };

        Self {
            name: decl.name.clone(),
            key: decl.key.clone(),
            full_name,
            reader,
            writer,
            multiparam,
            preserve: decl.preserve,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The target attribute key this mapping reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The externally visible field name: `name_suffix` when the owning
    /// node carries a suffix, else the plain name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn has_reader(&self) -> bool {
        self.reader.is_some()
    }

    pub fn has_writer(&self) -> bool {
        self.writer.is_some()
    }

    pub fn is_multiparam(&self) -> bool {
        self.multiparam.is_some()
    }

    pub(crate) fn composite(&self) -> Option<&CompositeFn> {
        self.multiparam.as_ref()
    }

    pub(crate) fn preserve(&self) -> bool {
        self.preserve
    }

    /// Read the field value; `None` when the mapping has no reader.
    pub fn read(&self, node: &Node) -> Option<Value> {
        let reader = self.reader.as_ref()?;

        Some(match reader {
            Reader::Basic => self.read_attribute(node),
            Reader::Method(f) => f(node, self),
            Reader::Callback(f) => f(node.target()),
            Reader::Format { transform, args } => transform(&self.read_attribute(node), args),
        })
    }

    fn read_attribute(&self, node: &Node) -> Value {
        node.target().get(&self.key).unwrap_or(Value::Null)
    }

    /// Write the field value; a no-op when the mapping has no writer.
    pub fn write(&self, node: &Node, value: &Value) -> Result<()> {
        let Some(writer) = self.writer.as_ref() else {
            return Ok(());
        };

        match writer {
            Writer::Basic => {
                node.target().set(&self.key, value.clone());
                Ok(())
            }
            Writer::Method(f) => f(node, self, value),
            Writer::Callback(f) => f(node.target(), value),
        }
    }

    /// `{full_name: value}` when a reader exists, empty otherwise.
    pub(crate) fn read_as_params(&self, node: &Node) -> Params {
        let mut params = Params::new();
        if let Some(value) = self.read(node) {
            params.insert(self.full_name.clone(), value);
        }
        params
    }

    /// Write from the flat map: only when the key is present and a writer
    /// exists. Absent keys and writer-less mappings are silently skipped.
    pub(crate) fn write_from_params(&self, node: &Node, params: &Params) -> Result<()> {
        if !self.has_writer() {
            return Ok(());
        }
        match params.get(&self.full_name) {
            Some(value) => self.write(node, value),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Mapping {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Mapping")
            .field("full_name", &self.full_name)
            .field("key", &self.key)
            .field("reader", &self.reader.is_some())
            .field("writer", &self.writer.is_some())
            .finish()
    }
}
