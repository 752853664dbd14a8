use super::{CallbackReaderFn, CallbackWriterFn};

use veneer_core::Value;

/// Declaration-time record of one mapping: field name, target attribute
/// key, and the reader/writer strategies to materialize.
#[derive(Clone)]
pub struct MappingBlueprint {
    pub(crate) name: String,
    pub(crate) key: String,
    pub(crate) reader: ReaderSpec,
    pub(crate) writer: WriterSpec,
    pub(crate) multiparam: Option<String>,
    pub(crate) preserve: bool,
}

/// Read strategy declared for a mapping.
#[derive(Clone, Default)]
pub enum ReaderSpec {
    /// No reader: the field never appears in `read()` output.
    None,

    /// Read the target attribute under the mapping key.
    #[default]
    Basic,

    /// Delegate to a named method registered on the blueprint.
    Method(String),

    /// Call the supplied function with the target.
    Callback(CallbackReaderFn),

    /// Basic read post-processed through a named format transform.
    Format { name: String, args: Vec<Value> },
}

/// Write strategy declared for a mapping.
#[derive(Clone, Default)]
pub enum WriterSpec {
    /// No writer: incoming values for the field are silently ignored.
    None,

    /// Write the target attribute under the mapping key.
    #[default]
    Basic,

    /// Delegate to a named method registered on the blueprint.
    Method(String),

    /// Call the supplied function with the target and value.
    Callback(CallbackWriterFn),
}

/// Options accepted by [`Builder::map_with`].
///
/// [`Builder::map_with`]: super::Builder::map_with
#[derive(Clone, Default)]
pub struct MappingOptions {
    pub(crate) key: Option<String>,
    pub(crate) reader: ReaderSpec,
    pub(crate) writer: WriterSpec,
    pub(crate) multiparam: Option<String>,
    pub(crate) preserve: bool,
}

impl MappingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the field onto a target attribute other than the field name.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Drop the writer; the field becomes read-only.
    pub fn read_only(mut self) -> Self {
        self.writer = WriterSpec::None;
        self
    }

    /// Drop the reader; the field becomes write-only.
    pub fn write_only(mut self) -> Self {
        self.reader = ReaderSpec::None;
        self
    }

    /// Read through a named delegating method.
    pub fn reader_method(mut self, name: impl Into<String>) -> Self {
        self.reader = ReaderSpec::Method(name.into());
        self
    }

    /// Write through a named delegating method.
    pub fn writer_method(mut self, name: impl Into<String>) -> Self {
        self.writer = WriterSpec::Method(name.into());
        self
    }

    /// Read via a callback over the target.
    pub fn reader_callback(
        mut self,
        f: impl Fn(&veneer_core::TargetRef) -> Value + 'static,
    ) -> Self {
        self.reader = ReaderSpec::Callback(std::rc::Rc::new(f));
        self
    }

    /// Write via a callback over the target and value.
    pub fn writer_callback(
        mut self,
        f: impl Fn(&veneer_core::TargetRef, &Value) -> veneer_core::Result<()> + 'static,
    ) -> Self {
        self.writer = WriterSpec::Callback(std::rc::Rc::new(f));
        self
    }

    /// Post-process basic reads through a named format transform.
    pub fn format(mut self, name: impl Into<String>) -> Self {
        self.reader = ReaderSpec::Format {
            name: name.into(),
            args: vec![],
        };
        self
    }

    /// Like [`MappingOptions::format`], forwarding extra arguments to the
    /// transform.
    pub fn format_with(mut self, name: impl Into<String>, args: Vec<Value>) -> Self {
        self.reader = ReaderSpec::Format {
            name: name.into(),
            args,
        };
        self
    }

    /// Assemble the field from multiparam fragments via a named composite
    /// constructor.
    pub fn multiparam(mut self, composite: impl Into<String>) -> Self {
        self.multiparam = Some(composite.into());
        self
    }

    /// Convert writer failures into field-level validation errors instead of
    /// propagating them.
    pub fn preserve(mut self) -> Self {
        self.preserve = true;
        self
    }
}
