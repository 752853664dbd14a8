use super::{
    Blueprint, BlueprintRef, Composites, Formats, MappingBlueprint, MappingOptions, Methods,
    MountKind, MountOptions, MountingBlueprint, ReaderSpec, TargetSource, WriterSpec,
};
use crate::mapper::Node;
use crate::validation::{Callbacks, Validation};
use crate::Errors;

use veneer_core::{Error, Result, TargetClassRef, Value};

use std::rc::Rc;

/// Accumulates a node class declaration and freezes it into a
/// [`Blueprint`].
///
/// Declaration order is preserved for mappings and mountings; it drives
/// read/write/validate/save traversal order on every instance.
pub struct Builder {
    name: String,
    target_class: Option<TargetClassRef>,
    mappings: Vec<MappingBlueprint>,
    mountings: Vec<MountingBlueprint>,
    validations: Vec<Validation>,
    callbacks: Callbacks,
    methods: Methods,
    formats: Formats,
    composites: Composites,
}

impl Builder {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            target_class: None,
            mappings: vec![],
            mountings: vec![],
            validations: vec![],
            callbacks: Callbacks::default(),
            methods: Methods::default(),
            formats: Formats::default(),
            composites: Composites::default(),
        }
    }

    /// Start a subtype declaration: copy the base blueprint's lists and
    /// registries, then append. The base is never touched.
    pub fn extend(base: &BlueprintRef, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_class: base.target_class.clone(),
            mappings: base.mappings.clone(),
            mountings: base.mountings.clone(),
            validations: base.validations.clone(),
            callbacks: base.callbacks.clone(),
            methods: base.methods.clone(),
            formats: base.formats.clone(),
            composites: base.composites.clone(),
        }
    }

    /// Declare the backing type used by `build`/`find` factories and by the
    /// fresh-instance target fallback.
    pub fn target_class(mut self, class: TargetClassRef) -> Self {
        self.target_class = Some(class);
        self
    }

    /// Map a field onto the target attribute of the same name, with basic
    /// read and write.
    pub fn map(self, name: impl Into<String>) -> Self {
        self.map_with(name, MappingOptions::new())
    }

    /// Map a field with explicit options.
    pub fn map_with(mut self, name: impl Into<String>, options: MappingOptions) -> Self {
        let name = name.into();
        self.mappings.push(MappingBlueprint {
            key: options.key.unwrap_or_else(|| name.clone()),
            name,
            reader: options.reader,
            writer: options.writer,
            multiparam: options.multiparam,
            preserve: options.preserve,
        });
        self
    }

    /// Mount a child node class under `name`.
    pub fn mount(self, name: impl Into<String>, child: &BlueprintRef) -> Self {
        self.mount_with(name, child, MountOptions::new())
    }

    /// Mount a child node class with explicit options.
    pub fn mount_with(
        mut self,
        name: impl Into<String>,
        child: &BlueprintRef,
        options: MountOptions,
    ) -> Self {
        self.mountings.push(MountingBlueprint {
            name: name.into(),
            kind: MountKind::Mounting,
            child: child.clone(),
            traits: options.traits,
            target: options.target,
            save_order: options.save_order,
            suffix: options.suffix,
            extension: options.extension,
            mandatory_relation: options.mandatory_relation,
        });
        self
    }

    /// Mount a trait: a named fragment owned by this node class, applied to
    /// its own target, materialized only when required for the active trait
    /// set.
    pub fn mount_trait(mut self, name: impl Into<String>, fragment: &BlueprintRef) -> Self {
        self.mountings.push(MountingBlueprint {
            name: name.into(),
            kind: MountKind::Trait,
            child: fragment.clone(),
            traits: vec![],
            target: TargetSource::Infer,
            save_order: None,
            suffix: None,
            extension: None,
            mandatory_relation: false,
        });
        self
    }

    /// Require the field to read as a present (non-null, non-blank) value.
    pub fn validate_presence(mut self, field: impl Into<String>) -> Self {
        self.validations.push(Validation::presence(field));
        self
    }

    /// Constrain the string length of the field.
    pub fn validate_length(
        mut self,
        field: impl Into<String>,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Self {
        self.validations.push(Validation::length(field, min, max));
        self
    }

    /// Custom per-field rule: return a message to reject the value.
    pub fn validate_field(
        mut self,
        field: impl Into<String>,
        rule: impl Fn(&Value) -> Option<String> + 'static,
    ) -> Self {
        self.validations
            .push(Validation::field(field, Rc::new(rule)));
        self
    }

    /// Custom node-level rule.
    pub fn validate_node(mut self, rule: impl Fn(&Node, &mut Errors) + 'static) -> Self {
        self.validations.push(Validation::node(Rc::new(rule)));
        self
    }

    /// Hook run before this node's own rules are evaluated.
    pub fn before_validate(mut self, hook: impl Fn(&Node) + 'static) -> Self {
        self.callbacks.before_validate.push(Rc::new(hook));
        self
    }

    /// Hook run before this node's target persists; `false` vetoes the
    /// save.
    pub fn before_save(mut self, hook: impl Fn(&Node) -> bool + 'static) -> Self {
        self.callbacks.before_save.push(Rc::new(hook));
        self
    }

    /// Hook run after this node's target persisted successfully.
    pub fn after_save(mut self, hook: impl Fn(&Node) + 'static) -> Self {
        self.callbacks.after_save.push(Rc::new(hook));
        self
    }

    /// Register a delegating reader method.
    pub fn reader_method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Node, &crate::Mapping) -> Value + 'static,
    ) -> Self {
        self.methods.readers.insert(name.into(), Rc::new(f));
        self
    }

    /// Register a delegating writer method.
    pub fn writer_method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Node, &crate::Mapping, &Value) -> Result<()> + 'static,
    ) -> Self {
        self.methods.writers.insert(name.into(), Rc::new(f));
        self
    }

    /// Register a format transform.
    pub fn format(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&Value, &[Value]) -> Value + 'static,
    ) -> Self {
        self.formats.entries.insert(name.into(), Rc::new(f));
        self
    }

    /// Register a multiparam composite constructor.
    pub fn composite(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Option<Value> + 'static,
    ) -> Self {
        self.composites.entries.insert(name.into(), Rc::new(f));
        self
    }

    /// Freeze the declaration.
    ///
    /// Every name a mapping references must be registered by now; dangling
    /// references are fatal here rather than at first access.
    pub fn build(self) -> Result<BlueprintRef> {
        for mapping in &self.mappings {
            if let ReaderSpec::Method(name) = &mapping.reader {
                if !self.methods.readers.contains_key(name) {
                    return Err(Error::unknown_method(name));
                }
            }
            if let ReaderSpec::Format { name, .. } = &mapping.reader {
                if !self.formats.entries.contains_key(name) {
                    return Err(Error::unknown_format(name));
                }
            }
            if let WriterSpec::Method(name) = &mapping.writer {
                if !self.methods.writers.contains_key(name) {
                    return Err(Error::unknown_method(name));
                }
            }
            if let Some(name) = &mapping.multiparam {
                if !self.composites.entries.contains_key(name) {
                    return Err(Error::unknown_composite(name));
                }
            }
        }

        Ok(Rc::new(Blueprint {
            name: self.name,
            target_class: self.target_class,
            mappings: self.mappings,
            mountings: self.mountings,
            validations: self.validations,
            callbacks: self.callbacks,
            methods: self.methods,
            formats: self.formats,
            composites: self.composites,
        }))
    }
}
