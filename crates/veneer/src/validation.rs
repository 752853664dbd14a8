use crate::errors::Errors;
use crate::mapper::Node;

use veneer_core::Value;

use std::rc::Rc;

/// Per-field custom rule: return a message to reject the value.
pub type FieldRuleFn = Rc<dyn Fn(&Value) -> Option<String>>;

/// Node-level custom rule: add to the error collection to reject the node.
pub type NodeRuleFn = Rc<dyn Fn(&Node, &mut Errors)>;

/// Hook run before a node's own rules are evaluated.
pub type BeforeValidateFn = Rc<dyn Fn(&Node)>;

/// Hook run before a node's target is persisted; `false` vetoes the save.
pub type BeforeSaveFn = Rc<dyn Fn(&Node) -> bool>;

/// Hook run after a node's target was successfully persisted.
pub type AfterSaveFn = Rc<dyn Fn(&Node)>;

/// A single validation rule declared against a field name.
#[derive(Clone)]
pub struct Validation {
    pub(crate) field: String,
    pub(crate) rule: Rule,
}

#[derive(Clone)]
pub(crate) enum Rule {
    /// The field must read as a non-null, non-blank value.
    Presence,

    /// String length constraint.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },

    /// Custom per-field rule.
    Field(FieldRuleFn),

    /// Custom node-level rule; `field` is empty for these.
    Node(NodeRuleFn),
}

impl Validation {
    pub(crate) fn presence(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: Rule::Presence,
        }
    }

    pub(crate) fn length(field: impl Into<String>, min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            field: field.into(),
            rule: Rule::Length { min, max },
        }
    }

    pub(crate) fn field(field: impl Into<String>, rule: FieldRuleFn) -> Self {
        Self {
            field: field.into(),
            rule: Rule::Field(rule),
        }
    }

    pub(crate) fn node(rule: NodeRuleFn) -> Self {
        Self {
            field: String::new(),
            rule: Rule::Node(rule),
        }
    }

    /// Evaluate the rule against `node`, recording failures in `errors`.
    ///
    /// Field keys are recorded un-suffixed here; the owning node rewrites
    /// them when it folds the result into its collection.
    pub(crate) fn apply(&self, node: &Node, errors: &mut Errors) {
        match &self.rule {
            Rule::Node(rule) => rule(node, errors),
            Rule::Presence => {
                if is_blank(&self.read(node)) {
                    errors.add(&self.field, "can't be blank");
                }
            }
            Rule::Length { min, max } => {
                let value = self.read(node);
                let Some(s) = value.as_str() else { return };
                let len = s.chars().count();

                if let Some(min) = min {
                    if len < *min {
                        errors.add(&self.field, format!("is too short (minimum: {min})"));
                    }
                }
                if let Some(max) = max {
                    if len > *max {
                        errors.add(&self.field, format!("is too long (maximum: {max})"));
                    }
                }
            }
            Rule::Field(rule) => {
                if let Some(message) = rule(&self.read(node)) {
                    errors.add(&self.field, message);
                }
            }
        }
    }

    /// Read the validated value: through the node's own mapping when one is
    /// declared under the field name, else straight off the target.
    fn read(&self, node: &Node) -> Value {
        node.read_field(&self.field)
            .or_else(|| node.target().get(&self.field))
            .unwrap_or(Value::Null)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Hooks declared on a blueprint, run around validation and persistence.
#[derive(Clone, Default)]
pub(crate) struct Callbacks {
    pub(crate) before_validate: Vec<BeforeValidateFn>,
    pub(crate) before_save: Vec<BeforeSaveFn>,
    pub(crate) after_save: Vec<AfterSaveFn>,
}
