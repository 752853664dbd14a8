use super::Node;

use veneer_core::{Params, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Int,
    Float,
    Str,
}

/// Extract multiparam fragments for the node's own composite mappings,
/// replacing the fragment keys with one composed value under the mapping's
/// full name.
///
/// Fragments sort ascending by index; each is coerced per its type tag
/// before the composite constructor runs. A failed construction yields a
/// null field, never an error.
pub(crate) fn extract(node: &Node, params: &mut Params) {
    for mapping in node.mappings() {
        let Some(composite) = mapping.composite() else {
            continue;
        };
        let base = mapping.full_name();

        let mut fragments: Vec<(u32, Tag, String)> = params
            .keys()
            .filter_map(|key| parse_fragment(key, base).map(|(i, tag)| (i, tag, key.to_string())))
            .collect();
        if fragments.is_empty() {
            continue;
        }
        fragments.sort_by_key(|(index, _, _)| *index);

        let mut parts = Vec::with_capacity(fragments.len());
        for (_, tag, key) in &fragments {
            let raw = params.remove(key).unwrap_or(Value::Null);
            parts.push(coerce(&raw, *tag));
        }

        let composed = composite(&parts).unwrap_or(Value::Null);
        params.insert(base.to_string(), composed);
    }
}

fn coerce(raw: &Value, tag: Tag) -> Value {
    let coerced = match tag {
        Tag::Int => raw.coerce_i64().map(Value::I64),
        Tag::Float => raw.coerce_f64().map(Value::F64),
        Tag::Str => raw.coerce_string().map(Value::String),
    };
    coerced.unwrap_or(Value::Null)
}

/// Parse `<base>(<index><tag>)`, returning the fragment index and tag.
fn parse_fragment(key: &str, base: &str) -> Option<(u32, Tag)> {
    let rest = key.strip_prefix(base)?;
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;

    let (digits, tag) = match inner.chars().last()? {
        'i' => (&inner[..inner.len() - 1], Tag::Int),
        'f' => (&inner[..inner.len() - 1], Tag::Float),
        's' => (&inner[..inner.len() - 1], Tag::Str),
        c if c.is_ascii_digit() => (inner, Tag::Str),
        _ => return None,
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((digits.parse().ok()?, tag))
}
