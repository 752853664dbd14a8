//! Basic mapping strategies: read/write round-trips, one-way fields,
//! formatted and delegating access.

use tests::prelude::*;

use pretty_assertions::assert_eq;

#[test]
fn basic_fields_round_trip() {
    init_tracing();
    let world = world();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .map("name")
        .map("email")
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    let mut params = params! { "name" => "Ada", "email" => "ada@example.com" };
    mapper.write(&mut params).unwrap();

    assert_eq!(
        mapper.read(),
        params! { "name" => "Ada", "email" => "ada@example.com" }
    );
}

#[test]
fn read_only_field_ignores_writes() {
    let world = world();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .map_with("name", MappingOptions::new().read_only())
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    let mut params = params! { "name" => "Ada" };
    mapper.write(&mut params).unwrap();

    // The write was a no-op; the target attribute is untouched.
    assert_eq!(mapper.read(), params! { "name" => Value::Null });
}

#[test]
fn write_only_field_is_absent_from_reads() {
    let world = world();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .map("name")
        .map_with("email", MappingOptions::new().write_only())
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    let mut params = params! { "name" => "Ada", "email" => "ada@example.com" };
    mapper.write(&mut params).unwrap();

    assert_eq!(mapper.read(), params! { "name" => "Ada" });
    // The value still reached the target.
    assert_eq!(
        mapper.root().target().get("email"),
        Some(Value::from("ada@example.com"))
    );
}

#[test]
fn mapping_key_redirects_to_another_attribute() {
    let world = world();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .map_with("contact", MappingOptions::new().key("email"))
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    mapper.set_field("contact", "ada@example.com").unwrap();

    assert_eq!(
        mapper.root().target().get("email"),
        Some(Value::from("ada@example.com"))
    );
    assert_eq!(mapper.read(), params! { "contact" => "ada@example.com" });
}

#[test]
fn formatted_reader_transforms_asymmetrically() {
    let world = world();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .format("shout", |value, args| match value.as_str() {
            Some(s) => {
                let mut out = s.to_uppercase();
                for arg in args {
                    if let Some(extra) = arg.as_str() {
                        out.push_str(extra);
                    }
                }
                Value::from(out)
            }
            None => Value::Null,
        })
        .map_with(
            "name",
            MappingOptions::new().format_with("shout", vec![Value::from("!")]),
        )
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    let mut params = params! { "name" => "ada" };
    mapper.write(&mut params).unwrap();

    // Write stayed basic; the read is post-processed.
    assert_eq!(mapper.root().target().get("name"), Some(Value::from("ada")));
    assert_eq!(mapper.read(), params! { "name" => "ADA!" });
}

#[test]
fn delegating_methods_control_access() {
    let world = world();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .reader_method("read_signature", |node, mapping| {
            let name = node
                .target()
                .get(mapping.key())
                .unwrap_or(Value::Null)
                .coerce_string()
                .unwrap_or_default();
            Value::from(format!("{name} <sig>"))
        })
        .writer_method("write_trimmed", |node, mapping, value| {
            let trimmed = value.coerce_string().unwrap_or_default();
            node.target()
                .set(mapping.key(), Value::from(trimmed.trim()));
            Ok(())
        })
        .map_with(
            "name",
            MappingOptions::new()
                .reader_method("read_signature")
                .writer_method("write_trimmed"),
        )
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    let mut params = params! { "name" => "  Ada  " };
    mapper.write(&mut params).unwrap();

    assert_eq!(mapper.read(), params! { "name" => "Ada <sig>" });
}

#[test]
fn callback_strategies_reach_the_target_directly() {
    let world = world();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .map_with(
            "display",
            MappingOptions::new()
                .reader_callback(|target| {
                    target.get("name").unwrap_or(Value::Null)
                })
                .writer_callback(|target, value| {
                    target.set("name", value.clone());
                    Ok(())
                }),
        )
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    let mut params = params! { "display" => "Ada" };
    mapper.write(&mut params).unwrap();

    assert_eq!(mapper.root().target().get("name"), Some(Value::from("Ada")));
    assert_eq!(mapper.read(), params! { "display" => "Ada" });
}

#[test]
fn absent_keys_are_silently_skipped() {
    let world = world();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .map("name")
        .map("email")
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    mapper.set_field("email", "kept@example.com").unwrap();

    let mut params = params! { "name" => "Ada" };
    mapper.write(&mut params).unwrap();

    assert_eq!(
        mapper.read(),
        params! { "name" => "Ada", "email" => "kept@example.com" }
    );
}
