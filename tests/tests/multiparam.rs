//! Multiparam composite extraction: fragment keys collapse into one
//! composed value before ordinary writes run.

use tests::prelude::*;

use pretty_assertions::assert_eq;

fn date_blueprint(world: &World) -> BlueprintRef {
    Blueprint::builder("person")
        .target_class(world.people.clone())
        .map("name")
        .composite("date", |parts| {
            let [y, m, d] = parts else { return None };
            match (y, m, d) {
                (Value::I64(_), Value::I64(_), Value::I64(_)) => {
                    Some(Value::Record(parts.to_vec()))
                }
                _ => None,
            }
        })
        .map_with("born_on", MappingOptions::new().multiparam("date"))
        .build()
        .unwrap()
}

#[test]
fn fragments_compose_in_index_order() {
    init_tracing();
    let world = world();
    let mapper = Mapper::build(&date_blueprint(&world)).unwrap();

    // Deliberately out of order; strings coerce through the `i` tag.
    let mut params = params! {
        "born_on(3i)" => 15,
        "born_on(1i)" => "1986",
        "born_on(2i)" => 6,
        "name" => "Ada",
    };
    mapper.write(&mut params).unwrap();

    // Fragment keys were consumed in place.
    assert!(!params.contains_key("born_on(1i)"));
    assert_eq!(
        params.get("born_on"),
        Some(&Value::Record(vec![
            Value::I64(1986),
            Value::I64(6),
            Value::I64(15)
        ]))
    );
    assert_eq!(
        mapper.get_field("born_on").unwrap(),
        Value::Record(vec![Value::I64(1986), Value::I64(6), Value::I64(15)])
    );
}

#[test]
fn missing_fragment_yields_null_field() {
    let world = world();
    let mapper = Mapper::build(&date_blueprint(&world)).unwrap();

    let mut params = params! { "born_on(1i)" => 1986, "born_on(2i)" => 6 };
    mapper.write(&mut params).unwrap();

    assert_eq!(mapper.get_field("born_on").unwrap(), Value::Null);
}

#[test]
fn malformed_fragment_yields_null_field() {
    let world = world();
    let mapper = Mapper::build(&date_blueprint(&world)).unwrap();

    let mut params = params! {
        "born_on(1i)" => "not-a-year",
        "born_on(2i)" => 6,
        "born_on(3i)" => 15,
    };
    mapper.write(&mut params).unwrap();

    assert_eq!(mapper.get_field("born_on").unwrap(), Value::Null);
}

#[test]
fn no_fragments_leave_the_field_untouched() {
    let world = world();
    let mapper = Mapper::build(&date_blueprint(&world)).unwrap();
    mapper
        .set_field("born_on", Value::Record(vec![Value::I64(1986)]))
        .unwrap();

    let mut params = params! { "name" => "Ada" };
    mapper.write(&mut params).unwrap();

    assert_eq!(
        mapper.get_field("born_on").unwrap(),
        Value::Record(vec![Value::I64(1986)])
    );
}

#[test]
fn suffixed_multiparam_fields_match_suffixed_fragments() {
    let world = world();
    let inner = Blueprint::builder("detail")
        .composite("date", |parts| Some(Value::Record(parts.to_vec())))
        .map_with("born_on", MappingOptions::new().multiparam("date"))
        .build()
        .unwrap();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .mount_with(
            "detail",
            &inner,
            MountOptions::new().suffix("self"),
        )
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    let mut params = params! { "born_on_self(1i)" => 1986, "born_on_self(2i)" => 6 };
    mapper.write(&mut params).unwrap();

    assert_eq!(
        mapper.get_field("born_on_self").unwrap(),
        Value::Record(vec![Value::I64(1986), Value::I64(6)])
    );
}
