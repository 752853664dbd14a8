//! Inline per-instance extensions: always-on owned fragments that take
//! precedence over named traits.

use tests::prelude::*;

use pretty_assertions::assert_eq;

#[test]
fn extension_fields_join_the_surface() {
    init_tracing();
    let world = world();

    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .map("name")
        .build()
        .unwrap();
    let extension = Blueprint::builder("with_email")
        .map("email")
        .validate_presence("email")
        .build()
        .unwrap();

    let plain = Mapper::build(&bp).unwrap();
    assert!(!plain.responds_to("email"));
    assert!(plain.valid());

    let extended = Mapper::build_with(&bp, Options::new().extension(extension)).unwrap();
    assert!(extended.responds_to("email"));
    assert!(!extended.valid());
    assert_eq!(extended.errors().get("email"), ["can't be blank"]);

    extended.set_field("email", "ada@example.com").unwrap();
    assert!(extended.valid());
    assert_eq!(
        extended.read(),
        params! { "name" => Value::Null, "email" => "ada@example.com" }
    );
}

#[test]
fn extension_validates_before_named_traits() {
    let world = world();
    let log = event_log();

    let audited = {
        let log = log.clone();
        Blueprint::builder("audited")
            .before_validate(move |_| log.borrow_mut().push("trait".into()))
            .build()
            .unwrap()
    };
    let extension = {
        let log = log.clone();
        Blueprint::builder("extension")
            .before_validate(move |_| log.borrow_mut().push("extension".into()))
            .build()
            .unwrap()
    };
    let bp = {
        let log = log.clone();
        Blueprint::builder("person")
            .target_class(world.people.clone())
            .map("name")
            .before_validate(move |_| log.borrow_mut().push("host".into()))
            .mount_trait("with_audit", &audited)
            .build()
            .unwrap()
    };

    let mapper = Mapper::build_with(
        &bp,
        Options::new().with_trait("with_audit").extension(extension),
    )
    .unwrap();
    assert!(mapper.valid());

    // Extension first, declared traits next, the host's own hooks last.
    assert_eq!(events(&log), ["extension", "trait", "host"]);
}

#[test]
fn mounted_children_accept_extensions_too() {
    let world = world();

    let address = Blueprint::builder("address").map("street").build().unwrap();
    let extension = Blueprint::builder("with_city")
        .map("city")
        .build()
        .unwrap();

    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .mount_with(
            "address",
            &address,
            MountOptions::new().extension(extension),
        )
        .build()
        .unwrap();

    let mapper = Mapper::build(&bp).unwrap();
    let mut params = params! { "street" => "Milton Lane", "city" => "London" };
    mapper.write(&mut params).unwrap();

    assert_eq!(
        mapper.read(),
        params! { "street" => "Milton Lane", "city" => "London" }
    );
}
