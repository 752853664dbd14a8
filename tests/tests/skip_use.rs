//! Skip/unskip: excising a subtree from validation and save, and the ways
//! it comes back into use.

use tests::prelude::*;

use pretty_assertions::assert_eq;

fn strict_person(world: &World) -> BlueprintRef {
    let address = Blueprint::builder("address")
        .map("street")
        .validate_presence("street")
        .build()
        .unwrap();

    Blueprint::builder("person")
        .target_class(world.people.clone())
        .map("name")
        .validate_presence("name")
        .mount("address", &address)
        .build()
        .unwrap()
}

#[test]
fn skipped_node_validates_and_saves_as_success() {
    init_tracing();
    let world = world();
    let mapper = Mapper::build(&strict_person(&world)).unwrap();
    mapper.set_field("name", "Ada").unwrap();

    // The empty address would fail validation.
    assert!(!mapper.valid());

    mapper.mounting("address").unwrap().skip();
    assert!(mapper.valid());
    assert!(mapper.errors().is_empty());
    assert!(mapper.save());
    // Only the person was persisted.
    assert_eq!(world.people.count(), 1);
    assert_eq!(world.addresses.count(), 0);
}

#[test]
fn skip_then_unskip_behaves_as_if_never_skipped() {
    let world = world();
    let mapper = Mapper::build(&strict_person(&world)).unwrap();
    mapper.set_field("name", "Ada").unwrap();

    let address = mapper.mounting("address").unwrap();
    address.skip();
    address.unskip();

    assert!(!mapper.valid());
    assert_eq!(mapper.errors().get("street"), ["can't be blank"]);
}

#[test]
fn skipping_a_new_record_marks_it_for_destruction() {
    let world = world();
    let mapper = Mapper::build(&strict_person(&world)).unwrap();

    let address = mapper.mounting("address").unwrap();
    address.skip();
    assert!(address.target().marked_for_destruction());

    address.unskip();
    assert!(!address.target().marked_for_destruction());
}

#[test]
fn skipping_a_persisted_record_discards_mutations() {
    let world = world();
    let person = world.people.new_record();
    person.set("name", Value::from("Ada"));
    assert!(person.save(true));

    let bp = Blueprint::builder("person")
        .map("name")
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    mapper.set_field("name", "Grace").unwrap();
    mapper.root().skip();

    assert_eq!(
        mapper.root().target().get("name"),
        Some(Value::from("Ada"))
    );
}

#[test]
fn writing_into_a_skipped_node_unskips_it() {
    let world = world();
    let mapper = Mapper::build(&strict_person(&world)).unwrap();
    mapper.set_field("name", "Ada").unwrap();

    let address = mapper.mounting("address").unwrap();
    address.skip();

    let mut params = params! { "street" => "Milton Lane" };
    mapper.write(&mut params).unwrap();

    assert!(!address.is_skipped());
    assert!(mapper.valid());
    assert_eq!(mapper.get_field("street").unwrap(), Value::from("Milton Lane"));
}

#[test]
fn writes_that_never_address_a_skipped_node_leave_it_skipped() {
    let world = world();
    let mapper = Mapper::build(&strict_person(&world)).unwrap();

    let address = mapper.mounting("address").unwrap();
    address.skip();

    let mut params = params! { "name" => "Ada" };
    mapper.write(&mut params).unwrap();

    assert!(address.is_skipped());
}

#[test]
fn set_field_unskips_the_owning_node() {
    let world = world();
    let mapper = Mapper::build(&strict_person(&world)).unwrap();

    let address = mapper.mounting("address").unwrap();
    address.skip();

    mapper.set_field("street", "Milton Lane").unwrap();
    assert!(!address.is_skipped());
}

#[test]
fn unskip_reactivates_nested_mountings_of_persisted_targets() {
    let world = world();
    let person = world.people.new_record();
    person.set("name", Value::from("Ada"));
    assert!(person.save(true));

    let mapper = Mapper::wrap(&strict_person(&world), person).unwrap();
    let address = mapper.mounting("address").unwrap();

    address.skip();
    mapper.root().skip();

    mapper.root().unskip();
    assert!(!address.is_skipped());
}
