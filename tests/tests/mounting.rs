//! Mounting target resolution: explicit sources win over relation
//! inference, inference wins over the name-accessor fallback, and save
//! order follows the relation kind unless pinned.

use tests::prelude::*;

use pretty_assertions::assert_eq;

fn address_blueprint() -> BlueprintRef {
    Blueprint::builder("address")
        .map("street")
        .map("city")
        .build()
        .unwrap()
}

#[test]
fn singular_relation_reuses_the_existing_member() {
    init_tracing();
    let world = world();

    let person = world.people.new_record();
    let address = world.addresses.new_record();
    address.set("street", Value::from("Milton Lane"));
    person.set_related("address", &address);

    let bp = Blueprint::builder("person")
        .map("name")
        .mount("address", &address_blueprint())
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    assert_eq!(
        mapper.get_field("street").unwrap(),
        Value::from("Milton Lane")
    );
}

#[test]
fn singular_relation_builds_an_empty_member_when_none_exists() {
    let world = world();
    let person = world.people.new_record();

    let bp = Blueprint::builder("person")
        .mount("address", &address_blueprint())
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person.clone()).unwrap();

    assert_eq!(mapper.get_field("street").unwrap(), Value::Null);
    assert!(person.related_record("address").is_some());
}

#[test]
fn plural_relation_always_builds_a_new_member() {
    let world = world();
    let person = world.people.new_record();

    // Pre-existing member must never be reused.
    person.build_related("phones").unwrap();

    let phone_bp = Blueprint::builder("phone").map("number").build().unwrap();
    let bp = Blueprint::builder("person")
        .mount("phones", &phone_bp)
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person.clone()).unwrap();

    assert_eq!(person.plural_records("phones").len(), 2);
    assert_eq!(mapper.get_field("number").unwrap(), Value::Null);
}

#[test]
fn effective_relation_resolves_through_the_current_member() {
    let world = world();
    world
        .people
        .relate("address", Relation::singular().with_effective(), &world.addresses);

    let person = world.people.new_record();
    let stale = world.addresses.new_record();
    stale.set("street", Value::from("Old Road"));
    person.set_related("address", &stale);

    let current = world.addresses.new_record();
    current.set("street", Value::from("New Road"));
    person.set_effective("address", &current);

    let bp = Blueprint::builder("person")
        .mount("address", &address_blueprint())
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    assert_eq!(mapper.get_field("street").unwrap(), Value::from("New Road"));
}

#[test]
fn explicit_target_wins_over_relation_inference() {
    let world = world();
    let person = world.people.new_record();

    let relation_member = world.addresses.new_record();
    relation_member.set("street", Value::from("Inferred Street"));
    person.set_related("address", &relation_member);

    let literal = world.addresses.new_record();
    literal.set("street", Value::from("Literal Street"));

    let bp = Blueprint::builder("person")
        .mount_with(
            "address",
            &address_blueprint(),
            MountOptions::new().target(literal),
        )
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    assert_eq!(
        mapper.get_field("street").unwrap(),
        Value::from("Literal Street")
    );
}

#[test]
fn target_resolves_through_a_function_of_the_parent() {
    let world = world();
    let person = world.people.new_record();
    let address = world.addresses.new_record();
    address.set("city", Value::from("London"));
    person.link("hometown", &address);

    let bp = Blueprint::builder("person")
        .mount_with(
            "residence",
            &address_blueprint(),
            MountOptions::new().target_from(|parent| parent.fetch("hometown")),
        )
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    assert_eq!(mapper.get_field("city").unwrap(), Value::from("London"));
}

#[test]
fn name_accessor_fallback_resolves_unreflected_mounts() {
    let world = world();
    let person = world.people.new_record();
    let spouse = world.people.new_record();
    spouse.set("name", Value::from("Grace"));
    person.link("spouse", &spouse);

    let spouse_bp = Blueprint::builder("spouse")
        .map_with("spouse_name", MappingOptions::new().key("name"))
        .build()
        .unwrap();
    let bp = Blueprint::builder("person")
        .mount("spouse", &spouse_bp)
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    assert_eq!(
        mapper.get_field("spouse_name").unwrap(),
        Value::from("Grace")
    );
}

#[test]
fn fresh_instance_fallback_uses_the_child_target_class() {
    let world = world();
    let person = world.people.new_record();

    let standalone = Blueprint::builder("standalone_address")
        .target_class(world.addresses.clone())
        .map("street")
        .build()
        .unwrap();
    let bp = Blueprint::builder("person")
        .mount("billing", &standalone)
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    assert_eq!(mapper.get_field("street").unwrap(), Value::Null);
}

#[test]
fn unresolvable_mounting_is_a_construction_error() {
    let world = world();
    let person = world.people.new_record();

    let bp = Blueprint::builder("person")
        .mount("nowhere", &address_blueprint())
        .build()
        .unwrap();
    let err = Mapper::wrap(&bp, person).unwrap_err();

    assert!(err.is_missing_target());
    assert_eq!(err.to_string(), "missing target: mounting `nowhere`");
}

#[test]
fn mandatory_relation_must_be_reflected() {
    let world = world();
    let person = world.people.new_record();

    let bp = Blueprint::builder("person")
        .mount_with(
            "employer",
            &address_blueprint(),
            MountOptions::new().require_relation(),
        )
        .build()
        .unwrap();
    let err = Mapper::wrap(&bp, person).unwrap_err();

    assert!(err.is_missing_relation());
}

#[test]
fn save_order_follows_the_relation_kind() {
    let world = world();
    let person = world.people.new_record();

    let department_bp = Blueprint::builder("department").map("title").build().unwrap();
    let bp = Blueprint::builder("person")
        .mount("department", &department_bp)
        .mount("address", &address_blueprint())
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    // Belongs-to-like saves before the parent; has-one-like after.
    assert_eq!(
        mapper.mounting("department").unwrap().save_order(),
        SaveOrder::Before
    );
    assert_eq!(
        mapper.mounting("address").unwrap().save_order(),
        SaveOrder::After
    );
}

#[test]
fn explicit_save_order_beats_inference() {
    let world = world();
    let person = world.people.new_record();

    let department_bp = Blueprint::builder("department").map("title").build().unwrap();
    let bp = Blueprint::builder("person")
        .mount_with(
            "department",
            &department_bp,
            MountOptions::new().save_order(SaveOrder::After),
        )
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    assert_eq!(
        mapper.mounting("department").unwrap().save_order(),
        SaveOrder::After
    );
}

#[test]
fn suffixed_mount_renames_everything_reachable() {
    let world = world();
    let person = world.people.new_record();

    let bp = Blueprint::builder("person")
        .mount_with(
            "address",
            &address_blueprint(),
            MountOptions::new().suffix("home"),
        )
        .build()
        .unwrap();
    let mapper = Mapper::wrap(&bp, person).unwrap();

    let mounting = mapper.mounting("address_home").unwrap();
    assert_eq!(mounting.name(), Some("address_home"));
    assert_eq!(mounting.suffix(), Some("home"));

    assert!(mapper.responds_to("street_home"));
    assert!(!mapper.responds_to("street"));

    let mut params = params! { "street_home" => "Milton Lane" };
    mapper.write(&mut params).unwrap();
    assert_eq!(
        mapper.read(),
        params! { "street_home" => "Milton Lane", "city_home" => Value::Null }
    );
}

#[test]
fn unknown_mounting_lookup_is_fatal() {
    let world = world();
    let bp = Blueprint::builder("person")
        .target_class(world.people.clone())
        .map("name")
        .build()
        .unwrap();
    let mapper = Mapper::build(&bp).unwrap();

    let err = mapper.mounting("ghost").unwrap_err();
    assert!(err.is_unknown_name());
    assert_eq!(err.to_string(), "unknown mounting: `ghost`");
}
