use veneer_core::Relation;
use veneer_mem::MemClass;

use std::rc::Rc;

/// The canonical backing schema the scenario tests map over.
///
/// A person has one address (singular), many phones (plural), a department
/// it belongs to (singular required, so it must save first), and a detail
/// record carrying the optional fields.
pub struct World {
    pub people: Rc<MemClass>,
    pub addresses: Rc<MemClass>,
    pub phones: Rc<MemClass>,
    pub departments: Rc<MemClass>,
    pub details: Rc<MemClass>,
}

pub fn world() -> World {
    let people = MemClass::builder("person")
        .attribute("name")
        .attribute("email")
        .attribute("born_on")
        .build();
    let addresses = MemClass::builder("address")
        .attribute("street")
        .attribute("city")
        .build();
    let phones = MemClass::builder("phone").attribute("number").build();
    let departments = MemClass::builder("department").attribute("title").build();
    let details = MemClass::builder("detail")
        .attribute("age")
        .attribute("born_on")
        .build();

    people.relate("address", Relation::singular(), &addresses);
    people.relate("phones", Relation::plural(), &phones);
    people.relate("department", Relation::singular_required(), &departments);
    people.relate("detail", Relation::singular(), &details);

    World {
        people,
        addresses,
        phones,
        departments,
        details,
    }
}
