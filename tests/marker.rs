//! The re-exported marker attribute leaves models usable as plain structs.

use dynamic_mapper::dynamic_model;

#[dynamic_model(table = "people")]
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i32,
    pub first_name: String,
    #[dynamic_model(skip)]
    pub display_name: Option<String>,
    #[dynamic_mapper::dynamic_model(skip)]
    pub search_key: Option<String>,
}

#[dynamic_model]
#[derive(Debug, Default)]
pub struct Address {
    pub street: String,
}

#[test]
fn test_marked_structs_are_unchanged() {
    let person = Person {
        id: 1,
        first_name: "Ada".into(),
        display_name: None,
        search_key: None,
    };
    assert_eq!(person.clone(), person);
    assert_eq!(Address::default().street, "");
}

#[test]
fn test_marked_source_scans_the_same_fields() {
    let results = dynamic_mapper::scan::scan_source(
        include_str!("marker.rs"),
        "crate",
    );
    let person = results[0].as_ref().unwrap();
    assert_eq!(person.table_name(), "people");
    let names: Vec<_> = person.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["id", "first_name"]);
    assert_eq!(results[1].as_ref().unwrap().table_name(), "address");
}
