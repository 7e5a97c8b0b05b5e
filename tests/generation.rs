//! End-to-end generation tests
//!
//! Models go through the run loop into a memory emitter and the generated
//! units are parsed back with `syn`.

mod common;

use common::*;
use dynamic_mapper::prelude::*;
use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

// =============================================================================
// PERSON / ADDRESS
// =============================================================================

#[test]
fn test_person_descriptor() {
    let (report, emitter) = generate_all(vec![person()]);
    assert!(report.is_clean());

    let unit = emitter.get("crate::models::PersonTableSupport").unwrap();
    assert_eq!(unit.file_name, "person_table_support.rs");
    assert!(unit.parse().is_ok());
    assert!(unit.body.contains("TABLE_NAME : & 'static str = \"person\""));
    assert_eq!(descriptor_columns(unit), ["id", "first_name", "last_name"]);
    assert!(unit.body.contains("\"id\" , :: dynamic_sql :: JdbcType :: Integer"));
    assert!(unit.body.contains("\"last_name\" , :: dynamic_sql :: JdbcType :: Varchar"));
}

#[test]
fn test_person_mapper() {
    let (_, emitter) = generate_all(vec![person()]);
    let unit = emitter.get("crate::models::PersonMapper").unwrap();
    let methods = trait_methods(&mapper_trait(unit));

    for expected in [
        "insert",
        "find_all",
        "find_by_id",
        "update_by_primary_key",
        "delete_by_primary_key",
        "select_one",
        "select_many",
    ] {
        assert!(methods.iter().any(|m| m == expected), "missing {expected}");
    }
    assert!(unit.body.contains("id : true"));
}

#[test]
fn test_address_mapper_has_no_identity_operations() {
    let (report, emitter) = generate_all(vec![address()]);
    assert_eq!(report.emitted.len(), 2);

    let methods = trait_methods(&mapper_trait(
        emitter.get("crate::models::AddressMapper").unwrap(),
    ));
    assert_eq!(
        methods,
        [
            "select_list",
            "insert",
            "select_many_by_statement",
            "select_one_by_statement",
            "select_one",
            "select_many",
            "find_all",
        ]
    );

    let descriptor = emitter.get("crate::models::AddressTableSupport").unwrap();
    assert!(descriptor.body.contains("\"address\""));
    assert_eq!(descriptor_columns(descriptor), ["street"]);
}

#[test]
fn test_long_field_is_bigint_and_boxed() {
    let model = ModelDefinition::new("", "Counter")
        .with_field("hits", FieldType::Long)
        .with_field("payload", FieldType::Other("uuid::Uuid".into()));
    let (_, emitter) = generate_all(vec![model]);
    let unit = emitter.get("CounterTableSupport").unwrap();

    assert!(unit.body.contains("\"hits\" , :: dynamic_sql :: JdbcType :: Bigint"));
    assert!(unit.body.contains("SqlColumn < Option < i64 > >"));
    assert!(unit.body.contains("\"payload\" , :: dynamic_sql :: JdbcType :: Varchar"));
    assert!(unit.body.contains("SqlColumn < uuid :: Uuid >"));
}

#[test]
fn test_source_models_end_to_end() {
    let inputs = scan_source(
        r#"
        #[dynamic_model(table = "people")]
        pub struct Person {
            pub id: i32,
            pub first_name: String,
            pub created_at: chrono::NaiveDateTime,
        }

        #[dynamic_model]
        pub struct Address {
            pub street: String,
        }
        "#,
        "crate::models",
    );
    let mut emitter = MemoryEmitter::new();
    let report = run(inputs, &GeneratorConfig::default(), &mut emitter);

    assert_eq!(report.models, ["crate::models::Person", "crate::models::Address"]);
    assert_eq!(emitter.len(), 4);

    let person = emitter.get("crate::models::PersonTableSupport").unwrap();
    assert!(person.body.contains("\"people\""));
    assert!(person.body.contains("JdbcType :: Timestamp"));
}

#[test]
fn test_mapper_only_configuration() {
    let config = GeneratorConfig::builder()
        .generate_descriptor(false)
        .mapper_suffix("Repository")
        .build();
    let mut emitter = MemoryEmitter::new();
    let report = run([Ok(person())], &config, &mut emitter);

    assert_eq!(report.emitted, ["crate::models::PersonRepository"]);
    let unit = emitter.get("crate::models::PersonRepository").unwrap();
    assert_eq!(unit.file_name, "person_repository.rs");
    assert_eq!(mapper_trait(unit).ident, "PersonRepository");
}

// =============================================================================
// PROPERTIES
// =============================================================================

const NAMES: &[&str] = &[
    "id", "name", "firstName", "lastName", "street", "city", "zipCode", "userID", "createdAt",
    "score", "active", "balance", "type", "notes",
];

const TYPES: &[FieldType] = &[
    FieldType::Text,
    FieldType::Int,
    FieldType::BoxedInt,
    FieldType::Long,
    FieldType::BoxedLong,
    FieldType::Bool,
    FieldType::Double,
    FieldType::Float,
];

#[derive(Debug, Clone)]
struct ArbitraryModel(ModelDefinition);

impl Arbitrary for ArbitraryModel {
    fn arbitrary(g: &mut Gen) -> Self {
        let entity = *g.choose(&["Person", "Address", "DynamicModel", "Tag"]).unwrap();
        let mut model = ModelDefinition::new("crate::models", entity);
        let count = usize::arbitrary(g) % NAMES.len();
        let mut names: Vec<&str> = NAMES.to_vec();
        for _ in 0..count {
            let index = usize::arbitrary(g) % names.len();
            let name = names.remove(index);
            let ty = g.choose(TYPES).unwrap().clone();
            model = model.with_field(name, ty);
        }
        ArbitraryModel(model)
    }
}

#[test]
fn prop_generation_is_idempotent() {
    fn prop(model: ArbitraryModel) -> bool {
        let generator = Generator::default();
        generator.generate(&model.0) == generator.generate(&model.0.clone())
    }
    QuickCheck::new()
        .tests(50)
        .quickcheck(prop as fn(ArbitraryModel) -> bool);
}

#[test]
fn prop_columns_follow_declaration_order() {
    fn prop(model: ArbitraryModel) -> bool {
        let units = Generator::default().generate(&model.0);
        let expected: Vec<String> = model
            .0
            .fields
            .iter()
            .map(|f| dynamic_mapper::naming::field_to_column(&f.name))
            .collect();
        descriptor_columns(&units[0]) == expected
    }
    QuickCheck::new()
        .tests(50)
        .quickcheck(prop as fn(ArbitraryModel) -> bool);
}

#[test]
fn prop_identity_operations_iff_id_field() {
    fn prop(model: ArbitraryModel) -> TestResult {
        let mapper = build_mapper(&model.0, &GeneratorConfig::default());
        let has_id = model.0.fields.iter().any(|f| f.name == "id");
        let names = mapper.operation_names();
        let present = ["find_by_id", "update_by_primary_key", "delete_by_primary_key"]
            .iter()
            .all(|op| names.contains(op));
        let absent = ["find_by_id", "update", "update_by_primary_key", "delete", "delete_by_primary_key"]
            .iter()
            .all(|op| !names.contains(op));
        TestResult::from_bool(if has_id { present } else { absent })
    }
    QuickCheck::new()
        .tests(50)
        .quickcheck(prop as fn(ArbitraryModel) -> TestResult);
}

#[test]
fn prop_generated_units_parse() {
    fn prop(model: ArbitraryModel) -> bool {
        Generator::default()
            .generate(&model.0)
            .iter()
            .all(|unit| unit.parse().is_ok())
    }
    QuickCheck::new()
        .tests(50)
        .quickcheck(prop as fn(ArbitraryModel) -> bool);
}
