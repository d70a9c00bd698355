//! End-to-end prefixed ID flow.
//!
//! Validates, against in-memory stores:
//!
//! 1. IDs are generated on creation with the model's prefix
//! 2. Generator overrides pass through verbatim
//! 3. Prefix-routed lookups return the right record type
//! 4. Unregistered models and unknown IDs fail with the right errors
//!
//! ## Running
//!
//! ```bash
//! cargo test -p prefixed-ids-e2e --test happy_path
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use prefixed_ids::{
    GeneratorKind, IdConfig, IdGenerator, MemoryStore, PrefixedId, PrefixedIdError, PrefixedModel,
    RandomIdGenerator, Registry,
};
use prefixed_ids_testing::{AnyModel, Fixture, OtherTestModel, TestModel, TEST_PREFIX};
use rstest::rstest;

#[test]
fn it_generates_prefixed_id_using_custom_generator() {
    let fixture = Fixture::new();
    fixture.registry.set_id_generator(|| "foo".to_string());

    let model = fixture.create_test_model().unwrap();

    assert_eq!(model.prefixed_id, "test_foo");
}

#[test]
fn it_generates_unique_ids_using_custom_generator() {
    let fixture = Fixture::new();
    let generator = RandomIdGenerator::new(8);
    fixture
        .registry
        .set_id_generator(move || generator.generate());

    let first = fixture.create_test_model().unwrap();
    let second = fixture.create_test_model().unwrap();

    assert!(first.prefixed_id.starts_with(TEST_PREFIX));
    assert!(second.prefixed_id.starts_with(TEST_PREFIX));
    assert_ne!(first.prefixed_id, second.prefixed_id);
}

#[test]
fn it_generates_a_prefixed_id() {
    let fixture = Fixture::new();

    let model = fixture.create_test_model().unwrap();

    assert!(model.prefixed_id.starts_with(TEST_PREFIX));
    assert!(model.prefixed_id.len() > TEST_PREFIX.len());
}

#[test]
fn it_generates_unique_ids() {
    let fixture = Fixture::new();

    let ids: HashSet<String> = (0..200)
        .map(|_| fixture.create_test_model().unwrap().prefixed_id)
        .collect();

    assert_eq!(ids.len(), 200);
    assert!(ids.iter().all(|id| id.starts_with(TEST_PREFIX)));
}

#[test]
fn a_model_can_find_a_record_by_prefixed_id() {
    let fixture = Fixture::new();
    let model = fixture.create_test_model().unwrap();

    let found = TestModel::find_by_prefixed_id(&fixture.tests, &model.prefixed_id)
        .unwrap()
        .unwrap();
    assert_eq!(found.id, model.id);

    assert!(TestModel::find_by_prefixed_id(&fixture.tests, "non_existing")
        .unwrap()
        .is_none());
}

#[test]
fn it_fails_to_create_an_unconfigured_model() {
    let fixture = Fixture::new();
    fixture.registry.clear_registered_models();

    let err = fixture.create_test_model().unwrap_err();

    assert!(matches!(
        err,
        PrefixedIdError::NoPrefixConfiguredForModel { ref model } if model == "TestModel"
    ));
    assert!(fixture.tests.is_empty());
}

#[test]
fn it_generates_again_after_re_registration() {
    let fixture = Fixture::new();
    fixture.registry.clear_registered_models();
    assert!(fixture.create_other_test_model().is_err());

    fixture.register_models();

    let model = fixture.create_other_test_model().unwrap();
    assert!(model.prefixed_id.starts_with("other_test_"));
}

#[test]
fn it_finds_the_right_model_for_a_prefixed_id() {
    let fixture = Fixture::new();
    let model = fixture.create_test_model().unwrap();
    let other = fixture.create_other_test_model().unwrap();

    let found = fixture.registry.find(&model.prefixed_id).unwrap().unwrap();
    assert!(matches!(found, AnyModel::Test(_)));
    assert_eq!(found.key(), model.id);

    let other_found = fixture.registry.find(&other.prefixed_id).unwrap().unwrap();
    assert!(matches!(other_found, AnyModel::OtherTest(_)));
    assert_eq!(other_found.key(), other.id);
    // Keys are per store, so both first records share key 1.
    assert_eq!(other_found.key(), model.id);

    assert!(fixture.registry.find("non-existing-id").unwrap().is_none());
}

#[test]
fn a_model_can_find_or_fail_a_record_by_prefixed_id() {
    let fixture = Fixture::new();
    let model = fixture.create_test_model().unwrap();

    let found = TestModel::find_by_prefixed_id_or_fail(&fixture.tests, &model.prefixed_id).unwrap();
    assert_eq!(found.id, model.id);
}

#[test]
fn a_model_find_or_fail_errors_on_unknown_id() {
    let fixture = Fixture::new();

    let err = TestModel::find_by_prefixed_id_or_fail(&fixture.tests, "non_existing").unwrap_err();

    assert_eq!(
        err,
        PrefixedIdError::NoPrefixedModelFound {
            prefixed_id: "non_existing".to_string()
        }
    );
}

#[test]
fn it_finds_or_fails_the_right_model_for_a_prefixed_id() {
    let fixture = Fixture::new();
    let model = fixture.create_test_model().unwrap();
    let other = fixture.create_other_test_model().unwrap();

    let found = fixture.registry.find_or_fail(&model.prefixed_id).unwrap();
    assert_eq!(found, AnyModel::Test(model.clone()));

    let other_found = fixture.registry.find_or_fail(&other.prefixed_id).unwrap();
    assert_eq!(other_found.model_name(), "OtherTestModel");
    assert_eq!(other_found.prefixed_id(), other.prefixed_id);
}

#[rstest]
#[case("non-existing-id")]
#[case("test_does_not_exist")]
#[case("other_test_does_not_exist")]
#[case("")]
fn it_fails_on_unknown_prefixed_ids(#[case] prefixed_id: &str) {
    let fixture = Fixture::new();
    fixture.create_test_model().unwrap();

    assert!(fixture.registry.find(prefixed_id).unwrap().is_none());
    assert!(fixture
        .registry
        .find_or_fail(prefixed_id)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn nested_prefixes_route_to_the_longest_match() {
    // `test_other_` nests under `test_`.
    let fixture = Fixture::new();
    let nested: Arc<MemoryStore<OtherTestModel>> = Arc::new(MemoryStore::new());
    fixture
        .registry
        .register_store::<OtherTestModel, _>("test_other_", Arc::clone(&nested));

    let other = OtherTestModel::create(&fixture.registry, &nested, OtherTestModel::default()).unwrap();
    assert!(other.prefixed_id.starts_with("test_other_"));

    let found = fixture.registry.find(&other.prefixed_id).unwrap().unwrap();
    assert!(matches!(found, AnyModel::OtherTest(_)));

    let parsed = fixture.registry.parse(&other.prefixed_id).unwrap();
    assert_eq!(parsed.prefix(), "test_other_");
}

#[test]
fn re_registering_a_model_moves_its_prefix() {
    let fixture = Fixture::new();
    let before = fixture.create_other_test_model().unwrap();

    fixture
        .registry
        .register_store::<OtherTestModel, _>("ot_", Arc::clone(&fixture.others));

    assert_eq!(fixture.registry.prefix_for("OtherTestModel").as_deref(), Some("ot_"));
    assert_eq!(fixture.registry.model_for("other_test_"), None);

    let after = fixture.create_other_test_model().unwrap();
    assert!(after.prefixed_id.starts_with("ot_"));

    // Existing ids keep their stored value but no longer route.
    assert!(fixture.registry.find(&before.prefixed_id).unwrap().is_none());
    assert!(fixture.registry.find(&after.prefixed_id).unwrap().is_some());
}

#[test]
fn colliding_ids_are_rejected_by_the_store() {
    let fixture = Fixture::new();
    fixture.registry.set_id_generator(|| "same".to_string());

    fixture.create_test_model().unwrap();
    let err = fixture.create_test_model().unwrap_err();

    assert!(matches!(err, PrefixedIdError::Storage(_)));
    assert_eq!(fixture.tests.len(), 1);
}

#[test]
fn concurrent_creation_yields_distinct_ids() {
    let fixture = Arc::new(Fixture::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let fixture = Arc::clone(&fixture);
            thread::spawn(move || {
                (0..50)
                    .map(|_| fixture.create_test_model().unwrap().prefixed_id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: HashSet<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(ids.len(), 400);
    assert_eq!(fixture.tests.len(), 400);
}

#[rstest]
#[case(GeneratorKind::Random, 10)]
#[case(GeneratorKind::Uuid, 32)]
#[case(GeneratorKind::Ulid, 26)]
fn configured_generator_shapes_local_ids(#[case] generator: GeneratorKind, #[case] len: usize) {
    let registry: Registry<AnyModel> = Registry::with_config(IdConfig {
        generator,
        random_length: 10,
    });
    let store = Arc::new(MemoryStore::new());
    registry.register_store::<TestModel, _>(TEST_PREFIX, Arc::clone(&store));

    let model = TestModel::create(&registry, &store, TestModel::default()).unwrap();
    let parsed = registry.parse(&model.prefixed_id).unwrap();

    assert_eq!(parsed.local_id().len(), len);
}

#[test]
fn prefixed_ids_serialize_as_plain_strings() {
    let fixture = Fixture::new();
    let model = fixture.create_other_test_model().unwrap();

    let parsed = fixture.registry.parse(&model.prefixed_id).unwrap();
    let json = serde_json::to_value(&parsed).unwrap();
    assert_eq!(json, serde_json::Value::String(model.prefixed_id.clone()));

    let back: PrefixedId = serde_json::from_value(json).unwrap();
    assert_eq!(back.prefix(), "other_test_");
    assert_eq!(back, parsed);
}
