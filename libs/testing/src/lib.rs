//! Shared fixtures for prefixed-ids tests.
//!
//! Two record types, the record enum a registry routes them into, and a
//! [`Fixture`] wiring both into a registry backed by in-memory stores.

use std::sync::{Arc, Once};

use prefixed_ids::{prefixed_model, MemoryStore, PrefixedModel, Registry};
use tracing_subscriber::EnvFilter;

/// Prefix registered for [`TestModel`].
pub const TEST_PREFIX: &str = "test_";

/// Prefix registered for [`OtherTestModel`].
pub const OTHER_TEST_PREFIX: &str = "other_test_";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestModel {
    pub id: u64,
    pub prefixed_id: String,
    pub name: String,
}

prefixed_model!(TestModel, prefixed_id, key = id);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtherTestModel {
    pub id: u64,
    pub prefixed_id: String,
}

prefixed_model!(OtherTestModel, prefixed_id, key = id);

/// Every record type the fixture registry can resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyModel {
    Test(TestModel),
    OtherTest(OtherTestModel),
}

impl AnyModel {
    /// Primary key of the wrapped record.
    pub fn key(&self) -> u64 {
        match self {
            AnyModel::Test(m) => m.id,
            AnyModel::OtherTest(m) => m.id,
        }
    }

    pub fn model_name(&self) -> &'static str {
        match self {
            AnyModel::Test(_) => TestModel::MODEL_NAME,
            AnyModel::OtherTest(_) => OtherTestModel::MODEL_NAME,
        }
    }

    pub fn prefixed_id(&self) -> &str {
        match self {
            AnyModel::Test(m) => m.prefixed_id(),
            AnyModel::OtherTest(m) => m.prefixed_id(),
        }
    }
}

impl From<TestModel> for AnyModel {
    fn from(m: TestModel) -> Self {
        AnyModel::Test(m)
    }
}

impl From<OtherTestModel> for AnyModel {
    fn from(m: OtherTestModel) -> Self {
        AnyModel::OtherTest(m)
    }
}

/// A registry with `test_` and `other_test_` registered against fresh stores.
pub struct Fixture {
    pub registry: Registry<AnyModel>,
    pub tests: Arc<MemoryStore<TestModel>>,
    pub others: Arc<MemoryStore<OtherTestModel>>,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();

        let fixture = Self {
            registry: Registry::new(),
            tests: Arc::new(MemoryStore::new()),
            others: Arc::new(MemoryStore::new()),
        };
        fixture.register_models();
        fixture
    }

    /// (Re-)registers both prefixes against the fixture's stores.
    pub fn register_models(&self) {
        self.registry
            .register_store::<TestModel, _>(TEST_PREFIX, Arc::clone(&self.tests));
        self.registry
            .register_store::<OtherTestModel, _>(OTHER_TEST_PREFIX, Arc::clone(&self.others));
    }

    pub fn create_test_model(&self) -> prefixed_ids::Result<TestModel> {
        TestModel::create(&self.registry, &self.tests, TestModel::default())
    }

    pub fn create_other_test_model(&self) -> prefixed_ids::Result<OtherTestModel> {
        OtherTestModel::create(&self.registry, &self.others, OtherTestModel::default())
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs a test-friendly subscriber once per process, honouring `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}
