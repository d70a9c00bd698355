//! Macros for wiring record types into the registry.

/// Implements [`PrefixedModel`](crate::PrefixedModel) for a struct.
///
/// The second argument names the `String` field holding the prefixed ID. An
/// optional `key = field` names a `u64` primary key field and additionally
/// implements [`KeyedModel`](crate::KeyedModel), as required by
/// [`MemoryStore`](crate::MemoryStore). The model name defaults to the type
/// name; pass `name = "..."` to override it.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Default)]
/// pub struct Invoice {
///     pub id: u64,
///     pub prefixed_id: String,
/// }
///
/// prefixed_model!(Invoice, prefixed_id, key = id);
///
/// registry.register_store::<Invoice, _>("inv_", store.clone());
/// let invoice = Invoice::create(&registry, &store, Invoice::default())?;
/// assert!(invoice.prefixed_id.starts_with("inv_"));
/// ```
#[macro_export]
macro_rules! prefixed_model {
    ($model:ty, $field:ident, name = $name:expr) => {
        impl $crate::PrefixedModel for $model {
            const MODEL_NAME: &'static str = $name;

            fn prefixed_id(&self) -> &str {
                &self.$field
            }

            fn set_prefixed_id(&mut self, prefixed_id: String) {
                self.$field = prefixed_id;
            }
        }
    };

    ($model:ty, $field:ident, key = $key:ident, name = $name:expr) => {
        $crate::prefixed_model!($model, $field, name = $name);

        impl $crate::KeyedModel for $model {
            fn set_key(&mut self, key: u64) {
                self.$key = key;
            }
        }
    };

    ($model:ty, $field:ident, key = $key:ident) => {
        $crate::prefixed_model!($model, $field, key = $key, name = stringify!($model));
    };

    ($model:ty, $field:ident) => {
        $crate::prefixed_model!($model, $field, name = stringify!($model));
    };
}
