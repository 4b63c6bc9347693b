//! Process-wide field metadata store.
//!
//! Descriptors are keyed by (declaring type, field name). Each type's
//! declarations run exactly once, the first time the store is asked about
//! that type. Per-instance overrides are recorded against an
//! [`InstanceId`] and consulted before the type-level record.

use std::any::TypeId;
use std::sync::{Arc, LazyLock, OnceLock};

use dashmap::DashMap;
use indexmap::IndexMap;

use crate::declare::FieldDeclarations;
use crate::descriptor::{DescriptorPatch, FieldDescriptor};
use crate::model::{InstanceId, Model, ModelType};

type FieldRecord = IndexMap<String, FieldDescriptor>;

static GLOBAL: LazyLock<MetadataStore> = LazyLock::new(MetadataStore::new);

/// Thread-safe registry of field descriptors.
///
/// Purely additive: there is no removal operation.
#[derive(Debug, Default)]
pub struct MetadataStore {
    types: DashMap<TypeId, FieldRecord>,
    instances: DashMap<InstanceId, FieldRecord>,
    declared: DashMap<TypeId, Arc<OnceLock<()>>>,
}

impl MetadataStore {
    /// Creates an empty store. Most callers want [`MetadataStore::global`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The store shared by the whole process.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Runs the type's field declarations if they have not run yet.
    pub fn ensure_declared(&self, model_type: ModelType) {
        let cell = self
            .declared
            .entry(model_type.id())
            .or_default()
            .value()
            .clone();

        cell.get_or_init(|| {
            let mut fields = FieldDeclarations::new(self, model_type);
            model_type.declare(&mut fields);
            tracing::info!(
                model = model_type.name(),
                fields = fields.declared(),
                "registered model field metadata"
            );
        });
    }

    /// Merges `patch` over the type-level descriptor of `field`.
    pub fn declare_field(&self, model_type: ModelType, field: &str, patch: DescriptorPatch) {
        let mut record = self.types.entry(model_type.id()).or_default();
        merge_into(&mut record, field, patch);
    }

    /// Merges `patch` over the descriptor of `field` recorded for one
    /// instance. The merged result is written to the instance record and to
    /// the type-level record.
    pub fn declare_instance_field(
        &self,
        model_type: ModelType,
        instance: InstanceId,
        field: &str,
        patch: DescriptorPatch,
    ) {
        self.ensure_declared(model_type);

        let merged = {
            let mut record = self.instances.entry(instance).or_default();
            merge_into(&mut record, field, patch)
        };
        self.types
            .entry(model_type.id())
            .or_default()
            .insert(field.to_owned(), merged);
    }

    /// Looks up the descriptor of `field` on `target`, preferring the
    /// instance record over the type-level one.
    pub fn lookup(&self, target: &dyn Model, field: &str) -> Option<FieldDescriptor> {
        let model_type = target.model_type();
        self.ensure_declared(model_type);

        if let Some(id) = target.instance_id() {
            let found = self
                .instances
                .get(&id)
                .and_then(|record| record.get(field).cloned());
            if found.is_some() {
                return found;
            }
        }
        self.types
            .get(&model_type.id())
            .and_then(|record| record.get(field).cloned())
    }

    /// All descriptors of `target`, or `None` if nothing was ever declared
    /// for it. An instance with its own record gets that record.
    pub fn get_all(&self, target: &dyn Model) -> Option<IndexMap<String, FieldDescriptor>> {
        self.get_all_filtered(target, |_, _| true)
    }

    /// Like [`get_all`](Self::get_all), keeping only descriptors accepted by
    /// `filter`.
    pub fn get_all_filtered<F>(
        &self,
        target: &dyn Model,
        filter: F,
    ) -> Option<IndexMap<String, FieldDescriptor>>
    where
        F: Fn(&str, &FieldDescriptor) -> bool,
    {
        let model_type = target.model_type();
        self.ensure_declared(model_type);

        let collect = |record: &FieldRecord| -> FieldRecord {
            record
                .iter()
                .filter(|(key, descriptor)| filter(key, descriptor))
                .map(|(key, descriptor)| (key.clone(), descriptor.clone()))
                .collect()
        };

        if let Some(id) = target.instance_id()
            && let Some(record) = self.instances.get(&id)
        {
            return Some(collect(&record));
        }
        self.types.get(&model_type.id()).map(|record| collect(&record))
    }

    /// Whether any field was declared for the type.
    #[must_use]
    pub fn contains_type(&self, model_type: ModelType) -> bool {
        self.types.contains_key(&model_type.id())
    }
}

fn merge_into(record: &mut FieldRecord, field: &str, patch: DescriptorPatch) -> FieldDescriptor {
    match record.get_mut(field) {
        Some(existing) => {
            patch.apply(existing);
            existing.clone()
        }
        None => {
            let descriptor = patch.into_descriptor(field);
            record.insert(field.to_owned(), descriptor.clone());
            descriptor
        }
    }
}
