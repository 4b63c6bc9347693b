//! Model analysis: turning a model into its ordered field → descriptor map.
//!
//! Analysis reads the declared descriptors of every field the instance
//! enumerates and, for CLASS/OBJECT fields whose default is a nested model
//! constructor, recursively analyzes a fresh nested instance and attaches the
//! result as [`FieldDescriptor::nested_fields`]. Results are cached per
//! model identity for the lifetime of the process.

use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use indexmap::IndexMap;

use crate::config::AnalyzerConfig;
use crate::descriptor::FieldDescriptor;
use crate::error::ModelError;
use crate::model::{InstanceId, Model, ModelConstructor, ModelType};
use crate::store::MetadataStore;

// ============================================================================
// ANALYZED MODEL
// ============================================================================

/// Ordered field → descriptor map of one model. Order follows the model's
/// own field enumeration; fields without a declared descriptor are absent.
#[derive(Clone, Default)]
pub struct AnalyzedModel {
    fields: IndexMap<String, FieldDescriptor>,
}

impl AnalyzedModel {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(key, descriptor)| (key.as_str(), descriptor))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolves a dotted path such as `customer.address.city` through the
    /// nested field maps.
    ///
    /// Returns `None` when a segment is missing, or when an intermediate
    /// segment has no nested fields.
    #[must_use]
    pub fn field_meta(&self, path: &str) -> Option<&FieldDescriptor> {
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.nested_fields.as_deref()?.get(segment)?;
        }
        Some(current)
    }
}

impl fmt::Debug for AnalyzedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a AnalyzedModel {
    type Item = (&'a String, &'a FieldDescriptor);
    type IntoIter = indexmap::map::Iter<'a, String, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<FieldDescriptor> for AnalyzedModel {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|descriptor| (descriptor.key.clone(), descriptor))
                .collect(),
        }
    }
}

impl From<IndexMap<String, FieldDescriptor>> for AnalyzedModel {
    fn from(fields: IndexMap<String, FieldDescriptor>) -> Self {
        Self { fields }
    }
}

// ============================================================================
// TARGET
// ============================================================================

/// What to analyze: a live instance, or a constructor of fresh instances.
#[derive(Clone, Copy)]
pub enum AnalyzeTarget<'a> {
    Instance(&'a dyn Model),
    Constructor(&'a ModelConstructor),
}

impl AnalyzeTarget<'_> {
    #[must_use]
    pub fn model_type(&self) -> ModelType {
        match self {
            Self::Instance(model) => model.model_type(),
            Self::Constructor(ctor) => ctor.model_type(),
        }
    }

    fn cache_key(&self) -> CacheKey {
        match self {
            Self::Instance(model) => CacheKey::Instance(model.model_type().id(), model.instance_id()),
            Self::Constructor(ctor) => CacheKey::Constructor(ctor.model_type().id()),
        }
    }
}

impl<'a, M: Model> From<&'a M> for AnalyzeTarget<'a> {
    fn from(model: &'a M) -> Self {
        Self::Instance(model)
    }
}

impl<'a> From<&'a dyn Model> for AnalyzeTarget<'a> {
    fn from(model: &'a dyn Model) -> Self {
        Self::Instance(model)
    }
}

impl<'a> From<&'a ModelConstructor> for AnalyzeTarget<'a> {
    fn from(ctor: &'a ModelConstructor) -> Self {
        Self::Constructor(ctor)
    }
}

/// Stable identity of an analysis input. Holds no reference to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CacheKey {
    Constructor(TypeId),
    Instance(TypeId, Option<InstanceId>),
}

// ============================================================================
// ANALYZER
// ============================================================================

static GLOBAL: LazyLock<Analyzer> = LazyLock::new(|| Analyzer::new(AnalyzerConfig::from_env()));

/// Builds and caches analyzed models from the global metadata store.
///
/// The cache is never invalidated: descriptors declared after a model was
/// first analyzed are not seen by later analyses of that model.
pub struct Analyzer {
    config: AnalyzerConfig,
    store: &'static MetadataStore,
    cache: DashMap<CacheKey, Arc<AnalyzedModel>>,
}

impl Analyzer {
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            store: MetadataStore::global(),
            cache: DashMap::new(),
        }
    }

    /// The analyzer shared by the whole process, configured from the
    /// environment on first use.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Number of cached analyses.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Analyzes `target` at depth 0 with the configured maximum depth.
    pub fn analyze<'a>(
        &self,
        target: impl Into<AnalyzeTarget<'a>>,
    ) -> Result<Arc<AnalyzedModel>, ModelError> {
        self.analyze_at(target, 0, self.config.max_depth)
    }

    /// Analyzes `target` as if reached at `depth` of a nested chain.
    ///
    /// # Errors
    ///
    /// [`ModelError::RecursionLimit`] when `depth` (or any nested level)
    /// exceeds `max_depth`, and [`ModelError::Construction`] when a model
    /// constructor fails.
    pub fn analyze_at<'a>(
        &self,
        target: impl Into<AnalyzeTarget<'a>>,
        depth: usize,
        max_depth: usize,
    ) -> Result<Arc<AnalyzedModel>, ModelError> {
        let target = target.into();
        check_depth(target.model_type(), depth, max_depth)?;

        let key = target.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!(model = target.model_type().name(), "analysis cache hit");
            return Ok(Arc::clone(&hit));
        }

        let analyzed = match target {
            AnalyzeTarget::Instance(model) => self.analyze_instance(model, depth, max_depth)?,
            AnalyzeTarget::Constructor(ctor) => {
                let instance = ctor.construct()?;
                self.analyze_instance(instance.as_ref(), depth, max_depth)?
            }
        };

        tracing::debug!(
            model = target.model_type().name(),
            fields = analyzed.len(),
            depth,
            "analyzed model"
        );

        // A concurrent analysis of the same key may have won; keep its Arc.
        let cached = self
            .cache
            .entry(key)
            .or_insert_with(|| Arc::new(analyzed))
            .clone();
        Ok(cached)
    }

    /// Analyzes a freshly built instance without touching the cache. A fresh
    /// instance has no identity anyone could look up again.
    pub(crate) fn analyze_fresh(
        &self,
        instance: &dyn Model,
        depth: usize,
        max_depth: usize,
    ) -> Result<Arc<AnalyzedModel>, ModelError> {
        check_depth(instance.model_type(), depth, max_depth)?;
        Ok(Arc::new(self.analyze_instance(instance, depth, max_depth)?))
    }

    fn analyze_instance(
        &self,
        instance: &dyn Model,
        depth: usize,
        max_depth: usize,
    ) -> Result<AnalyzedModel, ModelError> {
        let mut fields = IndexMap::new();

        for key in instance.field_names() {
            let Some(mut descriptor) = self.store.lookup(instance, key) else {
                continue;
            };

            let nested = match descriptor.nested_constructor() {
                Some(ctor) if descriptor.field_type.is_nested() => Some(ctor.construct()?),
                _ => None,
            };
            if let Some(nested) = nested {
                tracing::debug!(
                    model = instance.model_type().name(),
                    field = key,
                    nested = nested.model_type().name(),
                    depth = depth + 1,
                    "analyzing nested model"
                );
                descriptor.nested_fields =
                    Some(self.analyze_fresh(nested.as_ref(), depth + 1, max_depth)?);
            }

            fields.insert(key.to_owned(), descriptor);
        }

        Ok(AnalyzedModel { fields })
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

fn check_depth(model_type: ModelType, depth: usize, max_depth: usize) -> Result<(), ModelError> {
    if depth > max_depth {
        return Err(ModelError::RecursionLimit {
            model: model_type.name().to_owned(),
            max_depth,
        });
    }
    Ok(())
}

/// Analyzes a model instance or constructor with the process-wide analyzer.
///
/// # Examples
///
/// ```rust,ignore
/// let by_type = analyze_model(&ModelConstructor::of::<Pet>())?;
/// let by_instance = analyze_model(&pet)?;
/// let city = by_type.field_meta("owner.address.city");
/// ```
pub fn analyze_model<'a>(
    target: impl Into<AnalyzeTarget<'a>>,
) -> Result<Arc<AnalyzedModel>, ModelError> {
    Analyzer::global().analyze(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare::{FieldDeclarations, FieldOptions};
    use crate::kind::FieldType;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Address;

    impl Model for Address {
        fn model_type(&self) -> ModelType {
            ModelType::of::<Self>()
        }

        fn declare_fields(fields: &mut FieldDeclarations<'_>) {
            fields
                .field("street", FieldOptions::new(FieldType::String))
                .field("city", FieldOptions::new(FieldType::String).required());
        }

        fn field_names(&self) -> Vec<&str> {
            vec!["street", "city"]
        }

        fn field(&self, _name: &str) -> Value {
            Value::Null
        }
    }

    #[derive(Default)]
    struct Customer;

    impl Model for Customer {
        fn model_type(&self) -> ModelType {
            ModelType::of::<Self>()
        }

        fn declare_fields(fields: &mut FieldDeclarations<'_>) {
            fields
                .field("name", FieldOptions::new(FieldType::String))
                .field("address", FieldOptions::object::<Address>());
        }

        // `notes` has no descriptor and is skipped.
        fn field_names(&self) -> Vec<&str> {
            vec!["name", "notes", "address"]
        }

        fn field(&self, _name: &str) -> Value {
            Value::Null
        }
    }

    #[derive(Default)]
    struct Broken;

    impl Model for Broken {
        fn model_type(&self) -> ModelType {
            ModelType::of::<Self>()
        }

        fn declare_fields(fields: &mut FieldDeclarations<'_>) {
            fields.field(
                "part",
                FieldOptions::new(FieldType::Class).nested_with(ModelConstructor::with(
                    || -> Result<Address, ModelError> {
                        Err(ModelError::construction("Address", "no factory"))
                    },
                )),
            );
        }

        fn field_names(&self) -> Vec<&str> {
            vec!["part"]
        }

        fn field(&self, _name: &str) -> Value {
            Value::Null
        }
    }

    #[test]
    fn analysis_follows_field_order_and_skips_undeclared() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        let analyzed = analyzer.analyze(&Customer).unwrap();
        assert_eq!(analyzed.keys().collect::<Vec<_>>(), vec!["name", "address"]);
    }

    #[test]
    fn nested_fields_are_attached() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        let analyzed = analyzer.analyze(&ModelConstructor::of::<Customer>()).unwrap();

        let address = analyzed.get("address").unwrap();
        let nested = address.nested_fields.as_ref().expect("nested analysis");
        assert_eq!(nested.keys().collect::<Vec<_>>(), vec!["street", "city"]);

        // The store keeps its own descriptor untouched.
        let stored = MetadataStore::global().lookup(&Customer, "address").unwrap();
        assert!(stored.nested_fields.is_none());
    }

    #[test]
    fn field_meta_walks_dotted_paths() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        let analyzed = analyzer.analyze(&Customer).unwrap();

        assert!(analyzed.field_meta("address.city").unwrap().required);
        assert!(analyzed.field_meta("address.zip").is_none());
        assert!(analyzed.field_meta("name.first").is_none());
        assert!(analyzed.field_meta("missing").is_none());
    }

    #[test]
    fn cache_returns_the_same_map() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        let ctor = ModelConstructor::of::<Customer>();
        let first = analyzer.analyze(&ctor).unwrap();
        let second = analyzer.analyze(&ctor).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(analyzer.cached(), 1);
    }

    #[test]
    fn depth_beyond_limit_fails() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        let err = analyzer.analyze_at(&Address, 3, 2).unwrap_err();
        assert_eq!(
            err,
            ModelError::RecursionLimit {
                model: "Address".into(),
                max_depth: 2
            }
        );

        // Nested analysis needs depth 1.
        assert!(analyzer.analyze_at(&Customer, 0, 0).is_err());
        assert!(analyzer.analyze_at(&Customer, 0, 1).is_ok());
    }

    #[test]
    fn construction_failures_propagate() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        let err = analyzer.analyze(&Broken).unwrap_err();
        assert_eq!(err.code(), "MODEL_CONSTRUCTION");
    }
}
