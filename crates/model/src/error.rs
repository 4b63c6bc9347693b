/// Structural failure raised while analyzing or validating a model.
///
/// These are programmer or configuration errors, not data problems: bad
/// input data is always reported as [`ValidationError`](crate::validation::ValidationError)
/// values instead. A `ModelError` aborts the whole validation pass and is
/// returned to the caller of [`Model::validate`](crate::model::Model::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The nested model chain is deeper than the configured maximum.
    #[error("maximum recursion depth ({max_depth}) reached while analyzing `{model}`")]
    RecursionLimit { model: String, max_depth: usize },

    /// A nested model constructor failed to produce an instance.
    #[error("failed to construct model `{model}`: {reason}")]
    Construction { model: String, reason: String },

    /// A field pattern could not be compiled into a regular expression.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A model's custom-rule hook failed.
    #[error("custom rules failed for `{model}`: {reason}")]
    CustomRules { model: String, reason: String },
}

impl ModelError {
    /// Shorthand for a construction failure.
    pub fn construction(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Construction {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a custom-rule hook failure.
    pub fn custom_rules(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CustomRules {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::RecursionLimit { .. } => "structure",
            Self::Construction { .. } => "construction",
            Self::InvalidPattern { .. } => "configuration",
            Self::CustomRules { .. } => "hook",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::RecursionLimit { .. } => "MODEL_RECURSION_LIMIT",
            Self::Construction { .. } => "MODEL_CONSTRUCTION",
            Self::InvalidPattern { .. } => "MODEL_INVALID_PATTERN",
            Self::CustomRules { .. } => "MODEL_CUSTOM_RULES",
        }
    }

    /// Whether the operation might succeed if retried with the same input.
    ///
    /// Only the custom-rule hook can depend on outside state (a uniqueness
    /// lookup, say); everything else is deterministic.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::CustomRules { .. })
    }
}
