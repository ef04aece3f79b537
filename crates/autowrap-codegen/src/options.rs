//! Options for the contract and wrapper generators

use crate::declaration::Visibility;
use crate::member::MemberTranslator;

/// Default name of the field holding the wrapped instance
pub const DEFAULT_WRAPPED_FIELD_NAME: &str = "_wrapped";

/// Options shared by the contract and type generators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub visibility: Visibility,
    /// Method names that wrapper members override rather than seal
    pub override_candidates: Vec<String>,
    /// Add a `Wrapped` getter exposing the wrapped instance
    pub expose_wrapped_instance: bool,
    pub wrapped_field_name: String,
}

impl GeneratorOptions {
    pub fn builder() -> GeneratorOptionsBuilder {
        GeneratorOptionsBuilder::default()
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub(crate) fn translator(&self) -> MemberTranslator {
        MemberTranslator::with_override_candidates(self.override_candidates.iter().cloned())
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            visibility: Visibility::Internal,
            override_candidates: MemberTranslator::DEFAULT_OVERRIDE_CANDIDATES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            expose_wrapped_instance: false,
            wrapped_field_name: DEFAULT_WRAPPED_FIELD_NAME.to_string(),
        }
    }
}

/// Builder for [`GeneratorOptions`]
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptionsBuilder {
    options: GeneratorOptions,
}

impl GeneratorOptionsBuilder {
    /// Generate public declarations instead of assembly-internal ones
    pub fn with_public(mut self) -> Self {
        self.options.visibility = Visibility::Public;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.options.visibility = visibility;
        self
    }

    pub fn with_override_candidates<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.override_candidates = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_wrapped_instance_property(mut self) -> Self {
        self.options.expose_wrapped_instance = true;
        self
    }

    pub fn with_wrapped_field_name<S: Into<String>>(mut self, name: S) -> Self {
        self.options.wrapped_field_name = name.into();
        self
    }

    pub fn build(self) -> GeneratorOptions {
        self.options
    }
}
