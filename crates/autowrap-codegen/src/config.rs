//! Generator configuration
//!
//! Settings are read from a TOML file; every field is optional and falls back
//! to the defaults below.
//!
//! ```toml
//! namespace = "Acme.Wrappers"
//! contract_public = true
//! disabled_warnings = [1591, 108]
//! ```

use crate::declaration::Visibility;
use crate::member::MemberTranslator;
use crate::options::{GeneratorOptions, DEFAULT_WRAPPED_FIELD_NAME};
use crate::pragma::PragmaWarnings;
use crate::registry::ForbiddenBaseTypes;
use autowrap_core::{is_blank, AutoWrapError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_NAMESPACE: &str = "AutoWrapper.Generated";

/// Warning about missing XML documentation on public members
pub const MISSING_XML_COMMENT_WARNING: u32 = 1591;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    fn invalid<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for AutoWrapError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { field, message } => AutoWrapError::configuration_field(message, field),
            other => AutoWrapError::configuration(other.to_string()),
        }
    }
}

/// Configuration for contract and wrapper generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Namespace enclosing the generated declarations
    pub namespace: String,

    /// Generate public contracts instead of internal ones
    pub contract_public: bool,

    /// Generate public wrapper types instead of internal ones
    pub type_public: bool,

    /// Methods that wrapper members override instead of seal
    pub override_candidates: Vec<String>,

    /// Types excluded from bulk registration, with everything deriving from them
    pub forbidden_base_types: Vec<String>,

    /// Compiler warnings disabled at the top of the generated file
    pub disabled_warnings: Vec<u32>,

    /// Add a getter exposing the wrapped instance on every wrapper
    pub expose_wrapped_instance: bool,

    pub wrapped_field_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            contract_public: false,
            type_public: false,
            override_candidates: MemberTranslator::DEFAULT_OVERRIDE_CANDIDATES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            forbidden_base_types: ForbiddenBaseTypes::DEFAULT.iter().map(|name| name.to_string()).collect(),
            disabled_warnings: vec![MISSING_XML_COMMENT_WARNING],
            expose_wrapped_instance: false,
            wrapped_field_name: DEFAULT_WRAPPED_FIELD_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file {:?}: {}", path.as_ref(), e)))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_dotted_identifier(&self.namespace) {
            return Err(ConfigError::invalid(
                "namespace",
                format!("'{}' is not a dotted identifier", self.namespace),
            ));
        }

        if !is_identifier(&self.wrapped_field_name) {
            return Err(ConfigError::invalid(
                "wrapped_field_name",
                format!("'{}' is not a valid identifier", self.wrapped_field_name),
            ));
        }

        if self.override_candidates.iter().any(|name| is_blank(name)) {
            return Err(ConfigError::invalid("override_candidates", "method names cannot be empty"));
        }

        if self.forbidden_base_types.iter().any(|name| is_blank(name)) {
            return Err(ConfigError::invalid("forbidden_base_types", "type names cannot be empty"));
        }

        Ok(())
    }

    pub fn contract_options(&self) -> GeneratorOptions {
        self.options(self.contract_public)
    }

    pub fn type_options(&self) -> GeneratorOptions {
        self.options(self.type_public)
    }

    pub fn forbidden_base_types(&self) -> ForbiddenBaseTypes {
        ForbiddenBaseTypes::new(self.forbidden_base_types.iter().cloned())
    }

    pub fn pragma(&self) -> PragmaWarnings {
        self.disabled_warnings.iter().copied().collect()
    }

    fn options(&self, public: bool) -> GeneratorOptions {
        let mut builder = GeneratorOptions::builder()
            .with_visibility(Visibility::from_public_flag(public))
            .with_override_candidates(self.override_candidates.iter().cloned())
            .with_wrapped_field_name(self.wrapped_field_name.clone());
        if self.expose_wrapped_instance {
            builder = builder.with_wrapped_instance_property();
        }
        builder.build()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => chars.all(|c| c == '_' || c.is_alphanumeric()),
        _ => false,
    }
}

fn is_dotted_identifier(name: &str) -> bool {
    name.split('.').all(is_identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.namespace, "AutoWrapper.Generated");
        assert!(!config.contract_public);
        assert!(!config.type_public);
        assert_eq!(config.disabled_warnings, vec![1591]);
        assert_eq!(config.wrapped_field_name, "_wrapped");
        assert!(config.validate().is_ok());
        assert!(config.forbidden_base_types().contains("System.Runtime.InteropServices._Attribute"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GeneratorConfig::from_str(
            r#"
            namespace = "Acme.Wrappers"
            contract_public = true
            disabled_warnings = [1591, 108]
            "#,
        )
        .unwrap();

        assert_eq!(config.namespace, "Acme.Wrappers");
        assert!(config.contract_options().is_public());
        assert!(!config.type_options().is_public());
        assert_eq!(config.pragma().to_string(), "#pragma warning disable 1591, 108");
        assert_eq!(config.override_candidates.len(), 3);
    }

    #[test]
    fn test_options_carry_settings() {
        let config = GeneratorConfig {
            type_public: true,
            expose_wrapped_instance: true,
            wrapped_field_name: "_inner".to_string(),
            override_candidates: vec!["Equals".to_string()],
            ..GeneratorConfig::default()
        };

        let options = config.type_options();
        assert!(options.is_public());
        assert!(options.expose_wrapped_instance);
        assert_eq!(options.wrapped_field_name, "_inner");
        assert_eq!(options.override_candidates, vec!["Equals"]);
    }

    #[test]
    fn test_invalid_namespace() {
        let err = GeneratorConfig::from_str(r#"namespace = "Acme..Wrappers""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "namespace"));

        let err = GeneratorConfig::from_str(r#"namespace = "1Acme""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_field_name() {
        let err = GeneratorConfig::from_str(r#"wrapped_field_name = "my field""#).unwrap_err();
        let converted: AutoWrapError = err.into();
        assert!(matches!(
            converted,
            AutoWrapError::Configuration { field: Some(ref field), .. } if field == "wrapped_field_name"
        ));
    }

    #[test]
    fn test_blank_override_candidate() {
        let err = GeneratorConfig::from_str(r#"override_candidates = ["Equals", " "]"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = GeneratorConfig::from_str("namespace = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "namespace = \"Acme.Generated\"").unwrap();
        writeln!(file, "expose_wrapped_instance = true").unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.namespace, "Acme.Generated");
        assert!(config.expose_wrapped_instance);
    }

    #[test]
    fn test_missing_file() {
        let err = GeneratorConfig::from_file("/nonexistent/autowrap.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
