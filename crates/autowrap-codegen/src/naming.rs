//! Naming strategies for generated types and contracts
//!
//! Strategies must be pure: the registry calls them once per registration and
//! caches the result.

use crate::type_name::clean_type_name;
use autowrap_core::TypeDescriptor;

/// Computes the name of the generated wrapper type
pub trait TypeNamingStrategy {
    fn type_name_for(&self, original: &dyn TypeDescriptor) -> String;
}

/// Computes the name of the generated contract
pub trait ContractNamingStrategy {
    fn contract_name_for(&self, original: &dyn TypeDescriptor) -> String;
}

/// `Widget` becomes `WidgetWrapper` and `IWidgetWrapper`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamingStrategy;

impl DefaultNamingStrategy {
    fn base_name(original: &dyn TypeDescriptor) -> String {
        // Nested types keep only their innermost name
        let cleaned = clean_type_name(original.name());
        match cleaned.rsplit_once('.') {
            Some((_, inner)) => inner.to_string(),
            None => cleaned,
        }
    }
}

impl TypeNamingStrategy for DefaultNamingStrategy {
    fn type_name_for(&self, original: &dyn TypeDescriptor) -> String {
        format!("{}Wrapper", Self::base_name(original))
    }
}

impl ContractNamingStrategy for DefaultNamingStrategy {
    fn contract_name_for(&self, original: &dyn TypeDescriptor) -> String {
        format!("I{}Wrapper", Self::base_name(original))
    }
}

/// Always returns the same name; handy for single-type generation
#[derive(Debug, Clone)]
pub struct FixedName(pub String);

impl TypeNamingStrategy for FixedName {
    fn type_name_for(&self, _original: &dyn TypeDescriptor) -> String {
        self.0.clone()
    }
}

impl ContractNamingStrategy for FixedName {
    fn contract_name_for(&self, _original: &dyn TypeDescriptor) -> String {
        self.0.clone()
    }
}
