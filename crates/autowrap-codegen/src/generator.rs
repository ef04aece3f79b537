//! End-to-end generation: registry entries in, one compilation unit out

use crate::config::GeneratorConfig;
use crate::contract::ContractGenerator;
use crate::pragma::PragmaWarnings;
use crate::registry::{RegisteredType, TypeRegistry};
use crate::render::{CSharpRenderer, CompilationUnit};
use crate::wrapper::TypeGenerator;
use autowrap_core::{AutoWrapResult, TypeDescriptor};

/// Builds the contract and wrapper of each type and merges them into one unit
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    contracts: ContractGenerator,
    types: TypeGenerator,
    namespace: String,
    pragma: PragmaWarnings,
    renderer: CSharpRenderer,
}

impl CodeGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            contracts: ContractGenerator::new(config.contract_options()),
            types: TypeGenerator::new(config.type_options()),
            namespace: config.namespace.clone(),
            pragma: config.pragma(),
            renderer: CSharpRenderer::new(),
        }
    }

    pub fn contract_generator(&self) -> &ContractGenerator {
        &self.contracts
    }

    pub fn type_generator(&self) -> &TypeGenerator {
        &self.types
    }

    /// Generate declarations for the given originals, in the given order
    ///
    /// Every original must already be registered. Each contributes its
    /// contract followed by its wrapper.
    pub fn generate_unit<'a, I>(&self, registry: &TypeRegistry<'_>, originals: I) -> AutoWrapResult<CompilationUnit>
    where
        I: IntoIterator<Item = &'a dyn TypeDescriptor>,
    {
        let units = originals
            .into_iter()
            .map(|original| registry.entry(original).and_then(|entry| self.unit_for(entry)))
            .collect::<AutoWrapResult<Vec<_>>>()?;

        self.merge(units)
    }

    /// Generate declarations for every registered type, in registry order
    pub fn generate_registered(&self, registry: &TypeRegistry<'_>) -> AutoWrapResult<CompilationUnit> {
        let units = registry
            .entries()
            .map(|entry| self.unit_for(entry))
            .collect::<AutoWrapResult<Vec<_>>>()?;

        log::info!("Generated declarations for {} registered types", units.len());
        self.merge(units)
    }

    /// Generate and render every registered type as C# source
    pub fn generate_source(&self, registry: &TypeRegistry<'_>) -> AutoWrapResult<String> {
        let unit = self.generate_registered(registry)?;
        Ok(self.renderer.render(&unit))
    }

    fn unit_for(&self, entry: &RegisteredType<'_>) -> AutoWrapResult<CompilationUnit> {
        let mut unit = CompilationUnit::new(self.namespace.clone()).with_pragma(self.pragma.clone());
        unit.push(self.contracts.build(entry)?);
        unit.push(self.types.build(entry)?);
        Ok(unit)
    }

    fn merge(&self, units: Vec<CompilationUnit>) -> AutoWrapResult<CompilationUnit> {
        if units.is_empty() {
            return Ok(CompilationUnit::new(self.namespace.clone()).with_pragma(self.pragma.clone()));
        }
        CompilationUnit::merge(units)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(&GeneratorConfig::default())
    }
}
