//! Contract (interface) declarations

use crate::declaration::ContractDeclarationModel;
use crate::member::{public_instance_members, GenerateAs, MemberTranslator};
use crate::options::GeneratorOptions;
use crate::registry::{RegisteredType, TypeRegistry};
use autowrap_core::{AutoWrapResult, TypeDescriptor};

/// Builds the contract exposing a registered type's public surface
#[derive(Debug, Clone)]
pub struct ContractGenerator {
    options: GeneratorOptions,
    translator: MemberTranslator,
}

impl ContractGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        let translator = options.translator();
        Self { options, translator }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Build the contract for a registry entry
    ///
    /// Members keep declaration order. The first member that cannot be
    /// translated fails the whole contract.
    pub fn build(&self, entry: &RegisteredType<'_>) -> AutoWrapResult<ContractDeclarationModel> {
        let original = entry.original();
        log::debug!("Generating contract {} for {}", entry.contract_name(), entry.original_name());

        let members = public_instance_members(original)
            .map(|member| self.translator.translate_member(member, entry.original_name(), GenerateAs::Contract))
            .collect::<AutoWrapResult<Vec<_>>>()?;

        Ok(ContractDeclarationModel {
            name: entry.contract_name().to_string(),
            visibility: self.options.visibility,
            original_type_name: entry.original_name().to_string(),
            members,
        })
    }

    /// Look the type up in the registry and build its contract
    pub fn generate_declaration(
        &self,
        registry: &TypeRegistry<'_>,
        original: &dyn TypeDescriptor,
    ) -> AutoWrapResult<ContractDeclarationModel> {
        self.build(registry.entry(original)?)
    }
}

impl Default for ContractGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}
