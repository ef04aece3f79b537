//! Wrapper type declarations
//!
//! A wrapper holds one instance of the original type in a read-only field,
//! receives it through its only constructor, implements the generated
//! contract, and forwards every public member to the instance.

use crate::declaration::{
    ConstructorDeclaration, FieldDeclaration, MemberAttributes, ParameterDeclaration, ParameterDirection,
    PropertyDeclaration, TypeDeclarationModel,
};
use crate::member::{public_instance_members, GenerateAs, MemberTranslator};
use crate::options::GeneratorOptions;
use crate::registry::{RegisteredType, TypeRegistry};
use autowrap_core::{AutoWrapResult, TypeDescriptor};

/// Name of the optional property exposing the wrapped instance
pub const WRAPPED_PROPERTY_NAME: &str = "Wrapped";

const CONSTRUCTOR_PARAMETER_NAME: &str = "wrapped";

/// Builds the wrapper type for a registered original type
#[derive(Debug, Clone)]
pub struct TypeGenerator {
    options: GeneratorOptions,
    translator: MemberTranslator,
}

impl TypeGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        let translator = options.translator();
        Self { options, translator }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Build the wrapper for a registry entry
    ///
    /// Forwarding members keep declaration order; identity methods are marked
    /// as overrides and asynchronous methods keep their async marker. The
    /// first member that cannot be translated fails the whole type.
    pub fn build(&self, entry: &RegisteredType<'_>) -> AutoWrapResult<TypeDeclarationModel> {
        let original = entry.original();
        let original_name = entry.original_name().to_string();
        log::debug!("Generating type {} for {}", entry.type_name(), original_name);

        let members = public_instance_members(original)
            .map(|member| self.translator.translate_member(member, &original_name, GenerateAs::Type))
            .collect::<AutoWrapResult<Vec<_>>>()?;

        let wrapped_property = if !self.options.expose_wrapped_instance {
            None
        } else if members.iter().any(|m| m.name() == WRAPPED_PROPERTY_NAME) {
            log::warn!(
                "{} already declares a '{}' member; not exposing the wrapped instance",
                original_name,
                WRAPPED_PROPERTY_NAME
            );
            None
        } else {
            Some(PropertyDeclaration {
                name: WRAPPED_PROPERTY_NAME.to_string(),
                attributes: MemberAttributes::public_final(),
                type_name: original_name.clone(),
                has_get: true,
                has_set: false,
                index_parameters: Vec::new(),
            })
        };

        Ok(TypeDeclarationModel {
            name: entry.type_name().to_string(),
            visibility: self.options.visibility,
            implemented_contract_name: entry.contract_name().to_string(),
            wrapped_field: FieldDeclaration {
                name: self.options.wrapped_field_name.clone(),
                type_name: original_name.clone(),
                is_readonly: true,
            },
            constructor: ConstructorDeclaration {
                parameters: vec![ParameterDeclaration {
                    name: CONSTRUCTOR_PARAMETER_NAME.to_string(),
                    type_name: original_name.clone(),
                    direction: ParameterDirection::In,
                }],
            },
            wrapped_field_type_name: original_name,
            members,
            wrapped_property,
        })
    }

    /// Look the type up in the registry and build its wrapper
    pub fn generate_declaration(
        &self,
        registry: &TypeRegistry<'_>,
        original: &dyn TypeDescriptor,
    ) -> AutoWrapResult<TypeDeclarationModel> {
        self.build(registry.entry(original)?)
    }
}

impl Default for TypeGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{MemberModifier, Visibility};
    use crate::naming::FixedName;
    use autowrap_core::{MethodDescriptor, ParameterDescriptor, PropertyDescriptor, TypeMetadata, TypeRef};

    fn widget() -> TypeMetadata {
        TypeMetadata::class("Acme", "Widget")
            .with_member(MethodDescriptor::new("Equals", TypeRef::boolean()).with_parameter(ParameterDescriptor::new("obj", TypeRef::object())))
            .with_member(MethodDescriptor::new("Spin", TypeRef::void()))
            .with_member(
                MethodDescriptor::new(
                    "LoadAsync",
                    TypeRef::generic("System.Threading.Tasks", "Task`1", vec![TypeRef::string()]),
                )
                .asynchronous(),
            )
            .with_member(PropertyDescriptor::read_write("Size", TypeRef::int32()))
    }

    #[test]
    fn test_wrapper_shape() {
        let widget = widget();
        let mut registry = TypeRegistry::new();
        registry.register(&widget, None, None).unwrap();

        let model = TypeGenerator::default().generate_declaration(&registry, &widget).unwrap();

        assert_eq!(model.name, "WidgetWrapper");
        assert_eq!(model.implemented_contract_name, "IWidgetWrapper");
        assert_eq!(model.visibility, Visibility::Internal);
        assert_eq!(model.wrapped_field_type_name, "Acme.Widget");
        assert_eq!(model.wrapped_field.name, "_wrapped");
        assert_eq!(model.wrapped_field.type_name, "Acme.Widget");
        assert!(model.wrapped_field.is_readonly);
        assert_eq!(model.constructor.parameters.len(), 1);
        assert_eq!(model.constructor.parameters[0].type_name, "Acme.Widget");
        assert_eq!(model.members.len(), 4);
    }

    #[test]
    fn test_wrapper_markers() {
        let widget = widget();
        let mut registry = TypeRegistry::new();
        registry.register(&widget, None, None).unwrap();

        let model = TypeGenerator::default().generate_declaration(&registry, &widget).unwrap();

        let equals = model.methods().find(|m| m.name == "Equals").unwrap();
        assert_eq!(equals.attributes.modifier, MemberModifier::Override);

        let spin = model.methods().find(|m| m.name == "Spin").unwrap();
        assert_eq!(spin.attributes.modifier, MemberModifier::Final);

        let load = model.methods().find(|m| m.name == "LoadAsync").unwrap();
        assert!(load.is_async);
    }

    #[test]
    fn test_custom_type_name() {
        let widget = widget();
        let mut registry =
            TypeRegistry::new().with_type_naming(Box::new(FixedName("CustomTypeName".to_string())));
        registry.register(&widget, None, None).unwrap();

        let model = TypeGenerator::default().generate_declaration(&registry, &widget).unwrap();
        assert_eq!(model.name, "CustomTypeName");
        assert_eq!(model.implemented_contract_name, "IWidgetWrapper");
    }

    #[test]
    fn test_exposed_wrapped_instance() {
        let widget = widget();
        let mut registry = TypeRegistry::new();
        registry.register(&widget, None, None).unwrap();

        let generator = TypeGenerator::new(
            GeneratorOptions::builder()
                .with_public()
                .with_wrapped_instance_property()
                .build(),
        );
        let model = generator.generate_declaration(&registry, &widget).unwrap();

        assert_eq!(model.visibility, Visibility::Public);
        let wrapped = model.wrapped_property.as_ref().unwrap();
        assert_eq!(wrapped.name, WRAPPED_PROPERTY_NAME);
        assert_eq!(wrapped.type_name, "Acme.Widget");
        assert!(wrapped.has_get);
        assert!(!wrapped.has_set);
        assert_eq!(model.members.len(), 4);
    }

    #[test]
    fn test_wrapped_property_skipped_on_name_clash() {
        let clashing = TypeMetadata::class("Acme", "Holder")
            .with_member(PropertyDescriptor::read_only(WRAPPED_PROPERTY_NAME, TypeRef::object()));
        let mut registry = TypeRegistry::new();
        registry.register(&clashing, None, None).unwrap();

        let generator = TypeGenerator::new(GeneratorOptions::builder().with_wrapped_instance_property().build());
        let model = generator.generate_declaration(&registry, &clashing).unwrap();

        assert!(model.wrapped_property.is_none());
        assert_eq!(model.members.len(), 1);
    }

    #[test]
    fn test_empty_type_still_has_field_and_constructor() {
        let empty = TypeMetadata::class("Acme", "Empty");
        let mut registry = TypeRegistry::new();
        registry.register(&empty, None, None).unwrap();

        let model = TypeGenerator::default().generate_declaration(&registry, &empty).unwrap();
        assert!(model.members.is_empty());
        assert!(model.wrapped_property.is_none());
        assert_eq!(model.wrapped_field.type_name, "Acme.Empty");
        assert_eq!(model.constructor.parameters.len(), 1);
    }

    #[test]
    fn test_repeated_generation_is_identical() {
        let widget = widget();
        let mut registry = TypeRegistry::new();
        registry.register(&widget, None, None).unwrap();

        let generator = TypeGenerator::default();
        let first = generator.generate_declaration(&registry, &widget).unwrap();
        let second = generator.generate_declaration(&registry, &widget).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }
}
