//! Translation of member metadata into member declarations

use crate::declaration::{
    MemberAttributes, MemberDeclaration, MethodDeclaration, ParameterDeclaration, ParameterDirection,
    PropertyDeclaration,
};
use crate::type_name::format_type_name;
use autowrap_core::{
    AutoWrapError, AutoWrapResult, MemberDescriptor, MethodDescriptor, ParameterDescriptor, PropertyDescriptor,
    TypeDescriptor,
};
use std::collections::HashSet;

/// Which generated artifact a member is being translated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerateAs {
    /// Signature only; never override or async markers
    Contract,
    /// Forwarding member on the wrapper type
    Type,
}

/// Translates method and property metadata into declarations
#[derive(Debug, Clone)]
pub struct MemberTranslator {
    override_candidates: HashSet<String>,
}

impl MemberTranslator {
    /// Identity methods every object inherits
    pub const DEFAULT_OVERRIDE_CANDIDATES: &'static [&'static str] = &["ToString", "GetHashCode", "Equals"];

    pub fn new() -> Self {
        Self::with_override_candidates(Self::DEFAULT_OVERRIDE_CANDIDATES.iter().copied())
    }

    /// Use a custom set of method names that wrapper members must override
    pub fn with_override_candidates<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            override_candidates: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_override_candidate(&self, method_name: &str) -> bool {
        self.override_candidates.contains(method_name)
    }

    pub fn translate_member(
        &self,
        member: &MemberDescriptor,
        declaring_type: &str,
        generate_as: GenerateAs,
    ) -> AutoWrapResult<MemberDeclaration> {
        match member {
            MemberDescriptor::Method(method) => self
                .translate_method(method, declaring_type, generate_as)
                .map(MemberDeclaration::Method),
            MemberDescriptor::Property(property) => self
                .translate_property(property, declaring_type)
                .map(MemberDeclaration::Property),
        }
    }

    pub fn translate_method(
        &self,
        method: &MethodDescriptor,
        declaring_type: &str,
        generate_as: GenerateAs,
    ) -> AutoWrapResult<MethodDeclaration> {
        if !method.is_public() {
            return Err(AutoWrapError::unsupported_member(
                &method.name,
                declaring_type,
                "non-public methods are not supported",
            ));
        }

        let is_wrapper_member = generate_as == GenerateAs::Type;
        let attributes = if is_wrapper_member && self.is_override_candidate(&method.name) {
            MemberAttributes::public_override()
        } else {
            MemberAttributes::public_final()
        };

        log::debug!(
            "Translating method {}.{} ({:?}, {:?})",
            declaring_type,
            method.name,
            generate_as,
            attributes.modifier
        );

        Ok(MethodDeclaration {
            name: method.name.clone(),
            attributes,
            parameters: method.parameters.iter().map(translate_parameter).collect(),
            return_type_name: format_type_name(&method.return_type),
            is_async: is_wrapper_member && method.is_async,
        })
    }

    pub fn translate_property(
        &self,
        property: &PropertyDescriptor,
        declaring_type: &str,
    ) -> AutoWrapResult<PropertyDeclaration> {
        if !property.is_public() {
            return Err(AutoWrapError::unsupported_member(
                &property.name,
                declaring_type,
                "properties without a public accessor are not supported",
            ));
        }

        let index_parameters = property
            .index_parameters
            .iter()
            .map(|parameter| ParameterDeclaration {
                name: parameter.name.clone(),
                type_name: format_type_name(parameter.parameter_type.dereferenced()),
                direction: ParameterDirection::In,
            })
            .collect();

        Ok(PropertyDeclaration {
            name: property.name.clone(),
            attributes: MemberAttributes::public_final(),
            type_name: format_type_name(&property.property_type),
            has_get: property.has_public_getter(),
            has_set: property.has_public_setter(),
            index_parameters,
        })
    }
}

impl Default for MemberTranslator {
    fn default() -> Self {
        Self::new()
    }
}

/// Public instance methods and properties of a type, in declaration order
pub fn public_instance_members(original: &dyn TypeDescriptor) -> impl Iterator<Item = &MemberDescriptor> {
    original.members().iter().filter(|member| member.is_public_instance())
}

/// By-reference parameters become `Out` when the host marks them `out`,
/// `Ref` otherwise; everything else is `In`.
pub fn parameter_direction(parameter: &ParameterDescriptor) -> ParameterDirection {
    match (parameter.is_by_ref(), parameter.is_out) {
        (true, true) => ParameterDirection::Out,
        (true, false) => ParameterDirection::Ref,
        (false, _) => ParameterDirection::In,
    }
}

fn translate_parameter(parameter: &ParameterDescriptor) -> ParameterDeclaration {
    ParameterDeclaration {
        name: parameter.name.clone(),
        type_name: format_type_name(parameter.parameter_type.dereferenced()),
        direction: parameter_direction(parameter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::MemberModifier;
    use autowrap_core::{Accessibility, TypeRef};

    const OWNER: &str = "Acme.Widget";

    fn task_of_int() -> TypeRef {
        TypeRef::generic("System.Threading.Tasks", "Task`1", vec![TypeRef::int32()])
    }

    #[test]
    fn test_method_name_and_parameters() {
        let method = MethodDescriptor::new("Function2", TypeRef::void())
            .with_parameter(ParameterDescriptor::new("b", TypeRef::boolean().nullable()))
            .with_parameter(ParameterDescriptor::new(
                "o",
                TypeRef::generic("System", "Tuple`2", vec![TypeRef::string(), TypeRef::int32()]),
            ));

        let declaration = MemberTranslator::new()
            .translate_method(&method, OWNER, GenerateAs::Type)
            .unwrap();

        assert_eq!(declaration.name, "Function2");
        assert_eq!(declaration.return_type_name, "System.Void");
        assert_eq!(declaration.parameters[0].name, "b");
        assert_eq!(declaration.parameters[0].type_name, "System.Boolean?");
        assert_eq!(declaration.parameters[1].name, "o");
        assert_eq!(declaration.parameters[1].type_name, "System.Tuple<System.String, System.Int32>");
        assert!(declaration.attributes.public);
        assert!(declaration.attributes.is_final());
    }

    #[test]
    fn test_identity_methods_override() {
        let translator = MemberTranslator::new();
        for name in ["ToString", "GetHashCode", "Equals"] {
            let method = MethodDescriptor::new(name, TypeRef::object());
            let declaration = translator.translate_method(&method, OWNER, GenerateAs::Type).unwrap();
            assert_eq!(declaration.attributes.modifier, MemberModifier::Override, "{}", name);
        }

        let plain = MethodDescriptor::new("Dispose", TypeRef::void());
        let declaration = translator.translate_method(&plain, OWNER, GenerateAs::Type).unwrap();
        assert_eq!(declaration.attributes.modifier, MemberModifier::Final);
    }

    #[test]
    fn test_contract_members_never_override() {
        let method = MethodDescriptor::new("ToString", TypeRef::string());
        let declaration = MemberTranslator::new()
            .translate_method(&method, OWNER, GenerateAs::Contract)
            .unwrap();
        assert!(declaration.attributes.is_final());
    }

    #[test]
    fn test_custom_override_candidates() {
        let translator = MemberTranslator::with_override_candidates(["Describe"]);
        assert!(translator.is_override_candidate("Describe"));
        assert!(!translator.is_override_candidate("ToString"));

        let method = MethodDescriptor::new("ToString", TypeRef::string());
        let declaration = translator.translate_method(&method, OWNER, GenerateAs::Type).unwrap();
        assert!(declaration.attributes.is_final());
    }

    #[test]
    fn test_async_marker_only_on_wrapper() {
        let method = MethodDescriptor::new("LoadAsync", task_of_int()).asynchronous();
        let translator = MemberTranslator::new();

        let wrapper = translator.translate_method(&method, OWNER, GenerateAs::Type).unwrap();
        assert!(wrapper.is_async);
        assert_eq!(wrapper.return_type_name, "System.Threading.Tasks.Task<System.Int32>");

        let contract = translator.translate_method(&method, OWNER, GenerateAs::Contract).unwrap();
        assert!(!contract.is_async);
    }

    #[test]
    fn test_parameter_directions() {
        let method = MethodDescriptor::new("Function4", TypeRef::void())
            .with_parameter(ParameterDescriptor::out("x", TypeRef::int32()))
            .with_parameter(ParameterDescriptor::by_ref("s", TypeRef::string()))
            .with_parameter(ParameterDescriptor::new("o", TypeRef::object()));

        let declaration = MemberTranslator::new()
            .translate_method(&method, OWNER, GenerateAs::Type)
            .unwrap();

        let directions: Vec<ParameterDirection> = declaration.parameters.iter().map(|p| p.direction).collect();
        assert_eq!(
            directions,
            vec![ParameterDirection::Out, ParameterDirection::Ref, ParameterDirection::In]
        );
        assert_eq!(declaration.parameters[0].type_name, "System.Int32");
        assert_eq!(declaration.parameters[1].type_name, "System.String");
    }

    #[test]
    fn test_out_flag_without_by_ref_is_in() {
        let parameter = ParameterDescriptor {
            is_out: true,
            ..ParameterDescriptor::new("x", TypeRef::int32())
        };
        assert_eq!(parameter_direction(&parameter), ParameterDirection::In);
    }

    #[test]
    fn test_non_public_method_is_unsupported() {
        let method = MethodDescriptor::new("NotSupportedFunction", TypeRef::void()).non_public();
        let err = MemberTranslator::new()
            .translate_method(&method, OWNER, GenerateAs::Type)
            .unwrap_err();
        assert!(matches!(err, AutoWrapError::UnsupportedMember { ref member, .. } if member == "NotSupportedFunction"));
    }

    #[test]
    fn test_property_accessors() {
        let translator = MemberTranslator::new();

        let read_write = PropertyDescriptor::read_write("Property1", TypeRef::boolean());
        let declaration = translator.translate_property(&read_write, OWNER).unwrap();
        assert_eq!(declaration.type_name, "System.Boolean");
        assert!(declaration.has_get && declaration.has_set);
        assert!(declaration.attributes.public);

        let read_only = PropertyDescriptor::read_only("Property2", TypeRef::object());
        let declaration = translator.translate_property(&read_only, OWNER).unwrap();
        assert!(declaration.has_get);
        assert!(!declaration.has_set);

        let private_setter = PropertyDescriptor::read_only("Count", TypeRef::int32())
            .with_setter(Some(Accessibility::NonPublic));
        let declaration = translator.translate_property(&private_setter, OWNER).unwrap();
        assert!(!declaration.has_set);
    }

    #[test]
    fn test_indexer_parameters_are_in() {
        let indexer = PropertyDescriptor::read_write("Item", TypeRef::string())
            .with_index_parameter(ParameterDescriptor::new("index", TypeRef::int32()));

        let declaration = MemberTranslator::new().translate_property(&indexer, OWNER).unwrap();
        assert!(declaration.is_indexer());
        assert_eq!(declaration.index_parameters[0].direction, ParameterDirection::In);
        assert_eq!(declaration.index_parameters[0].type_name, "System.Int32");
    }

    #[test]
    fn test_non_public_property_is_unsupported() {
        let hidden = PropertyDescriptor::read_only("NotSupportedProperty", TypeRef::string())
            .with_getter(Some(Accessibility::NonPublic));
        let err = MemberTranslator::new().translate_property(&hidden, OWNER).unwrap_err();
        assert!(matches!(err, AutoWrapError::UnsupportedMember { .. }));
    }
}
