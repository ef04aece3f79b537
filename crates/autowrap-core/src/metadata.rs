//! Type metadata consumed by the generators
//!
//! The generators never look at a live type system. They read a small,
//! read-only surface: a [`TypeDescriptor`] per original type and the
//! [`MemberDescriptor`]s it declares. Any host (a metadata file, a test
//! double, a real reflection bridge) can provide it.

use serde::{Deserialize, Serialize};

/// Reference to a type as it appears in a member signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A named type, optionally closed over generic arguments
    Named {
        #[serde(default)]
        namespace: Option<String>,
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        generic_arguments: Vec<TypeRef>,
    },
    /// A nullable value type (`T?`)
    Nullable { underlying: Box<TypeRef> },
    /// A single or multi-dimensional array
    Array {
        element: Box<TypeRef>,
        #[serde(default = "default_array_rank")]
        rank: u32,
    },
    /// A by-reference type, as used by `out` and `ref` parameters
    ByRef { element: Box<TypeRef> },
    /// An open generic parameter such as `T`
    GenericParameter { name: String },
}

fn default_array_rank() -> u32 {
    1
}

impl TypeRef {
    /// A named type in the given namespace
    pub fn named<N: Into<String>, T: Into<String>>(namespace: N, name: T) -> Self {
        Self::Named {
            namespace: Some(namespace.into()),
            name: name.into(),
            generic_arguments: Vec::new(),
        }
    }

    /// A named type closed over the given generic arguments
    pub fn generic<N, T>(namespace: N, name: T, arguments: Vec<TypeRef>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        Self::Named {
            namespace: Some(namespace.into()),
            name: name.into(),
            generic_arguments: arguments,
        }
    }

    /// An open generic parameter
    pub fn generic_parameter<S: Into<String>>(name: S) -> Self {
        Self::GenericParameter { name: name.into() }
    }

    pub fn void() -> Self {
        Self::named("System", "Void")
    }

    pub fn object() -> Self {
        Self::named("System", "Object")
    }

    pub fn string() -> Self {
        Self::named("System", "String")
    }

    pub fn boolean() -> Self {
        Self::named("System", "Boolean")
    }

    pub fn int32() -> Self {
        Self::named("System", "Int32")
    }

    /// Wrap this type as `T?`
    pub fn nullable(self) -> Self {
        Self::Nullable {
            underlying: Box::new(self),
        }
    }

    /// Wrap this type as a single-dimensional array
    pub fn array(self) -> Self {
        self.array_of_rank(1)
    }

    /// Wrap this type as an array of the given rank
    pub fn array_of_rank(self, rank: u32) -> Self {
        Self::Array {
            element: Box::new(self),
            rank: rank.max(1),
        }
    }

    /// Wrap this type as a by-reference type
    pub fn by_ref(self) -> Self {
        Self::ByRef {
            element: Box::new(self),
        }
    }

    pub fn is_by_ref(&self) -> bool {
        matches!(self, Self::ByRef { .. })
    }

    /// The referenced type with any by-reference wrapper removed
    pub fn dereferenced(&self) -> &TypeRef {
        match self {
            Self::ByRef { element } => element.dereferenced(),
            other => other,
        }
    }

    /// Whether an open generic parameter appears anywhere in this type
    pub fn has_generic_parameters(&self) -> bool {
        match self {
            Self::Named { generic_arguments, .. } => generic_arguments.iter().any(TypeRef::has_generic_parameters),
            Self::Nullable { underlying } => underlying.has_generic_parameters(),
            Self::Array { element, .. } | Self::ByRef { element } => element.has_generic_parameters(),
            Self::GenericParameter { .. } => true,
        }
    }

    /// Whether this is `System.Void`
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            Self::Named { namespace: Some(ns), name, generic_arguments }
                if ns == "System" && name == "Void" && generic_arguments.is_empty()
        )
    }
}

/// Accessibility of a member or accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Public,
    NonPublic,
}

impl Accessibility {
    pub fn is_public(self) -> bool {
        self == Self::Public
    }
}

/// A single method or indexer parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub parameter_type: TypeRef,
    /// Set by the host for by-reference parameters declared `out`
    #[serde(default)]
    pub is_out: bool,
}

impl ParameterDescriptor {
    /// A by-value parameter
    pub fn new<S: Into<String>>(name: S, parameter_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            is_out: false,
        }
    }

    /// A by-reference parameter declared `ref`
    pub fn by_ref<S: Into<String>>(name: S, element_type: TypeRef) -> Self {
        Self::new(name, element_type.by_ref())
    }

    /// A by-reference parameter declared `out`
    pub fn out<S: Into<String>>(name: S, element_type: TypeRef) -> Self {
        Self {
            is_out: true,
            ..Self::by_ref(name, element_type)
        }
    }

    pub fn is_by_ref(&self) -> bool {
        self.parameter_type.is_by_ref()
    }
}

/// Metadata for a single method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: TypeRef,
    /// Whether the method is implemented as an asynchronous state machine
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    /// Compiler-generated names such as property accessors and operators
    #[serde(default)]
    pub is_special_name: bool,
}

impl MethodDescriptor {
    /// A public instance method with no parameters
    pub fn new<S: Into<String>>(name: S, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
            is_async: false,
            accessibility: Accessibility::Public,
            is_static: false,
            is_special_name: false,
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn non_public(mut self) -> Self {
        self.accessibility = Accessibility::NonPublic;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn is_public(&self) -> bool {
        self.accessibility.is_public()
    }
}

/// Metadata for a single property or indexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub property_type: TypeRef,
    /// Accessibility of the getter, `None` when there is no getter
    #[serde(default)]
    pub getter: Option<Accessibility>,
    /// Accessibility of the setter, `None` when there is no setter
    #[serde(default)]
    pub setter: Option<Accessibility>,
    #[serde(default)]
    pub index_parameters: Vec<ParameterDescriptor>,
    #[serde(default)]
    pub is_static: bool,
}

impl PropertyDescriptor {
    /// A property with a public getter and no setter
    pub fn read_only<S: Into<String>>(name: S, property_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            property_type,
            getter: Some(Accessibility::Public),
            setter: None,
            index_parameters: Vec::new(),
            is_static: false,
        }
    }

    /// A property with a public getter and a public setter
    pub fn read_write<S: Into<String>>(name: S, property_type: TypeRef) -> Self {
        Self {
            setter: Some(Accessibility::Public),
            ..Self::read_only(name, property_type)
        }
    }

    pub fn with_getter(mut self, accessibility: Option<Accessibility>) -> Self {
        self.getter = accessibility;
        self
    }

    pub fn with_setter(mut self, accessibility: Option<Accessibility>) -> Self {
        self.setter = accessibility;
        self
    }

    pub fn with_index_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.index_parameters.push(parameter);
        self
    }

    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    pub fn has_public_getter(&self) -> bool {
        self.getter.is_some_and(Accessibility::is_public)
    }

    pub fn has_public_setter(&self) -> bool {
        self.setter.is_some_and(Accessibility::is_public)
    }

    /// A property is public when at least one accessor is
    pub fn is_public(&self) -> bool {
        self.has_public_getter() || self.has_public_setter()
    }

    pub fn is_indexer(&self) -> bool {
        !self.index_parameters.is_empty()
    }
}

/// A method or property declared on a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberDescriptor {
    Method(MethodDescriptor),
    Property(PropertyDescriptor),
}

impl MemberDescriptor {
    pub fn name(&self) -> &str {
        match self {
            Self::Method(method) => &method.name,
            Self::Property(property) => &property.name,
        }
    }

    /// Public, non-static, and not compiler-generated
    pub fn is_public_instance(&self) -> bool {
        match self {
            Self::Method(method) => method.is_public() && !method.is_static && !method.is_special_name,
            Self::Property(property) => property.is_public() && !property.is_static,
        }
    }
}

impl From<MethodDescriptor> for MemberDescriptor {
    fn from(method: MethodDescriptor) -> Self {
        Self::Method(method)
    }
}

impl From<PropertyDescriptor> for MemberDescriptor {
    fn from(property: PropertyDescriptor) -> Self {
        Self::Property(property)
    }
}

/// Kind of a type as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

/// Read-only view of an original type
///
/// Implementations must report members in declaration order; the generators
/// rely on that order for reproducible output.
pub trait TypeDescriptor {
    /// Simple name, possibly with a CLR arity suffix (`` Pair`2 ``)
    fn name(&self) -> &str;

    fn namespace(&self) -> Option<&str>;

    fn kind(&self) -> TypeKind;

    fn is_public(&self) -> bool;

    fn is_abstract(&self) -> bool;

    /// Generic arguments when this is a closed generic type
    fn generic_arguments(&self) -> &[TypeRef];

    /// Full names of base types, nearest first
    fn base_types(&self) -> &[String];

    /// Full names of implemented interfaces
    fn interfaces(&self) -> &[String];

    /// Declared and inherited members in declaration order
    fn members(&self) -> &[MemberDescriptor];

    fn is_class(&self) -> bool {
        self.kind() == TypeKind::Class
    }

    fn is_generic(&self) -> bool {
        !self.generic_arguments().is_empty()
    }

    /// Whether this is an open generic definition such as `` Box`1<T> ``
    fn is_generic_definition(&self) -> bool {
        self.generic_arguments().iter().any(TypeRef::has_generic_parameters)
    }

    /// Full name of the generic type definition, or of the type itself when
    /// it is not generic
    fn definition_name(&self) -> String {
        match self.namespace() {
            Some(namespace) if !namespace.is_empty() => format!("{}.{}", namespace, self.name()),
            _ => self.name().to_string(),
        }
    }

    /// A reference to this type for use in signatures
    fn type_ref(&self) -> TypeRef {
        TypeRef::Named {
            namespace: self.namespace().map(str::to_string),
            name: self.name().to_string(),
            generic_arguments: self.generic_arguments().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dereferenced_strips_by_ref() {
        let by_ref = TypeRef::int32().by_ref();
        assert!(by_ref.is_by_ref());
        assert_eq!(by_ref.dereferenced(), &TypeRef::int32());
        assert_eq!(TypeRef::string().dereferenced(), &TypeRef::string());
    }

    #[test]
    fn test_generic_parameters_are_found_when_nested() {
        let open = TypeRef::generic(
            "System.Collections.Generic",
            "List`1",
            vec![TypeRef::generic_parameter("T").array()],
        );
        assert!(open.has_generic_parameters());
        assert!(TypeRef::generic_parameter("T").nullable().by_ref().has_generic_parameters());

        let closed = TypeRef::generic("System", "Tuple`2", vec![TypeRef::string(), TypeRef::int32()]);
        assert!(!closed.has_generic_parameters());
    }

    #[test]
    fn test_parameter_constructors() {
        let out = ParameterDescriptor::out("result", TypeRef::int32());
        assert!(out.is_out);
        assert!(out.is_by_ref());

        let by_ref = ParameterDescriptor::by_ref("value", TypeRef::string());
        assert!(!by_ref.is_out);
        assert!(by_ref.is_by_ref());

        assert!(!ParameterDescriptor::new("x", TypeRef::int32()).is_by_ref());
    }

    #[test]
    fn test_property_accessor_publicity() {
        let private_setter = PropertyDescriptor::read_only("Count", TypeRef::int32())
            .with_setter(Some(Accessibility::NonPublic));
        assert!(private_setter.can_write());
        assert!(!private_setter.has_public_setter());
        assert!(private_setter.is_public());

        let hidden = PropertyDescriptor::read_only("Secret", TypeRef::string())
            .with_getter(Some(Accessibility::NonPublic));
        assert!(!hidden.is_public());
    }

    #[test]
    fn test_public_instance_filter() {
        let members: Vec<MemberDescriptor> = vec![
            MethodDescriptor::new("Run", TypeRef::void()).into(),
            MethodDescriptor::new("Create", TypeRef::object()).as_static().into(),
            MethodDescriptor::new("Hidden", TypeRef::void()).non_public().into(),
            PropertyDescriptor::read_only("Name", TypeRef::string()).into(),
        ];

        let names: Vec<&str> = members
            .iter()
            .filter(|m| m.is_public_instance())
            .map(MemberDescriptor::name)
            .collect();
        assert_eq!(names, vec!["Run", "Name"]);
    }

    #[test]
    fn test_type_ref_deserializes_from_json() {
        let json = r#"{
            "kind": "named",
            "namespace": "System.Collections.Generic",
            "name": "IEnumerable`1",
            "generic_arguments": [
                { "kind": "nullable", "underlying": { "kind": "named", "namespace": "System", "name": "Int32" } }
            ]
        }"#;

        let parsed: TypeRef = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            TypeRef::generic(
                "System.Collections.Generic",
                "IEnumerable`1",
                vec![TypeRef::int32().nullable()]
            )
        );
    }

    #[test]
    fn test_is_void() {
        assert!(TypeRef::void().is_void());
        assert!(!TypeRef::object().is_void());
    }
}
