//! Structural declarations produced by the generators
//!
//! These are plain values: language-neutral descriptions of the contract and
//! wrapper to be rendered. Renderers consume them; nothing here knows about
//! source text.

use serde::Serialize;

/// Visibility of a generated type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    /// Visible only inside the assembly the generated code is compiled into
    #[default]
    Internal,
}

impl Visibility {
    pub fn from_public_flag(public: bool) -> Self {
        if public {
            Self::Public
        } else {
            Self::Internal
        }
    }
}

/// How an argument is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterDirection {
    In,
    Out,
    Ref,
}

/// Whether a member overrides an inherited one or is sealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberModifier {
    Final,
    Override,
}

/// Member attributes; every generated member is public
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MemberAttributes {
    pub public: bool,
    pub modifier: MemberModifier,
}

impl MemberAttributes {
    pub fn public_final() -> Self {
        Self {
            public: true,
            modifier: MemberModifier::Final,
        }
    }

    pub fn public_override() -> Self {
        Self {
            public: true,
            modifier: MemberModifier::Override,
        }
    }

    pub fn is_override(&self) -> bool {
        self.modifier == MemberModifier::Override
    }

    pub fn is_final(&self) -> bool {
        self.modifier == MemberModifier::Final
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDeclaration {
    pub name: String,
    pub type_name: String,
    pub direction: ParameterDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub attributes: MemberAttributes,
    pub parameters: Vec<ParameterDeclaration>,
    pub return_type_name: String,
    /// Only ever set on wrapper members
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDeclaration {
    pub name: String,
    pub attributes: MemberAttributes,
    pub type_name: String,
    pub has_get: bool,
    pub has_set: bool,
    pub index_parameters: Vec<ParameterDeclaration>,
}

impl PropertyDeclaration {
    pub fn is_indexer(&self) -> bool {
        !self.index_parameters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberDeclaration {
    Method(MethodDeclaration),
    Property(PropertyDeclaration),
}

impl MemberDeclaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Method(method) => &method.name,
            Self::Property(property) => &property.name,
        }
    }

    pub fn attributes(&self) -> MemberAttributes {
        match self {
            Self::Method(method) => method.attributes,
            Self::Property(property) => property.attributes,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDeclaration> {
        match self {
            Self::Method(method) => Some(method),
            Self::Property(_) => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDeclaration> {
        match self {
            Self::Property(property) => Some(property),
            Self::Method(_) => None,
        }
    }
}

/// The private, read-only field holding the wrapped instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDeclaration {
    pub name: String,
    pub type_name: String,
    pub is_readonly: bool,
}

/// The wrapper constructor; takes the instance to wrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorDeclaration {
    pub parameters: Vec<ParameterDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractDeclarationModel {
    pub name: String,
    pub visibility: Visibility,
    /// Fully qualified name of the original type
    pub original_type_name: String,
    pub members: Vec<MemberDeclaration>,
}

impl ContractDeclarationModel {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDeclarationModel {
    pub name: String,
    pub visibility: Visibility,
    pub implemented_contract_name: String,
    /// Fully qualified name of the original type
    pub wrapped_field_type_name: String,
    pub wrapped_field: FieldDeclaration,
    pub constructor: ConstructorDeclaration,
    /// Forwarding members, in the original type's declaration order
    pub members: Vec<MemberDeclaration>,
    /// Getter returning the wrapped instance itself, when enabled
    pub wrapped_property: Option<PropertyDeclaration>,
}

impl TypeDeclarationModel {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.members.iter().filter_map(MemberDeclaration::as_method)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.members.iter().filter_map(MemberDeclaration::as_property)
    }
}
