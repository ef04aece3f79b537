//! C# source rendering of declaration models
//!
//! A [`CompilationUnit`] collects contract and wrapper declarations under one
//! namespace; [`CSharpRenderer`] turns it into source text. Compiling that
//! text is left to the caller.

use crate::declaration::{
    ContractDeclarationModel, MemberDeclaration, MethodDeclaration, ParameterDeclaration, ParameterDirection,
    PropertyDeclaration, TypeDeclarationModel, Visibility,
};
use crate::pragma::PragmaWarnings;
use autowrap_core::{AutoWrapError, AutoWrapResult};
use serde::Serialize;

/// A single generated declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "declaration", rename_all = "snake_case")]
pub enum Declaration {
    Contract(ContractDeclarationModel),
    Type(TypeDeclarationModel),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Contract(contract) => &contract.name,
            Self::Type(wrapper) => &wrapper.name,
        }
    }
}

impl From<ContractDeclarationModel> for Declaration {
    fn from(contract: ContractDeclarationModel) -> Self {
        Self::Contract(contract)
    }
}

impl From<TypeDeclarationModel> for Declaration {
    fn from(wrapper: TypeDeclarationModel) -> Self {
        Self::Type(wrapper)
    }
}

/// Declarations sharing one namespace and one warning prefix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilationUnit {
    /// Empty means the global namespace
    pub namespace: String,
    pub pragma: PragmaWarnings,
    pub declarations: Vec<Declaration>,
}

impl CompilationUnit {
    pub fn new<S: Into<String>>(namespace: S) -> Self {
        Self {
            namespace: namespace.into(),
            pragma: PragmaWarnings::new(),
            declarations: Vec::new(),
        }
    }

    pub fn with_pragma(mut self, pragma: PragmaWarnings) -> Self {
        self.pragma = pragma;
        self
    }

    pub fn push<D: Into<Declaration>>(&mut self, declaration: D) {
        self.declarations.push(declaration.into());
    }

    /// Merge several units into one
    ///
    /// All units must share a namespace. Declarations keep their order and
    /// warning codes are combined without duplicates.
    pub fn merge<I>(units: I) -> AutoWrapResult<Self>
    where
        I: IntoIterator<Item = CompilationUnit>,
    {
        let mut units = units.into_iter();
        let mut merged = units
            .next()
            .ok_or_else(|| AutoWrapError::invalid_argument("units", "at least one compilation unit is required"))?;

        for unit in units {
            if unit.namespace != merged.namespace {
                return Err(AutoWrapError::invalid_argument(
                    "units",
                    format!(
                        "cannot merge namespace '{}' into '{}'",
                        unit.namespace, merged.namespace
                    ),
                ));
            }
            merged.pragma.extend(&unit.pragma);
            merged.declarations.extend(unit.declarations);
        }

        Ok(merged)
    }

    pub fn contracts(&self) -> impl Iterator<Item = &ContractDeclarationModel> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Contract(contract) => Some(contract),
            Declaration::Type(_) => None,
        })
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDeclarationModel> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Type(wrapper) => Some(wrapper),
            Declaration::Contract(_) => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Marker recognised by analyzers and IDEs as generated code
pub const AUTO_GENERATED_HEADER: &str = "// <auto-generated />";

const VOID_TYPE_NAME: &str = "System.Void";

/// Awaitable return types whose awaited result is empty
const EMPTY_TASK_TYPE_NAMES: &[&str] = &["System.Threading.Tasks.Task", "System.Threading.Tasks.ValueTask"];

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class", "const",
    "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event", "explicit", "extern",
    "false", "finally", "fixed", "float", "for", "foreach", "goto", "if", "implicit", "in", "int", "interface",
    "internal", "is", "lock", "long", "namespace", "new", "null", "object", "operator", "out", "override",
    "params", "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true", "try", "typeof",
    "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// Line buffer with brace-driven indentation
struct SourceWriter {
    lines: Vec<String>,
    depth: usize,
    indent: &'static str,
}

impl SourceWriter {
    fn new(indent: &'static str) -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
            indent,
        }
    }

    fn line<S: AsRef<str>>(&mut self, text: S) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", self.indent.repeat(self.depth), text));
        }
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn finish(self) -> String {
        let mut source = self.lines.join("\n");
        source.push('\n');
        source
    }
}

/// Renders compilation units as C# source
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpRenderer;

impl CSharpRenderer {
    const INDENT: &'static str = "    ";

    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, unit: &CompilationUnit) -> String {
        let mut out = SourceWriter::new(Self::INDENT);
        out.line(AUTO_GENERATED_HEADER);
        if !unit.pragma.is_empty() {
            out.line(unit.pragma.to_string());
        }
        out.blank();

        let scoped = !unit.namespace.is_empty();
        if scoped {
            out.line(format!("namespace {}", unit.namespace));
            out.open();
        }

        for (index, declaration) in unit.declarations.iter().enumerate() {
            if index > 0 {
                out.blank();
            }
            match declaration {
                Declaration::Contract(contract) => self.render_contract(&mut out, contract),
                Declaration::Type(wrapper) => self.render_type(&mut out, wrapper),
            }
        }

        if scoped {
            out.close();
        }
        out.finish()
    }

    /// Render a single contract on its own, without header or namespace
    pub fn render_contract_source(&self, contract: &ContractDeclarationModel) -> String {
        let mut out = SourceWriter::new(Self::INDENT);
        self.render_contract(&mut out, contract);
        out.finish()
    }

    /// Render a single wrapper on its own, without header or namespace
    pub fn render_type_source(&self, wrapper: &TypeDeclarationModel) -> String {
        let mut out = SourceWriter::new(Self::INDENT);
        self.render_type(&mut out, wrapper);
        out.finish()
    }

    fn render_contract(&self, out: &mut SourceWriter, contract: &ContractDeclarationModel) {
        out.line(format!("{} interface {}", visibility_keyword(contract.visibility), contract.name));
        out.open();
        for member in &contract.members {
            match member {
                MemberDeclaration::Method(method) => out.line(format!(
                    "{} {}({});",
                    return_type(&method.return_type_name),
                    escape_identifier(&method.name),
                    parameter_list(&method.parameters)
                )),
                MemberDeclaration::Property(property) => {
                    out.line(format!("{} {}", property_head(property), accessor_stubs(property)))
                }
            }
        }
        out.close();
    }

    fn render_type(&self, out: &mut SourceWriter, wrapper: &TypeDeclarationModel) {
        let field = &wrapper.wrapped_field;
        out.line(format!(
            "{} sealed class {} : {}",
            visibility_keyword(wrapper.visibility),
            wrapper.name,
            wrapper.implemented_contract_name
        ));
        out.open();

        let readonly = if field.is_readonly { " readonly" } else { "" };
        out.line(format!("private{} {} {};", readonly, field.type_name, field.name));
        out.blank();

        out.line(format!(
            "public {}({})",
            wrapper.name,
            parameter_list(&wrapper.constructor.parameters)
        ));
        out.open();
        for parameter in &wrapper.constructor.parameters {
            out.line(format!("{} = {};", field.name, escape_identifier(&parameter.name)));
        }
        out.close();

        for member in &wrapper.members {
            out.blank();
            match member {
                MemberDeclaration::Method(method) => self.render_forwarding_method(out, method, &field.name),
                MemberDeclaration::Property(property) => {
                    self.render_forwarding_property(out, property, &field.name)
                }
            }
        }

        if let Some(property) = &wrapper.wrapped_property {
            out.blank();
            out.line(format!("public {} {}", property.type_name, property.name));
            out.open();
            out.line(format!("get {{ return {}; }}", field.name));
            out.close();
        }

        out.close();
    }

    fn render_forwarding_method(&self, out: &mut SourceWriter, method: &MethodDeclaration, field: &str) {
        let mut modifiers = String::from("public");
        if method.attributes.is_override() {
            modifiers.push_str(" override");
        }
        if method.is_async {
            modifiers.push_str(" async");
        }

        out.line(format!(
            "{} {} {}({})",
            modifiers,
            return_type(&method.return_type_name),
            escape_identifier(&method.name),
            parameter_list(&method.parameters)
        ));
        out.open();

        let call = format!(
            "{}.{}({})",
            field,
            escape_identifier(&method.name),
            argument_list(&method.parameters)
        );
        let returns_nothing = if method.is_async {
            method.return_type_name == VOID_TYPE_NAME || EMPTY_TASK_TYPE_NAMES.contains(&method.return_type_name.as_str())
        } else {
            method.return_type_name == VOID_TYPE_NAME
        };
        let call = if method.is_async { format!("await {}", call) } else { call };

        if returns_nothing {
            out.line(format!("{};", call));
        } else {
            out.line(format!("return {};", call));
        }
        out.close();
    }

    fn render_forwarding_property(&self, out: &mut SourceWriter, property: &PropertyDeclaration, field: &str) {
        let modifiers = if property.attributes.is_override() {
            "public override"
        } else {
            "public"
        };
        out.line(format!("{} {}", modifiers, property_head(property)));
        out.open();

        let target = if property.is_indexer() {
            format!("{}[{}]", field, argument_list(&property.index_parameters))
        } else {
            format!("{}.{}", field, escape_identifier(&property.name))
        };
        if property.has_get {
            out.line(format!("get {{ return {}; }}", target));
        }
        if property.has_set {
            out.line(format!("set {{ {} = value; }}", target));
        }
        out.close();
    }
}

fn visibility_keyword(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public",
        Visibility::Internal => "internal",
    }
}

fn return_type(type_name: &str) -> &str {
    if type_name == VOID_TYPE_NAME {
        "void"
    } else {
        type_name
    }
}

/// Type and name of a property, or `this[..]` for an indexer
fn property_head(property: &PropertyDeclaration) -> String {
    if property.is_indexer() {
        format!("{} this[{}]", property.type_name, parameter_list(&property.index_parameters))
    } else {
        format!("{} {}", property.type_name, escape_identifier(&property.name))
    }
}

fn accessor_stubs(property: &PropertyDeclaration) -> String {
    match (property.has_get, property.has_set) {
        (true, true) => "{ get; set; }".to_string(),
        (true, false) => "{ get; }".to_string(),
        (false, true) => "{ set; }".to_string(),
        (false, false) => "{ }".to_string(),
    }
}

fn direction_prefix(direction: ParameterDirection) -> &'static str {
    match direction {
        ParameterDirection::In => "",
        ParameterDirection::Out => "out ",
        ParameterDirection::Ref => "ref ",
    }
}

fn parameter_list(parameters: &[ParameterDeclaration]) -> String {
    parameters
        .iter()
        .map(|p| format!("{}{} {}", direction_prefix(p.direction), p.type_name, escape_identifier(&p.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn argument_list(parameters: &[ParameterDeclaration]) -> String {
    parameters
        .iter()
        .map(|p| format!("{}{}", direction_prefix(p.direction), escape_identifier(&p.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prefix reserved words with `@` so they can be used as identifiers
pub fn escape_identifier(name: &str) -> String {
    if CSHARP_KEYWORDS.contains(&name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}
