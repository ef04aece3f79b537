//! Contract and wrapper generation
//!
//! Types are first registered in a [`TypeRegistry`], which fixes the names of
//! their generated wrapper and contract. The [`ContractGenerator`] and
//! [`TypeGenerator`] then turn each registered type into a structural
//! declaration, and [`CSharpRenderer`] writes those declarations out as source.
//!
//! ```no_run
//! use autowrap_codegen::{CodeGenerator, ForbiddenBaseTypes, GeneratorConfig, TypeRegistry};
//! use autowrap_core::AssemblyMetadata;
//!
//! # fn main() -> anyhow::Result<()> {
//! let assembly = AssemblyMetadata::from_file("Acme.metadata.json")?;
//! let mut registry = TypeRegistry::new();
//! registry.register_assembly(&assembly, &ForbiddenBaseTypes::default())?;
//!
//! let source = CodeGenerator::new(&GeneratorConfig::default()).generate_source(&registry)?;
//! println!("{}", source);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod contract;
pub mod declaration;
pub mod generator;
pub mod member;
pub mod naming;
pub mod options;
pub mod pragma;
pub mod registry;
pub mod render;
pub mod type_name;
pub mod wrapper;

pub use config::{ConfigError, GeneratorConfig};
pub use contract::ContractGenerator;
pub use declaration::*;
pub use generator::CodeGenerator;
pub use member::{GenerateAs, MemberTranslator};
pub use naming::{ContractNamingStrategy, DefaultNamingStrategy, FixedName, TypeNamingStrategy};
pub use options::{GeneratorOptions, GeneratorOptionsBuilder};
pub use pragma::PragmaWarnings;
pub use registry::{is_wrappable, ForbiddenBaseTypes, RegisteredType, TypeRegistry};
pub use render::{CSharpRenderer, CompilationUnit, Declaration};
pub use type_name::format_type_name;
pub use wrapper::TypeGenerator;
