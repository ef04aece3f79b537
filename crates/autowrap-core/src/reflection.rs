//! Assembly metadata files and their discovery
//!
//! A metadata file is a JSON dump of an assembly's public type surface, as
//! produced by a reflection exporter. [`TypeMetadata`] is the concrete
//! [`TypeDescriptor`] backed by such a file.

use crate::metadata::{MemberDescriptor, TypeDescriptor, TypeKind, TypeRef};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File suffix recognised by [`MetadataDiscovery`]
pub const METADATA_FILE_SUFFIX: &str = ".metadata.json";

/// The exported type surface of one assembly
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AssemblyMetadata {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeMetadata>,
}

/// One exported type
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TypeMetadata {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub generic_arguments: Vec<TypeRef>,
    #[serde(default)]
    pub base_types: Vec<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

fn default_true() -> bool {
    true
}

impl TypeMetadata {
    /// A public, concrete class with no members
    pub fn class<N: Into<String>, T: Into<String>>(namespace: N, name: T) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            kind: TypeKind::Class,
            is_public: true,
            ..Self::default()
        }
    }

    pub fn with_member<M: Into<MemberDescriptor>>(mut self, member: M) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn with_base_type<S: Into<String>>(mut self, base_type: S) -> Self {
        self.base_types.push(base_type.into());
        self
    }

    pub fn with_interface<S: Into<String>>(mut self, interface: S) -> Self {
        self.interfaces.push(interface.into());
        self
    }
}

impl TypeDescriptor for TypeMetadata {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn kind(&self) -> TypeKind {
        self.kind
    }

    fn is_public(&self) -> bool {
        self.is_public
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn generic_arguments(&self) -> &[TypeRef] {
        &self.generic_arguments
    }

    fn base_types(&self) -> &[String] {
        &self.base_types
    }

    fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }
}

impl AssemblyMetadata {
    /// Parse assembly metadata from a JSON string
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).with_context(|| "Failed to parse assembly metadata JSON content")
    }

    /// Load assembly metadata from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metadata file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid metadata file: {}", path.display()))
    }

    /// Find a type by its definition name (`Namespace.Name`)
    pub fn find_type(&self, full_name: &str) -> Option<&TypeMetadata> {
        self.types.iter().find(|t| t.definition_name() == full_name)
    }

    /// All types as descriptors, in file order
    pub fn descriptors(&self) -> impl Iterator<Item = &dyn TypeDescriptor> {
        self.types.iter().map(|t| t as &dyn TypeDescriptor)
    }
}

/// Scans directories for assembly metadata files
#[derive(Debug, Clone, Default)]
pub struct MetadataDiscovery {
    search_paths: Vec<PathBuf>,
    discovered_files: HashMap<String, PathBuf>,
}

impl MetadataDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory to search for metadata files
    pub fn add_search_path<P: AsRef<Path>>(&mut self, path: P) {
        self.search_paths.push(path.as_ref().to_path_buf());
    }

    /// Scan all search paths and load every metadata file found
    ///
    /// Unparsable files and duplicate assembly names are skipped with a
    /// warning. Results are ordered by path.
    pub fn discover(&mut self) -> Result<Vec<AssemblyMetadata>> {
        self.discovered_files.clear();
        let mut assemblies = Vec::new();

        for search_path in &self.search_paths {
            if !search_path.exists() {
                log::warn!("Search path does not exist: {}", search_path.display());
                continue;
            }

            let files = Self::scan_directory(search_path)
                .with_context(|| format!("Failed to scan directory: {}", search_path.display()))?;

            for file_path in files {
                match AssemblyMetadata::from_file(&file_path) {
                    Ok(assembly) => {
                        if let Some(existing_path) = self.discovered_files.get(&assembly.name) {
                            log::warn!(
                                "Duplicate assembly metadata found: {} at {} and {}",
                                assembly.name,
                                existing_path.display(),
                                file_path.display()
                            );
                        } else {
                            self.discovered_files.insert(assembly.name.clone(), file_path);
                            assemblies.push(assembly);
                        }
                    }
                    Err(e) => {
                        log::warn!("Failed to parse metadata file {}: {:#}", file_path.display(), e);
                    }
                }
            }
        }

        log::info!("Discovered {} assembly metadata files", assemblies.len());
        Ok(assemblies)
    }

    /// Path of a discovered assembly by name
    pub fn assembly_path(&self, name: &str) -> Option<&PathBuf> {
        self.discovered_files.get(name)
    }

    fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            let is_metadata = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(METADATA_FILE_SUFFIX));

            if path.is_file() && is_metadata {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MethodDescriptor, PropertyDescriptor};

    const WIDGETS: &str = r#"{
        "name": "Acme.Widgets",
        "types": [
            {
                "name": "Widget",
                "namespace": "Acme",
                "members": [
                    { "member": "method", "name": "Spin", "return_type": { "kind": "named", "namespace": "System", "name": "Void" } },
                    { "member": "property", "name": "Size", "property_type": { "kind": "named", "namespace": "System", "name": "Int32" }, "getter": "public" }
                ]
            },
            { "name": "IGadget", "namespace": "Acme", "kind": "interface" }
        ]
    }"#;

    #[test]
    fn test_parse_assembly_metadata() {
        let assembly = AssemblyMetadata::parse(WIDGETS).unwrap();
        assert_eq!(assembly.name, "Acme.Widgets");
        assert_eq!(assembly.types.len(), 2);

        let widget = assembly.find_type("Acme.Widget").unwrap();
        assert!(widget.is_class());
        assert!(widget.is_public());
        assert_eq!(widget.members().len(), 2);
        assert_eq!(
            widget.members()[0],
            MemberDescriptor::Method(MethodDescriptor::new("Spin", TypeRef::void()))
        );
        assert_eq!(
            widget.members()[1],
            MemberDescriptor::Property(PropertyDescriptor::read_only("Size", TypeRef::int32()))
        );

        let gadget = assembly.find_type("Acme.IGadget").unwrap();
        assert!(!gadget.is_class());
        assert!(assembly.find_type("Acme.Missing").is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(AssemblyMetadata::parse("{ not json").is_err());
    }

    #[test]
    fn test_discovery_skips_duplicates_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();

        std::fs::write(dir.path().join("a.metadata.json"), WIDGETS).unwrap();
        std::fs::write(nested.join("b.metadata.json"), WIDGETS).unwrap();
        std::fs::write(dir.path().join("broken.metadata.json"), "{").unwrap();
        std::fs::write(dir.path().join("ignored.json"), WIDGETS).unwrap();

        let mut discovery = MetadataDiscovery::new();
        discovery.add_search_path(dir.path());
        discovery.add_search_path(dir.path().join("does-not-exist"));

        let assemblies = discovery.discover().unwrap();
        assert_eq!(assemblies.len(), 1);
        assert_eq!(
            discovery.assembly_path("Acme.Widgets"),
            Some(&dir.path().join("a.metadata.json"))
        );
    }

    #[test]
    fn test_type_ref_of_descriptor() {
        let widget = TypeMetadata::class("Acme", "Widget");
        assert_eq!(widget.type_ref(), TypeRef::named("Acme", "Widget"));
        assert_eq!(widget.definition_name(), "Acme.Widget");
        assert!(!widget.is_generic());
    }
}
