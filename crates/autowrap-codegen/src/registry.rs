//! Registry of types selected for wrapping
//!
//! Each registered original type is bound to the names its generated wrapper
//! and contract receive. Names are resolved once, at registration time, either
//! from explicit overrides or from the naming strategies.
//!
//! Mutation (`register*`, `unregister`) takes `&mut self`, so a registry that
//! is shared across threads is read-only by construction: fill it first, then
//! hand out shared references for generation.

use crate::naming::{ContractNamingStrategy, DefaultNamingStrategy, TypeNamingStrategy};
use crate::type_name::format_type_name;
use autowrap_core::{is_blank, AssemblyMetadata, AutoWrapError, AutoWrapResult, TypeDescriptor};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Base types whose subclasses are never wrapped during bulk registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenBaseTypes {
    names: HashSet<String>,
}

impl ForbiddenBaseTypes {
    /// Full names that are excluded unless configured otherwise
    pub const DEFAULT: &'static [&'static str] = &[
        "System.Runtime.InteropServices._Attribute",
        "System.Attribute",
    ];

    /// An empty set; nothing is forbidden
    pub fn none() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert<S: Into<String>>(&mut self, name: S) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the type is, derives from, or implements a forbidden type
    ///
    /// Closed generic types are checked through their generic definition.
    pub fn forbids(&self, candidate: &dyn TypeDescriptor) -> bool {
        if self.names.is_empty() {
            return false;
        }

        self.names.contains(&candidate.definition_name())
            || candidate.base_types().iter().any(|b| self.names.contains(b))
            || candidate.interfaces().iter().any(|i| self.names.contains(i))
    }
}

impl Default for ForbiddenBaseTypes {
    fn default() -> Self {
        Self::new(Self::DEFAULT.iter().copied())
    }
}

/// Whether a type may be picked up by bulk registration
///
/// Open generic definitions are skipped; their wrappers would reference type
/// parameters that nothing declares.
pub fn is_wrappable(candidate: &dyn TypeDescriptor, forbidden: &ForbiddenBaseTypes) -> bool {
    candidate.is_class()
        && candidate.is_public()
        && !candidate.is_abstract()
        && !candidate.is_generic_definition()
        && !forbidden.forbids(candidate)
}

/// An original type bound to its generated names
#[derive(Clone)]
pub struct RegisteredType<'t> {
    original: &'t dyn TypeDescriptor,
    key: String,
    display_name: String,
    type_name: String,
    contract_name: String,
}

impl<'t> RegisteredType<'t> {
    pub fn original(&self) -> &'t dyn TypeDescriptor {
        self.original
    }

    /// Fully qualified name of the original type, as written in source
    pub fn original_name(&self) -> &str {
        &self.display_name
    }

    /// Registry key: the raw definition name plus any generic arguments
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether `name` is this entry's wrapper or contract name
    pub fn uses_name(&self, name: &str) -> bool {
        self.type_name == name || self.contract_name == name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }
}

impl fmt::Debug for RegisteredType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredType")
            .field("original", &self.key)
            .field("display_name", &self.display_name)
            .field("type_name", &self.type_name)
            .field("contract_name", &self.contract_name)
            .finish()
    }
}

/// Registry of types to wrap, keyed by fully qualified original name
pub struct TypeRegistry<'t> {
    type_naming: Box<dyn TypeNamingStrategy>,
    contract_naming: Box<dyn ContractNamingStrategy>,
    types: BTreeMap<String, RegisteredType<'t>>,
}

impl<'t> TypeRegistry<'t> {
    /// A registry using [`DefaultNamingStrategy`] for both names
    pub fn new() -> Self {
        Self::with_naming_strategies(Box::new(DefaultNamingStrategy), Box::new(DefaultNamingStrategy))
    }

    pub fn with_naming_strategies(
        type_naming: Box<dyn TypeNamingStrategy>,
        contract_naming: Box<dyn ContractNamingStrategy>,
    ) -> Self {
        Self {
            type_naming,
            contract_naming,
            types: BTreeMap::new(),
        }
    }

    /// Replace the wrapper naming strategy, keeping the contract strategy
    pub fn with_type_naming(mut self, strategy: Box<dyn TypeNamingStrategy>) -> Self {
        self.type_naming = strategy;
        self
    }

    /// Replace the contract naming strategy, keeping the wrapper strategy
    pub fn with_contract_naming(mut self, strategy: Box<dyn ContractNamingStrategy>) -> Self {
        self.contract_naming = strategy;
        self
    }

    /// Register a type, replacing any earlier registration of it
    ///
    /// A provided override must not be blank. Names without an override come
    /// from the naming strategies, each invoked once. A name already bound to
    /// a different type fails with [`AutoWrapError::InvalidName`].
    pub fn register(
        &mut self,
        original: &'t dyn TypeDescriptor,
        type_name: Option<&str>,
        contract_name: Option<&str>,
    ) -> AutoWrapResult<&RegisteredType<'t>> {
        let entry = self.resolve(original, type_name, contract_name)?;
        Ok(self.insert(entry))
    }

    /// Register every eligible type from a scanned set
    ///
    /// Types that are not public concrete classes, that are open generic
    /// definitions, or that derive from a forbidden base type, are skipped.
    /// All names are resolved and checked for clashes, within the batch too,
    /// before the registry is touched, so a naming failure leaves it unchanged.
    /// Returns the number of types registered.
    pub fn register_all<I>(&mut self, types: I, forbidden: &ForbiddenBaseTypes) -> AutoWrapResult<usize>
    where
        I: IntoIterator<Item = &'t dyn TypeDescriptor>,
    {
        let mut seen = 0usize;
        let mut entries: Vec<RegisteredType<'t>> = Vec::new();

        for candidate in types {
            seen += 1;
            if !is_wrappable(candidate, forbidden) {
                log::debug!("Skipping ineligible type: {}", candidate.definition_name());
                continue;
            }
            let entry = self.resolve(candidate, None, None)?;
            check_unique(&entry, &entries)?;
            entries.push(entry);
        }

        let registered = entries.len();
        for entry in entries {
            self.insert(entry);
        }

        log::info!("Registered {} of {} scanned types", registered, seen);
        Ok(registered)
    }

    /// Register every eligible type of an assembly
    pub fn register_assembly(
        &mut self,
        assembly: &'t AssemblyMetadata,
        forbidden: &ForbiddenBaseTypes,
    ) -> AutoWrapResult<usize> {
        log::info!("Registering types from assembly: {}", assembly.name);
        self.register_all(assembly.descriptors(), forbidden)
    }

    /// Remove a type; returns whether it was registered
    pub fn unregister(&mut self, original: &dyn TypeDescriptor) -> bool {
        let key = type_key(original);
        let removed = self.types.remove(&key).is_some();
        if removed {
            log::debug!("Unregistered {}", key);
        }
        removed
    }

    pub fn is_registered(&self, original: &dyn TypeDescriptor) -> bool {
        self.types.contains_key(&type_key(original))
    }

    /// Whether any registration uses `name` as its wrapper or contract name
    pub fn is_registered_name(&self, name: &str) -> bool {
        self.types.values().any(|entry| entry.uses_name(name))
    }

    pub fn entry(&self, original: &dyn TypeDescriptor) -> AutoWrapResult<&RegisteredType<'t>> {
        let key = type_key(original);
        self.types
            .get(&key)
            .ok_or_else(|| AutoWrapError::not_found(format!("registered type '{}'", key)))
    }

    pub fn type_name_for(&self, original: &dyn TypeDescriptor) -> AutoWrapResult<&str> {
        self.entry(original).map(RegisteredType::type_name)
    }

    pub fn contract_name_for(&self, original: &dyn TypeDescriptor) -> AutoWrapResult<&str> {
        self.entry(original).map(RegisteredType::contract_name)
    }

    /// Wrapper name registered alongside the given contract name
    pub fn type_name_for_contract(&self, contract_name: &str) -> AutoWrapResult<&str> {
        self.types
            .values()
            .find(|entry| entry.contract_name == contract_name)
            .map(RegisteredType::type_name)
            .ok_or_else(|| AutoWrapError::not_found(format!("contract '{}'", contract_name)))
    }

    /// Registered originals, ordered by fully qualified name
    pub fn registered_types(&self) -> impl Iterator<Item = &'t dyn TypeDescriptor> + '_ {
        self.types.values().map(RegisteredType::original)
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegisteredType<'t>> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn resolve(
        &self,
        original: &'t dyn TypeDescriptor,
        type_name: Option<&str>,
        contract_name: Option<&str>,
    ) -> AutoWrapResult<RegisteredType<'t>> {
        if is_blank(original.name()) {
            return Err(AutoWrapError::invalid_argument("type", "type descriptor has no name"));
        }

        let key = type_key(original);

        let type_name = match type_name {
            Some(name) if is_blank(name) => {
                return Err(AutoWrapError::invalid_argument(
                    "type_name",
                    "override name must not be empty or whitespace",
                ))
            }
            Some(name) => name.to_string(),
            None => checked_name(&key, self.type_naming.type_name_for(original))?,
        };

        let contract_name = match contract_name {
            Some(name) if is_blank(name) => {
                return Err(AutoWrapError::invalid_argument(
                    "contract_name",
                    "override name must not be empty or whitespace",
                ))
            }
            Some(name) => name.to_string(),
            None => checked_name(&key, self.contract_naming.contract_name_for(original))?,
        };

        let entry = RegisteredType {
            original,
            display_name: format_type_name(&original.type_ref()),
            key,
            type_name,
            contract_name,
        };
        check_unique(&entry, self.types.values())?;
        Ok(entry)
    }

    fn insert(&mut self, entry: RegisteredType<'t>) -> &RegisteredType<'t> {
        log::debug!(
            "Registered {} as {} : {}",
            entry.key,
            entry.type_name,
            entry.contract_name
        );

        let key = entry.key.clone();
        self.types.insert(key.clone(), entry);
        &self.types[&key]
    }
}

impl Default for TypeRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, 't> IntoIterator for &'a TypeRegistry<'t> {
    type Item = &'a RegisteredType<'t>;
    type IntoIter = std::collections::btree_map::Values<'a, String, RegisteredType<'t>>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.values()
    }
}

/// `Outer+Inner` and `Outer.Inner`, or `Box` and `` Box`1 ``, get distinct keys
fn type_key(original: &dyn TypeDescriptor) -> String {
    let definition = original.definition_name();
    if !original.is_generic() {
        return definition;
    }

    let arguments: Vec<String> = original.generic_arguments().iter().map(format_type_name).collect();
    format!("{}[{}]", definition, arguments.join(", "))
}

/// Fail when the entry's names collide with each other or with an entry of
/// another type; an entry may rebind its own names
fn check_unique<'a, 't: 'a, I>(entry: &RegisteredType<'t>, others: I) -> AutoWrapResult<()>
where
    I: IntoIterator<Item = &'a RegisteredType<'t>>,
{
    if entry.type_name == entry.contract_name {
        return Err(AutoWrapError::invalid_name(&entry.key, entry.contract_name.as_str()));
    }

    for other in others.into_iter().filter(|other| other.key != entry.key) {
        for name in [&entry.type_name, &entry.contract_name] {
            if other.uses_name(name) {
                log::warn!("Name {} of {} is already bound to {}", name, entry.key, other.key);
                return Err(AutoWrapError::invalid_name(&entry.key, name.as_str()));
            }
        }
    }
    Ok(())
}

fn checked_name(type_name: &str, produced: String) -> AutoWrapResult<String> {
    if is_blank(&produced) {
        return Err(AutoWrapError::invalid_name(type_name, produced));
    }
    Ok(produced)
}
