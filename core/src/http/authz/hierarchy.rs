//! Static table of resource types, their supertypes and bypass markers.
//!
//! The table is declared once at startup, so bypass resolution never depends
//! on runtime introspection.
//!
//! # Example
//! ```
//! use actix_authz_core::http::authz::{ResourceDecl, ResourceType, TypeHierarchy};
//!
//! let hierarchy = TypeHierarchy::builder()
//!     .resource(ResourceDecl::new("CreativeCommonsResource").bypass().method("modifyMe"))
//!     .resource(ResourceDecl::new("MyPhoto").extends("CreativeCommonsResource").method("newWork"))
//!     .build()
//!     .unwrap();
//!
//! let chain: Vec<String> = hierarchy
//!     .ancestors(&ResourceType::new("MyPhoto"))
//!     .map(|ty| ty.name().to_string())
//!     .collect();
//! assert_eq!(chain, vec!["MyPhoto", "CreativeCommonsResource"]);
//! ```

use std::collections::{HashMap, HashSet};

use crate::http::authz::resource::{MethodRef, ResourceType};
use crate::http::error::AuthzError;

/// Declaration of one resource type.
#[derive(Clone, Debug)]
pub struct ResourceDecl {
    name: ResourceType,
    parent: Option<ResourceType>,
    bypass: bool,
    methods: Vec<(MethodRef, bool)>,
}

impl ResourceDecl {
    pub fn new(name: impl Into<ResourceType>) -> Self {
        ResourceDecl {
            name: name.into(),
            parent: None,
            bypass: false,
            methods: Vec::new(),
        }
    }

    /// Sets the direct supertype.
    pub fn extends(mut self, parent: impl Into<ResourceType>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Marks the whole type, and every subtype, as bypassing authorization.
    pub fn bypass(mut self) -> Self {
        self.bypass = true;
        self
    }

    /// Declares a handler method without a bypass marker.
    pub fn method(mut self, name: impl Into<MethodRef>) -> Self {
        self.methods.push((name.into(), false));
        self
    }

    /// Declares a handler method carrying the bypass marker.
    pub fn bypass_method(mut self, name: impl Into<MethodRef>) -> Self {
        self.methods.push((name.into(), true));
        self
    }
}

/// A resource type as stored in the table.
#[derive(Debug)]
pub struct TypeEntry {
    name: ResourceType,
    parent: Option<ResourceType>,
    bypass: bool,
    methods: HashMap<MethodRef, bool>,
}

impl TypeEntry {
    fn undeclared(name: &ResourceType) -> Self {
        TypeEntry {
            name: name.clone(),
            parent: None,
            bypass: false,
            methods: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.name()
    }

    pub fn parent(&self) -> Option<&ResourceType> {
        self.parent.as_ref()
    }

    /// Whether the type itself carries the bypass marker.
    pub fn has_bypass_marker(&self) -> bool {
        self.bypass
    }

    /// `Some(marked)` when this type declares `method`.
    pub fn declared_method(&self, method: &MethodRef) -> Option<bool> {
        self.methods.get(method).copied()
    }
}

/// Immutable, acyclic table of resource types.
#[derive(Debug, Default)]
pub struct TypeHierarchy {
    types: HashMap<ResourceType, TypeEntry>,
}

impl TypeHierarchy {
    pub fn builder() -> TypeHierarchyBuilder {
        TypeHierarchyBuilder::default()
    }

    /// Looks up a declared type.
    pub fn get(&self, ty: &ResourceType) -> Option<&TypeEntry> {
        self.types.get(ty)
    }

    /// Iterates over `ty` and then each of its supertypes, nearest first.
    ///
    /// An undeclared type yields a single entry without markers.
    pub fn ancestors<'a>(&'a self, ty: &ResourceType) -> Ancestors<'a> {
        let start = match self.types.get(ty) {
            Some(entry) => Ancestor::Declared(entry),
            None => Ancestor::Undeclared(TypeEntry::undeclared(ty)),
        };
        Ancestors {
            hierarchy: self,
            next: Some(start),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Iterator over a type and its supertypes. See [`TypeHierarchy::ancestors`].
pub struct Ancestors<'a> {
    hierarchy: &'a TypeHierarchy,
    next: Option<Ancestor<'a>>,
}

/// Item yielded by [`Ancestors`].
pub enum Ancestor<'a> {
    Declared(&'a TypeEntry),
    Undeclared(TypeEntry),
}

impl Ancestor<'_> {
    fn entry(&self) -> &TypeEntry {
        match self {
            Ancestor::Declared(entry) => entry,
            Ancestor::Undeclared(entry) => entry,
        }
    }

    pub fn name(&self) -> &str {
        self.entry().name()
    }

    pub fn has_bypass_marker(&self) -> bool {
        self.entry().has_bypass_marker()
    }

    pub fn declared_method(&self, method: &MethodRef) -> Option<bool> {
        self.entry().declared_method(method)
    }
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Ancestor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if let Ancestor::Declared(entry) = current {
            // Parents are checked to exist at build time.
            self.next = entry
                .parent
                .as_ref()
                .and_then(|parent| self.hierarchy.types.get(parent))
                .map(Ancestor::Declared);
        }
        Some(current)
    }
}

/// Collects [`ResourceDecl`]s and validates them into a [`TypeHierarchy`].
#[derive(Debug, Default)]
pub struct TypeHierarchyBuilder {
    decls: Vec<ResourceDecl>,
}

impl TypeHierarchyBuilder {
    pub fn resource(mut self, decl: ResourceDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Builds the table.
    ///
    /// # Errors
    /// `AuthzError::InvalidHierarchy` when a type is declared twice, extends
    /// an undeclared type, or takes part in an inheritance cycle.
    pub fn build(self) -> Result<TypeHierarchy, AuthzError> {
        let mut types = HashMap::with_capacity(self.decls.len());
        for decl in self.decls {
            if types.contains_key(&decl.name) {
                return Err(invalid(format!("type {} declared twice", decl.name)));
            }
            let entry = TypeEntry {
                name: decl.name.clone(),
                parent: decl.parent,
                bypass: decl.bypass,
                methods: decl.methods.into_iter().collect(),
            };
            types.insert(decl.name, entry);
        }

        for entry in types.values() {
            if let Some(parent) = &entry.parent {
                if !types.contains_key(parent) {
                    return Err(invalid(format!(
                        "type {} extends undeclared type {}",
                        entry.name, parent
                    )));
                }
            }
        }

        for start in types.keys() {
            let mut seen = HashSet::new();
            let mut current = Some(start);
            while let Some(ty) = current {
                if !seen.insert(ty) {
                    return Err(invalid(format!("inheritance cycle through type {}", ty)));
                }
                current = types.get(ty).and_then(|entry| entry.parent.as_ref());
            }
        }

        log::debug!("resource hierarchy built with {} types", types.len());
        Ok(TypeHierarchy { types })
    }
}

fn invalid(message: String) -> AuthzError {
    AuthzError::InvalidHierarchy { message }
}
