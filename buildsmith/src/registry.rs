//! Short-name disambiguation for one generated file.
//!
//! The registry remembers every type referenced while one file's model
//! is assembled. A short name stays usable only while exactly one
//! qualified name has been seen for it; a second registration makes
//! every use of that short name fully qualified from then on, and
//! callers are expected to query immediately before printing a name.

use indexmap::{IndexMap, IndexSet};

use crate::types::{BoundKind, QualifiedName, TypeRef};

/// Tracks referenced types and decides short vs qualified rendering.
///
/// Scoped to exactly one output file; construct a fresh registry per
/// generated file.
#[derive(Debug, Default)]
pub struct TypeNameRegistry {
    seen: IndexMap<String, IndexSet<String>>,
}

impl TypeNameRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` under its short name and reports whether the
    /// short form is currently unambiguous.
    fn visit(&mut self, name: &QualifiedName) -> bool {
        let entry = self.seen.entry(name.simple().to_owned()).or_default();
        entry.insert(name.qualified());
        entry.len() == 1
    }

    fn render(&mut self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(primitive) => primitive.name().to_owned(),
            TypeRef::Named { name, args } => {
                let base = self.usage_name_of(name);
                if args.is_empty() {
                    base
                } else {
                    let rendered: Vec<String> =
                        args.iter().map(|arg| self.render(arg)).collect();
                    format!("{base}<{}>", rendered.join(", "))
                }
            }
            TypeRef::Array(component) => format!("{}[]", self.render(component)),
            TypeRef::Wildcard { bound: None } => "?".to_owned(),
            TypeRef::Wildcard {
                bound: Some((BoundKind::Extends, inner)),
            } => format!("? extends {}", self.render(inner)),
            TypeRef::Wildcard {
                bound: Some((BoundKind::Super, inner)),
            } => format!("? super {}", self.render(inner)),
        }
    }

    /// Registers every declared type referenced by `ty` without using
    /// the rendered name.
    pub fn register(&mut self, ty: &TypeRef) {
        self.render(ty);
    }

    /// Registers `ty` and returns the form safe to print at a use
    /// site: short names where unambiguous, qualified names otherwise.
    /// Nested structural parts (type arguments, array components,
    /// wildcard bounds) are rendered by the same rule.
    #[must_use]
    pub fn usage_name(&mut self, ty: &TypeRef) -> String {
        self.render(ty)
    }

    /// Registers a declared type by name and returns its usage form.
    #[must_use]
    pub fn usage_name_of(&mut self, name: &QualifiedName) -> String {
        if self.visit(name) {
            name.simple().to_owned()
        } else {
            name.qualified()
        }
    }

    /// The qualified names importable without qualification: those
    /// whose short name was never ambiguous within this file.
    #[must_use]
    pub fn safe_imports(&self) -> Vec<String> {
        self.seen
            .values()
            .filter(|qualified| qualified.len() == 1)
            .filter_map(|qualified| qualified.first().cloned())
            .collect()
    }
}
