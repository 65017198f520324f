//! The annotated declaration: the program element a builder is
//! generated for.

use std::fmt;

use serde::Serialize;

use crate::options::CopyFactoryMode;
use crate::types::{Parameter, QualifiedName, TypeRef, Visibility};

/// The kind of program element carrying the builder annotation.
///
/// Only classes, records, constructors and methods are eligible; the
/// remaining kinds exist so the validation chain has something
/// concrete to reject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DeclarationKind {
    /// An ordinary class.
    Class,
    /// A record.
    Record,
    /// A constructor.
    Constructor,
    /// A (factory) method.
    Method,
    /// An interface.
    Interface,
    /// An enum type.
    Enum,
    /// An annotation type.
    Annotation,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Class => "class",
            Self::Record => "record",
            Self::Constructor => "constructor",
            Self::Method => "method",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
        };
        f.write_str(label)
    }
}

/// The per-declaration option values, as written on the annotation.
///
/// Every field is optional; unset knobs fall through to tool-wide
/// arguments and then to the built-in defaults during option
/// resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuilderSpec {
    /// Explicit generated-class name (template form allowed).
    pub class_name: Option<String>,
    /// Explicit setter-name prefix (may be empty for bare setters).
    pub setter_prefix: Option<String>,
    /// Explicit build-method name.
    pub build_method_name: Option<String>,
    /// Explicit factory-method name.
    pub factory_method_name: Option<String>,
    /// Explicit copy-factory generation mode.
    pub copy_factory: Option<CopyFactoryMode>,
    /// Explicit copy-factory method name.
    pub copy_factory_method_name: Option<String>,
}

/// One annotated program element, as handed in by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// What kind of element carries the annotation.
    pub kind: DeclarationKind,
    /// The element's own name: the simple type name for classes and
    /// records, the method name for factory methods, and the declaring
    /// type's simple name for constructors.
    pub name: String,
    /// The enclosing package.
    pub package: String,
    /// The owning type: the annotated type itself for classes and
    /// records, the declaring type for constructors and methods.
    pub owner: QualifiedName,
    /// The element's declared visibility.
    pub visibility: Visibility,
    /// Whether the element is static.
    pub is_static: bool,
    /// Ordered parameters, for constructor and method declarations.
    pub parameters: Vec<Parameter>,
    /// The return type, for method declarations.
    pub return_type: Option<TypeRef>,
    /// The annotation's option values.
    pub spec: BuilderSpec,
}

impl Declaration {
    fn on_type(kind: DeclarationKind, owner: QualifiedName) -> Self {
        Self {
            kind,
            name: owner.simple().to_owned(),
            package: owner.package().to_owned(),
            owner,
            visibility: Visibility::Public,
            is_static: false,
            parameters: Vec::new(),
            return_type: None,
            spec: BuilderSpec::default(),
        }
    }

    /// An annotated class.
    #[must_use]
    pub fn annotated_class(owner: QualifiedName) -> Self {
        Self::on_type(DeclarationKind::Class, owner)
    }

    /// An annotated record.
    #[must_use]
    pub fn annotated_record(owner: QualifiedName) -> Self {
        Self::on_type(DeclarationKind::Record, owner)
    }

    /// An annotated constructor of `owner`.
    #[must_use]
    pub fn annotated_constructor(owner: QualifiedName, parameters: Vec<Parameter>) -> Self {
        let mut declaration = Self::on_type(DeclarationKind::Constructor, owner);
        declaration.parameters = parameters;
        declaration
    }

    /// An annotated static factory method declared on `owner`.
    #[must_use]
    pub fn annotated_factory(
        owner: QualifiedName,
        name: impl Into<String>,
        parameters: Vec<Parameter>,
        return_type: TypeRef,
    ) -> Self {
        let mut declaration = Self::on_type(DeclarationKind::Method, owner);
        declaration.name = name.into();
        declaration.is_static = true;
        declaration.parameters = parameters;
        declaration.return_type = Some(return_type);
        declaration
    }

    /// Replaces the annotation's option values, builder-style.
    #[must_use]
    pub fn with_spec(mut self, spec: BuilderSpec) -> Self {
        self.spec = spec;
        self
    }

    /// A human-readable handle for diagnostics, e.g.
    /// `class com.acme.Point` or `method com.acme.Points.of`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            DeclarationKind::Method => format!("{} {}.{}", self.kind, self.owner, self.name),
            _ => format!("{} {}", self.kind, self.owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;

    #[test]
    fn class_declaration_inherits_owner_package() {
        let decl = Declaration::annotated_class(QualifiedName::top_level("com.acme", "Point"));
        assert_eq!(decl.package, "com.acme");
        assert_eq!(decl.name, "Point");
        assert_eq!(decl.describe(), "class com.acme.Point");
    }

    #[test]
    fn factory_declaration_describes_method() {
        let owner = QualifiedName::top_level("com.acme", "Points");
        let decl = Declaration::annotated_factory(
            owner,
            "of",
            vec![Parameter::new("x", TypeRef::Primitive(Primitive::Int))],
            TypeRef::named(QualifiedName::top_level("com.acme", "Point")),
        );
        assert!(decl.is_static);
        assert_eq!(decl.describe(), "method com.acme.Points.of");
    }
}
