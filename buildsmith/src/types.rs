//! Type-model vocabulary shared by every resolution engine.
//!
//! The core consumes already-resolved type information: the host hands
//! in [`TypeDef`] values through a read-only [`TypeOracle`] and the
//! pipeline never discovers types on its own. [`TypeUniverse`] is the
//! in-memory oracle used by hosts that hold the whole compilation unit
//! in memory, and by the test suites.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

/// A declared type's dotted package plus its chain of simple names.
///
/// Nested types keep the full enclosing chain, outermost first, so
/// `Outer.Inner` in package `com.acme` has segments `["Outer",
/// "Inner"]` and qualifies as `com.acme.Outer.Inner`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QualifiedName {
    package: String,
    segments: Vec<String>,
}

impl QualifiedName {
    /// Creates the name of a top-level type.
    pub fn top_level(package: impl Into<String>, simple: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            segments: vec![simple.into()],
        }
    }

    /// Creates the name of a type nested directly inside `self`.
    #[must_use]
    pub fn member(&self, simple: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(simple.into());
        Self {
            package: self.package.clone(),
            segments,
        }
    }

    /// The enclosing package (may be empty for the unnamed package).
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The simple name: the innermost segment.
    #[must_use]
    pub fn simple(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// The nesting chain of simple names, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The fully-qualified dotted form.
    #[must_use]
    pub fn qualified(&self) -> String {
        let path = self.segments.join(".");
        if self.package.is_empty() {
            path
        } else {
            format!("{}.{path}", self.package)
        }
    }

    /// The full simple name: nesting segments joined with `_`,
    /// outermost first. This is the form placeholder interpolation
    /// expands to.
    #[must_use]
    pub fn full_simple(&self) -> String {
        self.segments.join("_")
    }

    /// The name of the directly enclosing type, if this type is nested.
    #[must_use]
    pub fn enclosing(&self) -> Option<Self> {
        let mut segments = self.segments.clone();
        segments.pop();
        if segments.is_empty() {
            None
        } else {
            Some(Self {
                package: self.package.clone(),
                segments,
            })
        }
    }

    /// Whether this type is nested inside another type.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// The primitive kinds of the generated language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Primitive {
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `char`
    Char,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `void`
    Void,
}

impl Primitive {
    /// The bare keyword spelling of the primitive.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }
}

/// The direction of a wildcard bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BoundKind {
    /// An upper bound (`? extends T`).
    Extends,
    /// A lower bound (`? super T`).
    Super,
}

/// A reference to a type, as it appears in a parameter or return
/// position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeRef {
    /// A primitive type.
    Primitive(Primitive),
    /// A declared (class-like) type, possibly with type arguments.
    Named {
        /// The referenced type.
        name: QualifiedName,
        /// Type arguments, empty for a raw reference.
        args: Vec<TypeRef>,
    },
    /// An array of the component type.
    Array(Box<TypeRef>),
    /// A wildcard, optionally bounded.
    Wildcard {
        /// The bound, or `None` for the unbounded wildcard.
        bound: Option<(BoundKind, Box<TypeRef>)>,
    },
}

impl TypeRef {
    /// A raw reference to a declared type.
    #[must_use]
    pub const fn named(name: QualifiedName) -> Self {
        Self::Named {
            name,
            args: Vec::new(),
        }
    }

    /// A parameterized reference to a declared type.
    #[must_use]
    pub fn generic(name: QualifiedName, args: Vec<Self>) -> Self {
        Self::Named { name, args }
    }

    /// An array of `component`.
    #[must_use]
    pub fn array(component: Self) -> Self {
        Self::Array(Box::new(component))
    }

    /// The unbounded wildcard.
    #[must_use]
    pub const fn wildcard() -> Self {
        Self::Wildcard { bound: None }
    }

    /// An upper-bounded wildcard.
    #[must_use]
    pub fn wildcard_extends(bound: Self) -> Self {
        Self::Wildcard {
            bound: Some((BoundKind::Extends, Box::new(bound))),
        }
    }

    /// A lower-bounded wildcard.
    #[must_use]
    pub fn wildcard_super(bound: Self) -> Self {
        Self::Wildcard {
            bound: Some((BoundKind::Super, Box::new(bound))),
        }
    }

    /// Whether this is the primitive `boolean` type.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Primitive(Primitive::Boolean))
    }
}

/// Member and type visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Visibility {
    /// Visible everywhere.
    Public,
    /// Visible to the package and subtypes.
    Protected,
    /// Visible to the package only.
    PackagePrivate,
    /// Visible to the declaring type only.
    Private,
}

impl Visibility {
    /// Whether a member with this visibility can be read from a use
    /// site: same-package access requires "not private", cross-package
    /// access requires "public".
    #[must_use]
    pub const fn readable_from(self, same_package: bool) -> bool {
        if same_package {
            !matches!(self, Self::Private)
        } else {
            matches!(self, Self::Public)
        }
    }

    /// Whether this is private visibility.
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }
}

/// The kind of a declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    /// An ordinary class.
    Class,
    /// A record.
    Record,
    /// An interface.
    Interface,
    /// An enum type.
    Enum,
    /// An annotation type.
    Annotation,
}

/// One constructor or factory parameter: a name and its type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
    /// The parameter name, which doubles as the property name.
    pub name: String,
    /// The parameter type.
    pub ty: TypeRef,
}

impl Parameter {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A declared instance or static method, as the oracle reports it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    pub(crate) name: String,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) return_type: TypeRef,
}

impl Method {
    /// Creates a public instance method.
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            return_type,
        }
    }

    /// Overrides the method's visibility.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks the method static.
    #[must_use]
    pub const fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// A declared field, as the oracle reports it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) ty: TypeRef,
}

impl Field {
    /// Creates a public instance field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            ty,
        }
    }

    /// Overrides the field's visibility.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks the field static.
    #[must_use]
    pub const fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// A declared constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    pub(crate) visibility: Visibility,
    pub(crate) parameters: Vec<Parameter>,
}

impl Constructor {
    /// Creates a public constructor with the given parameters.
    #[must_use]
    pub const fn new(parameters: Vec<Parameter>) -> Self {
        Self {
            visibility: Visibility::Public,
            parameters,
        }
    }

    /// Overrides the constructor's visibility.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Everything the pipeline needs to know about one declared type.
///
/// Members are kept in declaration order; the resolution engines rely
/// on that order for their first-match-wins tie-breaks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
    pub(crate) name: QualifiedName,
    pub(crate) kind: TypeKind,
    pub(crate) visibility: Visibility,
    pub(crate) is_static: bool,
    pub(crate) is_abstract: bool,
    pub(crate) superclass: Option<QualifiedName>,
    pub(crate) constructors: Vec<Constructor>,
    pub(crate) methods: Vec<Method>,
    pub(crate) fields: Vec<Field>,
    pub(crate) components: Vec<Parameter>,
}

impl TypeDef {
    /// Creates a public type definition of the given kind with no
    /// members.
    #[must_use]
    pub const fn new(name: QualifiedName, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            superclass: None,
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Creates a public class definition.
    #[must_use]
    pub const fn class(name: QualifiedName) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// Creates a public record definition. The canonical constructor
    /// (matching the components in order) is declared automatically.
    #[must_use]
    pub fn record(name: QualifiedName, components: Vec<Parameter>) -> Self {
        let mut def = Self::new(name, TypeKind::Record);
        def.constructors.push(Constructor::new(components.clone()));
        def.components = components;
        def
    }

    /// The type's name.
    #[must_use]
    pub const fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Overrides the type's visibility.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks a nested type static.
    #[must_use]
    pub const fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Marks the type abstract.
    #[must_use]
    pub const fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Sets the direct superclass.
    #[must_use]
    pub fn with_superclass(mut self, superclass: QualifiedName) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Declares a constructor (after any already declared).
    #[must_use]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Declares a method (after any already declared).
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Declares a field (after any already declared).
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// Read-only host collaborator answering type queries.
///
/// The pipeline performs no discovery of its own; everything it knows
/// about the program comes through this trait.
pub trait TypeOracle {
    /// Looks up the definition of a declared type, if the host knows
    /// it.
    fn definition(&self, name: &QualifiedName) -> Option<&TypeDef>;

    /// Whether a value of type `from` can supply a position expecting
    /// `to`. The default is strict type identity.
    fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        from == to
    }
}

/// In-memory [`TypeOracle`] backed by a map of definitions.
///
/// Assignability is type identity plus any conversions the host
/// registers with [`TypeUniverse::allow_assignment`].
#[derive(Debug, Default)]
pub struct TypeUniverse {
    types: HashMap<QualifiedName, TypeDef>,
    conversions: HashSet<(TypeRef, TypeRef)>,
}

impl TypeUniverse {
    /// Creates an empty universe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type definition, replacing any previous definition of
    /// the same name.
    pub fn insert(&mut self, def: TypeDef) {
        self.types.insert(def.name.clone(), def);
    }

    /// Adds a type definition, builder-style.
    #[must_use]
    pub fn with_type(mut self, def: TypeDef) -> Self {
        self.insert(def);
        self
    }

    /// Registers an extra `from` → `to` assignability conversion
    /// (e.g. a boxing or widening conversion the host wants honoured).
    pub fn allow_assignment(&mut self, from: TypeRef, to: TypeRef) {
        self.conversions.insert((from, to));
    }
}

impl TypeOracle for TypeUniverse {
    fn definition(&self, name: &QualifiedName) -> Option<&TypeDef> {
        self.types.get(name)
    }

    fn is_assignable(&self, from: &TypeRef, to: &TypeRef) -> bool {
        from == to || self.conversions.contains(&(from.clone(), to.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_names_round_trip() {
        let outer = QualifiedName::top_level("com.acme", "Outer");
        let inner = outer.member("Inner");

        assert_eq!(inner.qualified(), "com.acme.Outer.Inner");
        assert_eq!(inner.simple(), "Inner");
        assert_eq!(inner.full_simple(), "Outer_Inner");
        assert!(inner.is_nested());
        assert_eq!(inner.enclosing(), Some(outer));
    }

    #[test]
    fn unnamed_package_omits_leading_dot() {
        let name = QualifiedName::top_level("", "Probe");
        assert_eq!(name.qualified(), "Probe");
        assert_eq!(name.enclosing(), None);
    }

    #[test]
    fn visibility_readability_rules() {
        assert!(Visibility::PackagePrivate.readable_from(true));
        assert!(!Visibility::PackagePrivate.readable_from(false));
        assert!(!Visibility::Private.readable_from(true));
        assert!(Visibility::Public.readable_from(false));
    }
}
