//! Shared fixtures for the buildsmith test suites.
//!
//! Builds the small type universes the unit and integration tests keep
//! reaching for: a `Point` class with readable fields, its record
//! twin, and a factory holder type.

use buildsmith::Declaration;
use buildsmith::types::{
    Constructor, Field, Method, Parameter, Primitive, QualifiedName, TypeDef, TypeRef,
    TypeUniverse,
};

/// The primitive `int` type.
#[must_use]
pub fn int() -> TypeRef {
    TypeRef::Primitive(Primitive::Int)
}

/// The primitive `boolean` type.
#[must_use]
pub fn boolean() -> TypeRef {
    TypeRef::Primitive(Primitive::Boolean)
}

/// The `java.lang.String` reference type.
#[must_use]
pub fn string() -> TypeRef {
    TypeRef::named(QualifiedName::top_level("java.lang", "String"))
}

/// The fixture target type `com.acme.Point`.
#[must_use]
pub fn point_name() -> QualifiedName {
    QualifiedName::top_level("com.acme", "Point")
}

/// A `Point` class with an `(int x, int y)` constructor and public
/// `x`/`y` fields, so strict copy-factory assembly succeeds.
#[must_use]
pub fn point_class() -> TypeDef {
    TypeDef::class(point_name())
        .with_constructor(Constructor::new(vec![
            Parameter::new("x", int()),
            Parameter::new("y", int()),
        ]))
        .with_field(Field::new("x", int()))
        .with_field(Field::new("y", int()))
}

/// A universe holding only [`point_class`].
#[must_use]
pub fn point_universe() -> TypeUniverse {
    TypeUniverse::new().with_type(point_class())
}

/// The annotated-class declaration for [`point_class`].
#[must_use]
pub fn point_declaration() -> Declaration {
    Declaration::annotated_class(point_name())
}

/// A record `com.acme.Span(int from, int to)` whose canonical
/// constructor and component accessor methods are declared.
#[must_use]
pub fn span_record() -> TypeDef {
    TypeDef::record(
        QualifiedName::top_level("com.acme", "Span"),
        vec![
            Parameter::new("from", int()),
            Parameter::new("to", int()),
        ],
    )
    .with_method(Method::new("from", int()))
    .with_method(Method::new("to", int()))
}

/// A `com.acme.Points` holder type for factory-method declarations.
#[must_use]
pub fn points_holder() -> QualifiedName {
    QualifiedName::top_level("com.acme", "Points")
}
