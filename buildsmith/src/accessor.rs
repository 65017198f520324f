//! Accessor resolution: finding a readable member that can supply a
//! constructor parameter's value from an existing instance.
//!
//! The search walks the inheritance chain with an explicit cursor:
//! declared instance methods first, then declared instance fields,
//! then the direct superclass. The first match wins.

use serde::Serialize;
use tracing::debug;

use crate::naming::capitalize;
use crate::types::{Parameter, Primitive, QualifiedName, TypeDef, TypeOracle, TypeRef};

/// The outcome of an accessor search for one parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Accessor {
    /// A readable member was found.
    Found {
        /// The member's name.
        name: String,
        /// Whether reading it uses call syntax (method vs field).
        call_syntax: bool,
        /// The type in the hierarchy declaring the member.
        owner: QualifiedName,
    },
    /// No readable member exists anywhere in the hierarchy.
    NotFound,
}

impl Accessor {
    /// The expression that reads the property, e.g. `getX()` or `x`,
    /// or `None` when no accessor was found.
    #[must_use]
    pub fn getter_expression(&self) -> Option<String> {
        match self {
            Self::Found {
                name, call_syntax, ..
            } => {
                if *call_syntax {
                    Some(format!("{name}()"))
                } else {
                    Some(name.clone())
                }
            }
            Self::NotFound => None,
        }
    }
}

/// Whether the parameter reads as a boolean for the `is`-prefix
/// convention.
fn is_boolean_like(parameter: &Parameter, oracle: &dyn TypeOracle) -> bool {
    parameter.ty.is_boolean()
        || oracle.is_assignable(&parameter.ty, &TypeRef::Primitive(Primitive::Boolean))
}

fn has_accessor_name(parameter: &Parameter, method_name: &str, oracle: &dyn TypeOracle) -> bool {
    let capitalized = capitalize(&parameter.name);
    method_name == parameter.name
        || method_name == format!("get{capitalized}")
        || (is_boolean_like(parameter, oracle) && method_name == format!("is{capitalized}"))
}

fn find_method(
    def: &TypeDef,
    parameter: &Parameter,
    same_package: bool,
    oracle: &dyn TypeOracle,
) -> Option<String> {
    def.methods
        .iter()
        .find(|method| {
            !method.is_static
                && method.visibility.readable_from(same_package)
                && oracle.is_assignable(&method.return_type, &parameter.ty)
                && has_accessor_name(parameter, &method.name, oracle)
        })
        .map(|method| method.name.clone())
}

fn find_field(
    def: &TypeDef,
    parameter: &Parameter,
    same_package: bool,
    oracle: &dyn TypeOracle,
) -> Option<String> {
    def.fields
        .iter()
        .find(|field| {
            !field.is_static
                && field.visibility.readable_from(same_package)
                && oracle.is_assignable(&field.ty, &parameter.ty)
                && field.name == parameter.name
        })
        .map(|field| field.name.clone())
}

/// Finds an accessor for `parameter` on `owner` or one of its
/// supertypes, as read from `caller_package`.
#[must_use]
pub fn resolve(
    parameter: &Parameter,
    owner: &QualifiedName,
    caller_package: &str,
    oracle: &dyn TypeOracle,
) -> Accessor {
    let mut current = Some(owner.clone());

    while let Some(type_name) = current {
        let Some(def) = oracle.definition(&type_name) else {
            break;
        };
        let same_package = def.name().package() == caller_package;

        if let Some(name) = find_method(def, parameter, same_package, oracle) {
            debug!(parameter = %parameter.name, method = %name, owner = %type_name, "accessor method found");
            return Accessor::Found {
                name,
                call_syntax: true,
                owner: type_name,
            };
        }
        if let Some(name) = find_field(def, parameter, same_package, oracle) {
            debug!(parameter = %parameter.name, field = %name, owner = %type_name, "accessor field found");
            return Accessor::Found {
                name,
                call_syntax: false,
                owner: type_name,
            };
        }

        current = def.superclass.clone();
    }

    debug!(parameter = %parameter.name, owner = %owner, "no accessor found");
    Accessor::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, Method, TypeDef, TypeUniverse, Visibility};

    fn int() -> TypeRef {
        TypeRef::Primitive(Primitive::Int)
    }

    fn point() -> QualifiedName {
        QualifiedName::top_level("com.acme", "Point")
    }

    #[test]
    fn method_beats_field_on_the_same_type() {
        let universe = TypeUniverse::new().with_type(
            TypeDef::class(point())
                .with_method(Method::new("getX", int()))
                .with_field(Field::new("x", int())),
        );

        let found = resolve(&Parameter::new("x", int()), &point(), "com.acme", &universe);
        assert_eq!(
            found,
            Accessor::Found {
                name: "getX".to_owned(),
                call_syntax: true,
                owner: point(),
            }
        );
        assert_eq!(found.getter_expression().as_deref(), Some("getX()"));
    }

    #[test]
    fn field_is_found_two_levels_up() {
        let base = QualifiedName::top_level("com.acme", "Base");
        let mid = QualifiedName::top_level("com.acme", "Mid");
        let universe = TypeUniverse::new()
            .with_type(TypeDef::class(point()).with_superclass(mid.clone()))
            .with_type(TypeDef::class(mid).with_superclass(base.clone()))
            .with_type(TypeDef::class(base.clone()).with_field(Field::new("x", int())));

        let found = resolve(&Parameter::new("x", int()), &point(), "com.acme", &universe);
        assert_eq!(
            found,
            Accessor::Found {
                name: "x".to_owned(),
                call_syntax: false,
                owner: base,
            }
        );
    }

    #[test]
    fn cross_package_reads_require_public_members() {
        let universe = TypeUniverse::new().with_type(
            TypeDef::class(point())
                .with_method(Method::new("getX", int()).with_visibility(Visibility::PackagePrivate))
                .with_field(Field::new("x", int()).with_visibility(Visibility::Protected)),
        );

        assert_eq!(
            resolve(&Parameter::new("x", int()), &point(), "com.other", &universe),
            Accessor::NotFound
        );
    }

    #[test]
    fn private_members_are_invisible_even_in_package() {
        let universe = TypeUniverse::new().with_type(
            TypeDef::class(point())
                .with_field(Field::new("x", int()).with_visibility(Visibility::Private)),
        );

        assert_eq!(
            resolve(&Parameter::new("x", int()), &point(), "com.acme", &universe),
            Accessor::NotFound
        );
    }

    #[test]
    fn is_prefix_applies_to_booleans_only() {
        let bool_ty = TypeRef::Primitive(Primitive::Boolean);
        let universe = TypeUniverse::new().with_type(
            TypeDef::class(point())
                .with_method(Method::new("isVisible", bool_ty.clone()))
                .with_method(Method::new("isX", int())),
        );

        assert_eq!(
            resolve(
                &Parameter::new("visible", bool_ty),
                &point(),
                "com.acme",
                &universe
            ),
            Accessor::Found {
                name: "isVisible".to_owned(),
                call_syntax: true,
                owner: point(),
            }
        );
        assert_eq!(
            resolve(&Parameter::new("x", int()), &point(), "com.acme", &universe),
            Accessor::NotFound
        );
    }

    #[test]
    fn static_members_are_skipped() {
        let universe = TypeUniverse::new().with_type(
            TypeDef::class(point())
                .with_method(Method::new("getX", int()).with_static(true))
                .with_field(Field::new("x", int()).with_static(true)),
        );

        assert_eq!(
            resolve(&Parameter::new("x", int()), &point(), "com.acme", &universe),
            Accessor::NotFound
        );
    }

    #[test]
    fn widened_return_types_count_when_registered() {
        let number = TypeRef::named(QualifiedName::top_level("java.lang", "Integer"));
        let mut universe = TypeUniverse::new();
        universe.insert(TypeDef::class(point()).with_method(Method::new("x", number.clone())));
        universe.allow_assignment(number, int());

        let found = resolve(&Parameter::new("x", int()), &point(), "com.acme", &universe);
        assert!(matches!(found, Accessor::Found { call_syntax: true, .. }));
    }
}
